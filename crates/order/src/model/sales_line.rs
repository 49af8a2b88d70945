use sqlx::FromRow;

/// One order line of a revenue-eligible order, joined with its product.
#[derive(Debug, Clone, FromRow)]
pub struct SalesLine {
    pub order_id: i32,
    pub product_id: i32,
    pub product_name: String,
    pub category: Option<String>,
    pub catalog_price: i64,
    pub quantity: i32,
    pub unit_price: i64,
}

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct OrderItem {
    pub id: i32,
    pub order_id: i32,
    pub product_id: i32,
    pub quantity: i32,
    /// Unit price snapshot taken when the line was written.
    pub price: i64,
    pub created_at: NaiveDateTime,
}

impl OrderItem {
    pub fn line_total(&self) -> i64 {
        self.price * i64::from(self.quantity)
    }
}

#[derive(Debug, Clone, FromRow)]
pub struct OrderItemWithProduct {
    #[sqlx(flatten)]
    pub item: OrderItem,
    pub product_name: String,
}

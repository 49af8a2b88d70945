use crate::model::status::OrderStatus;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Order {
    pub id: i32,
    pub customer_name: String,
    pub phone: Option<String>,
    pub total: i64,
    #[sqlx(try_from = "String")]
    pub status: OrderStatus,
    pub created_by: Option<i32>,
    pub created_at: NaiveDateTime,
    pub updated_at: Option<NaiveDateTime>,
}

/// Listing row: an order plus how many line items it has.
#[derive(Debug, Clone, FromRow)]
pub struct OrderWithItemCount {
    #[sqlx(flatten)]
    pub order: Order,
    pub item_count: i64,
}

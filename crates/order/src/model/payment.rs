use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Payment {
    pub id: i32,
    pub order_id: i32,
    pub amount: i64,
    pub payment_method: String,
    pub paid_by: Option<i32>,
    pub paid_at: NaiveDateTime,
}

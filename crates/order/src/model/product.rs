use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Catalog reference data as seen by the order core.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Product {
    pub id: i32,
    pub name: String,
    pub category: Option<String>,
    pub price: i64,
    pub is_active: bool,
}

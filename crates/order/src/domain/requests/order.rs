use crate::model::status::OrderStatus;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::{Validate, ValidationError};

fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank").with_message("must not be blank".into()));
    }
    Ok(())
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, IntoParams)]
pub struct FindAllOrder {
    #[serde(default)]
    pub search: String,

    #[serde(default = "default_page")]
    #[validate(range(min = 1))]
    pub page: i32,

    #[serde(default = "default_page_size")]
    #[validate(range(min = 1, max = 100))]
    pub page_size: i32,

    /// Optional exact status filter.
    #[serde(default)]
    pub status: Option<String>,
}

fn default_page() -> i32 {
    1
}

fn default_page_size() -> i32 {
    10
}

impl Default for FindAllOrder {
    fn default() -> Self {
        Self {
            search: String::new(),
            page: default_page(),
            page_size: default_page_size(),
            status: None,
        }
    }
}

/// Upper bounds per line and per order. An order tops out at 10^13 đồng,
/// so report sums over any realistic window stay far inside `i64`.
pub const MAX_ITEM_QUANTITY: i32 = 1_000;
pub const MAX_UNIT_PRICE: i64 = 100_000_000;
pub const MAX_ORDER_ITEMS: u64 = 100;

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct OrderItemRequest {
    /// Existence and availability are checked against the catalog.
    pub product_id: i32,

    #[validate(range(
        min = 1,
        max = MAX_ITEM_QUANTITY,
        message = "quantity must be between 1 and 1000"
    ))]
    pub quantity: i32,

    /// Unit price charged on this order; kept as a snapshot.
    #[serde(alias = "price")]
    #[validate(range(
        min = 1,
        max = MAX_UNIT_PRICE,
        message = "unit price must be between 1 and 100000000"
    ))]
    pub unit_price: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateOrderRequest {
    #[validate(
        length(max = 100),
        custom(function = "not_blank", message = "customer name must not be blank")
    )]
    pub customer_name: String,

    #[validate(length(max = 30))]
    pub phone: Option<String>,

    #[validate(
        length(min = 1, max = MAX_ORDER_ITEMS, message = "an order needs between 1 and 100 items"),
        nested
    )]
    pub items: Vec<OrderItemRequest>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct UpdateOrderRequest {
    #[serde(default)]
    pub order_id: i32,

    #[validate(
        length(max = 100),
        custom(function = "not_blank", message = "customer name must not be blank")
    )]
    pub customer_name: String,

    #[validate(length(max = 30))]
    pub phone: Option<String>,

    /// Raw status; validated against the lifecycle by the service.
    pub status: Option<String>,

    #[validate(
        length(min = 1, max = MAX_ORDER_ITEMS, message = "an order needs between 1 and 100 items"),
        nested
    )]
    pub items: Vec<OrderItemRequest>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct UpdateOrderStatusRequest {
    pub status: String,
}

#[derive(Debug, Clone)]
pub struct OrderItemRecord {
    pub product_id: i32,
    pub quantity: i32,
    pub unit_price: i64,
}

impl From<&OrderItemRequest> for OrderItemRecord {
    fn from(value: &OrderItemRequest) -> Self {
        Self {
            product_id: value.product_id,
            quantity: value.quantity,
            unit_price: value.unit_price,
        }
    }
}

#[derive(Debug, Clone)]
pub struct CreateOrderRecordRequest {
    pub customer_name: String,
    pub phone: Option<String>,
    pub total: i64,
    pub created_by: Option<i32>,
    pub items: Vec<OrderItemRecord>,
}

#[derive(Debug, Clone)]
pub struct UpdateOrderRecordRequest {
    pub order_id: i32,
    pub customer_name: String,
    pub phone: Option<String>,
    pub status: Option<OrderStatus>,
    pub total: i64,
    pub items: Vec<OrderItemRecord>,
}

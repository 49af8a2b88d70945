use crate::model::{
    order::{Order as OrderModel, OrderWithItemCount},
    order_item::OrderItemWithProduct,
    status::OrderStatus,
};
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Serialize, Deserialize, ToSchema, Clone)]
pub struct OrderResponse {
    pub id: i32,
    pub customer_name: String,
    pub phone: Option<String>,
    pub total: i64,
    pub status: OrderStatus,
    pub created_by: Option<i32>,
    pub created_at: NaiveDateTime,
    pub updated_at: Option<NaiveDateTime>,
}

impl From<OrderModel> for OrderResponse {
    fn from(value: OrderModel) -> Self {
        OrderResponse {
            id: value.id,
            customer_name: value.customer_name,
            phone: value.phone,
            total: value.total,
            status: value.status,
            created_by: value.created_by,
            created_at: value.created_at,
            updated_at: value.updated_at,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema, Clone)]
pub struct OrderListItemResponse {
    #[serde(flatten)]
    pub order: OrderResponse,
    pub item_count: i64,
}

impl From<OrderWithItemCount> for OrderListItemResponse {
    fn from(value: OrderWithItemCount) -> Self {
        Self {
            order: value.order.into(),
            item_count: value.item_count,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema, Clone)]
pub struct OrderItemResponse {
    pub id: i32,
    pub product_id: i32,
    pub product_name: String,
    pub quantity: i32,
    pub unit_price: i64,
    pub line_total: i64,
}

impl From<OrderItemWithProduct> for OrderItemResponse {
    fn from(value: OrderItemWithProduct) -> Self {
        OrderItemResponse {
            id: value.item.id,
            product_id: value.item.product_id,
            product_name: value.product_name,
            quantity: value.item.quantity,
            unit_price: value.item.price,
            line_total: value.item.line_total(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema, Clone)]
pub struct OrderDetailResponse {
    #[serde(flatten)]
    pub order: OrderResponse,
    pub items: Vec<OrderItemResponse>,
}

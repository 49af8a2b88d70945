use crate::domain::{
    auth::AuthContext,
    requests::order::{CreateOrderRequest, UpdateOrderRequest, UpdateOrderStatusRequest},
    response::{api::ApiResponse, order::OrderResponse},
};
use anyhow::Result;
use async_trait::async_trait;
use shared::errors::ServiceError;
use std::sync::Arc;

pub type DynOrderCommandService = Arc<dyn OrderCommandServiceTrait + Send + Sync>;

#[async_trait]
pub trait OrderCommandServiceTrait {
    async fn create_order(
        &self,
        auth: &AuthContext,
        req: &CreateOrderRequest,
    ) -> Result<ApiResponse<OrderResponse>, ServiceError>;
    async fn update_order(
        &self,
        auth: &AuthContext,
        req: &UpdateOrderRequest,
    ) -> Result<ApiResponse<OrderResponse>, ServiceError>;
    async fn update_status(
        &self,
        auth: &AuthContext,
        order_id: i32,
        req: &UpdateOrderStatusRequest,
    ) -> Result<ApiResponse<OrderResponse>, ServiceError>;
    async fn delete_order(
        &self,
        auth: &AuthContext,
        order_id: i32,
    ) -> Result<ApiResponse<()>, ServiceError>;
}

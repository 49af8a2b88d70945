use crate::domain::{
    auth::AuthContext,
    requests::order::FindAllOrder,
    response::{
        api::{ApiResponse, ApiResponsePagination},
        order::{OrderDetailResponse, OrderListItemResponse},
    },
};
use anyhow::Result;
use async_trait::async_trait;
use shared::errors::ServiceError;
use std::sync::Arc;

pub type DynOrderQueryService = Arc<dyn OrderQueryServiceTrait + Send + Sync>;

#[async_trait]
pub trait OrderQueryServiceTrait {
    async fn find_all(
        &self,
        auth: &AuthContext,
        req: &FindAllOrder,
    ) -> Result<ApiResponsePagination<Vec<OrderListItemResponse>>, ServiceError>;
    async fn find_by_id(
        &self,
        auth: &AuthContext,
        id: i32,
    ) -> Result<ApiResponse<OrderDetailResponse>, ServiceError>;
}

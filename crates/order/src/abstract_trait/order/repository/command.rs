use crate::{
    domain::requests::order::{CreateOrderRecordRequest, UpdateOrderRecordRequest},
    model::{order::Order as OrderModel, status::OrderStatus},
};
use anyhow::Result;
use async_trait::async_trait;
use shared::errors::RepositoryError;
use std::sync::Arc;

pub type DynOrderCommandRepository = Arc<dyn OrderCommandRepositoryTrait + Send + Sync>;

/// Every method is one atomic unit: either all of its writes land or none do.
#[async_trait]
pub trait OrderCommandRepositoryTrait {
    /// Inserts a `pending` order and its lines. Fails with
    /// `ReferenceNotFound` when any product is missing or inactive.
    async fn create_order(
        &self,
        req: &CreateOrderRecordRequest,
    ) -> Result<OrderModel, RepositoryError>;

    /// Rewrites the order header and swaps its whole item set.
    async fn replace_order(
        &self,
        req: &UpdateOrderRecordRequest,
    ) -> Result<OrderModel, RepositoryError>;

    async fn update_status(
        &self,
        order_id: i32,
        status: OrderStatus,
    ) -> Result<OrderModel, RepositoryError>;

    async fn delete_order(&self, order_id: i32) -> Result<(), RepositoryError>;
}

use anyhow::Result;
use async_trait::async_trait;
use shared::errors::RepositoryError;
use std::{collections::HashMap, sync::Arc};

pub type DynPaymentLedger = Arc<dyn PaymentLedgerTrait + Send + Sync>;

#[async_trait]
pub trait PaymentLedgerTrait {
    /// Settled amount per order; orders without a payment are absent.
    async fn revenue_for(&self, order_ids: &[i32]) -> Result<HashMap<i32, i64>, RepositoryError>;
}

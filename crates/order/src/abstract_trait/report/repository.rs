use crate::{
    model::{order::Order as OrderModel, sales_line::SalesLine},
    reporting::DateRange,
};
use anyhow::Result;
use async_trait::async_trait;
use shared::errors::RepositoryError;
use std::sync::Arc;

pub type DynReportRepository = Arc<dyn ReportRepositoryTrait + Send + Sync>;

/// Read-only access to committed order history.
#[async_trait]
pub trait ReportRepositoryTrait {
    /// Orders of any status created within `range`.
    async fn find_orders_in_range(
        &self,
        range: DateRange,
    ) -> Result<Vec<OrderModel>, RepositoryError>;

    /// Lines of revenue-eligible orders created within `range`, in
    /// insertion order.
    async fn find_sales_lines_in_range(
        &self,
        range: DateRange,
    ) -> Result<Vec<SalesLine>, RepositoryError>;
}

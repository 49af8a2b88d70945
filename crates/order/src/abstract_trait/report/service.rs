use crate::domain::{
    auth::AuthContext,
    requests::report::{ExportQuery, ReportQuery, TopProductsQuery},
    response::{
        api::ApiResponse,
        report::{ReportExport, ReportResponse, SummaryResponse, TopProductResponse},
    },
};
use anyhow::Result;
use async_trait::async_trait;
use shared::errors::ServiceError;
use std::sync::Arc;

pub type DynReportService = Arc<dyn ReportServiceTrait + Send + Sync>;

#[async_trait]
pub trait ReportServiceTrait {
    async fn get_report(
        &self,
        auth: &AuthContext,
        req: &ReportQuery,
    ) -> Result<ApiResponse<ReportResponse>, ServiceError>;
    async fn get_summary(
        &self,
        auth: &AuthContext,
        req: &ReportQuery,
    ) -> Result<ApiResponse<SummaryResponse>, ServiceError>;
    async fn get_top_products(
        &self,
        auth: &AuthContext,
        req: &TopProductsQuery,
    ) -> Result<ApiResponse<Vec<TopProductResponse>>, ServiceError>;
    async fn export_report(
        &self,
        auth: &AuthContext,
        req: &ExportQuery,
    ) -> Result<ReportExport, ServiceError>;
}

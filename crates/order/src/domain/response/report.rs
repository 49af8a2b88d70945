use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Headline figures for one period window.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize, ToSchema)]
pub struct PeriodSummary {
    pub total_orders: i64,
    pub total_revenue: i64,
    pub avg_order_value: f64,
    pub success_rate: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize, ToSchema)]
pub struct GrowthRates {
    pub revenue_growth: f64,
    pub orders_growth: f64,
    pub avg_growth: f64,
    pub success_growth: f64,
}

/// Three parallel, ascending series ready for a chart.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, ToSchema)]
pub struct ChartSeries {
    pub labels: Vec<String>,
    pub revenues: Vec<i64>,
    pub orders: Vec<i64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct TableRow {
    pub date: String,
    pub total_orders: i64,
    pub revenue: i64,
    pub avg_order: f64,
    pub completed: i64,
    pub cancelled: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ReportResponse {
    pub period: String,
    #[serde(flatten)]
    pub summary: PeriodSummary,
    #[serde(flatten)]
    pub growth: GrowthRates,
    pub chart_data: ChartSeries,
    pub table_data: Vec<TableRow>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct SummaryResponse {
    pub period: String,
    #[serde(flatten)]
    pub summary: PeriodSummary,
    pub unique_customers: i64,
    pub pending_orders: i64,
    pub processing_orders: i64,
    pub completed_orders: i64,
    pub cancelled_orders: i64,
    /// Amount actually settled in the payment ledger for orders in the window.
    pub paid_revenue: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct TopProductResponse {
    pub product_id: i32,
    pub name: String,
    pub category: String,
    pub catalog_price: i64,
    pub order_count: i64,
    pub total_quantity: i64,
    pub total_revenue: i64,
}

/// A rendered export file.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportExport {
    pub file_name: String,
    pub content_type: &'static str,
    pub bytes: Vec<u8>,
}

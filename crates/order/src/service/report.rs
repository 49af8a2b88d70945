use crate::{
    abstract_trait::report::{DynPaymentLedger, DynReportRepository, ReportServiceTrait},
    clock::DynClock,
    domain::{
        auth::AuthContext,
        requests::report::{ExportQuery, ReportQuery, TopProductsQuery},
        response::{
            api::ApiResponse,
            report::{ReportExport, ReportResponse, SummaryResponse, TopProductResponse},
        },
    },
    reporting::{self, ExportFormat, Period},
    service::auth_attributes,
};
use async_trait::async_trait;
use opentelemetry::KeyValue;
use chrono::NaiveDate;
use prometheus_client::registry::Registry;
use shared::{
    errors::ServiceError,
    utils::{Method, Observer},
};
use tracing::{error, info};

pub const DEFAULT_TOP_LIMIT: usize = 10;
pub const MAX_TOP_LIMIT: usize = 100;

pub struct ReportServiceDeps {
    pub reports: DynReportRepository,
    pub payments: DynPaymentLedger,
    pub clock: DynClock,
}

/// Computes every figure fresh from committed orders.
#[derive(Clone)]
pub struct ReportService {
    reports: DynReportRepository,
    payments: DynPaymentLedger,
    clock: DynClock,
    observer: Observer,
}

impl ReportService {
    pub fn new(deps: ReportServiceDeps, registry: &mut Registry) -> Self {
        let ReportServiceDeps {
            reports,
            payments,
            clock,
        } = deps;

        Self {
            reports,
            payments,
            clock,
            observer: Observer::new("report-service", registry),
        }
    }

    fn attributes(operation: &'static str, period: Period, auth: &AuthContext) -> Vec<KeyValue> {
        let mut attributes = vec![
            KeyValue::new("component", "report"),
            KeyValue::new("operation", operation),
            KeyValue::new("report.period", period.as_str()),
        ];
        attributes.extend(auth_attributes(auth));
        attributes
    }
}

fn resolve_period(
    name: &str,
    start: Option<NaiveDate>,
    end: Option<NaiveDate>,
) -> Result<Period, ServiceError> {
    Period::resolve(name, start, end).map_err(|e| {
        error!("❌ Rejected report window: {e}");
        ServiceError::Validation(vec![e.to_string()])
    })
}

/// Non-positive limits fall back to the default; large ones are capped.
fn top_limit(requested: i64) -> usize {
    if requested <= 0 {
        DEFAULT_TOP_LIMIT
    } else {
        usize::try_from(requested).map_or(MAX_TOP_LIMIT, |n| n.min(MAX_TOP_LIMIT))
    }
}

#[async_trait]
impl ReportServiceTrait for ReportService {
    async fn get_report(
        &self,
        auth: &AuthContext,
        req: &ReportQuery,
    ) -> Result<ApiResponse<ReportResponse>, ServiceError> {
        let period = resolve_period(&req.period, req.start_date, req.end_date)?;
        info!("📊 Building {} report", period);

        let tracing_ctx = self
            .observer
            .start("get_report", Self::attributes("report", period, auth));

        let result = async {
            let now = self.clock.now();
            let current = self.reports.find_orders_in_range(period.range(now)).await?;
            let previous = self
                .reports
                .find_orders_in_range(period.previous_range(now))
                .await?;

            let summary = reporting::summarize(&current);
            let baseline = reporting::summarize(&previous);

            Ok::<_, ServiceError>(ApiResponse::success(
                "Report generated successfully",
                ReportResponse {
                    period: period.as_str().to_string(),
                    summary,
                    growth: reporting::growth_rates(&summary, &baseline),
                    chart_data: reporting::chart_series(&current, period),
                    table_data: reporting::table_rows(&current, period),
                },
            ))
        }
        .await;

        self.observer
            .finish(&tracing_ctx, Method::Get, result, "Report generated")
            .await
    }

    async fn get_summary(
        &self,
        auth: &AuthContext,
        req: &ReportQuery,
    ) -> Result<ApiResponse<SummaryResponse>, ServiceError> {
        let period = resolve_period(&req.period, req.start_date, req.end_date)?;
        info!("📊 Building {} summary", period);

        let tracing_ctx = self
            .observer
            .start("get_summary", Self::attributes("summary", period, auth));

        let result = async {
            let orders = self
                .reports
                .find_orders_in_range(period.range(self.clock.now()))
                .await?;

            let ids: Vec<i32> = orders.iter().map(|o| o.id).collect();
            let paid_revenue = self.payments.revenue_for(&ids).await?.values().sum();
            let counts = reporting::status_counts(&orders);

            Ok::<_, ServiceError>(ApiResponse::success(
                "Summary generated successfully",
                SummaryResponse {
                    period: period.as_str().to_string(),
                    summary: reporting::summarize(&orders),
                    unique_customers: reporting::unique_customers(&orders),
                    pending_orders: counts.pending,
                    processing_orders: counts.processing,
                    completed_orders: counts.done,
                    cancelled_orders: counts.cancelled,
                    paid_revenue,
                },
            ))
        }
        .await;

        self.observer
            .finish(&tracing_ctx, Method::Get, result, "Summary generated")
            .await
    }

    async fn get_top_products(
        &self,
        auth: &AuthContext,
        req: &TopProductsQuery,
    ) -> Result<ApiResponse<Vec<TopProductResponse>>, ServiceError> {
        let period = resolve_period(&req.period, req.start_date, req.end_date)?;
        let limit = top_limit(req.limit);
        info!("🏆 Ranking top {} products for {}", limit, period);

        let tracing_ctx = self.observer.start(
            "get_top_products",
            Self::attributes("top_products", period, auth),
        );

        let result = async {
            let lines = self
                .reports
                .find_sales_lines_in_range(period.range(self.clock.now()))
                .await?;

            Ok::<_, ServiceError>(ApiResponse::success(
                "Top products retrieved successfully",
                reporting::rank_top_products(&lines, limit),
            ))
        }
        .await;

        self.observer
            .finish(&tracing_ctx, Method::Get, result, "Top products ranked")
            .await
    }

    async fn export_report(
        &self,
        auth: &AuthContext,
        req: &ExportQuery,
    ) -> Result<ReportExport, ServiceError> {
        let period = resolve_period(&req.period, req.start_date, req.end_date)?;
        info!("📤 Exporting {} report as {}", period, req.format);

        let tracing_ctx = self
            .observer
            .start("export_report", Self::attributes("export", period, auth));

        let result = async {
            let format = ExportFormat::parse(&req.format).ok_or_else(|| {
                ServiceError::Validation(vec![format!(
                    "unsupported export format '{}'",
                    req.format
                )])
            })?;

            let now = self.clock.now();
            let orders = self.reports.find_orders_in_range(period.range(now)).await?;
            let rows = reporting::table_rows(&orders, period);

            let bytes = match format {
                ExportFormat::Csv => reporting::render_csv(&rows),
            };

            Ok::<_, ServiceError>(ReportExport {
                file_name: reporting::file_name(period, format, now.date()),
                content_type: format.content_type(),
                bytes,
            })
        }
        .await;

        self.observer
            .finish(&tracing_ctx, Method::Get, result, "Report exported")
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn limits_are_defaulted_and_capped() {
        assert_eq!(top_limit(0), DEFAULT_TOP_LIMIT);
        assert_eq!(top_limit(-5), DEFAULT_TOP_LIMIT);
        assert_eq!(top_limit(3), 3);
        assert_eq!(top_limit(10_000), MAX_TOP_LIMIT);
    }

    #[test]
    fn reversed_custom_window_is_a_validation_error() {
        let day = |d| NaiveDate::from_ymd_opt(2025, 3, d);
        let err = resolve_period("custom", day(10), day(1)).unwrap_err();
        assert_eq!(err.kind(), shared::errors::ErrorKind::ValidationFailed);
        assert_eq!(
            resolve_period("custom", day(1), day(10)).unwrap().as_str(),
            "custom"
        );
    }
}

use crate::{
    abstract_trait::report::DynReportService,
    domain::{
        auth::AuthContext,
        requests::report::{ExportQuery, ReportQuery, TopProductsQuery},
        response::{
            api::ApiResponse,
            report::{ReportResponse, SummaryResponse, TopProductResponse},
        },
    },
    handler::auth::staff_middleware,
    state::AppState,
};
use axum::{
    Json,
    extract::{Extension, Query},
    http::{
        StatusCode,
        header::{CONTENT_DISPOSITION, CONTENT_TYPE},
    },
    middleware,
    response::IntoResponse,
    routing::get,
};
use shared::errors::HttpError;
use std::sync::Arc;
use utoipa_axum::router::OpenApiRouter;

#[utoipa::path(
    get,
    path = "/api/reports",
    tag = "Report",
    params(ReportQuery),
    responses(
        (status = 200, description = "Totals, growth, chart series and table rows", body = ApiResponse<ReportResponse>),
        (status = 400, description = "Custom window ends before it starts"),
        (status = 403, description = "Forbidden"),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn get_report(
    Extension(service): Extension<DynReportService>,
    Extension(auth): Extension<AuthContext>,
    Query(params): Query<ReportQuery>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.get_report(&auth, &params).await?;
    Ok((StatusCode::OK, Json(response)))
}

#[utoipa::path(
    get,
    path = "/api/reports/summary",
    tag = "Report",
    params(ReportQuery),
    responses(
        (status = 200, description = "Dashboard summary", body = ApiResponse<SummaryResponse>),
        (status = 400, description = "Custom window ends before it starts"),
        (status = 403, description = "Forbidden")
    )
)]
pub async fn get_summary(
    Extension(service): Extension<DynReportService>,
    Extension(auth): Extension<AuthContext>,
    Query(params): Query<ReportQuery>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.get_summary(&auth, &params).await?;
    Ok((StatusCode::OK, Json(response)))
}

#[utoipa::path(
    get,
    path = "/api/reports/top-products",
    tag = "Report",
    params(TopProductsQuery),
    responses(
        (status = 200, description = "Best sellers by revenue", body = ApiResponse<Vec<TopProductResponse>>),
        (status = 400, description = "Custom window ends before it starts"),
        (status = 403, description = "Forbidden")
    )
)]
pub async fn get_top_products(
    Extension(service): Extension<DynReportService>,
    Extension(auth): Extension<AuthContext>,
    Query(params): Query<TopProductsQuery>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.get_top_products(&auth, &params).await?;
    Ok((StatusCode::OK, Json(response)))
}

#[utoipa::path(
    get,
    path = "/api/reports/export",
    tag = "Report",
    params(ExportQuery),
    responses(
        (status = 200, description = "CSV file with a UTF-8 byte-order mark", content_type = "text/csv"),
        (status = 400, description = "Unsupported format or reversed custom window"),
        (status = 403, description = "Forbidden")
    )
)]
pub async fn export_report(
    Extension(service): Extension<DynReportService>,
    Extension(auth): Extension<AuthContext>,
    Query(params): Query<ExportQuery>,
) -> Result<impl IntoResponse, HttpError> {
    let export = service.export_report(&auth, &params).await?;

    let disposition = format!("attachment; filename=\"{}\"", export.file_name);

    Ok((
        StatusCode::OK,
        [
            (CONTENT_TYPE, export.content_type.to_string()),
            (CONTENT_DISPOSITION, disposition),
        ],
        export.bytes,
    ))
}

pub fn report_routes(app_state: Arc<AppState>) -> OpenApiRouter {
    OpenApiRouter::new()
        .route("/api/reports", get(get_report))
        .route("/api/reports/summary", get(get_summary))
        .route("/api/reports/top-products", get(get_top_products))
        .route("/api/reports/export", get(export_report))
        .route_layer(middleware::from_fn(staff_middleware))
        .layer(Extension(app_state.di_container.report.clone()))
}

use crate::{
    abstract_trait::order::{repository::DynOrderQueryRepository, service::OrderQueryServiceTrait},
    domain::{
        auth::AuthContext,
        requests::order::FindAllOrder,
        response::{
            api::{ApiResponse, ApiResponsePagination, Pagination},
            order::{OrderDetailResponse, OrderItemResponse, OrderListItemResponse},
        },
    },
    model::status::OrderStatus,
    service::auth_attributes,
};
use async_trait::async_trait;
use opentelemetry::KeyValue;
use prometheus_client::registry::Registry;
use shared::{
    errors::{RepositoryError, ServiceError},
    utils::{Method, Observer},
};
use tracing::info;
use validator::Validate;

#[derive(Clone)]
pub struct OrderQueryService {
    query: DynOrderQueryRepository,
    observer: Observer,
}

impl OrderQueryService {
    pub fn new(query: DynOrderQueryRepository, registry: &mut Registry) -> Self {
        Self {
            query,
            observer: Observer::new("order-query-service", registry),
        }
    }
}

fn status_filter(value: Option<&str>) -> Result<Option<OrderStatus>, ServiceError> {
    match value.map(str::trim) {
        None | Some("") => Ok(None),
        Some(raw) => raw
            .parse::<OrderStatus>()
            .map(Some)
            .map_err(|e| ServiceError::InvalidStatus(e.to_string())),
    }
}

#[async_trait]
impl OrderQueryServiceTrait for OrderQueryService {
    async fn find_all(
        &self,
        auth: &AuthContext,
        req: &FindAllOrder,
    ) -> Result<ApiResponsePagination<Vec<OrderListItemResponse>>, ServiceError> {
        info!(
            "🔍 Listing orders | page: {}, size: {}, search: {:?}",
            req.page, req.page_size, req.search
        );

        let mut attributes = vec![
            KeyValue::new("component", "order"),
            KeyValue::new("operation", "find_all"),
            KeyValue::new("page", i64::from(req.page)),
            KeyValue::new("page_size", i64::from(req.page_size)),
        ];
        attributes.extend(auth_attributes(auth));
        let tracing_ctx = self.observer.start("find_all_orders", attributes);

        let result = async {
            req.validate()?;
            let status = status_filter(req.status.as_deref())?;
            let (orders, total) = self.query.find_all(req, status).await?;

            Ok::<_, ServiceError>(ApiResponsePagination {
                status: "success".into(),
                message: "Orders retrieved successfully".into(),
                data: orders.into_iter().map(OrderListItemResponse::from).collect(),
                pagination: Pagination::new(req.page, req.page_size, total),
            })
        }
        .await;

        self.observer
            .finish(&tracing_ctx, Method::Get, result, "Orders listed")
            .await
    }

    async fn find_by_id(
        &self,
        auth: &AuthContext,
        id: i32,
    ) -> Result<ApiResponse<OrderDetailResponse>, ServiceError> {
        info!("🆔 Fetching order ID={}", id);

        let mut attributes = vec![
            KeyValue::new("component", "order"),
            KeyValue::new("operation", "find_by_id"),
            KeyValue::new("order.id", i64::from(id)),
        ];
        attributes.extend(auth_attributes(auth));
        let tracing_ctx = self.observer.start("find_order_by_id", attributes);

        let result = async {
            let order = self
                .query
                .find_by_id(id)
                .await?
                .ok_or(RepositoryError::NotFound)?;
            let items = self.query.find_items(id).await?;

            Ok::<_, ServiceError>(ApiResponse::success(
                "Order retrieved successfully",
                OrderDetailResponse {
                    order: order.into(),
                    items: items.into_iter().map(OrderItemResponse::from).collect(),
                },
            ))
        }
        .await;

        self.observer
            .finish(&tracing_ctx, Method::Get, result, "Order fetched")
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_status_filter_means_all() {
        assert_eq!(status_filter(None).unwrap(), None);
        assert_eq!(status_filter(Some("  ")).unwrap(), None);
        assert_eq!(status_filter(Some("done")).unwrap(), Some(OrderStatus::Done));
    }

    #[test]
    fn unknown_status_filter_is_rejected() {
        let err = status_filter(Some("paid")).unwrap_err();
        assert!(matches!(err, ServiceError::InvalidStatus(_)));
    }
}

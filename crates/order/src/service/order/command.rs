use crate::{
    abstract_trait::order::{
        repository::DynOrderCommandRepository, service::OrderCommandServiceTrait,
    },
    domain::{
        auth::AuthContext,
        requests::order::{
            CreateOrderRecordRequest, CreateOrderRequest, OrderItemRecord, OrderItemRequest,
            UpdateOrderRecordRequest, UpdateOrderRequest, UpdateOrderStatusRequest,
        },
        response::{api::ApiResponse, order::OrderResponse},
    },
    model::status::OrderStatus,
    service::auth_attributes,
};
use async_trait::async_trait;
use opentelemetry::KeyValue;
use prometheus_client::registry::Registry;
use shared::{
    errors::ServiceError,
    utils::{Method, Observer},
};
use tracing::info;
use validator::Validate;

/// `Σ(unit_price × quantity)`, or `None` if the sum does not fit.
pub fn order_total(items: &[OrderItemRecord]) -> Option<i64> {
    items.iter().try_fold(0i64, |acc, item| {
        item.unit_price
            .checked_mul(i64::from(item.quantity))
            .and_then(|line| acc.checked_add(line))
    })
}

fn parse_status(value: &str) -> Result<OrderStatus, ServiceError> {
    value
        .parse::<OrderStatus>()
        .map_err(|e| ServiceError::InvalidStatus(e.to_string()))
}

fn normalize_phone(phone: &Option<String>) -> Option<String> {
    phone
        .as_deref()
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .map(str::to_string)
}

fn prepare_items(items: &[OrderItemRequest]) -> Result<(Vec<OrderItemRecord>, i64), ServiceError> {
    let records: Vec<OrderItemRecord> = items.iter().map(OrderItemRecord::from).collect();
    let total = order_total(&records)
        .ok_or_else(|| ServiceError::Validation(vec!["order total is too large".into()]))?;
    Ok((records, total))
}

#[derive(Clone)]
pub struct OrderCommandService {
    command: DynOrderCommandRepository,
    observer: Observer,
}

impl OrderCommandService {
    pub fn new(command: DynOrderCommandRepository, registry: &mut Registry) -> Self {
        Self {
            command,
            observer: Observer::new("order-command-service", registry),
        }
    }
}

#[async_trait]
impl OrderCommandServiceTrait for OrderCommandService {
    async fn create_order(
        &self,
        auth: &AuthContext,
        req: &CreateOrderRequest,
    ) -> Result<ApiResponse<OrderResponse>, ServiceError> {
        info!("🏗️ Creating order for customer={}", req.customer_name);

        let mut attributes = vec![
            KeyValue::new("component", "order"),
            KeyValue::new("operation", "create"),
            KeyValue::new("order.items", req.items.len() as i64),
        ];
        attributes.extend(auth_attributes(auth));
        let tracing_ctx = self.observer.start("create_order", attributes);

        let result = async {
            req.validate()?;
            let (items, total) = prepare_items(&req.items)?;

            let order = self
                .command
                .create_order(&CreateOrderRecordRequest {
                    customer_name: req.customer_name.trim().to_string(),
                    phone: normalize_phone(&req.phone),
                    total,
                    created_by: auth.user_id,
                    items,
                })
                .await?;

            Ok::<_, ServiceError>(ApiResponse::success(
                "Order created successfully",
                OrderResponse::from(order),
            ))
        }
        .await;

        self.observer
            .finish(&tracing_ctx, Method::Post, result, "Order created")
            .await
    }

    async fn update_order(
        &self,
        auth: &AuthContext,
        req: &UpdateOrderRequest,
    ) -> Result<ApiResponse<OrderResponse>, ServiceError> {
        info!("✏️ Updating order ID={}", req.order_id);

        let mut attributes = vec![
            KeyValue::new("component", "order"),
            KeyValue::new("operation", "update"),
            KeyValue::new("order.id", i64::from(req.order_id)),
        ];
        attributes.extend(auth_attributes(auth));
        let tracing_ctx = self.observer.start("update_order", attributes);

        let result = async {
            req.validate()?;
            let status = req.status.as_deref().map(parse_status).transpose()?;
            let (items, total) = prepare_items(&req.items)?;

            let order = self
                .command
                .replace_order(&UpdateOrderRecordRequest {
                    order_id: req.order_id,
                    customer_name: req.customer_name.trim().to_string(),
                    phone: normalize_phone(&req.phone),
                    status,
                    total,
                    items,
                })
                .await?;

            Ok::<_, ServiceError>(ApiResponse::success(
                "Order updated successfully",
                OrderResponse::from(order),
            ))
        }
        .await;

        self.observer
            .finish(&tracing_ctx, Method::Put, result, "Order updated")
            .await
    }

    async fn update_status(
        &self,
        auth: &AuthContext,
        order_id: i32,
        req: &UpdateOrderStatusRequest,
    ) -> Result<ApiResponse<OrderResponse>, ServiceError> {
        info!("🔄 Changing status of order ID={} to {}", order_id, req.status);

        let mut attributes = vec![
            KeyValue::new("component", "order"),
            KeyValue::new("operation", "update_status"),
            KeyValue::new("order.id", i64::from(order_id)),
            KeyValue::new("order.status", req.status.clone()),
        ];
        attributes.extend(auth_attributes(auth));
        let tracing_ctx = self.observer.start("update_order_status", attributes);

        let result = async {
            let status = parse_status(&req.status)?;
            let order = self.command.update_status(order_id, status).await?;

            Ok::<_, ServiceError>(ApiResponse::success(
                "Order status updated successfully",
                OrderResponse::from(order),
            ))
        }
        .await;

        self.observer
            .finish(&tracing_ctx, Method::Put, result, "Order status updated")
            .await
    }

    async fn delete_order(
        &self,
        auth: &AuthContext,
        order_id: i32,
    ) -> Result<ApiResponse<()>, ServiceError> {
        info!("🗑️ Deleting order ID={}", order_id);

        let mut attributes = vec![
            KeyValue::new("component", "order"),
            KeyValue::new("operation", "delete"),
            KeyValue::new("order.id", i64::from(order_id)),
        ];
        attributes.extend(auth_attributes(auth));
        let tracing_ctx = self.observer.start("delete_order", attributes);

        let result = self
            .command
            .delete_order(order_id)
            .await
            .map(|()| ApiResponse::success("Order deleted successfully", ()))
            .map_err(ServiceError::from);

        self.observer
            .finish(&tracing_ctx, Method::Delete, result, "Order deleted")
            .await
    }
}

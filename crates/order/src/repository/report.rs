use crate::{
    abstract_trait::report::{PaymentLedgerTrait, ReportRepositoryTrait},
    model::{order::Order as OrderModel, sales_line::SalesLine},
    reporting::DateRange,
};
use async_trait::async_trait;
use shared::{config::ConnectionPool, errors::RepositoryError};
use std::collections::HashMap;
use tracing::{error, info};

#[derive(Clone)]
pub struct ReportRepository {
    db: ConnectionPool,
}

impl ReportRepository {
    pub fn new(db: ConnectionPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ReportRepositoryTrait for ReportRepository {
    async fn find_orders_in_range(
        &self,
        range: DateRange,
    ) -> Result<Vec<OrderModel>, RepositoryError> {
        info!("📊 Loading orders from {} to {}", range.start, range.end);

        sqlx::query_as::<_, OrderModel>(
            r#"
            SELECT id, customer_name, phone, total, status, created_by, created_at, updated_at
            FROM orders
            WHERE created_at >= $1 AND created_at < $2
            ORDER BY created_at, id
            "#,
        )
        .bind(range.start)
        .bind(range.end)
        .fetch_all(&self.db)
        .await
        .map_err(|e| {
            error!("❌ Failed to load orders for report: {:?}", e);
            RepositoryError::from_db(e)
        })
    }

    async fn find_sales_lines_in_range(
        &self,
        range: DateRange,
    ) -> Result<Vec<SalesLine>, RepositoryError> {
        sqlx::query_as::<_, SalesLine>(
            r#"
            SELECT
                oi.order_id,
                oi.product_id,
                p.name      AS product_name,
                p.category,
                p.price     AS catalog_price,
                oi.quantity,
                oi.price    AS unit_price
            FROM order_items oi
            JOIN orders o   ON o.id = oi.order_id
            JOIN products p ON p.id = oi.product_id
            WHERE o.status IN ('processing', 'done')
              AND o.created_at >= $1 AND o.created_at < $2
            ORDER BY oi.id
            "#,
        )
        .bind(range.start)
        .bind(range.end)
        .fetch_all(&self.db)
        .await
        .map_err(|e| {
            error!("❌ Failed to load sales lines: {:?}", e);
            RepositoryError::from_db(e)
        })
    }
}

#[derive(Clone)]
pub struct PaymentRepository {
    db: ConnectionPool,
}

impl PaymentRepository {
    pub fn new(db: ConnectionPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl PaymentLedgerTrait for PaymentRepository {
    async fn revenue_for(&self, order_ids: &[i32]) -> Result<HashMap<i32, i64>, RepositoryError> {
        if order_ids.is_empty() {
            return Ok(HashMap::new());
        }

        let rows: Vec<(i32, i64)> = sqlx::query_as(
            r#"
            SELECT order_id, amount
            FROM payments
            WHERE order_id = ANY($1)
            "#,
        )
        .bind(order_ids)
        .fetch_all(&self.db)
        .await
        .map_err(|e| {
            error!("❌ Failed to load payments: {:?}", e);
            RepositoryError::from_db(e)
        })?;

        Ok(rows.into_iter().collect())
    }
}

use crate::{
    abstract_trait::order::repository::OrderQueryRepositoryTrait,
    domain::requests::order::FindAllOrder,
    model::{
        order::{Order as OrderModel, OrderWithItemCount},
        order_item::OrderItemWithProduct,
        status::OrderStatus,
    },
};
use async_trait::async_trait;
use shared::{config::ConnectionPool, errors::RepositoryError};
use sqlx::FromRow;
use tracing::{error, info};

#[derive(FromRow)]
struct OrderListRow {
    #[sqlx(flatten)]
    row: OrderWithItemCount,
    total_count: i64,
}

#[derive(Clone)]
pub struct OrderQueryRepository {
    db: ConnectionPool,
}

impl OrderQueryRepository {
    pub fn new(db: ConnectionPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl OrderQueryRepositoryTrait for OrderQueryRepository {
    async fn find_all(
        &self,
        req: &FindAllOrder,
        status: Option<OrderStatus>,
    ) -> Result<(Vec<OrderWithItemCount>, i64), RepositoryError> {
        info!("🔍 Fetching orders with search: {:?}", req.search);

        let limit = i64::from(req.page_size);
        let offset = i64::from((req.page - 1).max(0)) * limit;

        let search_pattern = if req.search.trim().is_empty() {
            None
        } else {
            Some(req.search.trim())
        };

        let rows = sqlx::query_as::<_, OrderListRow>(
            r#"
            SELECT
                o.id,
                o.customer_name,
                o.phone,
                o.total,
                o.status,
                o.created_by,
                o.created_at,
                o.updated_at,
                COUNT(oi.id) AS item_count,
                COUNT(*) OVER() AS total_count
            FROM orders o
            LEFT JOIN order_items oi ON oi.order_id = o.id
            WHERE ($1::TEXT IS NULL
                   OR o.customer_name ILIKE '%' || $1 || '%'
                   OR o.phone ILIKE '%' || $1 || '%')
              AND ($2::TEXT IS NULL OR o.status = $2)
            GROUP BY o.id
            ORDER BY o.created_at DESC, o.id DESC
            LIMIT $3 OFFSET $4
            "#,
        )
        .bind(search_pattern)
        .bind(status.map(OrderStatus::as_str))
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.db)
        .await
        .map_err(|e| {
            error!("❌ Failed to fetch orders: {:?}", e);
            RepositoryError::from_db(e)
        })?;

        let total = rows.first().map(|r| r.total_count).unwrap_or(0);
        let orders = rows.into_iter().map(|r| r.row).collect();

        Ok((orders, total))
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<OrderModel>, RepositoryError> {
        sqlx::query_as::<_, OrderModel>(
            r#"
            SELECT id, customer_name, phone, total, status, created_by, created_at, updated_at
            FROM orders
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.db)
        .await
        .map_err(|e| {
            error!("❌ Failed to fetch order {}: {:?}", id, e);
            RepositoryError::from_db(e)
        })
    }

    async fn find_items(
        &self,
        order_id: i32,
    ) -> Result<Vec<OrderItemWithProduct>, RepositoryError> {
        sqlx::query_as::<_, OrderItemWithProduct>(
            r#"
            SELECT
                oi.id,
                oi.order_id,
                oi.product_id,
                oi.quantity,
                oi.price,
                oi.created_at,
                p.name AS product_name
            FROM order_items oi
            JOIN products p ON p.id = oi.product_id
            WHERE oi.order_id = $1
            ORDER BY oi.id
            "#,
        )
        .bind(order_id)
        .fetch_all(&self.db)
        .await
        .map_err(|e| {
            error!("❌ Failed to fetch items of order {}: {:?}", order_id, e);
            RepositoryError::from_db(e)
        })
    }
}

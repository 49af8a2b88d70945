use crate::{
    abstract_trait::order::repository::OrderCommandRepositoryTrait,
    clock::DynClock,
    domain::requests::order::{
        CreateOrderRecordRequest, OrderItemRecord, UpdateOrderRecordRequest,
    },
    model::{order::Order as OrderModel, status::OrderStatus},
};
use async_trait::async_trait;
use chrono::NaiveDateTime;
use shared::{config::ConnectionPool, errors::RepositoryError};
use sqlx::{Postgres, Transaction};
use std::collections::HashMap;
use tracing::{error, info, warn};

pub struct OrderCommandRepository {
    db: ConnectionPool,
    clock: DynClock,
}

impl OrderCommandRepository {
    pub fn new(db: ConnectionPool, clock: DynClock) -> Self {
        Self { db, clock }
    }

    async fn begin(&self) -> Result<Transaction<'static, Postgres>, RepositoryError> {
        self.db.begin().await.map_err(|e| {
            error!("❌ Failed to open transaction: {:?}", e);
            RepositoryError::from(e)
        })
    }
}

/// Reads the referenced catalog rows `FOR SHARE` so they cannot be
/// deactivated or removed until the surrounding transaction ends.
async fn check_products(
    tx: &mut Transaction<'static, Postgres>,
    items: &[OrderItemRecord],
    require_active: bool,
) -> Result<(), RepositoryError> {
    let mut ids: Vec<i32> = items.iter().map(|item| item.product_id).collect();
    ids.sort_unstable();
    ids.dedup();

    let rows: Vec<(i32, bool)> = sqlx::query_as(
        r#"
        SELECT id, is_active
        FROM products
        WHERE id = ANY($1)
        FOR SHARE
        "#,
    )
    .bind(&ids)
    .fetch_all(&mut **tx)
    .await
    .map_err(RepositoryError::from_db)?;

    let found: HashMap<i32, bool> = rows.into_iter().collect();

    for id in ids {
        match found.get(&id) {
            None => {
                warn!("⚠️ Product {} does not exist", id);
                return Err(RepositoryError::ReferenceNotFound(format!(
                    "product {id} does not exist"
                )));
            }
            Some(false) if require_active => {
                warn!("⚠️ Product {} is inactive", id);
                return Err(RepositoryError::ReferenceNotFound(format!(
                    "product {id} is not active"
                )));
            }
            Some(_) => {}
        }
    }

    Ok(())
}

async fn insert_items(
    tx: &mut Transaction<'static, Postgres>,
    order_id: i32,
    items: &[OrderItemRecord],
    now: NaiveDateTime,
) -> Result<(), RepositoryError> {
    for item in items {
        sqlx::query(
            r#"
            INSERT INTO order_items (order_id, product_id, quantity, price, created_at)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(order_id)
        .bind(item.product_id)
        .bind(item.quantity)
        .bind(item.unit_price)
        .bind(now)
        .execute(&mut **tx)
        .await
        .map_err(|e| {
            error!("❌ Failed to insert item for order {}: {:?}", order_id, e);
            RepositoryError::from_db(e)
        })?;
    }
    Ok(())
}

async fn lock_order(
    tx: &mut Transaction<'static, Postgres>,
    order_id: i32,
) -> Result<OrderModel, RepositoryError> {
    sqlx::query_as::<_, OrderModel>(
        r#"
        SELECT id, customer_name, phone, total, status, created_by, created_at, updated_at
        FROM orders
        WHERE id = $1
        FOR UPDATE
        "#,
    )
    .bind(order_id)
    .fetch_optional(&mut **tx)
    .await
    .map_err(RepositoryError::from_db)?
    .ok_or(RepositoryError::NotFound)
}

#[async_trait]
impl OrderCommandRepositoryTrait for OrderCommandRepository {
    async fn create_order(
        &self,
        req: &CreateOrderRecordRequest,
    ) -> Result<OrderModel, RepositoryError> {
        let now = self.clock.now();
        let mut tx = self.begin().await?;

        check_products(&mut tx, &req.items, true).await?;

        let order = sqlx::query_as::<_, OrderModel>(
            r#"
            INSERT INTO orders (customer_name, phone, total, status, created_by, created_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, customer_name, phone, total, status, created_by, created_at, updated_at
            "#,
        )
        .bind(&req.customer_name)
        .bind(&req.phone)
        .bind(req.total)
        .bind(OrderStatus::Pending.as_str())
        .bind(req.created_by)
        .bind(now)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| {
            error!("❌ Failed to create order for {}: {:?}", req.customer_name, e);
            RepositoryError::from_db(e)
        })?;

        insert_items(&mut tx, order.id, &req.items, now).await?;

        tx.commit().await.map_err(RepositoryError::from_db)?;

        info!(
            "✅ Created order ID {} with {} items, total {}",
            order.id,
            req.items.len(),
            order.total
        );
        Ok(order)
    }

    async fn replace_order(
        &self,
        req: &UpdateOrderRecordRequest,
    ) -> Result<OrderModel, RepositoryError> {
        let now = self.clock.now();
        let mut tx = self.begin().await?;

        let current = lock_order(&mut tx, req.order_id).await?;
        if current.status == OrderStatus::Done {
            return Err(RepositoryError::Conflict(
                "a completed order cannot be edited".into(),
            ));
        }

        let status = match req.status {
            Some(next) => {
                current.status.ensure_transition(next)?;
                next
            }
            None => current.status,
        };

        check_products(&mut tx, &req.items, false).await?;

        let order = sqlx::query_as::<_, OrderModel>(
            r#"
            UPDATE orders
            SET customer_name = $2,
                phone         = $3,
                total         = $4,
                status        = $5,
                updated_at    = $6
            WHERE id = $1
            RETURNING id, customer_name, phone, total, status, created_by, created_at, updated_at
            "#,
        )
        .bind(req.order_id)
        .bind(&req.customer_name)
        .bind(&req.phone)
        .bind(req.total)
        .bind(status.as_str())
        .bind(now)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| {
            error!("❌ Failed to update order ID {}: {:?}", req.order_id, e);
            RepositoryError::from_db(e)
        })?;

        sqlx::query("DELETE FROM order_items WHERE order_id = $1")
            .bind(req.order_id)
            .execute(&mut *tx)
            .await
            .map_err(RepositoryError::from_db)?;

        insert_items(&mut tx, order.id, &req.items, now).await?;

        tx.commit().await.map_err(RepositoryError::from_db)?;

        info!("🔄 Replaced order ID {} ({} items)", order.id, req.items.len());
        Ok(order)
    }

    async fn update_status(
        &self,
        order_id: i32,
        status: OrderStatus,
    ) -> Result<OrderModel, RepositoryError> {
        let now = self.clock.now();
        let mut tx = self.begin().await?;

        let current = lock_order(&mut tx, order_id).await?;
        current.status.ensure_transition(status)?;

        let order = sqlx::query_as::<_, OrderModel>(
            r#"
            UPDATE orders
            SET status = $2, updated_at = $3
            WHERE id = $1
            RETURNING id, customer_name, phone, total, status, created_by, created_at, updated_at
            "#,
        )
        .bind(order_id)
        .bind(status.as_str())
        .bind(now)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| {
            error!("❌ Failed to update status of order {}: {:?}", order_id, e);
            RepositoryError::from_db(e)
        })?;

        tx.commit().await.map_err(RepositoryError::from_db)?;

        info!("🔄 Order {} moved {} -> {}", order_id, current.status, status);
        Ok(order)
    }

    async fn delete_order(&self, order_id: i32) -> Result<(), RepositoryError> {
        let mut tx = self.begin().await?;

        let current = lock_order(&mut tx, order_id).await?;
        if !current.status.is_deletable() {
            return Err(RepositoryError::Conflict(
                "cannot delete a completed order".into(),
            ));
        }

        sqlx::query("DELETE FROM orders WHERE id = $1")
            .bind(order_id)
            .execute(&mut *tx)
            .await
            .map_err(|e| {
                error!("❌ Failed to delete order {}: {:?}", order_id, e);
                RepositoryError::from_db(e)
            })?;

        tx.commit().await.map_err(RepositoryError::from_db)?;

        info!("🗑️ Deleted order {} and its items", order_id);
        Ok(())
    }
}

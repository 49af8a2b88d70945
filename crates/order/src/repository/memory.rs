//! Process-local store backing `STORE_BACKEND=memory` and the test suite.
//!
//! A single write lock guards the whole dataset, and every mutation
//! validates first and only then touches state, so a failed call leaves
//! nothing behind.

use crate::{
    abstract_trait::{
        order::repository::{OrderCommandRepositoryTrait, OrderQueryRepositoryTrait},
        report::{PaymentLedgerTrait, ReportRepositoryTrait},
    },
    clock::DynClock,
    domain::requests::order::{
        CreateOrderRecordRequest, FindAllOrder, OrderItemRecord, UpdateOrderRecordRequest,
    },
    model::{
        order::{Order as OrderModel, OrderWithItemCount},
        order_item::{OrderItem, OrderItemWithProduct},
        payment::Payment,
        product::Product,
        sales_line::SalesLine,
        status::OrderStatus,
    },
    reporting::DateRange,
};
use async_trait::async_trait;
use chrono::NaiveDateTime;
use shared::errors::RepositoryError;
use std::collections::{BTreeMap, HashMap};
use tokio::sync::RwLock;
use tracing::{info, warn};

#[derive(Default)]
struct Tables {
    products: BTreeMap<i32, Product>,
    orders: BTreeMap<i32, OrderModel>,
    items: Vec<OrderItem>,
    payments: HashMap<i32, Payment>,
    order_seq: i32,
    item_seq: i32,
    payment_seq: i32,
}

impl Tables {
    fn check_products(
        &self,
        items: &[OrderItemRecord],
        require_active: bool,
    ) -> Result<(), RepositoryError> {
        for item in items {
            match self.products.get(&item.product_id) {
                None => {
                    return Err(RepositoryError::ReferenceNotFound(format!(
                        "product {} does not exist",
                        item.product_id
                    )));
                }
                Some(product) if require_active && !product.is_active => {
                    return Err(RepositoryError::ReferenceNotFound(format!(
                        "product {} is not active",
                        item.product_id
                    )));
                }
                Some(_) => {}
            }
        }
        Ok(())
    }

    fn insert_items(&mut self, order_id: i32, items: &[OrderItemRecord], now: NaiveDateTime) {
        for item in items {
            self.item_seq += 1;
            self.items.push(OrderItem {
                id: self.item_seq,
                order_id,
                product_id: item.product_id,
                quantity: item.quantity,
                price: item.unit_price,
                created_at: now,
            });
        }
    }

    fn order(&self, order_id: i32) -> Result<&OrderModel, RepositoryError> {
        self.orders.get(&order_id).ok_or(RepositoryError::NotFound)
    }

    fn product_name(&self, product_id: i32) -> String {
        self.products
            .get(&product_id)
            .map(|p| p.name.clone())
            .unwrap_or_default()
    }
}

pub struct InMemoryStore {
    tables: RwLock<Tables>,
    clock: DynClock,
    fail_writes: RwLock<bool>,
}

impl InMemoryStore {
    pub fn new(clock: DynClock) -> Self {
        Self {
            tables: RwLock::new(Tables::default()),
            clock,
            fail_writes: RwLock::new(false),
        }
    }

    /// A store pre-filled with a small café menu.
    pub async fn with_demo_menu(clock: DynClock) -> Self {
        let store = Self::new(clock);
        let menu = [
            ("Cà phê sữa đá", "Cà phê", 25_000),
            ("Bạc xỉu", "Cà phê", 29_000),
            ("Trà đào cam sả", "Trà", 35_000),
            ("Bánh mì thịt", "Đồ ăn", 20_000),
        ];
        for (name, category, price) in menu {
            store.add_product(name, Some(category), price, true).await;
        }
        store
    }

    pub async fn add_product(
        &self,
        name: &str,
        category: Option<&str>,
        price: i64,
        is_active: bool,
    ) -> Product {
        let mut tables = self.tables.write().await;
        let product = Product {
            id: tables.products.len() as i32 + 1,
            name: name.to_string(),
            category: category.map(str::to_string),
            price,
            is_active,
        };
        tables.products.insert(product.id, product.clone());
        product
    }

    pub async fn set_product_active(&self, product_id: i32, is_active: bool) {
        if let Some(product) = self.tables.write().await.products.get_mut(&product_id) {
            product.is_active = is_active;
        }
    }

    /// Records the single payment an order may have.
    pub async fn record_payment(
        &self,
        order_id: i32,
        amount: i64,
        paid_by: Option<i32>,
    ) -> Result<Payment, RepositoryError> {
        let now = self.clock.now();
        let mut tables = self.tables.write().await;

        tables.order(order_id)?;
        if tables.payments.contains_key(&order_id) {
            return Err(RepositoryError::Conflict(format!(
                "order {order_id} is already paid"
            )));
        }

        tables.payment_seq += 1;
        let payment = Payment {
            id: tables.payment_seq,
            order_id,
            amount,
            payment_method: "cash".into(),
            paid_by,
            paid_at: now,
        };
        tables.payments.insert(order_id, payment.clone());
        Ok(payment)
    }

    /// Makes every following mutation fail as a storage fault.
    pub async fn set_fail_writes(&self, fail: bool) {
        *self.fail_writes.write().await = fail;
    }

    pub async fn order_count(&self) -> usize {
        self.tables.read().await.orders.len()
    }

    pub async fn item_count(&self) -> usize {
        self.tables.read().await.items.len()
    }

    async fn guard_writes(&self) -> Result<(), RepositoryError> {
        if *self.fail_writes.read().await {
            warn!("⚠️ In-memory store is rejecting writes");
            return Err(RepositoryError::Custom("store unavailable".into()));
        }
        Ok(())
    }
}

fn matches_search(order: &OrderModel, needle: &str) -> bool {
    needle.is_empty()
        || order.customer_name.to_lowercase().contains(needle)
        || order
            .phone
            .as_deref()
            .is_some_and(|phone| phone.to_lowercase().contains(needle))
}

#[async_trait]
impl OrderCommandRepositoryTrait for InMemoryStore {
    async fn create_order(
        &self,
        req: &CreateOrderRecordRequest,
    ) -> Result<OrderModel, RepositoryError> {
        self.guard_writes().await?;
        let now = self.clock.now();
        let mut tables = self.tables.write().await;

        tables.check_products(&req.items, true)?;

        tables.order_seq += 1;
        let order = OrderModel {
            id: tables.order_seq,
            customer_name: req.customer_name.clone(),
            phone: req.phone.clone(),
            total: req.total,
            status: OrderStatus::Pending,
            created_by: req.created_by,
            created_at: now,
            updated_at: None,
        };
        tables.orders.insert(order.id, order.clone());
        tables.insert_items(order.id, &req.items, now);

        info!("✅ Created order ID {} in memory", order.id);
        Ok(order)
    }

    async fn replace_order(
        &self,
        req: &UpdateOrderRecordRequest,
    ) -> Result<OrderModel, RepositoryError> {
        self.guard_writes().await?;
        let now = self.clock.now();
        let mut tables = self.tables.write().await;

        let current = tables.order(req.order_id)?.status;
        if current == OrderStatus::Done {
            return Err(RepositoryError::Conflict(
                "a completed order cannot be edited".into(),
            ));
        }
        let status = match req.status {
            Some(next) => {
                current.ensure_transition(next)?;
                next
            }
            None => current,
        };
        tables.check_products(&req.items, false)?;

        tables.items.retain(|item| item.order_id != req.order_id);
        tables.insert_items(req.order_id, &req.items, now);

        let order = tables
            .orders
            .get_mut(&req.order_id)
            .ok_or(RepositoryError::NotFound)?;
        order.customer_name = req.customer_name.clone();
        order.phone = req.phone.clone();
        order.total = req.total;
        order.status = status;
        order.updated_at = Some(now);

        Ok(order.clone())
    }

    async fn update_status(
        &self,
        order_id: i32,
        status: OrderStatus,
    ) -> Result<OrderModel, RepositoryError> {
        self.guard_writes().await?;
        let now = self.clock.now();
        let mut tables = self.tables.write().await;

        let order = tables
            .orders
            .get_mut(&order_id)
            .ok_or(RepositoryError::NotFound)?;
        order.status.ensure_transition(status)?;
        order.status = status;
        order.updated_at = Some(now);

        Ok(order.clone())
    }

    async fn delete_order(&self, order_id: i32) -> Result<(), RepositoryError> {
        self.guard_writes().await?;
        let mut tables = self.tables.write().await;

        if !tables.order(order_id)?.status.is_deletable() {
            return Err(RepositoryError::Conflict(
                "cannot delete a completed order".into(),
            ));
        }

        tables.orders.remove(&order_id);
        tables.items.retain(|item| item.order_id != order_id);
        tables.payments.remove(&order_id);

        info!("🗑️ Deleted order {} from memory", order_id);
        Ok(())
    }
}

#[async_trait]
impl OrderQueryRepositoryTrait for InMemoryStore {
    async fn find_all(
        &self,
        req: &FindAllOrder,
        status: Option<OrderStatus>,
    ) -> Result<(Vec<OrderWithItemCount>, i64), RepositoryError> {
        let tables = self.tables.read().await;
        let needle = req.search.trim().to_lowercase();

        let mut matching: Vec<&OrderModel> = tables
            .orders
            .values()
            .filter(|o| status.is_none_or(|s| o.status == s))
            .filter(|o| matches_search(o, &needle))
            .collect();
        matching.sort_by(|a, b| (b.created_at, b.id).cmp(&(a.created_at, a.id)));

        let total = matching.len() as i64;
        let page_size = usize::try_from(req.page_size).unwrap_or(0);
        let offset = (i64::from(req.page) - 1).max(0) * i64::from(req.page_size).max(0);
        let skip = usize::try_from(offset).unwrap_or(usize::MAX);

        let page = matching
            .into_iter()
            .skip(skip)
            .take(page_size)
            .map(|order| OrderWithItemCount {
                order: order.clone(),
                item_count: tables
                    .items
                    .iter()
                    .filter(|item| item.order_id == order.id)
                    .count() as i64,
            })
            .collect();

        Ok((page, total))
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<OrderModel>, RepositoryError> {
        Ok(self.tables.read().await.orders.get(&id).cloned())
    }

    async fn find_items(
        &self,
        order_id: i32,
    ) -> Result<Vec<OrderItemWithProduct>, RepositoryError> {
        let tables = self.tables.read().await;
        Ok(tables
            .items
            .iter()
            .filter(|item| item.order_id == order_id)
            .map(|item| OrderItemWithProduct {
                item: item.clone(),
                product_name: tables.product_name(item.product_id),
            })
            .collect())
    }
}

#[async_trait]
impl ReportRepositoryTrait for InMemoryStore {
    async fn find_orders_in_range(
        &self,
        range: DateRange,
    ) -> Result<Vec<OrderModel>, RepositoryError> {
        let tables = self.tables.read().await;
        let mut orders: Vec<OrderModel> = tables
            .orders
            .values()
            .filter(|o| range.contains(o.created_at))
            .cloned()
            .collect();
        orders.sort_by_key(|o| (o.created_at, o.id));
        Ok(orders)
    }

    async fn find_sales_lines_in_range(
        &self,
        range: DateRange,
    ) -> Result<Vec<SalesLine>, RepositoryError> {
        let tables = self.tables.read().await;
        Ok(tables
            .items
            .iter()
            .filter_map(|item| {
                let order = tables.orders.get(&item.order_id)?;
                if !order.status.is_revenue_eligible() || !range.contains(order.created_at) {
                    return None;
                }
                let product = tables.products.get(&item.product_id)?;
                Some(SalesLine {
                    order_id: item.order_id,
                    product_id: item.product_id,
                    product_name: product.name.clone(),
                    category: product.category.clone(),
                    catalog_price: product.price,
                    quantity: item.quantity,
                    unit_price: item.price,
                })
            })
            .collect())
    }
}

#[async_trait]
impl PaymentLedgerTrait for InMemoryStore {
    async fn revenue_for(&self, order_ids: &[i32]) -> Result<HashMap<i32, i64>, RepositoryError> {
        let tables = self.tables.read().await;
        Ok(order_ids
            .iter()
            .filter_map(|id| tables.payments.get(id).map(|p| (*id, p.amount)))
            .collect())
    }
}

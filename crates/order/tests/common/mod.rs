#![allow(dead_code)]

use cafe_orders::{
    abstract_trait::order::service::OrderCommandServiceTrait,
    clock::FixedClock,
    di::{DependenciesInject, Storage},
    domain::{
        auth::AuthContext,
        requests::order::{CreateOrderRequest, OrderItemRequest, UpdateOrderStatusRequest},
        response::order::OrderResponse,
    },
    repository::InMemoryStore,
};
use chrono::{NaiveDate, NaiveDateTime};
use prometheus_client::registry::Registry;
use std::sync::Arc;

pub const CA_PHE_SUA: i32 = 1;
pub const BAC_XIU: i32 = 2;
pub const TRA_DAO: i32 = 3;
pub const BANH_MI: i32 = 4;

pub fn at(y: i32, m: u32, d: u32, h: u32, min: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(y, m, d)
        .unwrap()
        .and_hms_opt(h, min, 0)
        .unwrap()
}

pub struct Harness {
    pub store: Arc<InMemoryStore>,
    pub clock: Arc<FixedClock>,
    pub deps: DependenciesInject,
    pub auth: AuthContext,
}

/// Full service stack over a fresh in-memory store with the demo menu,
/// with the clock at 2025-03-12 09:15 (a Wednesday).
pub async fn harness() -> Harness {
    let clock = Arc::new(FixedClock::new(at(2025, 3, 12, 9, 15)));
    let store = Arc::new(InMemoryStore::with_demo_menu(clock.clone()).await);
    let mut registry = Registry::default();
    let deps = DependenciesInject::new(Storage::Memory(store.clone()), clock.clone(), &mut registry);

    Harness {
        store,
        clock,
        deps,
        auth: AuthContext::staff(1),
    }
}

pub fn item(product_id: i32, quantity: i32, unit_price: i64) -> OrderItemRequest {
    OrderItemRequest {
        product_id,
        quantity,
        unit_price,
    }
}

pub fn new_order(customer: &str, items: Vec<OrderItemRequest>) -> CreateOrderRequest {
    CreateOrderRequest {
        customer_name: customer.into(),
        phone: None,
        items,
    }
}

pub fn status(value: &str) -> UpdateOrderStatusRequest {
    UpdateOrderStatusRequest {
        status: value.into(),
    }
}

impl Harness {
    pub async fn create(&self, customer: &str, items: Vec<OrderItemRequest>) -> OrderResponse {
        self.deps
            .order_command
            .create_order(&self.auth, &new_order(customer, items))
            .await
            .unwrap()
            .data
    }

    pub async fn move_to(&self, order_id: i32, value: &str) -> OrderResponse {
        self.deps
            .order_command
            .update_status(&self.auth, order_id, &status(value))
            .await
            .unwrap()
            .data
    }

    /// Creates an order at `when` and walks it to `final_status`.
    pub async fn order_at(
        &self,
        when: NaiveDateTime,
        customer: &str,
        items: Vec<OrderItemRequest>,
        final_status: &str,
    ) -> OrderResponse {
        self.clock.set(when);
        let order = self.create(customer, items).await;
        match final_status {
            "pending" => order,
            "processing" | "cancelled" => self.move_to(order.id, final_status).await,
            "done" => {
                self.move_to(order.id, "processing").await;
                self.move_to(order.id, "done").await
            }
            other => panic!("unexpected status {other}"),
        }
    }
}

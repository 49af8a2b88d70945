use crate::{
    abstract_trait::{
        order::{
            repository::{DynOrderCommandRepository, DynOrderQueryRepository},
            service::{DynOrderCommandService, DynOrderQueryService},
        },
        report::{DynPaymentLedger, DynReportRepository, DynReportService},
    },
    clock::DynClock,
    repository::{
        InMemoryStore, OrderCommandRepository, OrderQueryRepository, PaymentRepository,
        ReportRepository,
    },
    service::{
        ReportService, ReportServiceDeps,
        order::{OrderCommandService, OrderQueryService},
    },
};
use prometheus_client::registry::Registry;
use shared::config::ConnectionPool;
use std::{fmt, sync::Arc};

/// Where orders live for this process.
#[derive(Clone)]
pub enum Storage {
    Postgres(ConnectionPool),
    Memory(Arc<InMemoryStore>),
}

struct Repositories {
    order_command: DynOrderCommandRepository,
    order_query: DynOrderQueryRepository,
    reports: DynReportRepository,
    payments: DynPaymentLedger,
}

impl Repositories {
    fn new(storage: Storage, clock: DynClock) -> Self {
        match storage {
            Storage::Postgres(pool) => Self {
                order_command: Arc::new(OrderCommandRepository::new(pool.clone(), clock)),
                order_query: Arc::new(OrderQueryRepository::new(pool.clone())),
                reports: Arc::new(ReportRepository::new(pool.clone())),
                payments: Arc::new(PaymentRepository::new(pool)),
            },
            Storage::Memory(store) => Self {
                order_command: store.clone(),
                order_query: store.clone(),
                reports: store.clone(),
                payments: store,
            },
        }
    }
}

#[derive(Clone)]
pub struct DependenciesInject {
    pub order_command: DynOrderCommandService,
    pub order_query: DynOrderQueryService,
    pub report: DynReportService,
}

impl fmt::Debug for DependenciesInject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DependenciesInject")
            .field("order_command", &"OrderCommandService")
            .field("order_query", &"OrderQueryService")
            .field("report", &"ReportService")
            .finish()
    }
}

impl DependenciesInject {
    pub fn new(storage: Storage, clock: DynClock, registry: &mut Registry) -> Self {
        let repos = Repositories::new(storage, clock.clone());

        let order_command: DynOrderCommandService =
            Arc::new(OrderCommandService::new(repos.order_command, registry));
        let order_query: DynOrderQueryService =
            Arc::new(OrderQueryService::new(repos.order_query, registry));
        let report: DynReportService = Arc::new(ReportService::new(
            ReportServiceDeps {
                reports: repos.reports,
                payments: repos.payments,
                clock,
            },
            registry,
        ));

        Self {
            order_command,
            order_query,
            report,
        }
    }
}

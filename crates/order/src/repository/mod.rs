pub mod memory;
mod order;
mod report;

pub use self::memory::InMemoryStore;
pub use self::order::{OrderCommandRepository, OrderQueryRepository};
pub use self::report::{PaymentRepository, ReportRepository};

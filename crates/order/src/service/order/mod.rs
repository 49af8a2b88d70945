mod command;
mod query;

pub use self::command::{OrderCommandService, order_total};
pub use self::query::OrderQueryService;

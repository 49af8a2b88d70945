pub mod order;
pub mod order_item;
pub mod payment;
pub mod product;
pub mod sales_line;
pub mod status;

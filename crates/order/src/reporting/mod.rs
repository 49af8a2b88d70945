pub mod aggregate;
pub mod export;
pub mod period;

pub use self::aggregate::{
    DEFAULT_CATEGORY, StatusCounts, chart_series, growth, growth_rates, rank_top_products,
    status_counts, summarize, table_rows, unique_customers,
};
pub use self::export::{ExportFormat, file_name, render_csv};
pub use self::period::{DateRange, Period, ReversedRange};

use crate::domain::response::report::{
    ChartSeries, GrowthRates, PeriodSummary, TableRow, TopProductResponse,
};
use crate::model::{order::Order, sales_line::SalesLine, status::OrderStatus};
use crate::reporting::period::Period;
use chrono::{Datelike, NaiveDate, NaiveDateTime, Timelike};
use std::collections::{BTreeMap, HashMap, HashSet};

pub const DEFAULT_CATEGORY: &str = "Khác";

/// Orders, revenue, average ticket and success rate over a window.
///
/// Revenue only counts revenue-eligible orders, but both the average and
/// the success rate divide by every order in the window. Money sums here
/// and below saturate at `i64::MAX` rather than overflow.
pub fn summarize(orders: &[Order]) -> PeriodSummary {
    let total_orders = orders.len() as i64;
    let total_revenue = orders
        .iter()
        .filter(|o| o.status.is_revenue_eligible())
        .fold(0i64, |acc, o| acc.saturating_add(o.total));
    let done = orders
        .iter()
        .filter(|o| o.status == OrderStatus::Done)
        .count() as i64;

    PeriodSummary {
        total_orders,
        total_revenue,
        avg_order_value: ratio(total_revenue, total_orders),
        success_rate: ratio(done * 100, total_orders),
    }
}

/// Percentage change rounded to one decimal; zero when there is no baseline.
pub fn growth(current: f64, previous: f64) -> f64 {
    if previous == 0.0 {
        return 0.0;
    }
    ((current - previous) / previous * 1000.0).round_ties_even() / 10.0
}

pub fn growth_rates(current: &PeriodSummary, previous: &PeriodSummary) -> GrowthRates {
    GrowthRates {
        revenue_growth: growth(current.total_revenue as f64, previous.total_revenue as f64),
        orders_growth: growth(current.total_orders as f64, previous.total_orders as f64),
        avg_growth: growth(current.avg_order_value, previous.avg_order_value),
        success_growth: growth(current.success_rate, previous.success_rate),
    }
}

/// Per-status counters for the summary endpoint.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StatusCounts {
    pub pending: i64,
    pub processing: i64,
    pub done: i64,
    pub cancelled: i64,
}

pub fn status_counts(orders: &[Order]) -> StatusCounts {
    orders
        .iter()
        .fold(StatusCounts::default(), |mut acc, order| {
            match order.status {
                OrderStatus::Pending => acc.pending += 1,
                OrderStatus::Processing => acc.processing += 1,
                OrderStatus::Done => acc.done += 1,
                OrderStatus::Cancelled => acc.cancelled += 1,
            }
            acc
        })
}

/// Distinct non-empty customer names, compared trimmed and case-insensitively.
pub fn unique_customers(orders: &[Order]) -> i64 {
    orders
        .iter()
        .map(|o| o.customer_name.trim().to_lowercase())
        .filter(|name| !name.is_empty())
        .collect::<HashSet<_>>()
        .len() as i64
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
enum Bucket {
    Hour(u32),
    Day(NaiveDate),
    Month(u32),
}

impl Bucket {
    fn chart(period: Period, at: NaiveDateTime) -> Self {
        match period {
            Period::Today => Bucket::Hour(at.hour()),
            Period::Week | Period::Month | Period::Custom { .. } => {
                Bucket::Day(at.date())
            }
            Period::Year => Bucket::Month(at.month()),
        }
    }

    fn table(period: Period, at: NaiveDateTime) -> Self {
        match period {
            Period::Year => Bucket::Month(at.month()),
            _ => Bucket::Day(at.date()),
        }
    }

    fn chart_label(self) -> String {
        match self {
            Bucket::Hour(h) => format!("{h}:00"),
            Bucket::Day(d) => d.format("%d/%m").to_string(),
            Bucket::Month(m) => format!("T{m}"),
        }
    }

    fn table_label(self) -> String {
        match self {
            Bucket::Hour(h) => format!("{h}:00"),
            Bucket::Day(d) => d.format("%d/%m/%Y").to_string(),
            Bucket::Month(m) => format!("Tháng {m}"),
        }
    }
}

/// Revenue and order count per time bucket, oldest bucket first.
/// Only revenue-eligible orders are plotted.
pub fn chart_series(orders: &[Order], period: Period) -> ChartSeries {
    let mut buckets: BTreeMap<Bucket, (i64, i64)> = BTreeMap::new();

    for order in orders.iter().filter(|o| o.status.is_revenue_eligible()) {
        let entry = buckets
            .entry(Bucket::chart(period, order.created_at))
            .or_default();
        entry.0 = entry.0.saturating_add(order.total);
        entry.1 += 1;
    }

    let mut series = ChartSeries::default();
    for (bucket, (revenue, count)) in buckets {
        series.labels.push(bucket.chart_label());
        series.revenues.push(revenue);
        series.orders.push(count);
    }
    series
}

#[derive(Default)]
struct RowAcc {
    total_orders: i64,
    revenue: i64,
    completed: i64,
    cancelled: i64,
}

/// One row per day (or per month for a yearly report), newest first.
pub fn table_rows(orders: &[Order], period: Period) -> Vec<TableRow> {
    let mut buckets: BTreeMap<Bucket, RowAcc> = BTreeMap::new();

    for order in orders {
        let acc = buckets
            .entry(Bucket::table(period, order.created_at))
            .or_default();
        acc.total_orders += 1;
        if order.status.is_revenue_eligible() {
            acc.revenue = acc.revenue.saturating_add(order.total);
        }
        match order.status {
            OrderStatus::Done => acc.completed += 1,
            OrderStatus::Cancelled => acc.cancelled += 1,
            _ => {}
        }
    }

    buckets
        .into_iter()
        .rev()
        .map(|(bucket, acc)| TableRow {
            date: bucket.table_label(),
            total_orders: acc.total_orders,
            revenue: acc.revenue,
            avg_order: ratio(acc.revenue, acc.total_orders),
            completed: acc.completed,
            cancelled: acc.cancelled,
        })
        .collect()
}

/// Best sellers by revenue, truncated to `limit`. Tie order is unspecified.
pub fn rank_top_products(lines: &[SalesLine], limit: usize) -> Vec<TopProductResponse> {
    let mut ranked: Vec<TopProductResponse> = Vec::new();
    let mut index: HashMap<i32, usize> = HashMap::new();
    let mut orders_seen: HashMap<i32, HashSet<i32>> = HashMap::new();

    for line in lines {
        let slot = *index.entry(line.product_id).or_insert_with(|| {
            ranked.push(TopProductResponse {
                product_id: line.product_id,
                name: line.product_name.clone(),
                category: line
                    .category
                    .clone()
                    .filter(|c| !c.trim().is_empty())
                    .unwrap_or_else(|| DEFAULT_CATEGORY.to_string()),
                catalog_price: line.catalog_price,
                order_count: 0,
                total_quantity: 0,
                total_revenue: 0,
            });
            ranked.len() - 1
        });

        let product = &mut ranked[slot];
        let quantity = i64::from(line.quantity);
        product.total_quantity = product.total_quantity.saturating_add(quantity);
        product.total_revenue = product
            .total_revenue
            .saturating_add(quantity.saturating_mul(line.unit_price));
        if orders_seen
            .entry(line.product_id)
            .or_default()
            .insert(line.order_id)
        {
            product.order_count += 1;
        }
    }

    ranked.sort_by(|a, b| b.total_revenue.cmp(&a.total_revenue));
    ranked.truncate(limit);
    ranked
}

fn ratio(numerator: i64, denominator: i64) -> f64 {
    if denominator == 0 {
        0.0
    } else {
        numerator as f64 / denominator as f64
    }
}

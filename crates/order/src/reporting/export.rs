use crate::domain::response::report::TableRow;
use crate::reporting::period::Period;
use chrono::NaiveDate;

pub const CSV_CONTENT_TYPE: &str = "text/csv; charset=utf-8";
pub const CSV_HEADER: &str = "Ngày,Số đơn,Doanh thu,Trung bình/Đơn,Hoàn thành,Đã hủy";

const BOM: &str = "\u{feff}";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Csv,
}

impl ExportFormat {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "csv" => Some(ExportFormat::Csv),
            _ => None,
        }
    }

    pub fn content_type(self) -> &'static str {
        match self {
            ExportFormat::Csv => CSV_CONTENT_TYPE,
        }
    }

    pub fn extension(self) -> &'static str {
        match self {
            ExportFormat::Csv => "csv",
        }
    }
}

pub fn file_name(period: Period, format: ExportFormat, on: NaiveDate) -> String {
    format!(
        "bao-cao-doanh-thu-{}-{}.{}",
        period,
        on.format("%Y%m%d"),
        format.extension()
    )
}

/// UTF-8 CSV with a leading byte-order mark so spreadsheet tools pick
/// up the Vietnamese header correctly.
pub fn render_csv(rows: &[TableRow]) -> Vec<u8> {
    let mut out = String::with_capacity(BOM.len() + CSV_HEADER.len() + rows.len() * 48);
    out.push_str(BOM);
    out.push_str(CSV_HEADER);
    out.push('\n');

    for row in rows {
        out.push_str(&format!(
            "{},{},{},{},{},{}\n",
            escape(&row.date),
            row.total_orders,
            row.revenue,
            format_amount(row.avg_order),
            row.completed,
            row.cancelled,
        ));
    }

    out.into_bytes()
}

fn format_amount(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{value:.0}")
    } else {
        format!("{value:.2}")
    }
}

fn escape(field: &str) -> String {
    if field.contains([',', '"', '\n']) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::IntoParams;

fn default_period() -> String {
    "today".to_string()
}

fn default_limit() -> i64 {
    10
}

fn default_format() -> String {
    "csv".to_string()
}

#[derive(Debug, Clone, Serialize, Deserialize, IntoParams)]
pub struct ReportQuery {
    /// `today`, `week`, `month`, `year` or `custom`; anything else means `today`.
    #[serde(default = "default_period")]
    pub period: String,

    /// First day of a `custom` window, inclusive.
    #[serde(default, alias = "startDate")]
    pub start_date: Option<NaiveDate>,

    /// Last day of a `custom` window, inclusive.
    #[serde(default, alias = "endDate")]
    pub end_date: Option<NaiveDate>,
}

#[derive(Debug, Clone, Serialize, Deserialize, IntoParams)]
pub struct TopProductsQuery {
    #[serde(default = "default_period")]
    pub period: String,

    #[serde(default, alias = "startDate")]
    pub start_date: Option<NaiveDate>,

    #[serde(default, alias = "endDate")]
    pub end_date: Option<NaiveDate>,

    #[serde(default = "default_limit")]
    pub limit: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, IntoParams)]
pub struct ExportQuery {
    #[serde(default = "default_period")]
    pub period: String,

    #[serde(default, alias = "startDate")]
    pub start_date: Option<NaiveDate>,

    #[serde(default, alias = "endDate")]
    pub end_date: Option<NaiveDate>,

    #[serde(default = "default_format")]
    pub format: String,
}

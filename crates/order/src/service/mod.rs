pub mod order;
mod report;

pub use self::report::{ReportService, ReportServiceDeps};

use crate::domain::auth::AuthContext;
use opentelemetry::KeyValue;

fn auth_attributes(auth: &AuthContext) -> [KeyValue; 2] {
    [
        KeyValue::new("auth.user_id", auth.user_id.map(i64::from).unwrap_or_default()),
        KeyValue::new("auth.role", format!("{:?}", auth.role).to_lowercase()),
    ]
}

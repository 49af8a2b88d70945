mod logs;
mod metrics;
mod observe;
mod otel;
mod shutdown;

pub use self::logs::init_logger;
pub use self::metrics::{Labels, Method, Metrics, Status};
pub use self::observe::Observer;
pub use self::otel::{Telemetry, TracingContext};
pub use self::shutdown::shutdown_signal;

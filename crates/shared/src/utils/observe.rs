use crate::utils::{Method, Metrics, Status, TracingContext};
use opentelemetry::{
    Context, KeyValue,
    global::{self, BoxedTracer},
    trace::{Span, SpanKind, TraceContextExt, Tracer},
};
use prometheus_client::registry::Registry;
use std::{fmt, sync::Arc};
use tokio::{sync::Mutex, time::Instant};
use tracing::{error, info};

/// Span + request-metric bookkeeping shared by the services. Every
/// operation calls [`Observer::start`] once and exactly one of
/// [`Observer::success`] / [`Observer::failure`].
#[derive(Clone)]
pub struct Observer {
    tracer_name: &'static str,
    metrics: Arc<Mutex<Metrics>>,
}

impl Observer {
    /// `tracer_name` is the kebab-case service name, e.g. `order-command-service`.
    pub fn new(tracer_name: &'static str, registry: &mut Registry) -> Self {
        let metrics = Metrics::new();
        let prefix = tracer_name.replace('-', "_");
        metrics.register(registry, &prefix, tracer_name);

        Self {
            tracer_name,
            metrics: Arc::new(Mutex::new(metrics)),
        }
    }

    fn tracer(&self) -> BoxedTracer {
        global::tracer(self.tracer_name)
    }

    pub fn start(&self, operation_name: &str, attributes: Vec<KeyValue>) -> TracingContext {
        let start_time = Instant::now();
        let tracer = self.tracer();
        let mut span = tracer
            .span_builder(operation_name.to_string())
            .with_kind(SpanKind::Server)
            .with_attributes(attributes)
            .start(&tracer);

        info!("Starting operation: {operation_name}");

        span.add_event(
            "Operation started",
            vec![KeyValue::new("operation", operation_name.to_string())],
        );

        let cx = Context::current_with_span(span);
        TracingContext { cx, start_time }
    }

    pub async fn success(&self, tracing_ctx: &TracingContext, method: Method, message: &str) {
        self.complete(tracing_ctx, method, true, message).await;
    }

    pub async fn failure(&self, tracing_ctx: &TracingContext, method: Method, message: &str) {
        self.complete(tracing_ctx, method, false, message).await;
    }

    /// Closes the span as a success or failure depending on `result`
    /// and hands the result back unchanged.
    pub async fn finish<T: Send, E: fmt::Display + Send>(
        &self,
        tracing_ctx: &TracingContext,
        method: Method,
        result: Result<T, E>,
        success_message: &str,
    ) -> Result<T, E> {
        let failure = result.as_ref().err().map(ToString::to_string);
        match failure {
            None => self.success(tracing_ctx, method, success_message).await,
            Some(message) => self.failure(tracing_ctx, method, &message).await,
        }
        result
    }

    async fn complete(
        &self,
        tracing_ctx: &TracingContext,
        method: Method,
        is_success: bool,
        message: &str,
    ) {
        let (status_str, status) = if is_success {
            ("SUCCESS", Status::Success)
        } else {
            ("ERROR", Status::Error)
        };
        let elapsed = tracing_ctx.start_time.elapsed().as_secs_f64();

        tracing_ctx.cx.span().add_event(
            "Operation completed",
            vec![
                KeyValue::new("status", status_str),
                KeyValue::new("duration_secs", elapsed.to_string()),
                KeyValue::new("message", message.to_string()),
            ],
        );

        if is_success {
            info!("✅ Operation completed successfully: {message}");
        } else {
            error!("❌ Operation failed: {message}");
        }

        self.metrics.lock().await.record(method, status, elapsed);

        tracing_ctx.cx.span().end();
    }
}

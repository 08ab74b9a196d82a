//! Logging utilities for the surf-climate server.
//!
//! This module provides structured logging functionality to make logs more
//! searchable, analyzable, and useful for production deployments.

use std::future::Future;
use std::time::Instant;

use tracing::{debug, error, info, Level};

use tower_http::trace::{DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, TraceLayer};
use tower_http::LatencyUnit;
use uuid::Uuid;

use crate::error::ClimateError;
use crate::storage::DatasetStats;

/// Creates the tracing layer for HTTP request/response logging
pub fn create_http_trace_layer() -> TraceLayer<
    tower_http::classify::SharedClassifier<tower_http::classify::ServerErrorsAsFailures>,
    DefaultMakeSpan,
    DefaultOnRequest,
    DefaultOnResponse,
> {
    let response_formatter = DefaultOnResponse::new()
        .level(Level::DEBUG)
        .latency_unit(LatencyUnit::Micros);

    TraceLayer::new_for_http()
        .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
        .on_request(DefaultOnRequest::new().level(Level::DEBUG))
        .on_response(response_formatter)
}

/// Initialize the tracing subscriber with the given log level
pub fn init_tracing(log_level: &str) {
    let filter = match std::env::var("RUST_LOG") {
        Ok(val) => val,
        Err(_) => log_level.to_string(),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(true)
        .with_file(true)
        .with_line_number(true)
        .init();
}

/// Log what the opened database contains
pub fn log_dataset_stats(database_path: &str, stats: &DatasetStats) {
    info!(
        operation = "data_load",
        database_path = database_path,
        stations = stats.station_count,
        measurements = stats.measurement_count,
        first_date = ?stats.first_date,
        last_date = ?stats.last_date,
        "Dataset opened successfully"
    );
}

/// Run an async operation and log how long it took
pub async fn log_timed_operation<F, Fut, R>(operation: &str, f: F) -> R
where
    F: FnOnce() -> Fut,
    Fut: Future<Output = R>,
{
    let start = Instant::now();
    let request_id = Uuid::new_v4();

    debug!(
        operation = operation,
        request_id = %request_id,
        "Starting operation"
    );

    let result = f().await;

    info!(
        operation = operation,
        request_id = %request_id,
        duration_ms = start.elapsed().as_secs_f64() * 1000.0,
        "Operation completed"
    );

    result
}

/// Log an error that occurred during request processing
pub fn log_request_error(error: &ClimateError, endpoint: &str, request_id: &str) {
    let status = error.status_code();
    if status.is_server_error() {
        error!(
            error = %error,
            endpoint = endpoint,
            request_id = request_id,
            status = status.as_u16(),
            "Request processing error"
        );
    } else {
        info!(
            error = %error,
            endpoint = endpoint,
            request_id = request_id,
            status = status.as_u16(),
            "Request rejected"
        );
    }
}

/// Generate a unique request ID
pub fn generate_request_id() -> String {
    Uuid::new_v4().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_generate_request_id() {
        let id1 = generate_request_id();
        let id2 = generate_request_id();

        assert!(!id1.is_empty());
        assert_ne!(id1, id2); // IDs should be unique
    }

    #[tokio::test]
    async fn test_log_timed_operation() {
        let result = log_timed_operation("test_operation", || async {
            tokio::time::sleep(Duration::from_millis(1)).await;
            42
        })
        .await;

        assert_eq!(result, 42);
    }

    #[tokio::test]
    async fn test_log_timed_operation_passes_errors_through() {
        let result: crate::error::Result<()> =
            log_timed_operation("failing_operation", || async {
                Err(ClimateError::Server {
                    message: "boom".to_string(),
                })
            })
            .await;

        assert!(matches!(result, Err(ClimateError::Server { .. })));
    }
}

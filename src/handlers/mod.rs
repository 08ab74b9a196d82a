//! HTTP request handlers for the surf-climate API.
//!
//! Every JSON handler follows the same shape: open a session on the
//! injected store, run one query, let the session drop, and hand the result
//! to [`finish`] for logging and status mapping.

pub mod index;
pub mod precipitation;
pub mod stations;
pub mod stats;
pub mod tobs;

use std::sync::Arc;
use std::time::Instant;

use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use tower_http::cors::CorsLayer;
use tracing::info;

use crate::error::Result;
use crate::logging::{create_http_trace_layer, log_request_error};
use crate::state::AppState;

pub use index::index_handler;
pub use precipitation::precipitation_handler;
pub use stations::stations_handler;
pub use stats::{start_end_handler, start_handler};
pub use tobs::tobs_handler;

pub const INDEX_ROUTE: &str = "/";
pub const PRECIPITATION_ROUTE: &str = "/api/v1.0/precipitation";
pub const STATIONS_ROUTE: &str = "/api/v1.0/stations";
pub const TOBS_ROUTE: &str = "/api/v1.0/tobs";
pub const START_ROUTE: &str = "/api/v1.0/start";
pub const START_END_ROUTE: &str = "/api/v1.0/start/end";

/// Build the application router
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route(INDEX_ROUTE, get(index_handler))
        .route(PRECIPITATION_ROUTE, get(precipitation_handler))
        .route(STATIONS_ROUTE, get(stations_handler))
        .route(TOBS_ROUTE, get(tobs_handler))
        .route(START_ROUTE, get(start_handler))
        .route(START_END_ROUTE, get(start_end_handler))
        .layer(create_http_trace_layer())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Log the outcome of a request and turn it into a response.
fn finish(
    endpoint: &str,
    request_id: &str,
    start_time: Instant,
    result: Result<serde_json::Value>,
) -> Response {
    match result {
        Ok(body) => {
            info!(
                endpoint = endpoint,
                request_id = %request_id,
                duration_us = start_time.elapsed().as_micros() as u64,
                "Request successful"
            );
            Json(body).into_response()
        }
        Err(error) => {
            log_request_error(&error, endpoint, request_id);
            error.into_response()
        }
    }
}

//! # surf-climate
//!
//! A read-only JSON API over a weather dataset of stations and dated
//! precipitation/temperature measurements.
//!
//! ## Architecture
//!
//! - **Schema**: static record types for the `station` and `measurement` tables
//! - **Storage**: an injected store handing out one session per request,
//!   backed by SQLite or by in-memory fixtures
//! - **Queries**: the five canned aggregate queries
//! - **Handlers**: the HTTP routes, JSON bodies and error statuses

pub mod config;
pub mod error;
pub mod handlers;
pub mod logging;
pub mod queries;
pub mod schema;
pub mod state;
pub mod storage;

pub use config::Config;
pub use error::{ClimateError, Result};
pub use handlers::create_router;
pub use logging::{
    create_http_trace_layer, generate_request_id, init_tracing, log_dataset_stats,
    log_request_error, log_timed_operation,
};
pub use schema::{Measurement, Station};
pub use state::{AppState, ReportWindow};
pub use storage::{DateRange, MemoryStore, ObservationSession, ObservationStore, SqliteStore};

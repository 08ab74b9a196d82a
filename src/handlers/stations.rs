//! Stations endpoint handler.
//!
//! Returns every station with its number of observations, busiest first.

use axum::extract::State;
use axum::response::Response;
use std::sync::Arc;
use std::time::Instant;
use tracing::debug;

use super::{finish, STATIONS_ROUTE};
use crate::logging::generate_request_id;
use crate::queries;
use crate::state::AppState;

pub const STATIONS_LABEL: &str = "List of Stations With the Number of Observations";

/// Handle GET /api/v1.0/stations requests
pub async fn stations_handler(State(state): State<Arc<AppState>>) -> Response {
    let request_id = generate_request_id();
    let start_time = Instant::now();

    debug!(
        endpoint = STATIONS_ROUTE,
        request_id = %request_id,
        "Processing stations request"
    );

    let result = async {
        let mut session = state.store.open_session().await?;
        queries::station_observation_counts(session.as_mut()).await
    }
    .await
    .map(|counts| serde_json::json!({ STATIONS_LABEL: counts }));

    finish(STATIONS_ROUTE, &request_id, start_time, result)
}

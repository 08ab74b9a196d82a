//! Temperature observations endpoint handler.

use axum::extract::State;
use axum::response::Response;
use std::sync::Arc;
use std::time::Instant;
use tracing::debug;

use super::{finish, TOBS_ROUTE};
use crate::logging::generate_request_id;
use crate::queries;
use crate::schema::format_date;
use crate::state::AppState;

/// Handle GET /api/v1.0/tobs requests
pub async fn tobs_handler(State(state): State<Arc<AppState>>) -> Response {
    let request_id = generate_request_id();
    let start_time = Instant::now();
    let range = state.window.period();

    debug!(
        endpoint = TOBS_ROUTE,
        request_id = %request_id,
        start = %range.start,
        end = %range.end,
        "Processing temperature observations request"
    );

    let result = async {
        let mut session = state.store.open_session().await?;
        queries::temperature_observations(session.as_mut(), range).await
    }
    .await
    .map(|temps| {
        let label = format!(
            "Temperature Observations (tobs) from {} to {}",
            format_date(range.start),
            format_date(range.end)
        );
        serde_json::json!({ label: temps })
    });

    finish(TOBS_ROUTE, &request_id, start_time, result)
}

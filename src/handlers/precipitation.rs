//! Precipitation endpoint handler.
//!
//! Returns precipitation per date over the reporting year.

use axum::extract::State;
use axum::response::Response;
use std::sync::Arc;
use std::time::Instant;
use tracing::debug;

use super::{finish, PRECIPITATION_ROUTE};
use crate::logging::generate_request_id;
use crate::queries;
use crate::schema::format_date;
use crate::state::AppState;

/// Handle GET /api/v1.0/precipitation requests
pub async fn precipitation_handler(State(state): State<Arc<AppState>>) -> Response {
    let request_id = generate_request_id();
    let start_time = Instant::now();
    let range = state.window.period();

    debug!(
        endpoint = PRECIPITATION_ROUTE,
        request_id = %request_id,
        start = %range.start,
        end = %range.end,
        "Processing precipitation request"
    );

    let result = async {
        let mut session = state.store.open_session().await?;
        queries::precipitation(session.as_mut(), range).await
    }
    .await
    .map(|by_date| {
        let label = format!(
            "Precipitation from {} to {}",
            format_date(range.start),
            format_date(range.end)
        );
        serde_json::json!({ label: by_date })
    });

    finish(PRECIPITATION_ROUTE, &request_id, start_time, result)
}

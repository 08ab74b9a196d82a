//! Temperature statistics endpoint handlers.
//!
//! `/api/v1.0/start` reports min, average and max temperature across all
//! stations on the snapshot date; `/api/v1.0/start/end` does the same over
//! the whole reporting year.

use axum::extract::State;
use axum::response::Response;
use serde_json::{Map, Value};
use std::sync::Arc;
use std::time::Instant;
use tracing::debug;

use super::{finish, START_END_ROUTE, START_ROUTE};
use crate::logging::generate_request_id;
use crate::queries::{self, TemperatureStats};
use crate::schema::format_date;
use crate::state::AppState;

/// Key the three statistics with labels naming the period they cover.
fn stats_body(stats: TemperatureStats, period: &str) -> Value {
    let mut body = Map::new();
    body.insert(
        format!("The lowest temperature {} (all stations), F", period),
        Value::from(stats.min),
    );
    body.insert(
        format!("The average temperature {} (all stations), F", period),
        Value::from(stats.avg),
    );
    body.insert(
        format!("The highest temperature {} (all stations), F", period),
        Value::from(stats.max),
    );
    Value::Object(body)
}

/// Handle GET /api/v1.0/start requests
pub async fn start_handler(State(state): State<Arc<AppState>>) -> Response {
    let request_id = generate_request_id();
    let start_time = Instant::now();
    let date = state.window.snapshot_date;

    debug!(
        endpoint = START_ROUTE,
        request_id = %request_id,
        date = %date,
        "Processing single-day temperature stats request"
    );

    let result = async {
        let mut session = state.store.open_session().await?;
        queries::temperature_stats(session.as_mut(), date).await
    }
    .await
    .map(|stats| stats_body(stats, &format!("on {}", format_date(date))));

    finish(START_ROUTE, &request_id, start_time, result)
}

/// Handle GET /api/v1.0/start/end requests
pub async fn start_end_handler(State(state): State<Arc<AppState>>) -> Response {
    let request_id = generate_request_id();
    let start_time = Instant::now();
    let range = state.window.period();

    debug!(
        endpoint = START_END_ROUTE,
        request_id = %request_id,
        start = %range.start,
        end = %range.end,
        "Processing range temperature stats request"
    );

    let result = async {
        // no session is opened for an inverted range
        queries::validate_range(range)?;
        let mut session = state.store.open_session().await?;
        queries::temperature_stats_range(session.as_mut(), range).await
    }
    .await
    .map(|stats| {
        let period = format!(
            "during {} - {}",
            format_date(range.start),
            format_date(range.end)
        );
        stats_body(stats, &period)
    });

    finish(START_END_ROUTE, &request_id, start_time, result)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stats_body_labels() {
        let stats = TemperatureStats {
            min: 74.0,
            avg: 78.5,
            max: 81.0,
        };
        let body = stats_body(stats, "on 2016-08-23");

        assert_eq!(
            body,
            serde_json::json!({
                "The lowest temperature on 2016-08-23 (all stations), F": 74.0,
                "The average temperature on 2016-08-23 (all stations), F": 78.5,
                "The highest temperature on 2016-08-23 (all stations), F": 81.0,
            })
        );
    }
}

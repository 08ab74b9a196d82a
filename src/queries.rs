//! The five canned queries behind the API.
//!
//! Each function runs against a session the caller already holds and
//! applies the result policy (date keying, ordering, rounding, and the
//! "no data" and "inverted range" failures) on top of the primitive
//! reads in [`crate::storage`].

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::Serialize;

use crate::error::{ClimateError, Result};
use crate::schema::format_date;
use crate::storage::{DateRange, ObservationSession, StationCount, TemperatureAggregate};

pub const INVALID_RANGE_MESSAGE: &str = "Start date must not be after end date";
pub const NO_DATA_FOR_RANGE_MESSAGE: &str = "No temperature data found for the given dates";

/// Precipitation keyed by `YYYY-MM-DD`.
pub type PrecipitationByDate = BTreeMap<String, Option<f64>>;

/// Min, average and max temperature in Fahrenheit.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TemperatureStats {
    pub min: f64,
    /// Rounded to two decimal places
    pub avg: f64,
    pub max: f64,
}

impl TemperatureStats {
    /// Build the triple from an aggregate row, or fail with `NotFound`.
    ///
    /// The aggregate always has exactly one row, so "no data" shows up as a
    /// null minimum rather than as an empty result.
    fn from_aggregate(aggregate: TemperatureAggregate, not_found: impl Into<String>) -> Result<Self> {
        match (aggregate.min, aggregate.avg, aggregate.max) {
            (Some(min), Some(avg), Some(max)) => Ok(Self {
                min,
                avg: round_to_hundredths(avg),
                max,
            }),
            _ => Err(ClimateError::NotFound {
                message: not_found.into(),
            }),
        }
    }
}

/// Round half away from zero to two decimal places.
pub fn round_to_hundredths(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Reject a range whose start lies after its end.
pub fn validate_range(range: DateRange) -> Result<()> {
    if range.is_inverted() {
        return Err(ClimateError::InvalidRange {
            message: INVALID_RANGE_MESSAGE.to_string(),
        });
    }
    Ok(())
}

/// Precipitation per date inside `range`. When several stations report
/// the same date the last row read wins.
pub async fn precipitation(
    session: &mut dyn ObservationSession,
    range: DateRange,
) -> Result<PrecipitationByDate> {
    let rows = session.precipitation(range).await?;

    let mut by_date = PrecipitationByDate::new();
    for row in rows {
        by_date.insert(format_date(row.date), row.prcp);
    }
    Ok(by_date)
}

/// Measurement counts per station, largest first.
pub async fn station_observation_counts(
    session: &mut dyn ObservationSession,
) -> Result<Vec<StationCount>> {
    let mut counts = session.observation_counts().await?;
    // stable, so storage order survives among ties
    counts.sort_by(|a, b| b.count.cmp(&a.count));
    Ok(counts)
}

/// Temperatures observed inside `range`, station and date dropped.
pub async fn temperature_observations(
    session: &mut dyn ObservationSession,
    range: DateRange,
) -> Result<Vec<Option<f64>>> {
    session.temperatures(range).await
}

/// Temperature stats across all stations on one day.
pub async fn temperature_stats(
    session: &mut dyn ObservationSession,
    date: NaiveDate,
) -> Result<TemperatureStats> {
    let aggregate = session.temperature_aggregate(DateRange::single(date)).await?;
    TemperatureStats::from_aggregate(
        aggregate,
        format!("No temperature data found for {}", format_date(date)),
    )
}

/// Temperature stats across all stations over an inclusive range.
pub async fn temperature_stats_range(
    session: &mut dyn ObservationSession,
    range: DateRange,
) -> Result<TemperatureStats> {
    validate_range(range)?;
    let aggregate = session.temperature_aggregate(range).await?;
    TemperatureStats::from_aggregate(aggregate, NO_DATA_FOR_RANGE_MESSAGE)
}

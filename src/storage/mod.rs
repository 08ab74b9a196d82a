//! Storage access for the observation dataset.
//!
//! Handlers never touch a database directly. They hold an
//! [`ObservationStore`], open one [`ObservationSession`] per request and
//! drop it before responding. Dropping the session releases whatever it
//! holds (a pooled connection for [`SqliteStore`], a counter slot for
//! [`MemoryStore`]), so every exit path gives it back.

pub mod memory;
pub mod sqlite;

use async_trait::async_trait;
use chrono::NaiveDate;
use serde::Serialize;

use crate::error::Result;

pub use memory::MemoryStore;
pub use sqlite::{DatasetStats, SqliteStore};

/// An inclusive range of calendar dates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    /// A range covering exactly one day.
    pub fn single(date: NaiveDate) -> Self {
        Self {
            start: date,
            end: date,
        }
    }

    /// True when `start` lies after `end`.
    pub fn is_inverted(&self) -> bool {
        self.start > self.end
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }
}

/// One `(date, prcp)` row.
#[derive(Debug, Clone, PartialEq, sqlx::FromRow)]
pub struct PrecipitationReading {
    pub date: NaiveDate,
    pub prcp: Option<f64>,
}

/// Number of measurements recorded by one station.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, sqlx::FromRow)]
pub struct StationCount {
    #[serde(rename = "Station")]
    pub station: String,
    #[serde(rename = "Number of Observations")]
    pub count: i64,
}

/// The single row produced by `MIN/AVG/MAX` over `tobs`.
///
/// All three fields are `None` when no row matched.
#[derive(Debug, Clone, Copy, Default, PartialEq, sqlx::FromRow)]
pub struct TemperatureAggregate {
    pub min: Option<f64>,
    pub avg: Option<f64>,
    pub max: Option<f64>,
}

/// Factory for per-request sessions.
#[async_trait]
pub trait ObservationStore: Send + Sync {
    /// Acquire a session scoped to the caller.
    async fn open_session(&self) -> Result<Box<dyn ObservationSession>>;
}

/// Primitive reads against the dataset. Aggregation policy lives in
/// [`crate::queries`].
#[async_trait]
pub trait ObservationSession: Send {
    /// `(date, prcp)` for every measurement dated inside `range`.
    async fn precipitation(&mut self, range: DateRange) -> Result<Vec<PrecipitationReading>>;

    /// Measurements per station, joined on the station id, largest first.
    async fn observation_counts(&mut self) -> Result<Vec<StationCount>>;

    /// `tobs` for every measurement dated inside `range`, in retrieval order.
    async fn temperatures(&mut self, range: DateRange) -> Result<Vec<Option<f64>>>;

    /// `MIN/AVG/MAX(tobs)` over non-null temperatures dated inside `range`.
    async fn temperature_aggregate(&mut self, range: DateRange) -> Result<TemperatureAggregate>;
}

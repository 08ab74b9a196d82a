//! Record types for the two tables of the weather dataset.
//!
//! The column sets are declared statically here and decoded with
//! `sqlx::FromRow`; nothing is discovered from the live database.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Text encoding of `measurement.date` in the dataset.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// A weather station (`station` table).
#[derive(Debug, Clone, PartialEq, FromRow, Serialize, Deserialize)]
pub struct Station {
    /// Station identifier, primary key
    pub station: String,
    /// Human-readable station name
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
    /// Elevation in feet
    pub elevation: f64,
}

/// A dated observation at a station (`measurement` table).
#[derive(Debug, Clone, PartialEq, FromRow, Serialize, Deserialize)]
pub struct Measurement {
    /// References `Station::station`
    pub station: String,
    pub date: NaiveDate,
    /// Precipitation in inches
    pub prcp: Option<f64>,
    /// Observed temperature in Fahrenheit
    pub tobs: Option<f64>,
}

impl Measurement {
    /// Join predicate `measurement.station = station.station`.
    pub fn belongs_to(&self, station: &Station) -> bool {
        self.station == station.station
    }

    /// The date rendered the way the dataset stores it.
    pub fn date_key(&self) -> String {
        format_date(self.date)
    }
}

/// Render a date as `YYYY-MM-DD`.
pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

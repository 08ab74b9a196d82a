//! SQLite-backed observation store.
//!
//! The dataset file is opened read-only through an `sqlx` pool. Each
//! session owns one pooled connection and hands it back when dropped.

use std::path::Path;
use std::time::Instant;

use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::pool::PoolConnection;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use sqlx::Sqlite;
use tracing::{debug, info};

use super::{
    DateRange, ObservationSession, ObservationStore, PrecipitationReading, StationCount,
    TemperatureAggregate,
};
use crate::error::{ClimateError, Result};
use crate::schema::{format_date, Measurement, Station};

const REQUIRED_TABLES: [&str; 2] = ["station", "measurement"];

/// Row counts and date coverage of an opened dataset.
#[derive(Debug, Clone, PartialEq)]
pub struct DatasetStats {
    pub station_count: i64,
    pub measurement_count: i64,
    pub first_date: Option<NaiveDate>,
    pub last_date: Option<NaiveDate>,
}

/// Read-only store over a SQLite file.
#[derive(Debug, Clone)]
pub struct SqliteStore {
    pool: SqlitePool,
}

impl SqliteStore {
    /// Open `path` read-only and check that both tables are present.
    pub async fn open(path: &Path, max_connections: u32) -> Result<Self> {
        if !path.exists() {
            return Err(ClimateError::Io(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("Database file not found: {}", path.display()),
            )));
        }

        let options = SqliteConnectOptions::new()
            .filename(path)
            .read_only(true)
            .create_if_missing(false);

        let pool = SqlitePoolOptions::new()
            .max_connections(max_connections)
            .connect_with(options)
            .await?;

        info!("Opened database: {}", path.display());

        let store = Self { pool };
        store.check_tables().await?;
        Ok(store)
    }

    async fn check_tables(&self) -> Result<()> {
        let present: Vec<String> = sqlx::query_scalar(
            "SELECT name FROM sqlite_master WHERE type = 'table' AND name IN ('station', 'measurement')",
        )
        .fetch_all(&self.pool)
        .await?;

        for table in REQUIRED_TABLES {
            if !present.iter().any(|name| name == table) {
                return Err(ClimateError::Config {
                    message: format!("Database is missing the '{}' table", table),
                });
            }
        }

        debug!("Found tables: {:?}", present);
        Ok(())
    }

    /// Count rows and find the date coverage of the measurement table.
    pub async fn dataset_stats(&self) -> Result<DatasetStats> {
        let station_count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM station")
            .fetch_one(&self.pool)
            .await?;

        let (measurement_count, first_date, last_date): (i64, Option<String>, Option<String>) =
            sqlx::query_as("SELECT COUNT(*), MIN(date(date)), MAX(date(date)) FROM measurement")
                .fetch_one(&self.pool)
                .await?;

        Ok(DatasetStats {
            station_count,
            measurement_count,
            first_date: first_date.as_deref().and_then(parse_stored_date),
            last_date: last_date.as_deref().and_then(parse_stored_date),
        })
    }

    /// Every station row, ordered by id.
    pub async fn stations(&self) -> Result<Vec<Station>> {
        let stations = sqlx::query_as::<_, Station>(
            "SELECT station, name, latitude, longitude, elevation FROM station ORDER BY station",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(stations)
    }

    /// The first `limit` measurement rows with a readable date, in storage order.
    pub async fn sample_measurements(&self, limit: i64) -> Result<Vec<Measurement>> {
        let rows = sqlx::query_as::<_, Measurement>(
            "SELECT station, date(date) AS date, prcp, tobs FROM measurement \
             WHERE date(date) IS NOT NULL LIMIT ?1",
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }
}

fn parse_stored_date(raw: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(raw, crate::schema::DATE_FORMAT).ok()
}

#[async_trait]
impl ObservationStore for SqliteStore {
    async fn open_session(&self) -> Result<Box<dyn ObservationSession>> {
        let started = Instant::now();
        let conn = self.pool.acquire().await?;
        debug!(
            wait_us = started.elapsed().as_micros() as u64,
            "Acquired database connection"
        );
        Ok(Box::new(SqliteSession { conn }))
    }
}

/// One pooled connection, returned to the pool on drop.
pub struct SqliteSession {
    conn: PoolConnection<Sqlite>,
}

#[async_trait]
impl ObservationSession for SqliteSession {
    // `date()` yields NULL for text it cannot parse; those rows are skipped
    // instead of failing the `NaiveDate` decode.
    async fn precipitation(&mut self, range: DateRange) -> Result<Vec<PrecipitationReading>> {
        let rows = sqlx::query_as::<_, PrecipitationReading>(
            "SELECT date(date) AS date, prcp FROM measurement \
             WHERE date(date) IS NOT NULL AND date(date) >= ?1 AND date(date) <= ?2",
        )
        .bind(format_date(range.start))
        .bind(format_date(range.end))
        .fetch_all(&mut *self.conn)
        .await?;
        Ok(rows)
    }

    async fn observation_counts(&mut self) -> Result<Vec<StationCount>> {
        let rows = sqlx::query_as::<_, StationCount>(
            "SELECT s.station AS station, COUNT(m.station) AS count \
             FROM station s JOIN measurement m ON m.station = s.station \
             GROUP BY s.station \
             ORDER BY count DESC",
        )
        .fetch_all(&mut *self.conn)
        .await?;
        Ok(rows)
    }

    async fn temperatures(&mut self, range: DateRange) -> Result<Vec<Option<f64>>> {
        let rows = sqlx::query_scalar::<_, Option<f64>>(
            "SELECT CAST(tobs AS REAL) FROM measurement \
             WHERE date(date) >= ?1 AND date(date) <= ?2",
        )
        .bind(format_date(range.start))
        .bind(format_date(range.end))
        .fetch_all(&mut *self.conn)
        .await?;
        Ok(rows)
    }

    async fn temperature_aggregate(&mut self, range: DateRange) -> Result<TemperatureAggregate> {
        let row = sqlx::query_as::<_, TemperatureAggregate>(
            "SELECT CAST(MIN(tobs) AS REAL) AS min, \
                    CAST(AVG(tobs) AS REAL) AS avg, \
                    CAST(MAX(tobs) AS REAL) AS max \
             FROM measurement \
             WHERE tobs IS NOT NULL AND date(date) >= ?1 AND date(date) <= ?2",
        )
        .bind(format_date(range.start))
        .bind(format_date(range.end))
        .fetch_one(&mut *self.conn)
        .await?;
        Ok(row)
    }
}

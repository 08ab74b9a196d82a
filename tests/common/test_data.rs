//! Test data generation utilities.
//!
//! Writes small SQLite databases laid out like the production weather
//! dataset: a `station` table and a `measurement` table keyed by station id.

use chrono::NaiveDate;
use sqlx::sqlite::{SqliteConnectOptions, SqliteConnection};
use sqlx::Connection;
use std::path::Path;

use surf_climate::{Measurement, Station};

type Result<T> = std::result::Result<T, sqlx::Error>;

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

pub fn station(id: &str, name: &str) -> Station {
    Station {
        station: id.to_string(),
        name: name.to_string(),
        latitude: 21.3,
        longitude: -157.8,
        elevation: 5.0,
    }
}

pub fn measurement(id: &str, day: NaiveDate, prcp: Option<f64>, tobs: Option<f64>) -> Measurement {
    Measurement {
        station: id.to_string(),
        date: day,
        prcp,
        tobs,
    }
}

/// Three stations with a handful of readings around the reporting year.
pub fn hawaii_sample() -> (Vec<Station>, Vec<Measurement>) {
    let stations = vec![
        station("USC00519397", "WAIKIKI 717.2, HI US"),
        station("USC00513117", "KANEOHE 838.1, HI US"),
        station("USC00519281", "WAIHEE 837.5, HI US"),
    ];

    let measurements = vec![
        measurement("USC00519397", date(2016, 8, 22), Some(0.4), Some(79.0)),
        measurement("USC00519397", date(2016, 8, 23), Some(0.0), Some(81.0)),
        measurement("USC00513117", date(2016, 8, 23), Some(0.15), Some(76.0)),
        measurement("USC00519281", date(2016, 8, 23), Some(1.79), Some(77.0)),
        measurement("USC00519281", date(2016, 12, 1), None, Some(70.0)),
        measurement("USC00519281", date(2017, 3, 15), Some(0.02), None),
        measurement("USC00519281", date(2017, 8, 23), Some(0.45), Some(82.0)),
        measurement("USC00519397", date(2017, 8, 23), Some(0.0), Some(81.0)),
        measurement("USC00513117", date(2017, 8, 24), Some(0.3), Some(84.0)),
    ];

    (stations, measurements)
}

/// Create a SQLite file at `path` holding the given rows.
pub async fn create_test_database(
    path: &Path,
    stations: &[Station],
    measurements: &[Measurement],
) -> Result<()> {
    let options = SqliteConnectOptions::new()
        .filename(path)
        .create_if_missing(true);
    let mut conn = SqliteConnection::connect_with(&options).await?;

    sqlx::query(
        "CREATE TABLE station (
            id INTEGER PRIMARY KEY,
            station TEXT,
            name TEXT,
            latitude FLOAT,
            longitude FLOAT,
            elevation FLOAT
        )",
    )
    .execute(&mut conn)
    .await?;

    sqlx::query(
        "CREATE TABLE measurement (
            id INTEGER PRIMARY KEY,
            station TEXT,
            date TEXT,
            prcp FLOAT,
            tobs FLOAT
        )",
    )
    .execute(&mut conn)
    .await?;

    for s in stations {
        sqlx::query(
            "INSERT INTO station (station, name, latitude, longitude, elevation) VALUES (?1, ?2, ?3, ?4, ?5)",
        )
        .bind(&s.station)
        .bind(&s.name)
        .bind(s.latitude)
        .bind(s.longitude)
        .bind(s.elevation)
        .execute(&mut conn)
        .await?;
    }

    for m in measurements {
        sqlx::query("INSERT INTO measurement (station, date, prcp, tobs) VALUES (?1, ?2, ?3, ?4)")
            .bind(&m.station)
            .bind(m.date_key())
            .bind(m.prcp)
            .bind(m.tobs)
            .execute(&mut conn)
            .await?;
    }

    conn.close().await
}

/// Append one measurement row whose `date` column holds `raw_date` verbatim.
pub async fn insert_raw_measurement(
    path: &Path,
    station: &str,
    raw_date: &str,
    prcp: Option<f64>,
    tobs: Option<f64>,
) -> Result<()> {
    let options = SqliteConnectOptions::new().filename(path);
    let mut conn = SqliteConnection::connect_with(&options).await?;

    sqlx::query("INSERT INTO measurement (station, date, prcp, tobs) VALUES (?1, ?2, ?3, ?4)")
        .bind(station)
        .bind(raw_date)
        .bind(prcp)
        .bind(tobs)
        .execute(&mut conn)
        .await?;

    conn.close().await
}

/// Create a SQLite file with only a `station` table.
pub async fn create_database_without_measurements(path: &Path) -> Result<()> {
    let options = SqliteConnectOptions::new()
        .filename(path)
        .create_if_missing(true);
    let mut conn = SqliteConnection::connect_with(&options).await?;

    sqlx::query("CREATE TABLE station (station TEXT, name TEXT)")
        .execute(&mut conn)
        .await?;

    conn.close().await
}

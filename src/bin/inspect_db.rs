use std::path::PathBuf;

use anyhow::Context;
use surf_climate::SqliteStore;

const SAMPLE_ROWS: i64 = 10;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let file_path = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .context("usage: inspect_db <path-to-sqlite-file>")?;

    println!("Inspecting database: {}", file_path.display());

    let store = SqliteStore::open(&file_path, 1)
        .await
        .with_context(|| format!("failed to open {}", file_path.display()))?;

    let stats = store.dataset_stats().await?;
    println!("\n=== DATASET ===");
    println!("  stations:     {}", stats.station_count);
    println!("  measurements: {}", stats.measurement_count);
    match (stats.first_date, stats.last_date) {
        (Some(first), Some(last)) => println!("  dates:        {} .. {}", first, last),
        _ => println!("  dates:        (no measurements)"),
    }

    println!("\nStations:");
    for station in store.stations().await? {
        println!(
            "  {:<12} {:<45} lat={:>8.4} lon={:>9.4} elev={:>6.1}",
            station.station, station.name, station.latitude, station.longitude, station.elevation
        );
    }

    println!("\nSample Measurements:");
    for m in store.sample_measurements(SAMPLE_ROWS).await? {
        let fmt = |v: Option<f64>| v.map_or_else(|| "null".to_string(), |v| v.to_string());
        println!(
            "  {:<12} {} prcp={:<6} tobs={}",
            m.station,
            m.date_key(),
            fmt(m.prcp),
            fmt(m.tobs)
        );
    }

    Ok(())
}

//! In-memory observation store.
//!
//! Serves the same reads as the SQLite store from vectors held in memory.
//! Used as the fixture store in unit tests.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;

use super::{
    DateRange, ObservationSession, ObservationStore, PrecipitationReading, StationCount,
    TemperatureAggregate,
};
use crate::error::Result;
use crate::schema::{Measurement, Station};

#[derive(Debug)]
struct Dataset {
    stations: Vec<Station>,
    measurements: Vec<Measurement>,
}

/// Store backed by in-memory station and measurement rows.
#[derive(Debug, Clone)]
pub struct MemoryStore {
    dataset: Arc<Dataset>,
    open_sessions: Arc<AtomicUsize>,
}

impl MemoryStore {
    pub fn new(stations: Vec<Station>, measurements: Vec<Measurement>) -> Self {
        Self {
            dataset: Arc::new(Dataset {
                stations,
                measurements,
            }),
            open_sessions: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Number of sessions currently alive.
    pub fn open_sessions(&self) -> usize {
        self.open_sessions.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ObservationStore for MemoryStore {
    async fn open_session(&self) -> Result<Box<dyn ObservationSession>> {
        self.open_sessions.fetch_add(1, Ordering::SeqCst);
        Ok(Box::new(MemorySession {
            dataset: Arc::clone(&self.dataset),
            open_sessions: Arc::clone(&self.open_sessions),
        }))
    }
}

struct MemorySession {
    dataset: Arc<Dataset>,
    open_sessions: Arc<AtomicUsize>,
}

impl MemorySession {
    fn in_range(&self, range: DateRange) -> impl Iterator<Item = &Measurement> + '_ {
        self.dataset
            .measurements
            .iter()
            .filter(move |m| range.contains(m.date))
    }
}

impl Drop for MemorySession {
    fn drop(&mut self) {
        self.open_sessions.fetch_sub(1, Ordering::SeqCst);
    }
}

#[async_trait]
impl ObservationSession for MemorySession {
    async fn precipitation(&mut self, range: DateRange) -> Result<Vec<PrecipitationReading>> {
        Ok(self
            .in_range(range)
            .map(|m| PrecipitationReading {
                date: m.date,
                prcp: m.prcp,
            })
            .collect())
    }

    async fn observation_counts(&mut self) -> Result<Vec<StationCount>> {
        let mut counts: Vec<StationCount> = self
            .dataset
            .stations
            .iter()
            .map(|station| StationCount {
                station: station.station.clone(),
                count: self
                    .dataset
                    .measurements
                    .iter()
                    .filter(|m| m.belongs_to(station))
                    .count() as i64,
            })
            // inner join: stations without measurements produce no group
            .filter(|c| c.count > 0)
            .collect();

        counts.sort_by(|a, b| b.count.cmp(&a.count));
        Ok(counts)
    }

    async fn temperatures(&mut self, range: DateRange) -> Result<Vec<Option<f64>>> {
        Ok(self.in_range(range).map(|m| m.tobs).collect())
    }

    async fn temperature_aggregate(&mut self, range: DateRange) -> Result<TemperatureAggregate> {
        let temps: Vec<f64> = self.in_range(range).filter_map(|m| m.tobs).collect();
        if temps.is_empty() {
            return Ok(TemperatureAggregate::default());
        }

        let min = temps.iter().copied().fold(f64::INFINITY, f64::min);
        let max = temps.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let avg = temps.iter().sum::<f64>() / temps.len() as f64;

        Ok(TemperatureAggregate {
            min: Some(min),
            avg: Some(avg),
            max: Some(max),
        })
    }
}

//! Application state management for surf-climate.
//!
//! This module defines the shared state passed to all handlers: the
//! injected observation store and the fixed reporting dates.

use std::sync::Arc;

use chrono::NaiveDate;

use crate::config::Config;
use crate::storage::{DateRange, ObservationStore};

const fn ymd(year: i32, month: u32, day: u32) -> NaiveDate {
    match NaiveDate::from_ymd_opt(year, month, day) {
        Some(date) => date,
        None => panic!("invalid calendar date"),
    }
}

/// First day of the reporting year.
pub const PERIOD_START: NaiveDate = ymd(2016, 8, 23);
/// Last day of the reporting year, the most recent date in the dataset.
pub const PERIOD_END: NaiveDate = ymd(2017, 8, 23);
/// Day reported by the single-date temperature endpoint.
pub const SNAPSHOT_DATE: NaiveDate = ymd(2016, 8, 23);

/// The fixed dates every endpoint reports on.
///
/// These are constants of the deployment, not request parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReportWindow {
    pub period_start: NaiveDate,
    pub period_end: NaiveDate,
    pub snapshot_date: NaiveDate,
}

impl ReportWindow {
    /// The reporting year as an inclusive range.
    pub fn period(&self) -> DateRange {
        DateRange::new(self.period_start, self.period_end)
    }
}

impl Default for ReportWindow {
    fn default() -> Self {
        Self {
            period_start: PERIOD_START,
            period_end: PERIOD_END,
            snapshot_date: SNAPSHOT_DATE,
        }
    }
}

/// The main application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    /// Configuration
    pub config: Config,
    /// Storage handle; each request opens its own session from it
    pub store: Arc<dyn ObservationStore>,
    /// Reporting dates
    pub window: ReportWindow,
}

impl AppState {
    /// Create a new AppState reporting on the default window
    pub fn new(config: Config, store: Arc<dyn ObservationStore>) -> Self {
        Self {
            config,
            store,
            window: ReportWindow::default(),
        }
    }

    /// Replace the reporting window
    pub fn with_window(mut self, window: ReportWindow) -> Self {
        self.window = window;
        self
    }

    /// Create a new AppState wrapped in an Arc for shared ownership
    pub fn new_shared(config: Config, store: Arc<dyn ObservationStore>) -> Arc<Self> {
        Arc::new(Self::new(config, store))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;

    #[test]
    fn test_default_window() {
        let window = ReportWindow::default();
        assert_eq!(window.period_start.to_string(), "2016-08-23");
        assert_eq!(window.period_end.to_string(), "2017-08-23");
        assert_eq!(window.snapshot_date, window.period_start);
        assert!(!window.period().is_inverted());
    }

    #[test]
    fn test_with_window() {
        let store = Arc::new(MemoryStore::new(Vec::new(), Vec::new()));
        let inverted = ReportWindow {
            period_start: PERIOD_END,
            period_end: PERIOD_START,
            snapshot_date: SNAPSHOT_DATE,
        };
        let state = AppState::new(Config::default(), store).with_window(inverted);
        assert!(state.window.period().is_inverted());
    }
}

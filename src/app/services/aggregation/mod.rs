//! Summary statistics over the working dataset
//!
//! Four independent, read-only statistic families. Each checks for an empty
//! working set before touching any reduction, so modes, extremes and means
//! are never computed over nothing.
//!
//! # Architecture
//!
//! - [`frame_ops`] - Null-ignoring reductions and stable-tie modes
//! - [`summary`] - Typed results and explicit absence markers
//! - [`temporal`] - Popular month, weekday and start hour
//! - [`stations`] - Popular start, end and start-end route
//! - [`duration`] - Total and mean travel time breakdowns
//! - [`users`] - User types, gender and birth year

pub mod duration;
pub mod frame_ops;
pub mod stations;
pub mod summary;
pub mod temporal;
pub mod users;

#[cfg(test)]
pub mod tests;

pub use summary::{
    BirthYearStat, BirthYearSummary, ColumnStat, DurationBreakdown, DurationStats, MeanDuration,
    Outcome, StationStats, TimeStats, UserStats,
};

use crate::config::Calendar;
use crate::error::Result;
use crate::models::WorkingDataset;
use tracing::debug;

/// Computes the statistic families for a working dataset
#[derive(Debug, Clone)]
pub struct AggregationEngine {
    calendar: Calendar,
}

impl AggregationEngine {
    pub fn new(calendar: Calendar) -> Self {
        Self { calendar }
    }

    pub fn time_stats(&self, dataset: &WorkingDataset) -> Result<Outcome<TimeStats>> {
        self.guarded("time", dataset, |dataset| {
            temporal::time_stats(dataset.rows(), &self.calendar)
        })
    }

    pub fn station_stats(&self, dataset: &WorkingDataset) -> Result<Outcome<StationStats>> {
        self.guarded("station", dataset, |dataset| {
            stations::station_stats(dataset.rows())
        })
    }

    pub fn duration_stats(&self, dataset: &WorkingDataset) -> Result<Outcome<DurationStats>> {
        self.guarded("duration", dataset, |dataset| {
            duration::duration_stats(dataset.rows())
        })
    }

    pub fn user_stats(&self, dataset: &WorkingDataset) -> Result<Outcome<UserStats>> {
        self.guarded("user", dataset, users::user_stats)
    }

    fn guarded<T>(
        &self,
        family: &str,
        dataset: &WorkingDataset,
        compute: impl FnOnce(&WorkingDataset) -> Result<T>,
    ) -> Result<Outcome<T>> {
        if dataset.is_empty() {
            debug!("Skipping {} stats: no matching records", family);
            return Ok(Outcome::NoMatchingRecords);
        }

        debug!("Computing {} stats over {} rows", family, dataset.height());
        compute(dataset).map(Outcome::Computed)
    }
}

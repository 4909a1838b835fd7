//! Typed results of the statistic families
//!
//! Absence is explicit: an empty working set is [`Outcome::NoMatchingRecords`],
//! a demographic column the selected cities do not carry is
//! [`ColumnStat::Unavailable`], and a birth-year column with nothing usable in
//! it is [`BirthYearStat::NoValidValues`].

use crate::constants::{SECONDS_PER_DAY, SECONDS_PER_HOUR, SECONDS_PER_MINUTE};
use std::fmt;
use std::time::Duration;

/// Result of a statistic family over the working set
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome<T> {
    Computed(T),
    NoMatchingRecords,
}

impl<T> Outcome<T> {
    pub fn computed(&self) -> Option<&T> {
        match self {
            Outcome::Computed(value) => Some(value),
            Outcome::NoMatchingRecords => None,
        }
    }
}

/// Most popular times of travel
#[derive(Debug, Clone, PartialEq)]
pub struct TimeStats {
    /// Capitalized month name
    pub popular_month: Option<String>,
    pub popular_weekday: Option<String>,
    pub popular_hour: Option<i64>,
    pub elapsed: Duration,
}

/// Most popular stations and trip
#[derive(Debug, Clone, PartialEq)]
pub struct StationStats {
    pub popular_start: Option<String>,
    pub popular_end: Option<String>,
    /// `"<start> - <end>"`
    pub popular_route: Option<String>,
    pub elapsed: Duration,
}

/// Total and mean travel time
#[derive(Debug, Clone, PartialEq)]
pub struct DurationStats {
    pub total: DurationBreakdown,
    pub mean: MeanDuration,
    pub trip_count: usize,
    pub elapsed: Duration,
}

/// Whole seconds split by a floor-divide cascade
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DurationBreakdown {
    pub days: u64,
    pub hours: u64,
    pub minutes: u64,
    pub seconds: u64,
}

impl DurationBreakdown {
    pub fn from_seconds(total: u64) -> Self {
        let days = total / SECONDS_PER_DAY;
        let remainder = total % SECONDS_PER_DAY;
        let hours = remainder / SECONDS_PER_HOUR;
        let remainder = remainder % SECONDS_PER_HOUR;

        Self {
            days,
            hours,
            minutes: remainder / SECONDS_PER_MINUTE,
            seconds: remainder % SECONDS_PER_MINUTE,
        }
    }

    pub fn total_seconds(&self) -> u64 {
        self.days * SECONDS_PER_DAY
            + self.hours * SECONDS_PER_HOUR
            + self.minutes * SECONDS_PER_MINUTE
            + self.seconds
    }
}

impl fmt::Display for DurationBreakdown {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}d {}h {}m {}s",
            self.days, self.hours, self.minutes, self.seconds
        )
    }
}

/// Mean trip length as whole minutes and seconds, truncated toward zero
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MeanDuration {
    pub minutes: u64,
    pub seconds: u64,
}

impl MeanDuration {
    pub fn from_seconds(mean: f64) -> Self {
        let mean = if mean.is_finite() { mean.max(0.0) } else { 0.0 };
        Self {
            minutes: (mean / SECONDS_PER_MINUTE as f64).trunc() as u64,
            seconds: (mean % SECONDS_PER_MINUTE as f64).trunc() as u64,
        }
    }
}

impl fmt::Display for MeanDuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}m {}s", self.minutes, self.seconds)
    }
}

/// A statistic over an optional demographic column
#[derive(Debug, Clone, PartialEq)]
pub enum ColumnStat<T> {
    Computed(T),
    /// The selected cities do not record this column
    Unavailable,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BirthYearSummary {
    pub earliest: i64,
    pub most_recent: i64,
    pub most_common: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BirthYearStat {
    Computed(BirthYearSummary),
    /// Column present but holds no valid value
    NoValidValues,
    Unavailable,
}

/// Rider breakdowns
#[derive(Debug, Clone, PartialEq)]
pub struct UserStats {
    /// Most frequent first
    pub user_types: Vec<(String, u64)>,
    pub gender: ColumnStat<Vec<(String, u64)>>,
    pub birth_years: BirthYearStat,
    pub elapsed: Duration,
}

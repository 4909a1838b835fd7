//! Total and mean travel time

use super::frame_ops::{mean_f64, sum_f64, valid_count};
use super::summary::{DurationBreakdown, DurationStats, MeanDuration};
use crate::constants::columns;
use crate::error::Result;
use polars::prelude::*;
use std::time::Instant;
use tracing::warn;

/// Sum and mean of `Trip Duration`, in seconds
///
/// The sum is floored to whole seconds before the day/hour/minute cascade.
/// A negative sum is clamped to zero.
pub fn duration_stats(rows: &DataFrame) -> Result<DurationStats> {
    let start_time = Instant::now();

    let total_seconds = sum_f64(rows, columns::TRIP_DURATION)?;
    if total_seconds < 0.0 {
        warn!("Negative total trip duration {:.1}s, reporting zero", total_seconds);
    }
    let total = DurationBreakdown::from_seconds(total_seconds.max(0.0).floor() as u64);
    let mean = MeanDuration::from_seconds(mean_f64(rows, columns::TRIP_DURATION)?.unwrap_or(0.0));

    Ok(DurationStats {
        total,
        mean,
        trip_count: valid_count(rows, columns::TRIP_DURATION)?,
        elapsed: start_time.elapsed(),
    })
}

//! Most frequent times of travel

use super::frame_ops::{mode_i64, mode_string};
use super::summary::TimeStats;
use crate::config::Calendar;
use crate::constants::columns;
use crate::error::Result;
use polars::prelude::*;
use std::time::Instant;

/// Modal month (by name), weekday and start hour
pub fn time_stats(rows: &DataFrame, calendar: &Calendar) -> Result<TimeStats> {
    let start_time = Instant::now();

    let popular_month =
        mode_i64(rows, col(columns::MONTH))?.and_then(|number| calendar.month_label(number));
    let popular_weekday = mode_string(rows, col(columns::WEEKDAY))?;
    let popular_hour = mode_i64(rows, col(columns::START_HOUR))?;

    Ok(TimeStats {
        popular_month,
        popular_weekday,
        popular_hour,
        elapsed: start_time.elapsed(),
    })
}

//! Most popular stations and trip

use super::frame_ops::mode_string;
use super::summary::StationStats;
use crate::constants::columns;
use crate::error::Result;
use polars::prelude::*;
use std::time::Instant;

/// Separator between the two stations of a route label
pub const ROUTE_SEPARATOR: &str = " - ";

/// Per-row `"<start> - <end>"` label; null when either station is null
pub fn route_expr() -> Expr {
    concat_str(
        [col(columns::START_STATION), col(columns::END_STATION)],
        ROUTE_SEPARATOR,
        false,
    )
    .alias(columns::ROUTE)
}

pub fn station_stats(rows: &DataFrame) -> Result<StationStats> {
    let start_time = Instant::now();

    Ok(StationStats {
        popular_start: mode_string(rows, col(columns::START_STATION))?,
        popular_end: mode_string(rows, col(columns::END_STATION))?,
        popular_route: mode_string(rows, route_expr())?,
        elapsed: start_time.elapsed(),
    })
}

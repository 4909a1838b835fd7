//! Type coercion and derived trip fields
//!
//! Timestamps are parsed with the configured layout; cells that do not parse
//! become null rather than failing the load. `Month` (1-12), `Weekday`
//! (capitalized English name) and `Start Hour` (0-23) are derived from the
//! parsed start time.

use crate::constants::columns;
use crate::error::Result;
use polars::prelude::*;
use tracing::debug;

/// Coerce column types and add the derived temporal fields
///
/// Optional columns are only cast when present, so Washington-only frames
/// pass through without demographic columns.
pub fn normalize_trips(frame: DataFrame, timestamp_format: &str) -> Result<DataFrame> {
    let mut casts = Vec::new();

    for name in [columns::START_TIME, columns::END_TIME] {
        if let Ok(column) = frame.column(name) {
            casts.push(timestamp_expr(name, column.dtype(), timestamp_format));
        }
    }

    for name in [columns::TRIP_DURATION, columns::BIRTH_YEAR] {
        if frame.get_column_index(name).is_some() {
            casts.push(col(name).cast(DataType::Float64));
        }
    }

    for name in [
        columns::START_STATION,
        columns::END_STATION,
        columns::USER_TYPE,
        columns::GENDER,
    ] {
        if frame.get_column_index(name).is_some() {
            casts.push(col(name).cast(DataType::String));
        }
    }

    let start = || col(columns::START_TIME).dt();
    let derived = [
        start().month().cast(DataType::Int64).alias(columns::MONTH),
        start().strftime("%A").alias(columns::WEEKDAY),
        start().hour().cast(DataType::Int64).alias(columns::START_HOUR),
    ];

    let normalized = frame
        .lazy()
        .with_columns(casts)
        .with_columns(derived)
        .collect()?;

    debug!(
        "Normalized {} rows into {} columns",
        normalized.height(),
        normalized.width()
    );

    Ok(normalized)
}

/// Cast the numeric columns of one source to floating point
///
/// CSV inference reads whole-second durations as integers in one city and
/// fractional ones as floats in another; aligning them first keeps the
/// multi-city column union on its strict path.
pub fn align_numeric(frame: DataFrame) -> Result<DataFrame> {
    let casts: Vec<Expr> = [columns::TRIP_DURATION, columns::BIRTH_YEAR]
        .into_iter()
        .filter(|name| frame.get_column_index(name).is_some())
        .map(|name| col(name).cast(DataType::Float64))
        .collect();

    if casts.is_empty() {
        return Ok(frame);
    }
    Ok(frame.lazy().with_columns(casts).collect()?)
}

fn timestamp_expr(name: &str, dtype: &DataType, format: &str) -> Expr {
    match dtype {
        DataType::String => col(name).str().to_datetime(
            Some(TimeUnit::Milliseconds),
            None,
            StrptimeOptions {
                format: Some(format.into()),
                strict: false,
                ..Default::default()
            },
            lit("raise"),
        ),
        _ => col(name).cast(DataType::Datetime(TimeUnit::Milliseconds, None)),
    }
}

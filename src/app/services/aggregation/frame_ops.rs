//! Column reductions shared by the statistic families
//!
//! Every helper ignores nulls. Modes break ties by first occurrence in row
//! order: `group_by_stable` keeps groups in first-seen order and the
//! maximum-count filter preserves that order, so the first surviving group
//! is the earliest-encountered of the tied values.

use crate::constants::columns;
use crate::error::Result;
use polars::prelude::*;

const VALUE: &str = "value";

fn mode_frame(df: &DataFrame, key: Expr) -> Result<DataFrame> {
    Ok(df
        .clone()
        .lazy()
        .select([key.alias(VALUE)])
        .filter(col(VALUE).is_not_null())
        .group_by_stable([col(VALUE)])
        .agg([len().alias(columns::COUNT)])
        .filter(col(columns::COUNT).eq(col(columns::COUNT).max()))
        .limit(1)
        .collect()?)
}

/// Most frequent text value of an expression, `None` when all values are null
pub fn mode_string(df: &DataFrame, key: Expr) -> Result<Option<String>> {
    let modal = mode_frame(df, key.cast(DataType::String))?;
    let values = modal.column(VALUE)?.as_materialized_series().str()?.clone();
    Ok(values.get(0).map(str::to_string))
}

/// Most frequent integer value of an expression
pub fn mode_i64(df: &DataFrame, key: Expr) -> Result<Option<i64>> {
    let modal = mode_frame(df, key.cast(DataType::Int64))?;
    let values = modal.column(VALUE)?.as_materialized_series().i64()?.clone();
    Ok(values.get(0))
}

/// Frequency per distinct value, most frequent first
///
/// Equal counts keep first-encounter order.
pub fn value_counts(df: &DataFrame, column: &str) -> Result<Vec<(String, u64)>> {
    let counts = df
        .clone()
        .lazy()
        .select([col(column).cast(DataType::String).alias(VALUE)])
        .filter(col(VALUE).is_not_null())
        .group_by_stable([col(VALUE)])
        .agg([len().cast(DataType::UInt64).alias(columns::COUNT)])
        .sort_by_exprs(
            [col(columns::COUNT)],
            SortMultipleOptions::default()
                .with_order_descending(true)
                .with_maintain_order(true),
        )
        .collect()?;

    let values = counts.column(VALUE)?.as_materialized_series().str()?.clone();
    let frequencies = counts
        .column(columns::COUNT)?
        .as_materialized_series()
        .u64()?
        .clone();

    Ok(values
        .into_iter()
        .zip(frequencies.into_iter())
        .filter_map(|(value, count)| Some((value?.to_string(), count?)))
        .collect())
}

fn float_column(df: &DataFrame, column: &str) -> Result<Float64Chunked> {
    let series = df
        .column(column)?
        .as_materialized_series()
        .cast(&DataType::Float64)?;
    Ok(series.f64()?.clone())
}

/// Sum of the non-null values (0 for an all-null column)
pub fn sum_f64(df: &DataFrame, column: &str) -> Result<f64> {
    Ok(float_column(df, column)?.sum().unwrap_or(0.0))
}

pub fn mean_f64(df: &DataFrame, column: &str) -> Result<Option<f64>> {
    Ok(float_column(df, column)?.mean())
}

pub fn min_f64(df: &DataFrame, column: &str) -> Result<Option<f64>> {
    Ok(float_column(df, column)?.min())
}

pub fn max_f64(df: &DataFrame, column: &str) -> Result<Option<f64>> {
    Ok(float_column(df, column)?.max())
}

/// Non-null values in a column
pub fn valid_count(df: &DataFrame, column: &str) -> Result<usize> {
    let column = df.column(column)?;
    Ok(column.len() - column.null_count())
}

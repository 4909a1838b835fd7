//! Rider breakdowns: user type, gender and birth year

use super::frame_ops::{max_f64, min_f64, mode_i64, valid_count, value_counts};
use super::summary::{BirthYearStat, BirthYearSummary, ColumnStat, UserStats};
use crate::constants::columns;
use crate::error::Result;
use crate::models::{OptionalColumn, WorkingDataset};
use polars::prelude::*;
use std::time::Instant;

pub fn user_stats(dataset: &WorkingDataset) -> Result<UserStats> {
    let start_time = Instant::now();
    let rows = dataset.rows();

    let user_types = value_counts(rows, columns::USER_TYPE)?;

    let gender = if is_available(dataset, OptionalColumn::Gender) {
        ColumnStat::Computed(value_counts(rows, columns::GENDER)?)
    } else {
        ColumnStat::Unavailable
    };

    let birth_years = if is_available(dataset, OptionalColumn::BirthYear) {
        birth_year_stat(rows)?
    } else {
        BirthYearStat::Unavailable
    };

    Ok(UserStats {
        user_types,
        gender,
        birth_years,
        elapsed: start_time.elapsed(),
    })
}

/// Declared for the selected cities and actually present in the rows
fn is_available(dataset: &WorkingDataset, column: OptionalColumn) -> bool {
    dataset.has_column(column)
        && dataset
            .rows()
            .get_column_index(column.column_name())
            .is_some()
}

fn birth_year_stat(rows: &DataFrame) -> Result<BirthYearStat> {
    if valid_count(rows, columns::BIRTH_YEAR)? == 0 {
        return Ok(BirthYearStat::NoValidValues);
    }

    let earliest = min_f64(rows, columns::BIRTH_YEAR)?;
    let most_recent = max_f64(rows, columns::BIRTH_YEAR)?;
    let most_common = mode_i64(rows, col(columns::BIRTH_YEAR))?;

    Ok(match (earliest, most_recent, most_common) {
        (Some(earliest), Some(most_recent), Some(most_common)) => {
            BirthYearStat::Computed(BirthYearSummary {
                earliest: earliest as i64,
                most_recent: most_recent as i64,
                most_common,
            })
        }
        _ => BirthYearStat::NoValidValues,
    })
}

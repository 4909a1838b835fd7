//! Month and weekday filtering
//!
//! A `Single` selection keeps the rows matching that value. A `Multiple`
//! selection filters once per value and concatenates the results in
//! selection order, so rows come out grouped by the value that matched,
//! not in their original order.
//!
//! A selection naming every value the calendar knows, in calendar order,
//! only drops rows whose derived field is null: the remaining rows keep
//! their original order. Any other ordering goes through the per-value
//! concatenation.

use crate::config::Calendar;
use crate::constants::columns;
use crate::error::{BikeshareError, Result};
use crate::models::{FilterSelection, Selection};
use polars::prelude::*;
use tracing::debug;

/// Applies the month and weekday dimensions of a [`FilterSelection`]
#[derive(Debug, Clone)]
pub struct FilterEngine {
    calendar: Calendar,
}

impl FilterEngine {
    pub fn new(calendar: Calendar) -> Self {
        Self { calendar }
    }

    /// Filter by months, then by weekdays
    ///
    /// An empty result is not an error; the aggregations report it as
    /// "no matching records".
    pub fn apply(&self, rows: DataFrame, selection: &FilterSelection) -> Result<DataFrame> {
        let input_rows = rows.height();
        let by_month = self.filter_months(rows, &selection.months)?;
        let by_weekday = self.filter_weekdays(by_month, &selection.weekdays)?;

        debug!(
            "Filtered {} rows to {} (months: {}, weekdays: {})",
            input_rows,
            by_weekday.height(),
            selection.months,
            selection.weekdays
        );

        Ok(by_weekday)
    }

    pub fn filter_months(&self, rows: DataFrame, months: &Selection<String>) -> Result<DataFrame> {
        if in_calendar_order(months, &self.calendar.months) {
            return drop_nulls_in(rows, columns::MONTH);
        }
        filter_dimension(rows, months, |month| {
            let number = self.calendar.month_number(month).ok_or_else(|| {
                BikeshareError::invalid_selection("month", format!("'{}' is not a known month", month))
            })?;
            Ok(col(columns::MONTH).eq(lit(number as i64)))
        })
    }

    pub fn filter_weekdays(
        &self,
        rows: DataFrame,
        weekdays: &Selection<String>,
    ) -> Result<DataFrame> {
        if in_calendar_order(weekdays, &self.calendar.weekdays) {
            return drop_nulls_in(rows, columns::WEEKDAY);
        }
        filter_dimension(rows, weekdays, |weekday| {
            let label = self.calendar.weekday_label(weekday).ok_or_else(|| {
                BikeshareError::invalid_selection(
                    "weekday",
                    format!("'{}' is not a known weekday", weekday),
                )
            })?;
            Ok(col(columns::WEEKDAY).eq(lit(label)))
        })
    }
}

/// Every calendar value, listed in calendar order
fn in_calendar_order(selection: &Selection<String>, known: &[String]) -> bool {
    let values = selection.values();
    selection.is_multiple()
        && values.len() == known.len()
        && values
            .iter()
            .zip(known)
            .all(|(value, known)| value.eq_ignore_ascii_case(known))
}

fn drop_nulls_in(rows: DataFrame, column: &str) -> Result<DataFrame> {
    Ok(rows.lazy().filter(col(column).is_not_null()).collect()?)
}

fn filter_dimension(
    rows: DataFrame,
    selection: &Selection<String>,
    predicate: impl Fn(&str) -> Result<Expr>,
) -> Result<DataFrame> {
    match selection {
        Selection::Single(value) => Ok(rows.lazy().filter(predicate(value.as_str())?).collect()?),
        Selection::Multiple(values) => {
            let source = rows.lazy();
            let parts = values
                .iter()
                .map(|value| Ok(source.clone().filter(predicate(value.as_str())?)))
                .collect::<Result<Vec<LazyFrame>>>()?;
            Ok(concat(parts, UnionArgs::default())?.collect()?)
        }
    }
}

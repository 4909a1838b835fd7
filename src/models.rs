//! Core data structures and types for bike-share analysis.
//!
//! Defines the filter selection model, sort configuration, optional
//! column markers and the working dataset handed to the aggregation
//! engine and the raw row browser.

use crate::app::services::dataset_registry::DatasetRegistry;
use crate::constants::columns;
use crate::error::{BikeshareError, Result};
use polars::prelude::DataFrame;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Demographic columns that only some city exports carry
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OptionalColumn {
    Gender,
    BirthYear,
}

impl OptionalColumn {
    pub const ALL: [OptionalColumn; 2] = [OptionalColumn::Gender, OptionalColumn::BirthYear];

    /// Column name in the trip exports
    pub fn column_name(&self) -> &'static str {
        match self {
            OptionalColumn::Gender => columns::GENDER,
            OptionalColumn::BirthYear => columns::BIRTH_YEAR,
        }
    }
}

/// One filter dimension: a single value or an ordered set of values
///
/// A `Multiple` selection is evaluated as the union of per-value matches,
/// in selection order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection<T> {
    Single(T),
    Multiple(Vec<T>),
}

impl<T> Selection<T> {
    /// Build a selection from parsed values; `None` when no values were given
    pub fn from_values(mut values: Vec<T>) -> Option<Self> {
        match values.len() {
            0 => None,
            1 => values.pop().map(Selection::Single),
            _ => Some(Selection::Multiple(values)),
        }
    }

    pub fn values(&self) -> &[T] {
        match self {
            Selection::Single(value) => std::slice::from_ref(value),
            Selection::Multiple(values) => values,
        }
    }

    pub fn is_multiple(&self) -> bool {
        matches!(self, Selection::Multiple(_))
    }
}

impl<T: std::fmt::Display> std::fmt::Display for Selection<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let joined = self
            .values()
            .iter()
            .map(|v| v.to_string())
            .collect::<Vec<_>>()
            .join(", ");
        f.write_str(&joined)
    }
}

/// City, month and weekday constraints for one analysis session
///
/// Values are normalized to lower case and de-duplicated (first occurrence
/// wins) by [`FilterSelection::new`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterSelection {
    pub cities: Selection<String>,
    pub months: Selection<String>,
    pub weekdays: Selection<String>,
}

impl FilterSelection {
    /// Validate every dimension against the registry and calendar
    pub fn new(
        cities: Selection<String>,
        months: Selection<String>,
        weekdays: Selection<String>,
        registry: &DatasetRegistry,
    ) -> Result<Self> {
        let cities = normalize_dimension("city", cities, |v| registry.contains(v))?;
        let months = normalize_dimension("month", months, |v| registry.calendar().is_month(v))?;
        let weekdays =
            normalize_dimension("weekday", weekdays, |v| registry.calendar().is_weekday(v))?;

        Ok(Self {
            cities,
            months,
            weekdays,
        })
    }

    /// Every city, month and weekday the registry knows
    pub fn everything(registry: &DatasetRegistry) -> Result<Self> {
        let all = |values: Vec<String>| {
            Selection::from_values(values)
                .ok_or_else(|| BikeshareError::configuration("empty registry dimension"))
        };
        Self::new(
            all(registry.keys().map(str::to_string).collect())?,
            all(registry.calendar().months.clone())?,
            all(registry.calendar().weekdays.clone())?,
            registry,
        )
    }
}

fn normalize_dimension(
    dimension: &str,
    selection: Selection<String>,
    is_valid: impl Fn(&str) -> bool,
) -> Result<Selection<String>> {
    let mut values: Vec<String> = Vec::new();
    for raw in selection.values() {
        let value = raw.trim().to_lowercase();
        if !is_valid(&value) {
            return Err(BikeshareError::invalid_selection(
                dimension,
                format!("'{}' is not a known {}", raw, dimension),
            ));
        }
        if !values.contains(&value) {
            values.push(value);
        }
    }

    match (selection.is_multiple(), values.len()) {
        (_, 0) => Err(BikeshareError::invalid_selection(
            dimension,
            "at least one value is required",
        )),
        (false, _) => Ok(Selection::Single(values.remove(0))),
        (true, _) => Ok(Selection::Multiple(values)),
    }
}

/// Columns the raw row browser can order by
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortKey {
    StartTime,
    EndTime,
    TripDuration,
    StartStation,
    EndStation,
}

impl SortKey {
    pub const ALL: [SortKey; 5] = [
        SortKey::StartTime,
        SortKey::EndTime,
        SortKey::TripDuration,
        SortKey::StartStation,
        SortKey::EndStation,
    ];

    pub fn column_name(&self) -> &'static str {
        match self {
            SortKey::StartTime => columns::START_TIME,
            SortKey::EndTime => columns::END_TIME,
            SortKey::TripDuration => columns::TRIP_DURATION,
            SortKey::StartStation => columns::START_STATION,
            SortKey::EndStation => columns::END_STATION,
        }
    }

    /// Short code used by the interactive menu
    pub fn code(&self) -> &'static str {
        match self {
            SortKey::StartTime => "st",
            SortKey::EndTime => "et",
            SortKey::TripDuration => "td",
            SortKey::StartStation => "ss",
            SortKey::EndStation => "es",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        let code = code.trim().to_lowercase();
        Self::ALL.into_iter().find(|key| key.code() == code)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

impl SortDirection {
    pub fn is_descending(&self) -> bool {
        matches!(self, SortDirection::Descending)
    }
}

/// Sort configuration chosen once per browsing session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortOrder {
    pub key: SortKey,
    pub direction: SortDirection,
}

impl SortOrder {
    pub fn new(key: SortKey, direction: SortDirection) -> Self {
        Self { key, direction }
    }
}

/// Loaded, normalized and filtered trip rows for one filter selection
///
/// Aggregations only read it; the raw row browser keeps its own ordered
/// view, so the row order seen here is always the filter order.
#[derive(Debug, Clone)]
pub struct WorkingDataset {
    rows: DataFrame,
    cities: Vec<String>,
    optional_columns: BTreeSet<OptionalColumn>,
}

impl WorkingDataset {
    pub fn new(
        rows: DataFrame,
        cities: Vec<String>,
        optional_columns: BTreeSet<OptionalColumn>,
    ) -> Self {
        Self {
            rows,
            cities,
            optional_columns,
        }
    }

    pub fn rows(&self) -> &DataFrame {
        &self.rows
    }

    pub fn height(&self) -> usize {
        self.rows.height()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.height() == 0
    }

    /// Whether any selected source carries the optional column
    pub fn has_column(&self, column: OptionalColumn) -> bool {
        self.optional_columns.contains(&column)
    }

    /// Display names of the selected cities
    pub fn cities(&self) -> &[String] {
        &self.cities
    }

    /// Cities joined for report messages ("Chicago, Washington")
    pub fn city_label(&self) -> String {
        self.cities.join(", ")
    }
}

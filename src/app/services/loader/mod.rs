//! Trip loading and schema normalization
//!
//! Turns one or more registered city sources into a single row collection
//! ready for filtering.
//!
//! # Architecture
//!
//! - [`reconcile`] - Column-union concatenation across cities whose exports differ
//! - [`normalize`] - Type coercion and derived `Month`/`Weekday`/`Start Hour` fields
//!
//! # Pipeline
//!
//! 1. **Read**: each selected city is read through the [`TripSource`] seam and
//!    trimmed to the canonical column set
//! 2. **Reconcile**: multiple cities are stacked on the union of their columns,
//!    missing cells left null; a structural failure falls back to a relaxed,
//!    unreconciled stack and is reported rather than failing the load
//! 3. **Normalize**: derived fields are computed once over the combined rows,
//!    so they are identical regardless of how many cities were selected

pub mod normalize;
pub mod reconcile;

#[cfg(test)]
pub mod tests;

pub use normalize::{align_numeric, normalize_trips};
pub use reconcile::{Reconciliation, canonical_columns, reconcile_sources};

use crate::app::services::dataset_registry::{DatasetRegistry, RowSource};
use crate::app::services::trip_source::TripSource;
use crate::constants::columns;
use crate::error::{BikeshareError, Result};
use crate::models::Selection;
use polars::prelude::*;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

/// Rows contributed by one city
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceLoad {
    pub key: String,
    pub rows: usize,
}

/// Outcome of one load, for reporting
#[derive(Debug, Clone, Default)]
pub struct LoadReport {
    /// Per-city row counts in load order
    pub sources: Vec<SourceLoad>,
    /// Rows after concatenation and normalization
    pub total_rows: usize,
    /// False when the multi-city column union failed and rows were stacked unreconciled
    pub reconciled: bool,
    /// Why reconciliation failed, if it did
    pub reconciliation_error: Option<String>,
    pub elapsed: Duration,
}

/// Loads and normalizes trips for a city selection
pub struct TripLoader<'a, S: TripSource> {
    registry: &'a DatasetRegistry,
    source: &'a S,
}

impl<'a, S: TripSource> TripLoader<'a, S> {
    pub fn new(registry: &'a DatasetRegistry, source: &'a S) -> Self {
        Self { registry, source }
    }

    /// Load every selected city into one normalized frame
    ///
    /// # Arguments
    ///
    /// * `cities` - City keys; a `Multiple` selection concatenates in selection order
    ///
    /// # Returns
    ///
    /// The combined rows with derived fields, and a [`LoadReport`]
    pub fn load(&self, cities: &Selection<String>) -> Result<(DataFrame, LoadReport)> {
        let start_time = Instant::now();
        let mut report = LoadReport {
            reconciled: true,
            ..Default::default()
        };

        let mut frames = Vec::with_capacity(cities.values().len());
        for key in cities.values() {
            let row_source = self.registry.get(key)?;
            let frame = self.read_source(row_source)?;
            report.sources.push(SourceLoad {
                key: row_source.key().to_string(),
                rows: frame.height(),
            });
            frames.push(frame);
        }

        let combined = match cities {
            Selection::Single(_) => frames.pop().ok_or_else(|| {
                BikeshareError::configuration("single-city load produced no frame")
            })?,
            Selection::Multiple(_) => {
                let reconciliation = reconcile_sources(frames)?;
                report.reconciled = reconciliation.is_reconciled();
                if let Reconciliation::Unreconciled { reason, .. } = &reconciliation {
                    warn!(
                        "Could not align columns across {} cities ({}); keeping rows unreconciled",
                        report.sources.len(),
                        reason
                    );
                    report.reconciliation_error = Some(reason.clone());
                }
                reconciliation.into_frame()
            }
        };

        let normalized = normalize_trips(combined, self.registry.timestamp_format())?;

        report.total_rows = normalized.height();
        report.elapsed = start_time.elapsed();
        info!(
            "Loaded {} trips from {} {} in {:.2}s",
            report.total_rows,
            report.sources.len(),
            if report.sources.len() == 1 { "city" } else { "cities" },
            report.elapsed.as_secs_f64()
        );

        Ok((normalized, report))
    }

    /// Read one source, check its core columns and drop anything non-canonical
    fn read_source(&self, row_source: &RowSource) -> Result<DataFrame> {
        let raw = self.source.read(row_source)?;

        for column in columns::CORE {
            if raw.get_column_index(column).is_none() {
                return Err(BikeshareError::MissingColumn {
                    city: row_source.key().to_string(),
                    column: column.to_string(),
                });
            }
        }

        let keep = canonical_columns([&raw]);
        let dropped = raw.width() - keep.len();
        if dropped > 0 {
            debug!(
                "Dropping {} non-canonical columns from {}",
                dropped,
                row_source.key()
            );
        }

        align_numeric(raw.select(keep)?)
    }
}

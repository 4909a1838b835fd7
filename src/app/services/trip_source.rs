//! Row sources for city trip data
//!
//! The loader only depends on the [`TripSource`] seam: something that turns a
//! registered [`RowSource`] into a polars `DataFrame` with the documented
//! column names. [`CsvTripSource`] reads the city CSV exports from disk;
//! [`InMemoryTripSource`] serves frames that are already materialized.

use crate::app::services::dataset_registry::RowSource;
use crate::constants::SCHEMA_INFERENCE_ROWS;
use crate::error::{BikeshareError, Result};
use polars::prelude::*;
use std::collections::HashMap;
use tracing::debug;

/// Reads one city's rows
pub trait TripSource {
    fn read(&self, source: &RowSource) -> Result<DataFrame>;
}

/// Reads city exports as headed CSV files
#[derive(Debug, Clone)]
pub struct CsvTripSource {
    infer_schema_rows: Option<usize>,
}

impl Default for CsvTripSource {
    fn default() -> Self {
        Self::new()
    }
}

impl CsvTripSource {
    pub fn new() -> Self {
        Self {
            infer_schema_rows: Some(SCHEMA_INFERENCE_ROWS),
        }
    }
}

impl TripSource for CsvTripSource {
    fn read(&self, source: &RowSource) -> Result<DataFrame> {
        let path = source.path();
        if !path.exists() {
            return Err(BikeshareError::SourceNotFound {
                city: source.key().to_string(),
                path: path.to_path_buf(),
            });
        }

        debug!("Reading {} trips from {}", source.key(), path.display());

        let df = LazyCsvReader::new(path)
            .with_has_header(true)
            .with_infer_schema_length(self.infer_schema_rows)
            .finish()?
            .collect()?;

        debug!("Read {} rows from {}", df.height(), path.display());
        Ok(df)
    }
}

/// Serves pre-built frames keyed by city
#[derive(Debug, Clone, Default)]
pub struct InMemoryTripSource {
    frames: HashMap<String, DataFrame>,
}

impl InMemoryTripSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_frame(mut self, key: impl Into<String>, frame: DataFrame) -> Self {
        self.frames.insert(key.into(), frame);
        self
    }
}

impl TripSource for InMemoryTripSource {
    fn read(&self, source: &RowSource) -> Result<DataFrame> {
        self.frames
            .get(source.key())
            .cloned()
            .ok_or_else(|| BikeshareError::SourceNotFound {
                city: source.key().to_string(),
                path: source.path().to_path_buf(),
            })
    }
}

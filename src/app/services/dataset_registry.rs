//! City dataset registry
//!
//! Immutable mapping from city key to its row source, built once from the
//! configuration at startup and passed explicitly to the loader and the
//! filter engine. Each source records which optional demographic columns
//! its export carries.

use crate::config::{BikeshareConfig, Calendar};
use crate::error::{BikeshareError, Result};
use crate::models::OptionalColumn;
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use tracing::debug;

/// One city's trip dataset
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowSource {
    key: String,
    display_name: String,
    path: PathBuf,
    optional_columns: BTreeSet<OptionalColumn>,
}

impl RowSource {
    pub fn new(
        key: impl Into<String>,
        display_name: impl Into<String>,
        path: impl Into<PathBuf>,
        optional_columns: impl IntoIterator<Item = OptionalColumn>,
    ) -> Self {
        Self {
            key: key.into(),
            display_name: display_name.into(),
            path: path.into(),
            optional_columns: optional_columns.into_iter().collect(),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn has_column(&self, column: OptionalColumn) -> bool {
        self.optional_columns.contains(&column)
    }

    pub fn optional_columns(&self) -> &BTreeSet<OptionalColumn> {
        &self.optional_columns
    }
}

/// Registry of every configured city source plus the supported calendar
#[derive(Debug, Clone)]
pub struct DatasetRegistry {
    sources: Vec<RowSource>,
    calendar: Calendar,
    timestamp_format: String,
}

impl DatasetRegistry {
    /// Build the registry from a validated configuration
    pub fn from_config(config: &BikeshareConfig) -> Result<Self> {
        config.validate()?;

        let sources: Vec<RowSource> = config
            .cities
            .iter()
            .map(|city| {
                RowSource::new(
                    city.key.clone(),
                    city.display_name.clone(),
                    config.data_dir.join(&city.file_name),
                    city.optional_columns.iter().copied(),
                )
            })
            .collect();

        debug!(
            "Registered {} city sources under {}",
            sources.len(),
            config.data_dir.display()
        );

        Ok(Self {
            sources,
            calendar: config.calendar.clone(),
            timestamp_format: config.timestamp_format.clone(),
        })
    }

    /// Look up a source by key, case-insensitive
    pub fn get(&self, key: &str) -> Result<&RowSource> {
        let wanted = key.trim().to_lowercase();
        self.sources
            .iter()
            .find(|source| source.key == wanted)
            .ok_or_else(|| BikeshareError::UnknownCity {
                city: key.to_string(),
            })
    }

    pub fn contains(&self, key: &str) -> bool {
        self.get(key).is_ok()
    }

    /// City keys in configuration order
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.sources.iter().map(|source| source.key.as_str())
    }

    pub fn calendar(&self) -> &Calendar {
        &self.calendar
    }

    pub fn timestamp_format(&self) -> &str {
        &self.timestamp_format
    }

    /// Optional columns declared by at least one of the given sources
    pub fn optional_columns_for<'a>(
        &self,
        keys: impl IntoIterator<Item = &'a str>,
    ) -> Result<BTreeSet<OptionalColumn>> {
        let mut union = BTreeSet::new();
        for key in keys {
            union.extend(self.get(key)?.optional_columns().iter().copied());
        }
        Ok(union)
    }
}

//! Error handling for bike-share analysis operations.
//!
//! Provides error types with context for source loading, schema
//! reconciliation, selection validation and configuration failures.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BikeshareError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Polars error: {0}")]
    Polars(#[from] polars::error::PolarsError),

    #[error("Config file parse error: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("Trip data for '{city}' not found at path: {path}")]
    SourceNotFound { city: String, path: PathBuf },

    #[error("Unknown city: {city}")]
    UnknownCity { city: String },

    #[error("Source '{city}' is missing required column '{column}'")]
    MissingColumn { city: String, column: String },

    #[error("Invalid {dimension} selection: {reason}")]
    InvalidSelection { dimension: String, reason: String },

    #[error("Configuration error: {message}")]
    Configuration { message: String },

    #[error("Schema reconciliation failed across {source_count} sources: {reason}")]
    SchemaReconciliation { source_count: usize, reason: String },

    /// The user asked to leave from an interactive prompt
    #[error("Session ended: {reason}")]
    Interrupted { reason: String },
}

impl BikeshareError {
    /// Create an invalid selection error for a filter dimension
    pub fn invalid_selection(dimension: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidSelection {
            dimension: dimension.into(),
            reason: reason.into(),
        }
    }

    /// Create a configuration error
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Create an interrupted-session error
    pub fn interrupted(reason: impl Into<String>) -> Self {
        Self::Interrupted {
            reason: reason.into(),
        }
    }

    pub fn is_interrupted(&self) -> bool {
        matches!(self, Self::Interrupted { .. })
    }
}

pub type Result<T> = std::result::Result<T, BikeshareError>;

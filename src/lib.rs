//! Bike-share Explorer Library
//!
//! Interactive exploratory analysis over the US bike-share trip exports for
//! Chicago, New York City and Washington.
//!
//! This library provides tools for:
//! - Registering city trip sources and the optional columns each carries
//! - Loading one or more cities into a single frame aligned on the union of
//!   their columns, with derived month, weekday and start-hour fields
//! - Filtering by month and weekday with single or multiple selections
//! - Travel-time, station, duration and rider statistics with explicit
//!   markers for empty results and missing demographic columns
//! - Resumable, sortable paging over the filtered raw rows

pub mod config;
pub mod constants;
pub mod error;
pub mod models;

// Core application modules
pub mod app {
    pub mod services {
        pub mod aggregation;
        pub mod dataset_registry;
        pub mod explorer;
        pub mod filter_engine;
        pub mod loader;
        pub mod row_browser;
        pub mod trip_source;
    }
}

// CLI modules
pub mod cli {
    pub mod args;
    pub mod commands;
    pub mod input;
    pub mod report;
}

// Re-export commonly used types
pub use app::services::aggregation::AggregationEngine;
pub use app::services::dataset_registry::{DatasetRegistry, RowSource};
pub use app::services::explorer::Explorer;
pub use app::services::row_browser::{BrowsePrompt, BrowseSession, RowBrowser};
pub use app::services::trip_source::{CsvTripSource, InMemoryTripSource, TripSource};
pub use config::BikeshareConfig;
pub use error::{BikeshareError, Result};
pub use models::{FilterSelection, Selection, SortDirection, SortKey, SortOrder, WorkingDataset};

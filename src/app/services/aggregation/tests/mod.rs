//! Fixtures for aggregation tests
//!
//! Frames are built with the derived columns already in place so each test
//! controls exactly which values the reductions see.

use polars::prelude::*;
use std::collections::BTreeSet;

use crate::models::{OptionalColumn, WorkingDataset};

mod engine_tests;
mod temporal_tests;

/// Working dataset with every optional column declared
pub fn dataset(rows: DataFrame) -> WorkingDataset {
    WorkingDataset::new(
        rows,
        vec!["Chicago".to_string()],
        OptionalColumn::ALL.iter().copied().collect(),
    )
}

/// Working dataset for sources without demographics
pub fn washington_dataset(rows: DataFrame) -> WorkingDataset {
    WorkingDataset::new(rows, vec!["Washington".to_string()], BTreeSet::new())
}

pub fn trips() -> DataFrame {
    df!(
        "Trip Duration" => [776.0, 489.0, 360.0, 93_784.0],
        "Start Station" => ["Canal St", "Clark St", "Clark St", "Canal St"],
        "End Station" => ["Wells St", "Lake St", "Wells St", "Lake St"],
        "User Type" => ["Subscriber", "Customer", "Subscriber", "Subscriber"],
        "Gender" => [Some("Male"), None, Some("Female"), Some("Male")],
        "Birth Year" => [Some(1984.0), None, Some(1992.0), Some(1992.0)],
        "Month" => [1i64, 6, 6, 1],
        "Weekday" => ["Monday", "Wednesday", "Wednesday", "Sunday"],
        "Start Hour" => [9i64, 8, 17, 17]
    )
    .unwrap()
}

pub fn empty_trips() -> DataFrame {
    trips().head(Some(0))
}

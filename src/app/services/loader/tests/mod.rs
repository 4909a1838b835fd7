//! Fixtures for loader and normalization tests
//!
//! City frames mirror the shape of the real exports: Chicago and New York City
//! carry `Gender`/`Birth Year`, Washington does not and keeps its unnamed
//! index column.

use polars::prelude::*;

use crate::app::services::dataset_registry::DatasetRegistry;
use crate::app::services::trip_source::InMemoryTripSource;
use crate::config::BikeshareConfig;


pub fn registry() -> DatasetRegistry {
    DatasetRegistry::from_config(&BikeshareConfig::default()).unwrap()
}

pub fn chicago_frame() -> DataFrame {
    df!(
        "Start Time" => ["2017-01-02 09:07:57", "2017-06-21 08:36:34", "2017-03-11 10:40:00"],
        "End Time" => ["2017-01-02 09:20:53", "2017-06-21 08:44:43", "2017-03-11 10:46:00"],
        "Trip Duration" => [776.0, 489.0, 360.0],
        "Start Station" => ["Canal St & Madison St", "Clark St & Elm St", "Canal St & Madison St"],
        "End Station" => ["Wells St & Concord Ln", "Clark St & Lake St", "Clark St & Elm St"],
        "User Type" => ["Subscriber", "Customer", "Subscriber"],
        "Gender" => [Some("Male"), None, Some("Female")],
        "Birth Year" => [Some(1984.0), None, Some(1992.0)]
    )
    .unwrap()
}

pub fn washington_frame() -> DataFrame {
    df!(
        "Unnamed: 0" => [1621326i64, 482740],
        "Start Time" => ["2017-05-07 23:05:00", "2017-06-18 08:15:00"],
        "End Time" => ["2017-05-07 23:15:00", "2017-06-18 08:19:30"],
        "Trip Duration" => [600.0, 270.5],
        "Start Station" => ["14th & Belmont St NW", "15th & K St NW"],
        "End Station" => ["15th & K St NW", "14th & Belmont St NW"],
        "User Type" => ["Subscriber", "Customer"]
    )
    .unwrap()
}

pub fn trip_source() -> InMemoryTripSource {
    InMemoryTripSource::new()
        .with_frame("chicago", chicago_frame())
        .with_frame("washington", washington_frame())
}

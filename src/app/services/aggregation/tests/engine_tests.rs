//! Tests for the aggregation entry points

use super::super::{AggregationEngine, Outcome};
use super::{dataset, empty_trips, trips};
use crate::config::Calendar;

#[test]
fn test_empty_input_reports_no_matching_records() {
    let engine = AggregationEngine::new(Calendar::default());
    let empty = dataset(empty_trips());

    assert_eq!(engine.time_stats(&empty).unwrap(), Outcome::NoMatchingRecords);
    assert_eq!(engine.station_stats(&empty).unwrap(), Outcome::NoMatchingRecords);
    assert_eq!(engine.duration_stats(&empty).unwrap(), Outcome::NoMatchingRecords);
    assert_eq!(engine.user_stats(&empty).unwrap(), Outcome::NoMatchingRecords);
}

#[test]
fn test_families_compute_over_rows() {
    let engine = AggregationEngine::new(Calendar::default());
    let working = dataset(trips());

    let time = engine.time_stats(&working).unwrap();
    assert_eq!(
        time.computed().and_then(|t| t.popular_weekday.as_deref()),
        Some("Wednesday")
    );

    let duration = engine.duration_stats(&working).unwrap();
    assert_eq!(duration.computed().map(|d| d.trip_count), Some(4));
}

#[test]
fn test_aggregation_leaves_rows_untouched() {
    let engine = AggregationEngine::new(Calendar::default());
    let working = dataset(trips());
    let before = working.rows().clone();

    engine.station_stats(&working).unwrap();
    engine.user_stats(&working).unwrap();

    assert!(working.rows().equals_missing(&before));
}

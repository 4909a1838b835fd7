//! Tests for popular travel times

use super::super::temporal::time_stats;
use super::trips;
use crate::config::Calendar;

#[test]
fn test_time_stats() {
    let stats = time_stats(&trips(), &Calendar::default()).unwrap();

    // Months [1, 6, 6, 1] tie; January is seen first
    assert_eq!(stats.popular_month.as_deref(), Some("January"));
    assert_eq!(stats.popular_weekday.as_deref(), Some("Wednesday"));
    assert_eq!(stats.popular_hour, Some(17));
}

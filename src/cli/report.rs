//! Console rendering of load reports, statistics and raw-row windows
//!
//! Each statistic block ends with the time it took and a separator line.
//! Absence markers render as sentences rather than empty values.

use crate::app::services::aggregation::{
    BirthYearStat, ColumnStat, DurationStats, Outcome, StationStats, TimeStats, UserStats,
};
use crate::app::services::loader::LoadReport;
use crate::error::Result;
use crate::models::WorkingDataset;
use colored::*;
use polars::prelude::DataFrame;
use std::io::Write;
use std::time::Duration;

const SEPARATOR_WIDTH: usize = 40;

fn separator(w: &mut impl Write) -> Result<()> {
    writeln!(w, "{}", "-".repeat(SEPARATOR_WIDTH))?;
    Ok(())
}

fn took(w: &mut impl Write, elapsed: Duration) -> Result<()> {
    writeln!(w, "\nThis took {:.2} seconds.", elapsed.as_secs_f64())?;
    separator(w)
}

fn heading(w: &mut impl Write, title: &str) -> Result<()> {
    writeln!(w, "\n{}\n", title.bright_green().bold())?;
    Ok(())
}

fn or_unknown(value: Option<impl ToString>) -> String {
    value
        .map(|v| v.to_string())
        .unwrap_or_else(|| "unknown".to_string())
}

/// Returns `true` and prints the notice when there is nothing to report
fn no_matches<T>(w: &mut impl Write, outcome: &Outcome<T>) -> Result<bool> {
    if matches!(outcome, Outcome::NoMatchingRecords) {
        writeln!(
            w,
            "{}",
            "No trips match the selected filters.".bright_yellow()
        )?;
        separator(w)?;
        return Ok(true);
    }
    Ok(false)
}

pub fn render_load(w: &mut impl Write, report: &LoadReport, working: &WorkingDataset) -> Result<()> {
    if !report.reconciled {
        writeln!(
            w,
            "{} {}",
            "Could not align the city columns:".bright_red(),
            report.reconciliation_error.as_deref().unwrap_or("unknown reason")
        )?;
    }
    writeln!(
        w,
        "\nLoaded {} trips for {}; {} match the filters.",
        report.total_rows.to_string().bright_white().bold(),
        working.city_label(),
        working.height().to_string().bright_white().bold()
    )?;
    took(w, report.elapsed)
}

pub fn render_time_stats(w: &mut impl Write, outcome: &Outcome<TimeStats>) -> Result<()> {
    heading(w, "Calculating the most frequent times of travel...")?;
    if no_matches(w, outcome)? {
        return Ok(());
    }
    let Outcome::Computed(stats) = outcome else {
        return Ok(());
    };

    writeln!(
        w,
        "For the selected filter, the month with the most travels is: {}.",
        or_unknown(stats.popular_month.as_ref())
    )?;
    writeln!(
        w,
        "For the selected filter, the most common day of the week is: {}.",
        or_unknown(stats.popular_weekday.as_ref())
    )?;
    writeln!(
        w,
        "For the selected filter, the most common start hour is: {}.",
        or_unknown(stats.popular_hour)
    )?;
    took(w, stats.elapsed)
}

pub fn render_station_stats(w: &mut impl Write, outcome: &Outcome<StationStats>) -> Result<()> {
    heading(w, "Calculating the most popular stations and trip...")?;
    if no_matches(w, outcome)? {
        return Ok(());
    }
    let Outcome::Computed(stats) = outcome else {
        return Ok(());
    };

    writeln!(
        w,
        "The most common start station is: {}",
        or_unknown(stats.popular_start.as_ref())
    )?;
    writeln!(
        w,
        "The most common end station is: {}",
        or_unknown(stats.popular_end.as_ref())
    )?;
    writeln!(
        w,
        "The most common start-end combination of stations is: {}",
        or_unknown(stats.popular_route.as_ref())
    )?;
    took(w, stats.elapsed)
}

pub fn render_duration_stats(w: &mut impl Write, outcome: &Outcome<DurationStats>) -> Result<()> {
    heading(w, "Calculating trip duration...")?;
    if no_matches(w, outcome)? {
        return Ok(());
    }
    let Outcome::Computed(stats) = outcome else {
        return Ok(());
    };

    writeln!(w, "The total travel time is: {}.", stats.total)?;
    writeln!(w, "The mean travel time is: {}.", stats.mean)?;
    took(w, stats.elapsed)
}

fn render_counts(w: &mut impl Write, counts: &[(String, u64)]) -> Result<()> {
    let width = counts.iter().map(|(name, _)| name.len()).max().unwrap_or(0);
    for (name, count) in counts {
        writeln!(w, "{:<width$}    {}", name, count, width = width)?;
    }
    Ok(())
}

pub fn render_user_stats(
    w: &mut impl Write,
    outcome: &Outcome<UserStats>,
    working: &WorkingDataset,
) -> Result<()> {
    heading(w, "Calculating user stats...")?;
    if no_matches(w, outcome)? {
        return Ok(());
    }
    let Outcome::Computed(stats) = outcome else {
        return Ok(());
    };
    let cities = working.city_label();

    writeln!(w, "User types:")?;
    render_counts(w, &stats.user_types)?;

    match &stats.gender {
        ColumnStat::Computed(counts) => {
            writeln!(w, "\nDistribution for each gender:")?;
            render_counts(w, counts)?;
        }
        ColumnStat::Unavailable => writeln!(
            w,
            "\nWe're sorry! There is no data of user genders for {}.",
            cities
        )?,
    }

    match &stats.birth_years {
        BirthYearStat::Computed(years) => {
            writeln!(
                w,
                "\nFor the selected filter, the oldest person to ride one bike was born in: {}",
                years.earliest
            )?;
            writeln!(
                w,
                "For the selected filter, the youngest person to ride one bike was born in: {}",
                years.most_recent
            )?;
            writeln!(
                w,
                "For the selected filter, the most common birth year amongst riders is: {}",
                years.most_common
            )?;
        }
        BirthYearStat::NoValidValues => {
            writeln!(w, "\nThere are no valid birth years in the data.")?
        }
        BirthYearStat::Unavailable => writeln!(
            w,
            "\nWe're sorry! There is no data of birth year for {}.",
            cities
        )?,
    }

    took(w, stats.elapsed)
}

/// Print one raw-row window; an empty window means the rows ran out
pub fn render_window(w: &mut impl Write, window: &DataFrame, offset: usize) -> Result<()> {
    if window.height() == 0 {
        writeln!(w, "\n{}", "No more rows to show.".bright_yellow())?;
        return Ok(());
    }

    writeln!(
        w,
        "\nRows {} to {}:\n",
        offset + 1,
        offset + window.height()
    )?;
    writeln!(w, "{}\n", window)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::services::aggregation::{DurationBreakdown, MeanDuration};
    use std::collections::BTreeSet;

    fn render<F>(f: F) -> String
    where
        F: FnOnce(&mut Vec<u8>) -> Result<()>,
    {
        colored::control::set_override(false);
        let mut out = Vec::new();
        f(&mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    fn washington() -> WorkingDataset {
        WorkingDataset::new(
            DataFrame::empty(),
            vec!["Washington".to_string()],
            BTreeSet::new(),
        )
    }

    #[test]
    fn test_duration_block() {
        let outcome = Outcome::Computed(DurationStats {
            total: DurationBreakdown::from_seconds(95_409),
            mean: MeanDuration::from_seconds(125.9),
            trip_count: 4,
            elapsed: Duration::from_millis(20),
        });

        let text = render(|w| render_duration_stats(w, &outcome));
        assert!(text.contains("The total travel time is: 1d 2h 30m 9s."));
        assert!(text.contains("The mean travel time is: 2m 5s."));
        assert!(text.contains("This took 0.02 seconds."));
    }

    #[test]
    fn test_no_matching_records_notice() {
        let outcome: Outcome<TimeStats> = Outcome::NoMatchingRecords;
        let text = render(|w| render_time_stats(w, &outcome));
        assert!(text.contains("No trips match the selected filters."));
        assert!(!text.contains("This took"));
    }

    #[test]
    fn test_unavailable_demographics() {
        let outcome = Outcome::Computed(UserStats {
            user_types: vec![("Subscriber".to_string(), 2)],
            gender: ColumnStat::Unavailable,
            birth_years: BirthYearStat::Unavailable,
            elapsed: Duration::ZERO,
        });

        let text = render(|w| render_user_stats(w, &outcome, &washington()));
        assert!(text.contains("There is no data of user genders for Washington."));
        assert!(text.contains("There is no data of birth year for Washington."));
        assert!(text.contains("Subscriber    2"));
    }

    #[test]
    fn test_empty_window() {
        let text = render(|w| render_window(w, &DataFrame::empty(), 15));
        assert!(text.contains("No more rows to show."));
    }
}

//! Command-line argument definitions for the bike-share explorer
//!
//! The explorer is interactive; these flags only shape where data and
//! configuration come from and how much logging reaches stderr.

use crate::config::BikeshareConfig;
use crate::error::{BikeshareError, Result};
use clap::Parser;
use std::path::PathBuf;

/// Explore US bike-share trip data interactively
///
/// Pick one or more cities, months and weekdays, then ask for travel-time,
/// station, duration and rider statistics or page through the raw trips.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "bikeshare_explorer",
    version,
    about = "Interactive statistics over US bike-share trip data",
    long_about = "Loads the Chicago, New York City and Washington bike-share exports, filters them \
                  by city, month and weekday, and reports popular travel times, stations, trip \
                  durations and rider demographics. Type 'end' at any prompt to quit."
)]
pub struct Args {
    /// Directory holding chicago.csv, new_york_city.csv and washington.csv
    #[arg(
        short = 'd',
        long = "data-dir",
        value_name = "PATH",
        help = "Directory containing the city CSV exports"
    )]
    pub data_dir: Option<PathBuf>,

    /// Path to configuration file
    ///
    /// TOML file overriding the city table, calendar or page size. If not
    /// specified, looks for <config dir>/bikeshare-explorer/config.toml
    #[arg(
        short = 'c',
        long = "config",
        value_name = "FILE",
        help = "Path to configuration file (TOML format)"
    )]
    pub config_file: Option<PathBuf>,

    /// Rows revealed per raw-data page
    #[arg(
        short = 'p',
        long = "page-size",
        value_name = "ROWS",
        help = "Rows shown per raw-data page"
    )]
    pub page_size: Option<usize>,

    /// Logging verbosity level
    #[arg(
        short = 'v',
        long = "verbose",
        action = clap::ArgAction::Count,
        help = "Increase logging verbosity (-v: info, -vv: debug, -vvv: trace)"
    )]
    pub verbose: u8,

    /// Only show errors on stderr
    #[arg(
        short = 'q',
        long = "quiet",
        help = "Suppress log output except errors",
        conflicts_with = "verbose"
    )]
    pub quiet: bool,
}

impl Args {
    /// Tracing level implied by `-v`/`-q`
    pub fn get_log_level(&self) -> &'static str {
        if self.quiet {
            return "error";
        }
        match self.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    }

    /// Show spinners only when not in quiet mode
    pub fn show_progress(&self) -> bool {
        !self.quiet
    }

    pub fn validate(&self) -> Result<()> {
        if self.page_size == Some(0) {
            return Err(BikeshareError::configuration("--page-size must be at least 1"));
        }
        if let Some(dir) = &self.data_dir {
            if !dir.is_dir() {
                return Err(BikeshareError::configuration(format!(
                    "data directory {} does not exist",
                    dir.display()
                )));
            }
        }
        Ok(())
    }

    /// Layer CLI flags over a loaded configuration
    pub fn apply_overrides(&self, mut config: BikeshareConfig) -> BikeshareConfig {
        if let Some(dir) = &self.data_dir {
            config = config.with_data_dir(dir.clone());
        }
        if let Some(page_size) = self.page_size {
            config = config.with_page_size(page_size);
        }
        config
    }
}

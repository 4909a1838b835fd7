//! Interactive command implementation
//!
//! Drives the explorer session:
//! 1. Set up logging and layered configuration
//! 2. Prompt for a filter selection and build the working dataset
//! 3. Serve the statistics menu against that dataset until restart
//! 4. Ask whether to start over with a new selection

use crate::app::services::explorer::Explorer;
use crate::app::services::loader::LoadReport;
use crate::app::services::row_browser::BrowseSession;
use crate::app::services::trip_source::TripSource;
use crate::cli::args::Args;
use crate::cli::input::Console;
use crate::cli::report;
use crate::config::BikeshareConfig;
use crate::error::Result;
use crate::models::{FilterSelection, WorkingDataset};
use anyhow::Context;
use colored::*;
use indicatif::{ProgressBar, ProgressStyle};
use std::io::{BufRead, Write};
use std::time::Duration;
use tracing::{debug, error, info};

/// Statistics menu entries
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    TimeStats,
    StationStats,
    DurationStats,
    UserStats,
    RawData,
    Restart,
}

impl MenuChoice {
    pub const ALL: [MenuChoice; 6] = [
        MenuChoice::TimeStats,
        MenuChoice::StationStats,
        MenuChoice::DurationStats,
        MenuChoice::UserStats,
        MenuChoice::RawData,
        MenuChoice::Restart,
    ];

    pub fn code(&self) -> &'static str {
        match self {
            MenuChoice::TimeStats => "ts",
            MenuChoice::StationStats => "ss",
            MenuChoice::DurationStats => "tds",
            MenuChoice::UserStats => "us",
            MenuChoice::RawData => "rd",
            MenuChoice::Restart => "r",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            MenuChoice::TimeStats => "Time Stats",
            MenuChoice::StationStats => "Station Stats",
            MenuChoice::DurationStats => "Trip Duration Stats",
            MenuChoice::UserStats => "User Stats",
            MenuChoice::RawData => "Display Raw Data",
            MenuChoice::Restart => "Restart",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|choice| choice.code() == code)
    }
}

/// Main entry point for the interactive explorer
pub fn run(args: Args) -> anyhow::Result<()> {
    setup_logging(&args);

    info!("Starting bike-share explorer");
    debug!("Command line arguments: {:?}", args);

    args.validate()?;

    let config = load_configuration(&args)?;
    debug!("Loaded configuration: {:?}", config);

    let explorer = Explorer::from_config(&config).context("Failed to build the city registry")?;
    let mut console = Console::stdio();

    interactive_session(&explorer, &mut console, args.show_progress())?;
    Ok(())
}

/// Set up structured logging based on CLI arguments
fn setup_logging(args: &Args) {
    use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

    let log_level = args.get_log_level();

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("bikeshare_explorer={}", log_level)));

    if args.quiet {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_level(true)
                    .with_writer(std::io::stderr)
                    .compact(),
            )
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_level(true)
                    .with_timer(fmt::time::uptime())
                    .with_writer(std::io::stderr),
            )
            .init();
    }

    debug!("Logging initialized at level: {}", log_level);
}

/// Defaults, then the config file, then CLI flags
fn load_configuration(args: &Args) -> anyhow::Result<BikeshareConfig> {
    let config = BikeshareConfig::load_layered(args.config_file.as_deref()).with_context(|| {
        match &args.config_file {
            Some(path) => format!("Failed to load configuration from {}", path.display()),
            None => "Failed to load the default configuration".to_string(),
        }
    })?;

    let config = args.apply_overrides(config);
    config.validate().context("Invalid configuration")?;
    Ok(config)
}

/// Filter selection, menu and restart loop until the user stops
pub fn interactive_session<S, R, W>(
    explorer: &Explorer<S>,
    console: &mut Console<R, W>,
    show_progress: bool,
) -> Result<()>
where
    S: TripSource,
    R: BufRead,
    W: Write,
{
    writeln!(
        console.writer(),
        "\n{}\nType 'end' at any time to exit the program.",
        "Hello! Let's explore some US bikeshare data!".bright_green().bold()
    )?;

    loop {
        let selection = console.prompt_filters(explorer.registry())?;
        writeln!(console.writer(), "{}", "-".repeat(40))?;

        match prepare(explorer, &selection, show_progress) {
            Ok((working, load_report)) => {
                report::render_load(console.writer(), &load_report, &working)?;
                statistics_menu(explorer, &working, console)?;
            }
            Err(e) if e.is_interrupted() => return Err(e),
            Err(e) => {
                error!("Failed to load trips for {}: {}", selection.cities, e);
                writeln!(console.writer(), "\n{} {}", "Error:".bright_red().bold(), e)?;
            }
        }

        if !console.confirm("\nWould you like to restart?")? {
            info!("Session finished");
            return Ok(());
        }
    }
}

fn prepare<S: TripSource>(
    explorer: &Explorer<S>,
    selection: &FilterSelection,
    show_progress: bool,
) -> Result<(WorkingDataset, LoadReport)> {
    let spinner = show_progress.then(|| {
        let pb = ProgressBar::new_spinner();
        if let Ok(style) = ProgressStyle::default_spinner().template("{spinner:.green} {msg}") {
            pb.set_style(style);
        }
        pb.set_message(format!("Loading trips for {}...", selection.cities));
        pb.enable_steady_tick(Duration::from_millis(100));
        pb
    });

    let prepared = explorer.prepare(selection);

    if let Some(pb) = spinner {
        pb.finish_and_clear();
    }
    prepared
}

/// Serve menu choices against one working dataset until restart
fn statistics_menu<S, R, W>(
    explorer: &Explorer<S>,
    working: &WorkingDataset,
    console: &mut Console<R, W>,
) -> Result<()>
where
    S: TripSource,
    R: BufRead,
    W: Write,
{
    let mut prompt = String::from("\nPlease select:\n\n");
    for choice in MenuChoice::ALL {
        prompt.push_str(&format!("[{}] {}\n", choice.code(), choice.label()));
    }
    prompt.push_str("\n> ");
    let codes: Vec<&str> = MenuChoice::ALL.iter().map(|choice| choice.code()).collect();

    let aggregation = explorer.aggregation();
    let mut session = BrowseSession::new();

    loop {
        let answer = console.ask_one(&prompt, &codes, false)?;
        let Some(choice) = MenuChoice::from_code(&answer) else {
            continue;
        };
        debug!("Menu choice: {:?}", choice);

        match choice {
            MenuChoice::TimeStats => {
                let outcome = aggregation.time_stats(working)?;
                report::render_time_stats(console.writer(), &outcome)?;
            }
            MenuChoice::StationStats => {
                let outcome = aggregation.station_stats(working)?;
                report::render_station_stats(console.writer(), &outcome)?;
            }
            MenuChoice::DurationStats => {
                let outcome = aggregation.duration_stats(working)?;
                report::render_duration_stats(console.writer(), &outcome)?;
            }
            MenuChoice::UserStats => {
                let outcome = aggregation.user_stats(working)?;
                report::render_user_stats(console.writer(), &outcome, working)?;
            }
            MenuChoice::RawData => {
                session = explorer.browser().browse(working, session, console)?;
            }
            MenuChoice::Restart => return Ok(()),
        }
    }
}

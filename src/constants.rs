//! Application constants for the bike-share explorer
//!
//! Column names shared by every city export, the default city registry,
//! the supported calendar and browsing defaults.

// =============================================================================
// Column Names
// =============================================================================

/// Core columns present in every city export
pub mod columns {
    pub const START_TIME: &str = "Start Time";
    pub const END_TIME: &str = "End Time";
    pub const TRIP_DURATION: &str = "Trip Duration";
    pub const START_STATION: &str = "Start Station";
    pub const END_STATION: &str = "End Station";
    pub const USER_TYPE: &str = "User Type";

    /// Optional demographic columns (Chicago and New York City only)
    pub const GENDER: &str = "Gender";
    pub const BIRTH_YEAR: &str = "Birth Year";

    /// Fields derived from the start time at load time
    pub const MONTH: &str = "Month";
    pub const WEEKDAY: &str = "Weekday";
    pub const START_HOUR: &str = "Start Hour";

    /// Derived per-row trip label used for the popular-route statistic
    pub const ROUTE: &str = "Start-End Combination";

    /// Frequency column produced by value counts
    pub const COUNT: &str = "count";

    pub const CORE: &[&str] = &[
        START_TIME,
        END_TIME,
        TRIP_DURATION,
        START_STATION,
        END_STATION,
        USER_TYPE,
    ];

    pub const OPTIONAL: &[&str] = &[GENDER, BIRTH_YEAR];
}

// =============================================================================
// Default Registry
// =============================================================================

/// (key, display name, file name, has demographics)
pub const DEFAULT_CITIES: &[(&str, &str, &str, bool)] = &[
    ("chicago", "Chicago", "chicago.csv", true),
    ("new york city", "New York City", "new_york_city.csv", true),
    ("washington", "Washington", "washington.csv", false),
];

/// Directory searched for the city exports when none is configured
pub const DEFAULT_DATA_DIR: &str = ".";

/// Default config file location under the user config directory
pub const CONFIG_DIR_NAME: &str = "bikeshare-explorer";
pub const CONFIG_FILE_NAME: &str = "config.toml";

// =============================================================================
// Calendar
// =============================================================================

/// English month names; a configured month list must be a prefix of this
pub const CALENDAR_MONTHS: [&str; 12] = [
    "january",
    "february",
    "march",
    "april",
    "may",
    "june",
    "july",
    "august",
    "september",
    "october",
    "november",
    "december",
];

/// Months covered by the trip exports, in calendar order
pub const DEFAULT_MONTHS: &[&str] = &["january", "february", "march", "april", "may", "june"];

/// Weekday names, in the order the prompts list them
///
/// These are the names the derived `Weekday` column carries (lower-cased),
/// so a configured weekday list must hold exactly these seven.
pub const DEFAULT_WEEKDAYS: &[&str] = &[
    "sunday",
    "monday",
    "tuesday",
    "wednesday",
    "thursday",
    "friday",
    "saturday",
];

/// Timestamp layout of the `Start Time` and `End Time` columns
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

// =============================================================================
// Browsing and Reporting
// =============================================================================

/// Rows revealed per raw-data page
pub const DEFAULT_PAGE_SIZE: usize = 5;

/// Rows sampled for CSV schema inference
pub const SCHEMA_INFERENCE_ROWS: usize = 10_000;

pub const SECONDS_PER_DAY: u64 = 24 * 3600;
pub const SECONDS_PER_HOUR: u64 = 3600;
pub const SECONDS_PER_MINUTE: u64 = 60;

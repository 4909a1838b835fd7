//! Configuration management and validation.
//!
//! Provides the immutable configuration built once at startup: the city
//! source table, the supported calendar, browsing settings and the
//! timestamp layout of the trip exports. Values are layered from defaults,
//! an optional TOML file and command-line overrides.

use crate::constants::{
    CALENDAR_MONTHS, CONFIG_DIR_NAME, CONFIG_FILE_NAME, DEFAULT_CITIES, DEFAULT_DATA_DIR,
    DEFAULT_MONTHS, DEFAULT_PAGE_SIZE, DEFAULT_WEEKDAYS, TIMESTAMP_FORMAT,
};
use crate::error::{BikeshareError, Result};
use crate::models::OptionalColumn;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use tracing::debug;

/// One city's trip export
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CitySourceConfig {
    /// Lower-case key the user types to select the city
    pub key: String,

    /// Name used in reports
    pub display_name: String,

    /// File name relative to the data directory
    pub file_name: String,

    /// Demographic columns this export carries
    #[serde(default)]
    pub optional_columns: Vec<OptionalColumn>,
}

/// Months and weekdays the filters accept
///
/// Month names map to month numbers by position (first entry is 1).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Calendar {
    pub months: Vec<String>,
    pub weekdays: Vec<String>,
}

impl Default for Calendar {
    fn default() -> Self {
        Self {
            months: DEFAULT_MONTHS.iter().map(|m| m.to_string()).collect(),
            weekdays: DEFAULT_WEEKDAYS.iter().map(|d| d.to_string()).collect(),
        }
    }
}

impl Calendar {
    /// Month number (1-based) for a month name, case-insensitive
    pub fn month_number(&self, name: &str) -> Option<u32> {
        let name = name.trim().to_lowercase();
        self.months
            .iter()
            .position(|m| *m == name)
            .map(|idx| idx as u32 + 1)
    }

    /// Capitalized month name for a month number
    pub fn month_label(&self, number: i64) -> Option<String> {
        if number < 1 {
            return None;
        }
        self.months
            .get(number as usize - 1)
            .map(|m| title_case(m))
    }

    /// Capitalized weekday name as it appears in the derived `Weekday` column
    pub fn weekday_label(&self, name: &str) -> Option<String> {
        let name = name.trim().to_lowercase();
        self.weekdays
            .iter()
            .find(|d| **d == name)
            .map(|d| title_case(d))
    }

    pub fn is_month(&self, name: &str) -> bool {
        self.month_number(name).is_some()
    }

    pub fn is_weekday(&self, name: &str) -> bool {
        self.weekday_label(name).is_some()
    }
}

/// Global configuration for the explorer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BikeshareConfig {
    /// Directory holding the city CSV exports
    pub data_dir: PathBuf,

    /// City source table
    pub cities: Vec<CitySourceConfig>,

    /// Supported months and weekdays
    pub calendar: Calendar,

    /// Rows revealed per raw-data page
    pub page_size: usize,

    /// strftime layout of the start/end time columns
    pub timestamp_format: String,
}

impl Default for BikeshareConfig {
    fn default() -> Self {
        let cities = DEFAULT_CITIES
            .iter()
            .map(|(key, display_name, file_name, demographics)| CitySourceConfig {
                key: key.to_string(),
                display_name: display_name.to_string(),
                file_name: file_name.to_string(),
                optional_columns: if *demographics {
                    vec![OptionalColumn::Gender, OptionalColumn::BirthYear]
                } else {
                    Vec::new()
                },
            })
            .collect();

        Self {
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            cities,
            calendar: Calendar::default(),
            page_size: DEFAULT_PAGE_SIZE,
            timestamp_format: TIMESTAMP_FORMAT.to_string(),
        }
    }
}

impl BikeshareConfig {
    /// Default config file location (`<config dir>/bikeshare-explorer/config.toml`)
    pub fn default_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
    }

    /// Load configuration from a TOML file; unspecified keys keep their defaults
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&content)?;
        debug!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Defaults, then the given file, then the default file location if it exists
    pub fn load_layered(config_file: Option<&Path>) -> Result<Self> {
        match config_file {
            Some(path) => Self::from_file(path),
            None => match Self::default_config_path().filter(|path| path.exists()) {
                Some(path) => Self::from_file(&path),
                None => Ok(Self::default()),
            },
        }
    }

    pub fn with_data_dir(mut self, data_dir: impl Into<PathBuf>) -> Self {
        self.data_dir = data_dir.into();
        self
    }

    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size;
        self
    }

    /// Reject configurations the loader and filters cannot work with
    pub fn validate(&self) -> Result<()> {
        if self.cities.is_empty() {
            return Err(BikeshareError::configuration("no city sources configured"));
        }

        let mut seen = HashSet::new();
        for city in &self.cities {
            if city.key.trim().is_empty() {
                return Err(BikeshareError::configuration("city key must not be empty"));
            }
            if city.key != city.key.to_lowercase() {
                return Err(BikeshareError::configuration(format!(
                    "city key '{}' must be lower-case",
                    city.key
                )));
            }
            if !seen.insert(city.key.as_str()) {
                return Err(BikeshareError::configuration(format!(
                    "duplicate city key '{}'",
                    city.key
                )));
            }
        }

        if self.page_size == 0 {
            return Err(BikeshareError::configuration("page size must be at least 1"));
        }

        // Month filters compare against month numbers by position
        let months = &self.calendar.months;
        if months.is_empty() || months.len() > CALENDAR_MONTHS.len() {
            return Err(BikeshareError::configuration(format!(
                "calendar must list between 1 and 12 months, found {}",
                months.len()
            )));
        }
        for (position, (month, expected)) in months.iter().zip(CALENDAR_MONTHS).enumerate() {
            if month != expected {
                return Err(BikeshareError::configuration(format!(
                    "calendar month {} must be '{}', found '{}'",
                    position + 1,
                    expected,
                    month
                )));
            }
        }

        // Weekday filters compare against polars' English day names
        let weekdays = &self.calendar.weekdays;
        if weekdays.len() != DEFAULT_WEEKDAYS.len() {
            return Err(BikeshareError::configuration(format!(
                "calendar must list 7 weekdays, found {}",
                weekdays.len()
            )));
        }
        let distinct: HashSet<&str> = weekdays.iter().map(String::as_str).collect();
        if let Some(unknown) = weekdays
            .iter()
            .find(|day| !DEFAULT_WEEKDAYS.contains(&day.as_str()))
        {
            return Err(BikeshareError::configuration(format!(
                "'{}' is not a lower-case English weekday name",
                unknown
            )));
        }
        if distinct.len() != weekdays.len() {
            return Err(BikeshareError::configuration("calendar weekdays must not repeat"));
        }

        Ok(())
    }
}

/// Capitalize each space-separated word ("new york city" -> "New York City")
pub fn title_case(value: &str) -> String {
    value
        .split(' ')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config_is_valid() {
        let config = BikeshareConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.cities.len(), 3);
        assert_eq!(config.page_size, 5);
    }

    #[test]
    fn test_washington_has_no_demographics() {
        let config = BikeshareConfig::default();
        let city = |key: &str| config.cities.iter().find(|c| c.key == key).unwrap();
        assert!(city("washington").optional_columns.is_empty());

        let chicago = city("chicago");
        assert_eq!(
            chicago.optional_columns,
            vec![OptionalColumn::Gender, OptionalColumn::BirthYear]
        );
    }

    #[test]
    fn test_month_numbers_follow_calendar_order() {
        let calendar = Calendar::default();
        assert_eq!(calendar.month_number("january"), Some(1));
        assert_eq!(calendar.month_number(" June "), Some(6));
        assert_eq!(calendar.month_number("july"), None);
        assert_eq!(calendar.month_label(3), Some("March".to_string()));
        assert_eq!(calendar.month_label(0), None);
        assert_eq!(calendar.month_label(7), None);
    }

    #[test]
    fn test_weekday_label_is_case_insensitive() {
        let calendar = Calendar::default();
        assert_eq!(calendar.weekday_label("MONDAY"), Some("Monday".to_string()));
        assert_eq!(calendar.weekday_label("funday"), None);
    }

    #[test]
    fn test_title_case() {
        assert_eq!(title_case("new york city"), "New York City");
        assert_eq!(title_case("wEDNESDAY"), "Wednesday");
        assert_eq!(title_case(""), "");
    }

    #[test]
    fn test_validate_rejects_bad_configs() {
        let config = BikeshareConfig::default().with_page_size(0);
        assert!(config.validate().is_err());

        let config = BikeshareConfig {
            cities: Vec::new(),
            ..Default::default()
        };
        assert!(config.validate().is_err());

        let mut config = BikeshareConfig::default();
        let duplicate = config.cities[0].clone();
        config.cities.push(duplicate);
        assert!(config.validate().is_err());

        let mut config = BikeshareConfig::default();
        config.calendar.weekdays.pop();
        assert!(config.validate().is_err());
    }

    fn strings(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    #[test]
    fn test_validate_rejects_months_out_of_position() {
        let mut config = BikeshareConfig::default();
        config.calendar.months = strings(&["march", "april"]);
        assert!(matches!(
            config.validate(),
            Err(BikeshareError::Configuration { ref message }) if message.contains("'january'")
        ));

        config.calendar.months = strings(&["January", "February"]);
        assert!(config.validate().is_err());

        config.calendar.months = strings(&CALENDAR_MONTHS);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_unknown_weekdays() {
        let mut config = BikeshareConfig::default();
        config.calendar.weekdays = strings(&[
            "lundi", "monday", "tuesday", "wednesday", "thursday", "friday", "saturday",
        ]);
        assert!(config.validate().is_err());

        config.calendar.weekdays = strings(&[
            "monday", "monday", "tuesday", "wednesday", "thursday", "friday", "saturday",
        ]);
        assert!(config.validate().is_err());

        config.calendar.weekdays = strings(&[
            "monday", "tuesday", "wednesday", "thursday", "friday", "saturday", "sunday",
        ]);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_from_file_keeps_defaults_for_missing_keys() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        std::fs::write(&path, "data_dir = \"/srv/bikeshare\"\npage_size = 10\n").unwrap();

        let config = BikeshareConfig::from_file(&path).unwrap();
        assert_eq!(config.data_dir, PathBuf::from("/srv/bikeshare"));
        assert_eq!(config.page_size, 10);
        assert_eq!(config.cities.len(), 3);
        assert_eq!(config.calendar, Calendar::default());
    }

    #[test]
    fn test_from_file_reads_city_table() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        std::fs::write(
            &path,
            r#"
[[cities]]
key = "boston"
display_name = "Boston"
file_name = "boston.csv"
optional_columns = ["gender"]
"#,
        )
        .unwrap();

        let config = BikeshareConfig::from_file(&path).unwrap();
        assert_eq!(config.cities.len(), 1);
        assert_eq!(config.cities[0].optional_columns, vec![OptionalColumn::Gender]);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_from_file_rejects_malformed_toml() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        std::fs::write(&path, "page_size = \"five\"").unwrap();

        let result = BikeshareConfig::from_file(&path);
        assert!(matches!(result, Err(BikeshareError::ConfigParse(_))));
    }
}

//! User input utilities for interactive CLI prompts
//!
//! Every prompt re-asks until the answer is valid. Answers may list several
//! comma-separated choices where the question allows it, `all` selects every
//! choice, and `end` at any prompt ends the session.

use crate::app::services::dataset_registry::DatasetRegistry;
use crate::app::services::row_browser::BrowsePrompt;
use crate::cli::report;
use crate::config::title_case;
use crate::error::{BikeshareError, Result};
use crate::models::{FilterSelection, Selection, SortDirection, SortKey, SortOrder};
use polars::prelude::DataFrame;
use std::io::{self, BufRead, BufReader, Stdin, Stdout, Write};

/// Keyword that ends the session from any prompt
pub const END_KEYWORD: &str = "end";

/// Keyword selecting every choice of a multi-choice prompt
pub const ALL_KEYWORD: &str = "all";

/// Parse a comma-separated answer against the allowed choices
///
/// Returns the lower-cased choices in the order given, or `None` if any part
/// is not allowed.
pub fn parse_choices(input: &str, choices: &[String]) -> Option<Vec<String>> {
    let answer = input.trim().to_lowercase();
    if answer == ALL_KEYWORD {
        return Some(choices.to_vec());
    }

    let parts: Vec<String> = answer
        .split(',')
        .map(|part| part.trim().to_string())
        .collect();

    if parts.iter().all(|part| choices.contains(part)) {
        Some(parts)
    } else {
        None
    }
}

/// Line-oriented prompts over any reader and writer
pub struct Console<R, W> {
    reader: R,
    writer: W,
}

impl Console<BufReader<Stdin>, Stdout> {
    pub fn stdio() -> Self {
        Self::new(BufReader::new(io::stdin()), io::stdout())
    }
}

impl<R: BufRead, W: Write> Console<R, W> {
    pub fn new(reader: R, writer: W) -> Self {
        Self { reader, writer }
    }

    pub fn writer(&mut self) -> &mut W {
        &mut self.writer
    }

    pub fn into_writer(self) -> W {
        self.writer
    }

    /// Print the prompt and read one trimmed, lower-cased line
    ///
    /// `end` and end of input both end the session.
    fn read_answer(&mut self, prompt: &str) -> Result<String> {
        write!(self.writer, "{}", prompt)?;
        self.writer.flush()?;

        let mut line = String::new();
        if self.reader.read_line(&mut line)? == 0 {
            return Err(BikeshareError::interrupted("input closed"));
        }

        let answer = line.trim().to_lowercase();
        if answer == END_KEYWORD {
            return Err(BikeshareError::interrupted("user typed 'end'"));
        }
        Ok(answer)
    }

    fn invalid(&mut self) -> Result<()> {
        writeln!(self.writer, "\nInvalid input. Please enter a valid option.")?;
        Ok(())
    }

    /// Ask until the answer names one or more allowed choices
    pub fn ask_many(&mut self, prompt: &str, choices: &[String]) -> Result<Vec<String>> {
        loop {
            let answer = self.read_answer(prompt)?;
            match parse_choices(&answer, choices) {
                Some(values) => return Ok(values),
                None => self.invalid()?,
            }
        }
    }

    /// Ask until the answer is exactly one allowed choice
    ///
    /// An empty answer is accepted when `allow_empty` is set.
    pub fn ask_one(&mut self, prompt: &str, choices: &[&str], allow_empty: bool) -> Result<String> {
        loop {
            let answer = self.read_answer(prompt)?;
            if (allow_empty && answer.is_empty()) || choices.contains(&answer.as_str()) {
                return Ok(answer);
            }
            self.invalid()?;
        }
    }

    /// Yes/no question
    pub fn confirm(&mut self, prompt: &str) -> Result<bool> {
        let answer = self.ask_one(&format!("{}\n\n [y] Yes\n [n] No\n\n> ", prompt), &["y", "n"], false)?;
        Ok(answer == "y")
    }

    /// Ask for cities, months and weekdays until the user confirms them
    pub fn prompt_filters(&mut self, registry: &DatasetRegistry) -> Result<FilterSelection> {
        let cities: Vec<String> = registry.keys().map(str::to_string).collect();
        let months = registry.calendar().months.clone();
        let weekdays = registry.calendar().weekdays.clone();

        loop {
            let city = self.ask_many(
                &format!("\nWhich city/cities? {}? Use commas:\n> ", choice_list(&cities)),
                &cities,
            )?;
            let month = self.ask_many(
                &format!("\nFrom month? {}? Use commas:\n> ", choice_list(&months)),
                &months,
            )?;
            let day = self.ask_many(
                &format!("\nWhich day? {}? Use commas:\n> ", choice_list(&weekdays)),
                &weekdays,
            )?;

            let summary = format!(
                "\nPlease confirm.\n\n City(ies): {}\n Month(s): {}\n Weekday(s): {}",
                city.join(", "),
                month.join(", "),
                day.join(", ")
            );
            if self.confirm(&summary)? {
                return FilterSelection::new(
                    into_selection("city", city)?,
                    into_selection("month", month)?,
                    into_selection("weekday", day)?,
                    registry,
                );
            }
            writeln!(self.writer, "\nTry again!")?;
        }
    }

    /// Sort key and direction for the raw row browser, `None` for unsorted
    pub fn prompt_sort(&mut self) -> Result<Option<SortOrder>> {
        let mut prompt = String::from(
            "\nHow would you like to sort the data? Press Enter to view unsorted.\n",
        );
        for key in SortKey::ALL {
            prompt.push_str(&format!(" [{}] {}\n", key.code(), key.column_name()));
        }
        prompt.push_str("\n> ");

        let codes: Vec<&str> = SortKey::ALL.iter().map(|key| key.code()).collect();
        let answer = self.ask_one(&prompt, &codes, true)?;
        let Some(key) = SortKey::from_code(&answer) else {
            return Ok(None);
        };

        let direction = self.ask_one(
            "\nWould you like it sorted ascending or descending?\n [a] Ascending\n [d] Descending\n\n> ",
            &["a", "d"],
            false,
        )?;
        let direction = if direction == "d" {
            SortDirection::Descending
        } else {
            SortDirection::Ascending
        };

        Ok(Some(SortOrder::new(key, direction)))
    }
}

impl<R: BufRead, W: Write> BrowsePrompt for Console<R, W> {
    fn resume_from(&mut self, cursor: usize) -> Result<bool> {
        self.confirm(&format!(
            "\nWould you like to continue from where you stopped last time (row {})?",
            cursor
        ))
    }

    fn choose_sort(&mut self) -> Result<Option<SortOrder>> {
        self.prompt_sort()
    }

    fn show_window(&mut self, window: &DataFrame, offset: usize) -> Result<bool> {
        report::render_window(&mut self.writer, window, offset)?;
        if window.height() == 0 {
            return Ok(false);
        }
        self.confirm("Do you want to keep printing raw data?")
    }
}

fn choice_list(choices: &[String]) -> String {
    choices
        .iter()
        .map(|choice| title_case(choice))
        .collect::<Vec<_>>()
        .join(", ")
}

fn into_selection(dimension: &str, values: Vec<String>) -> Result<Selection<String>> {
    Selection::from_values(values)
        .ok_or_else(|| BikeshareError::invalid_selection(dimension, "no values given"))
}

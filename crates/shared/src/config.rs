//! Application configuration management.

use chrono::format::{Item, StrftimeItems};
use chrono::NaiveDate;
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::types::{Amount, DecimalSeparator, Periodicity};

/// Largest supported number of fraction digits for a book.
pub const MAX_FRACTION_DIGITS: u32 = 8;

/// Application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Book formatting settings.
    #[serde(default)]
    pub book: BookSettings,
    /// Output settings.
    #[serde(default)]
    pub output: OutputConfig,
}

/// Formatting settings of a book.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct BookSettings {
    /// Number of fraction digits amounts are rounded to.
    #[serde(default = "default_fraction_digits")]
    pub fraction_digits: u32,
    /// Decimal separator for amount text.
    #[serde(default)]
    pub decimal_separator: DecimalSeparator,
    /// strftime-style date pattern.
    #[serde(default = "default_date_pattern")]
    pub date_pattern: String,
    /// Default periodicity when a report does not state one.
    #[serde(default)]
    pub periodicity: Periodicity,
}

fn default_fraction_digits() -> u32 {
    2
}

fn default_date_pattern() -> String {
    "%d/%m/%Y".to_string()
}

impl Default for BookSettings {
    fn default() -> Self {
        Self {
            fraction_digits: default_fraction_digits(),
            decimal_separator: DecimalSeparator::default(),
            date_pattern: default_date_pattern(),
            periodicity: Periodicity::default(),
        }
    }
}

impl BookSettings {
    /// Checks the settings for values the formatter cannot honor.
    pub fn validate(&self) -> AppResult<()> {
        if self.fraction_digits > MAX_FRACTION_DIGITS {
            return Err(AppError::Configuration(format!(
                "fraction_digits must be at most {MAX_FRACTION_DIGITS}, got {}",
                self.fraction_digits
            )));
        }
        if StrftimeItems::new(&self.date_pattern).any(|item| matches!(item, Item::Error)) {
            return Err(AppError::Configuration(format!(
                "invalid date_pattern: {}",
                self.date_pattern
            )));
        }
        Ok(())
    }

    /// Formats an amount with this book's separator and fraction digits.
    #[must_use]
    pub fn format_amount(&self, value: Amount) -> String {
        self.decimal_separator.format(value, self.fraction_digits)
    }

    /// Formats a date with this book's date pattern.
    #[must_use]
    pub fn format_date(&self, date: NaiveDate) -> String {
        date.format(&self.date_pattern).to_string()
    }
}

/// Table output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Tab-separated text, one line per row.
    #[default]
    Tsv,
    /// JSON array of arrays.
    Json,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "tsv" => Ok(Self::Tsv),
            "json" => Ok(Self::Json),
            _ => Err(format!("Unknown output format: {s}")),
        }
    }
}

/// Output configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct OutputConfig {
    /// Table output format.
    #[serde(default)]
    pub format: OutputFormat,
}

impl AppConfig {
    /// Loads configuration from environment and config files.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded or fails validation.
    pub fn load() -> AppResult<Self> {
        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{run_mode}")).required(false))
            .add_source(
                config::Environment::with_prefix("LEDGERLENS")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let config: Self = config.try_deserialize()?;
        config.book.validate()?;
        Ok(config)
    }
}

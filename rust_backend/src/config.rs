//! Report configuration file support.
//!
//! Reads which months to load, where their CSV exports live and how the
//! reports are shaped from a TOML file such as:
//!
//! ```toml
//! [data]
//! directory = "data"
//! year = 2025
//! months = [3, 4, 5, 6]
//!
//! [report]
//! top_n = 10
//!
//! [parsing]
//! slot_separator = "/"
//! ```

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};

use crate::core::domain::MonthKey;
use crate::core::error::{InsightsError, InsightsResult};
use crate::parsing::availability::{AvailabilityParser, DEFAULT_SLOT_SEPARATOR};
use crate::services::report::{ReportOptions, DEFAULT_TOP_N};

/// Report configuration from file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReportConfig {
    #[serde(default)]
    pub data: DataSettings,
    #[serde(default)]
    pub report: ReportSettings,
    #[serde(default)]
    pub parsing: ParsingSettings,
}

/// Location and selection of the monthly exports.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataSettings {
    #[serde(default = "default_directory")]
    pub directory: PathBuf,
    #[serde(default = "default_year")]
    pub year: i32,
    #[serde(default)]
    pub months: Vec<u32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportSettings {
    #[serde(default = "default_top_n")]
    pub top_n: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParsingSettings {
    #[serde(default = "default_slot_separator")]
    pub slot_separator: char,
}

fn default_directory() -> PathBuf {
    PathBuf::from(".")
}

fn default_year() -> i32 {
    2025
}

fn default_top_n() -> usize {
    DEFAULT_TOP_N
}

fn default_slot_separator() -> char {
    DEFAULT_SLOT_SEPARATOR
}

impl Default for DataSettings {
    fn default() -> Self {
        Self {
            directory: default_directory(),
            year: default_year(),
            months: Vec::new(),
        }
    }
}

impl Default for ReportSettings {
    fn default() -> Self {
        Self {
            top_n: default_top_n(),
        }
    }
}

impl Default for ParsingSettings {
    fn default() -> Self {
        Self {
            slot_separator: default_slot_separator(),
        }
    }
}

impl ReportConfig {
    /// Load and validate a configuration from a TOML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> InsightsResult<Self> {
        let content = fs::read_to_string(path.as_ref()).map_err(|e| {
            InsightsError::ConfigurationError(format!(
                "Failed to read config file {}: {}",
                path.as_ref().display(),
                e
            ))
        })?;

        Self::from_toml_str(&content)
    }

    /// Parse and validate a configuration from TOML text.
    pub fn from_toml_str(content: &str) -> InsightsResult<Self> {
        let config: ReportConfig = toml::from_str(content).map_err(|e| {
            InsightsError::ConfigurationError(format!("Failed to parse config file: {}", e))
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Load the configuration from the default location.
    ///
    /// Searches for `tour_insights.toml` in:
    /// 1. Current directory
    /// 2. `rust_backend/` directory
    /// 3. Parent directory
    pub fn from_default_location() -> InsightsResult<Self> {
        let search_paths = [
            PathBuf::from("tour_insights.toml"),
            PathBuf::from("rust_backend/tour_insights.toml"),
            PathBuf::from("../tour_insights.toml"),
        ];

        for path in search_paths {
            if path.exists() {
                log::debug!("Using configuration {}", path.display());
                return Self::from_file(&path);
            }
        }

        Err(InsightsError::ConfigurationError(
            "No tour_insights.toml found in standard locations".to_string(),
        ))
    }

    pub fn validate(&self) -> InsightsResult<()> {
        if self.report.top_n == 0 {
            return Err(InsightsError::ConfigurationError(
                "'report.top_n' must be at least 1".to_string(),
            ));
        }

        let mut seen = BTreeSet::new();
        for &month in &self.data.months {
            if !(1..=12).contains(&month) {
                return Err(InsightsError::ConfigurationError(format!(
                    "'data.months' contains {}, expected 1 through 12",
                    month
                )));
            }
            if !seen.insert(month) {
                return Err(InsightsError::ConfigurationError(format!(
                    "'data.months' lists month {} more than once",
                    month
                )));
            }
        }

        let separator = self.parsing.slot_separator;
        let reserved = separator == '-' || separator == ':';
        if reserved || separator.is_alphanumeric() || separator.is_whitespace() {
            return Err(InsightsError::ConfigurationError(format!(
                "'parsing.slot_separator' cannot be {:?}",
                separator
            )));
        }

        Ok(())
    }

    /// Configured months in the order given.
    pub fn month_keys(&self) -> InsightsResult<Vec<MonthKey>> {
        self.data
            .months
            .iter()
            .map(|&month| MonthKey::new(self.data.year, month))
            .collect()
    }

    pub fn report_options(&self) -> ReportOptions {
        ReportOptions {
            top_n: self.report.top_n,
            parser: AvailabilityParser::new(self.parsing.slot_separator),
        }
    }
}

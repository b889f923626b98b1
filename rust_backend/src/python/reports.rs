use pyo3::exceptions::{PyRuntimeError, PyValueError};
use pyo3::prelude::*;

use crate::config::ReportConfig;
use crate::core::domain::MonthKey;
use crate::io::loaders::MonthLoader;
use crate::parsing::availability::AvailabilityParser;
use crate::services::report::{build_month_report, build_report, ReportOptions};

fn to_json<T: serde::Serialize>(value: &T) -> PyResult<String> {
    serde_json::to_string(value)
        .map_err(|e| PyRuntimeError::new_err(format!("Failed to serialize report: {}", e)))
}

/// Parse an availability string into `(start, end)` pairs
///
/// Args:
///     raw: Availability string such as "09:00-12:00/14:00-16:00"
///     separator: Character separating ranges (default "/")
///
/// Returns:
///     list[tuple[str, str]]: Ranges as HH:MM strings, earliest first
///
/// Example:
///     >>> import tour_insights
///     >>> tour_insights.parse_availability("14:00-16:00/09:00-12:00")
///     [('09:00', '12:00'), ('14:00', '16:00')]
#[pyfunction]
#[pyo3(signature = (raw, separator = '/'))]
pub fn parse_availability(raw: &str, separator: char) -> PyResult<Vec<(String, String)>> {
    let intervals = AvailabilityParser::new(separator)
        .parse(raw)
        .map_err(|e| PyValueError::new_err(e.to_string()))?;

    Ok(intervals
        .iter()
        .map(|slot| {
            (
                slot.start.format("%H:%M").to_string(),
                slot.end.format("%H:%M").to_string(),
            )
        })
        .collect())
}

/// Build the report for one month of CSV exports
///
/// Args:
///     directory: Folder holding the month's five CSV files
///     year: Calendar year
///     month: Month number, 1 through 12
///     top_n: Rows kept in top-N tables (default 10)
///
/// Returns:
///     str: The month report as JSON
#[pyfunction]
#[pyo3(signature = (directory, year, month, top_n = 10))]
pub fn month_report_json(directory: &str, year: i32, month: u32, top_n: usize) -> PyResult<String> {
    let month = MonthKey::new(year, month).map_err(|e| PyValueError::new_err(e.to_string()))?;
    if top_n == 0 {
        return Err(PyValueError::new_err("top_n must be at least 1"));
    }

    let dataset = MonthLoader::new(directory)
        .load_month(month)
        .map_err(|e| PyRuntimeError::new_err(format!("Failed to load {}: {:#}", month, e)))?;

    let options = ReportOptions {
        top_n,
        ..ReportOptions::default()
    };
    to_json(&build_month_report(&dataset, &options))
}

/// Build every configured month report plus the all-months views
///
/// Args:
///     config_path: Path to a tour_insights.toml file
///
/// Returns:
///     str: The full report as JSON
#[pyfunction]
pub fn combined_report_json(config_path: &str) -> PyResult<String> {
    let config =
        ReportConfig::from_file(config_path).map_err(|e| PyValueError::new_err(e.to_string()))?;
    let months = config
        .month_keys()
        .map_err(|e| PyValueError::new_err(e.to_string()))?;

    let datasets = MonthLoader::new(&config.data.directory)
        .load_months(&months)
        .map_err(|e| PyRuntimeError::new_err(format!("Failed to load exports: {:#}", e)))?;

    to_json(&build_report(&datasets, &config.report_options()))
}

//! Python bindings for the tour insights engine.
//!
//! Compiled only with the `python` feature. Reports cross the boundary as
//! JSON strings so the Python side can hand them straight to pandas or a
//! charting library.
//!
//! # Python API
//!
//! - `parse_availability(raw, separator="/")`
//! - `month_report_json(directory, year, month, top_n=10)`
//! - `combined_report_json(config_path)`

pub mod reports;

pub use reports::*;

//! Tour insights: monthly analytics over a guided-tour business's exports.
//!
//! Loads bookings, tours, guides, guide availability and guide skills for
//! one or more months, reconciles declared availability against bookings,
//! and computes the per-month and all-months metrics a reporting front end
//! renders.

pub mod api;
pub mod config;
pub mod core;
pub mod io;
pub mod parsing;
pub mod services;
pub mod time;

#[cfg(feature = "python")]
pub mod python;

#[cfg(feature = "python")]
use pyo3::prelude::*;

/// Tour insights Python module
#[cfg(feature = "python")]
#[pymodule]
fn tour_insights(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_function(wrap_pyfunction!(python::parse_availability, m)?)?;
    m.add_function(wrap_pyfunction!(python::month_report_json, m)?)?;
    m.add_function(wrap_pyfunction!(python::combined_report_json, m)?)?;

    Ok(())
}

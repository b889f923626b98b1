//! Parsers for the monthly export formats.
//!
//! # Parsers
//!
//! - [`availability`]: Parse guide availability strings (`"09:00-12:00/14:00-16:00"`)
//! - [`csv_parser`]: Parse and standardise the five CSV export tables
//!
//! # Example
//!
//! ```
//! use tour_insights::parsing::AvailabilityParser;
//!
//! let slots = AvailabilityParser::default()
//!     .parse("09:00-12:00/14:00-16:00")
//!     .expect("well-formed availability");
//! assert_eq!(slots.len(), 2);
//! ```

pub mod availability;
pub mod csv_parser;

#[cfg(test)]
mod availability_tests;

pub use availability::{parse_availability_string, AvailabilityParser, DEFAULT_SLOT_SEPARATOR};

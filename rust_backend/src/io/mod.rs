//! Loading of the monthly CSV exports.
//!
//! Each month is exported as five files named after the table and the month,
//! e.g. `bookings_03-2025.csv`. The loader reads them into a typed
//! [`MonthDataset`](crate::core::domain::MonthDataset); all coercion happens
//! here, before any analytics run.
//!
//! # Example
//!
//! ```no_run
//! use tour_insights::core::domain::MonthKey;
//! use tour_insights::io::loaders::MonthLoader;
//!
//! let loader = MonthLoader::new("data");
//! let march = loader.load_month(MonthKey::new(2025, 3).unwrap()).expect("Failed to load");
//! println!("Loaded {} bookings", march.bookings.len());
//! ```

pub mod loaders;


pub use loaders::{MonthLoader, MonthTable};

//! Calendar and time-of-day utilities.
//!
//! - [`calendar`]: month date universes and weekday resolution
//! - [`intervals`]: union and overlap lengths of time-interval sets

pub mod calendar;
pub mod intervals;

pub use calendar::{days_in_month, month_dates, operating_dates, tour_runs_on, weekday_index};
pub use intervals::{covered_minutes, merge, overlap_minutes};

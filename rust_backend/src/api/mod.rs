//! # API Module
//!
//! Stable, serializable output types. Renderers (the CLI, the Python
//! bindings, or anything consuming the JSON) only depend on these rows and on
//! the report structures in [`crate::services::report`], never on the
//! internal reconciliation state.

pub mod types;

pub use types::{
    CombinedGuideDays, CombinedLocationDays, DateCount, GuideCount, GuideDayRow, LocationDays,
    LocationSlot, OccupancyRow, SlotUsage, TourCount,
};

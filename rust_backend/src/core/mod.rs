//! Core domain types and errors shared by every analytics component.

pub mod domain;
pub mod error;

pub use domain::{
    Booking, BookingId, DayClassification, Guide, GuideAvailability, GuideId, GuideSkill,
    MonthDataset, MonthKey, OperativeFlags, TimeInterval, Tour, TourId,
};
pub use error::{EntityKind, InsightsError, InsightsResult, IntervalParseError, Table};

//! Result rows handed to renderers.
//!
//! Every metric produces a flat table of these rows in its documented order.
//! Rows carry display names next to ids so a renderer never has to join back
//! against the source tables; names are `None` when the id could not be
//! resolved in that month.

use chrono::{NaiveDate, NaiveTime};
use serde::Serialize;
use std::collections::BTreeMap;

use crate::core::domain::{hh_mm, GuideId, TimeInterval, TourId};

// =========================================================
// Booking metrics
// =========================================================

/// Bookings for one tour.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TourCount {
    pub tour_id: TourId,
    pub tour_name: Option<String>,
    pub bookings: usize,
}

/// Bookings made on one date.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize)]
pub struct DateCount {
    pub date: NaiveDate,
    pub bookings: usize,
}

// =========================================================
// Guide metrics
// =========================================================

/// A per-guide count (bookings, available days, skills, ...).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GuideCount {
    pub guide_id: GuideId,
    pub guide_name: Option<String>,
    pub count: usize,
}

/// Reconciled day counts for one guide.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GuideDayRow {
    pub guide_id: GuideId,
    pub guide_name: Option<String>,
    pub available_days: usize,
    pub occupied_days: usize,
    pub unavailable_days: usize,
}

/// One line of the occupancy-rate table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OccupancyRow {
    pub guide_id: GuideId,
    pub guide_name: Option<String>,
    pub occupied_days: usize,
    pub reported_days: usize,
    /// Percentage with one decimal.
    pub occupancy_pct: f64,
}

/// Guide-days worked in a given weekday and tour slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SlotUsage {
    pub weekday: String,
    pub slot: TimeInterval,
    pub guide_days: usize,
}

// =========================================================
// Location metrics
// =========================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LocationDays {
    pub location: String,
    pub operating_days: u32,
}

/// Most frequent (start, end) pair among a location's tours.
///
/// Kept as two times rather than a [`TimeInterval`] since tour rows are not
/// required to have start before end.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LocationSlot {
    pub location: String,
    #[serde(with = "hh_mm")]
    pub time_start: NaiveTime,
    #[serde(with = "hh_mm")]
    pub time_end: NaiveTime,
    pub tour_count: usize,
}

// =========================================================
// All-months views
// =========================================================

/// Available days for a guide summed across months, with the month-by-month
/// breakdown keyed by `YYYY-MM`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CombinedGuideDays {
    pub guide_id: GuideId,
    pub guide_name: Option<String>,
    pub per_month: BTreeMap<String, usize>,
    pub total: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CombinedLocationDays {
    pub location: String,
    pub per_month: BTreeMap<String, u32>,
    pub total: u32,
}

//! Availability reconciliation.
//!
//! Merges each guide's declared availability with the bookings assigned to
//! them and classifies every reportable guide-day as Available, Occupied or
//! Unavailable. A booking always wins: a guide-day with at least one booking
//! is Occupied whatever was declared for it.

use chrono::NaiveDate;
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};

use crate::core::domain::{
    BookingId, DayClassification, GuideId, MonthDataset, MonthKey, TimeInterval, TourId,
};
use crate::core::error::InsightsResult;
use crate::parsing::availability::AvailabilityParser;
use crate::time::intervals::{covered_minutes, overlap_minutes};

/// A booking assigned to a guide on a given day.
///
/// `interval` is `None` when the booking's tour cannot be resolved or the
/// tour row has no valid slot.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BookedSlot {
    pub booking_id: BookingId,
    pub tour_id: TourId,
    pub interval: Option<TimeInterval>,
}

/// Reconciled state of one guide on one date.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GuideDay {
    pub guide_id: GuideId,
    pub date: NaiveDate,
    pub classification: DayClassification,
    pub declared: Vec<TimeInterval>,
    pub booked: Vec<BookedSlot>,
    pub declared_minutes: i64,
    pub booked_minutes: i64,
    pub overlap_minutes: i64,
}

/// Per-guide day counts over the reportable domain.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize)]
pub struct GuideDayCounts {
    pub guide_id: GuideId,
    pub available: usize,
    pub occupied: usize,
    pub unavailable: usize,
}

impl GuideDayCounts {
    /// Zeroed counts for `guide_id`.
    pub fn new(guide_id: GuideId) -> Self {
        Self {
            guide_id,
            available: 0,
            occupied: 0,
            unavailable: 0,
        }
    }

    pub fn reported(&self) -> usize {
        self.available + self.occupied + self.unavailable
    }

    /// Occupied share of reported days as a percentage rounded to one decimal,
    /// `None` when the guide has no reported days.
    pub fn occupancy_pct(&self) -> Option<f64> {
        occupancy_pct(self.occupied, self.reported())
    }
}

/// `occupied / reported * 100`, rounded half away from zero to one decimal.
///
/// ```
/// use tour_insights::services::reconciler::occupancy_pct;
///
/// assert_eq!(occupancy_pct(3, 10), Some(30.0));
/// assert_eq!(occupancy_pct(1, 3), Some(33.3));
/// assert_eq!(occupancy_pct(0, 0), None);
/// ```
pub fn occupancy_pct(occupied: usize, reported: usize) -> Option<f64> {
    if reported == 0 {
        return None;
    }
    let pct = occupied as f64 * 100.0 / reported as f64;
    Some((pct * 10.0).round() / 10.0)
}

/// Result of reconciling one month.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Reconciliation {
    pub month: MonthKey,
    days: BTreeMap<(GuideId, NaiveDate), GuideDay>,
}

impl Reconciliation {
    /// Classification of a guide-day; `NoData` outside the reportable domain.
    pub fn classification(&self, guide_id: GuideId, date: NaiveDate) -> DayClassification {
        self.days
            .get(&(guide_id, date))
            .map(|day| day.classification)
            .unwrap_or(DayClassification::NoData)
    }

    pub fn day(&self, guide_id: GuideId, date: NaiveDate) -> Option<&GuideDay> {
        self.days.get(&(guide_id, date))
    }

    /// All reconciled guide-days ordered by guide then date.
    pub fn days(&self) -> impl Iterator<Item = &GuideDay> {
        self.days.values()
    }

    /// Guides with at least one reportable day, ascending.
    pub fn guides(&self) -> Vec<GuideId> {
        let ids: BTreeSet<GuideId> = self.days.keys().map(|(guide_id, _)| *guide_id).collect();
        ids.into_iter().collect()
    }

    /// Day counts for every guide with a non-empty domain, ordered by guide id.
    pub fn day_counts(&self) -> Vec<GuideDayCounts> {
        let mut counts: BTreeMap<GuideId, GuideDayCounts> = BTreeMap::new();
        for day in self.days.values() {
            let entry = counts
                .entry(day.guide_id)
                .or_insert_with(|| GuideDayCounts::new(day.guide_id));
            match day.classification {
                DayClassification::Available => entry.available += 1,
                DayClassification::Occupied => entry.occupied += 1,
                DayClassification::Unavailable => entry.unavailable += 1,
                DayClassification::NoData => {}
            }
        }
        counts.into_values().collect()
    }

    pub fn len(&self) -> usize {
        self.days.len()
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }
}

/// Reconciles availability against bookings for one month.
#[derive(Debug, Clone, Default)]
pub struct Reconciler {
    parser: AvailabilityParser,
}

impl Reconciler {
    pub fn new(parser: AvailabilityParser) -> Self {
        Self { parser }
    }

    /// Classify every guide-day implied by the month's availability rows and
    /// bookings.
    ///
    /// Only guides present in the Guide table are reconciled; rows dated
    /// outside the dataset month are left out of the domain. A
    /// malformed availability string anywhere in the month fails the whole
    /// reconciliation with [`crate::core::error::InsightsError::MalformedInterval`].
    /// With duplicate (guide, date) availability rows the last row wins.
    pub fn reconcile(&self, dataset: &MonthDataset) -> InsightsResult<Reconciliation> {
        let month = dataset.month;
        let tours = dataset.tour_index();
        let guides = dataset.guide_index();

        let mut declared: BTreeMap<(GuideId, NaiveDate), Vec<TimeInterval>> = BTreeMap::new();
        for row in &dataset.availability {
            let intervals = self
                .parser
                .parse(&row.raw_slots)
                .map_err(|err| err.tag(row.guide_id, row.date))?;
            if !month.contains(row.date) {
                log::warn!(
                    "{}: availability for guide {} dated {} is outside the month",
                    month,
                    row.guide_id,
                    row.date
                );
                continue;
            }
            if !guides.contains_key(&row.guide_id) {
                continue;
            }
            declared.insert((row.guide_id, row.date), intervals);
        }

        let mut booked: BTreeMap<(GuideId, NaiveDate), Vec<BookedSlot>> = BTreeMap::new();
        for booking in &dataset.bookings {
            if !month.contains(booking.booking_date) {
                log::warn!(
                    "{}: booking {} dated {} is outside the month",
                    month,
                    booking.id,
                    booking.booking_date
                );
                continue;
            }
            if !guides.contains_key(&booking.guide_id) {
                continue;
            }
            let interval = tours.get(&booking.tour_id).and_then(|tour| tour.slot());
            booked
                .entry((booking.guide_id, booking.booking_date))
                .or_default()
                .push(BookedSlot {
                    booking_id: booking.id,
                    tour_id: booking.tour_id,
                    interval,
                });
        }

        let domain: BTreeSet<(GuideId, NaiveDate)> =
            declared.keys().chain(booked.keys()).copied().collect();

        let mut days = BTreeMap::new();
        for key in domain {
            let (guide_id, date) = key;
            let declared_intervals = declared.remove(&key).unwrap_or_default();
            let booked_slots = booked.remove(&key).unwrap_or_default();
            let booked_intervals: Vec<TimeInterval> =
                booked_slots.iter().filter_map(|slot| slot.interval).collect();

            let classification = if !booked_slots.is_empty() {
                DayClassification::Occupied
            } else if !declared_intervals.is_empty() {
                DayClassification::Available
            } else {
                DayClassification::Unavailable
            };

            let day = GuideDay {
                guide_id,
                date,
                classification,
                declared_minutes: covered_minutes(&declared_intervals),
                booked_minutes: covered_minutes(&booked_intervals),
                overlap_minutes: overlap_minutes(&declared_intervals, &booked_intervals),
                declared: declared_intervals,
                booked: booked_slots,
            };
            days.insert(key, day);
        }

        let reconciliation = Reconciliation { month, days };
        log::debug!(
            "{}: reconciled {} guide-days for {} guides",
            month,
            reconciliation.len(),
            reconciliation.guides().len()
        );
        Ok(reconciliation)
    }
}

/// Reconcile with the default availability format.
pub fn reconcile_month(dataset: &MonthDataset) -> InsightsResult<Reconciliation> {
    Reconciler::default().reconcile(dataset)
}

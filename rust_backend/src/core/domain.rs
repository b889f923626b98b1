//! Domain models for the tour-guiding business datasets.
//!
//! This module provides the typed records that make up one month of exported
//! data (bookings, tours, guides, guide availability and guide skills), plus
//! the small value types the analytics engine derives from them: time
//! intervals, month keys, weekday operative flags and day classifications.

use chrono::{Datelike, NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

use super::error::{InsightsError, InsightsResult};

macro_rules! entity_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub i64);

        impl $name {
            pub fn new(value: i64) -> Self {
                Self(value)
            }

            pub fn value(&self) -> i64 {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

entity_id!(
    /// Strongly-typed identifier for a booking row.
    BookingId
);
entity_id!(
    /// Strongly-typed identifier for a tour.
    TourId
);
entity_id!(
    /// Strongly-typed identifier for a guide.
    GuideId
);

/// A calendar month, the granularity at which datasets are exported.
///
/// # Examples
///
/// ```
/// use tour_insights::core::domain::MonthKey;
///
/// let march = MonthKey::new(2025, 3).unwrap();
/// assert_eq!(march.days_in_month(), 31);
/// assert_eq!(march.file_suffix(), "03-2025");
/// assert!(MonthKey::new(2025, 13).is_err());
/// ```
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct MonthKey {
    pub year: i32,
    pub month: u32,
}

impl MonthKey {
    /// Creates a month key, rejecting month numbers outside `1..=12`.
    pub fn new(year: i32, month: u32) -> InsightsResult<Self> {
        if NaiveDate::from_ymd_opt(year, month, 1).is_none() {
            return Err(InsightsError::InvalidMonth(format!("{}-{:02}", year, month)));
        }
        Ok(Self { year, month })
    }

    /// Number of days in the month, leap years included.
    pub fn days_in_month(&self) -> u32 {
        crate::time::calendar::days_in_month(*self)
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date.year() == self.year && date.month() == self.month
    }

    /// Suffix used by the export file naming convention, e.g. `03-2025`.
    pub fn file_suffix(&self) -> String {
        format!("{:02}-{}", self.month, self.year)
    }
}

impl fmt::Display for MonthKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

/// A same-day time interval `[start, end)` with `start < end`.
///
/// Used for declared guide availability and for the slots occupied by tours.
///
/// # Examples
///
/// ```
/// use chrono::NaiveTime;
/// use tour_insights::core::domain::TimeInterval;
///
/// let nine = NaiveTime::from_hms_opt(9, 0, 0).unwrap();
/// let noon = NaiveTime::from_hms_opt(12, 0, 0).unwrap();
/// let slot = TimeInterval::new(nine, noon).unwrap();
/// assert_eq!(slot.duration_minutes(), 180);
/// assert_eq!(slot.to_string(), "09:00-12:00");
/// assert!(TimeInterval::new(noon, nine).is_none());
/// ```
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TimeInterval {
    #[serde(with = "hh_mm")]
    pub start: NaiveTime,
    #[serde(with = "hh_mm")]
    pub end: NaiveTime,
}

impl TimeInterval {
    /// Returns `None` unless `start < end`.
    pub fn new(start: NaiveTime, end: NaiveTime) -> Option<Self> {
        if start < end {
            Some(Self { start, end })
        } else {
            None
        }
    }

    pub fn duration_minutes(&self) -> i64 {
        (self.end - self.start).num_minutes()
    }

    pub fn intersection(&self, other: &TimeInterval) -> Option<TimeInterval> {
        TimeInterval::new(self.start.max(other.start), self.end.min(other.end))
    }
}

impl fmt::Display for TimeInterval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}-{}",
            self.start.format("%H:%M"),
            self.end.format("%H:%M")
        )
    }
}

pub(crate) mod hh_mm {
    use chrono::NaiveTime;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(time: &NaiveTime, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(&time.format("%H:%M"))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveTime, D::Error> {
        let raw = String::deserialize(deserializer)?;
        NaiveTime::parse_from_str(&raw, "%H:%M").map_err(serde::de::Error::custom)
    }
}

/// Weekday operative flags in fixed Monday..Sunday order.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OperativeFlags(pub [bool; 7]);

impl OperativeFlags {
    pub const WEEKDAY_NAMES: [&'static str; 7] = [
        "Monday",
        "Tuesday",
        "Wednesday",
        "Thursday",
        "Friday",
        "Saturday",
        "Sunday",
    ];

    pub fn new(flags: [bool; 7]) -> Self {
        Self(flags)
    }

    /// Whether the flag for `weekday_index` (0 = Monday) is set.
    pub fn runs_on(&self, weekday_index: usize) -> bool {
        self.0.get(weekday_index).copied().unwrap_or(false)
    }

    /// Number of operative weekdays, 0 through 7.
    pub fn count(&self) -> u32 {
        self.0.iter().filter(|flag| **flag).count() as u32
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Booking {
    pub id: BookingId,
    pub tour_id: TourId,
    pub booking_date: NaiveDate,
    pub guide_id: GuideId,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tour {
    pub id: TourId,
    pub name: String,
    pub location: String,
    pub time_start: NaiveTime,
    pub time_end: NaiveTime,
    pub operative_flags: OperativeFlags,
}

impl Tour {
    /// The tour's daily slot, `None` if the row violates `time_start < time_end`.
    pub fn slot(&self) -> Option<TimeInterval> {
        TimeInterval::new(self.time_start, self.time_end)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Guide {
    pub id: GuideId,
    pub name: String,
    pub location: String,
}

/// One self-reported availability row. `raw_slots` is kept verbatim; it is
/// parsed by [`crate::parsing::availability::AvailabilityParser`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GuideAvailability {
    pub guide_id: GuideId,
    pub date: NaiveDate,
    pub raw_slots: String,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GuideSkill {
    pub guide_id: GuideId,
    pub tour_id: TourId,
}

/// Classification of a single guide-day.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DayClassification {
    /// Declared free intervals and no booking.
    Available,
    /// At least one booking on that date.
    Occupied,
    /// Availability row present but empty, and no booking.
    Unavailable,
    /// Outside the guide's reportable domain for the month.
    NoData,
}

/// All five tables for one month, as handed over by the loading collaborator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonthDataset {
    pub month: MonthKey,
    pub bookings: Vec<Booking>,
    pub tours: Vec<Tour>,
    pub guides: Vec<Guide>,
    pub availability: Vec<GuideAvailability>,
    pub skills: Vec<GuideSkill>,
}

impl MonthDataset {
    pub fn new(month: MonthKey) -> Self {
        Self {
            month,
            bookings: Vec::new(),
            tours: Vec::new(),
            guides: Vec::new(),
            availability: Vec::new(),
            skills: Vec::new(),
        }
    }

    /// Tours keyed by id. With duplicate ids the later row wins.
    pub fn tour_index(&self) -> HashMap<TourId, &Tour> {
        self.tours.iter().map(|tour| (tour.id, tour)).collect()
    }

    /// Guides keyed by id. With duplicate ids the later row wins.
    pub fn guide_index(&self) -> HashMap<GuideId, &Guide> {
        self.guides.iter().map(|guide| (guide.id, guide)).collect()
    }
}

//! Error types for the analytics engine.

use chrono::NaiveDate;
use serde::Serialize;
use std::fmt;

use super::domain::GuideId;

/// Result type for analytics operations
pub type InsightsResult<T> = Result<T, InsightsError>;

/// Input table a data-quality issue was found in.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize)]
pub enum Table {
    Bookings,
    Tours,
    Guides,
    Availability,
    Skills,
}

impl fmt::Display for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Table::Bookings => "bookings",
            Table::Tours => "tours",
            Table::Guides => "guides",
            Table::Availability => "availability",
            Table::Skills => "skills",
        };
        f.write_str(name)
    }
}

/// Kind of entity a row failed to resolve.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize)]
pub enum EntityKind {
    Tour,
    Guide,
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntityKind::Tour => f.write_str("tour"),
            EntityKind::Guide => f.write_str("guide"),
        }
    }
}

/// Error type for analytics operations
#[derive(Debug, Clone, PartialEq, Serialize, thiserror::Error)]
pub enum InsightsError {
    #[error("Malformed availability for guide {guide_id} on {date}: {raw:?} ({reason})")]
    MalformedInterval {
        guide_id: GuideId,
        date: NaiveDate,
        raw: String,
        reason: String,
    },

    #[error("Unresolved reference: {table} row {row} references missing {entity} {id}")]
    UnresolvedReference {
        table: Table,
        row: usize,
        entity: EntityKind,
        id: i64,
    },

    #[error("Duplicate availability for guide {guide_id} on {date}: {rows} rows, last row wins")]
    DuplicateAvailabilityRow {
        guide_id: GuideId,
        date: NaiveDate,
        rows: usize,
    },

    #[error("Invalid month: {0}")]
    InvalidMonth(String),

    #[error("Configuration error: {0}")]
    ConfigurationError(String),

    #[error("Load error: {0}")]
    LoadError(String),
}

/// A single availability string failed to parse.
///
/// Carries no guide or date; the reconciler tags it into
/// [`InsightsError::MalformedInterval`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("cannot parse {segment:?} in {raw:?}: {reason}")]
pub struct IntervalParseError {
    pub raw: String,
    pub segment: String,
    pub reason: String,
}

impl IntervalParseError {
    pub fn new(raw: &str, segment: &str, reason: impl Into<String>) -> Self {
        Self {
            raw: raw.to_string(),
            segment: segment.to_string(),
            reason: reason.into(),
        }
    }

    /// Attach the guide and date of the offending availability row.
    pub fn tag(self, guide_id: GuideId, date: NaiveDate) -> InsightsError {
        InsightsError::MalformedInterval {
            guide_id,
            date,
            reason: format!("{:?}: {}", self.segment, self.reason),
            raw: self.raw,
        }
    }
}

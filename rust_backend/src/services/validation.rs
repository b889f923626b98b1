//! Data-quality checks for one month of tables.
//!
//! Errors are the conditions the error model treats as reportable faults
//! (unresolved references, duplicate availability rows). Warnings cover rows
//! that are well formed but suspicious:
//! - bookings on a weekday their tour does not operate
//! - rows dated outside the dataset month
//! - tours whose start time is not before their end time
//!
//! Malformed availability strings are not checked here; the reconciler
//! surfaces them when the availability metrics are computed.

use chrono::NaiveDate;
use serde::Serialize;
use std::collections::BTreeMap;

use crate::core::domain::{GuideId, MonthDataset};
use crate::core::error::{EntityKind, InsightsError, Table};
use crate::time::calendar::tour_runs_on;

/// Kind of warning raised for a row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum WarningCategory {
    NonOperatingDay,
    OutsideMonth,
    InvalidTourSlot,
}

impl WarningCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            WarningCategory::NonOperatingDay => "non_operating_day",
            WarningCategory::OutsideMonth => "outside_month",
            WarningCategory::InvalidTourSlot => "invalid_tour_slot",
        }
    }
}

/// A non-fatal finding tied to one source row (1-based).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationWarning {
    pub table: Table,
    pub row: usize,
    pub category: WarningCategory,
    pub description: String,
}

impl ValidationWarning {
    fn new(table: Table, row: usize, category: WarningCategory, description: String) -> Self {
        Self {
            table,
            row,
            category,
            description,
        }
    }
}

/// Row counts per table.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ValidationStats {
    pub bookings: usize,
    pub tours: usize,
    pub guides: usize,
    pub availability_rows: usize,
    pub skills: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ValidationReport {
    pub errors: Vec<InsightsError>,
    pub warnings: Vec<ValidationWarning>,
    pub stats: ValidationStats,
}

impl ValidationReport {
    pub fn is_clean(&self) -> bool {
        self.errors.is_empty() && self.warnings.is_empty()
    }

    pub fn warnings_of(&self, category: WarningCategory) -> impl Iterator<Item = &ValidationWarning> {
        self.warnings.iter().filter(move |w| w.category == category)
    }
}

/// Run every check over `dataset`.
pub fn validate_month(dataset: &MonthDataset) -> ValidationReport {
    let month = dataset.month;
    let tours = dataset.tour_index();
    let guides = dataset.guide_index();

    let mut report = ValidationReport {
        stats: ValidationStats {
            bookings: dataset.bookings.len(),
            tours: dataset.tours.len(),
            guides: dataset.guides.len(),
            availability_rows: dataset.availability.len(),
            skills: dataset.skills.len(),
        },
        ..ValidationReport::default()
    };

    let unresolved = |table: Table, row: usize, entity: EntityKind, id: i64| {
        InsightsError::UnresolvedReference {
            table,
            row,
            entity,
            id,
        }
    };

    for (i, booking) in dataset.bookings.iter().enumerate() {
        let row = i + 1;
        let tour = tours.get(&booking.tour_id);
        if tour.is_none() {
            report.errors.push(unresolved(
                Table::Bookings,
                row,
                EntityKind::Tour,
                booking.tour_id.value(),
            ));
        }
        if !guides.contains_key(&booking.guide_id) {
            report.errors.push(unresolved(
                Table::Bookings,
                row,
                EntityKind::Guide,
                booking.guide_id.value(),
            ));
        }

        if !month.contains(booking.booking_date) {
            report.warnings.push(ValidationWarning::new(
                Table::Bookings,
                row,
                WarningCategory::OutsideMonth,
                format!("Booking {} is dated {}, outside {}", booking.id, booking.booking_date, month),
            ));
        } else if let Some(tour) = tour {
            if !tour_runs_on(tour, booking.booking_date) {
                report.warnings.push(ValidationWarning::new(
                    Table::Bookings,
                    row,
                    WarningCategory::NonOperatingDay,
                    format!(
                        "Booking {} on {} ({}) but tour {} does not operate that day",
                        booking.id,
                        booking.booking_date,
                        booking.booking_date.format("%A"),
                        tour.id
                    ),
                ));
            }
        }
    }

    for (i, skill) in dataset.skills.iter().enumerate() {
        let row = i + 1;
        if !guides.contains_key(&skill.guide_id) {
            report.errors.push(unresolved(
                Table::Skills,
                row,
                EntityKind::Guide,
                skill.guide_id.value(),
            ));
        }
        if !tours.contains_key(&skill.tour_id) {
            report.errors.push(unresolved(
                Table::Skills,
                row,
                EntityKind::Tour,
                skill.tour_id.value(),
            ));
        }
    }

    let mut availability_rows: BTreeMap<(GuideId, NaiveDate), usize> = BTreeMap::new();
    for (i, entry) in dataset.availability.iter().enumerate() {
        let row = i + 1;
        *availability_rows
            .entry((entry.guide_id, entry.date))
            .or_insert(0) += 1;

        if !guides.contains_key(&entry.guide_id) {
            report.errors.push(unresolved(
                Table::Availability,
                row,
                EntityKind::Guide,
                entry.guide_id.value(),
            ));
        }
        if !month.contains(entry.date) {
            report.warnings.push(ValidationWarning::new(
                Table::Availability,
                row,
                WarningCategory::OutsideMonth,
                format!(
                    "Availability for guide {} is dated {}, outside {}",
                    entry.guide_id, entry.date, month
                ),
            ));
        }
    }
    for ((guide_id, date), rows) in availability_rows {
        if rows > 1 {
            report.errors.push(InsightsError::DuplicateAvailabilityRow {
                guide_id,
                date,
                rows,
            });
        }
    }

    for (i, tour) in dataset.tours.iter().enumerate() {
        if tour.slot().is_none() {
            report.warnings.push(ValidationWarning::new(
                Table::Tours,
                i + 1,
                WarningCategory::InvalidTourSlot,
                format!(
                    "Tour {} starts at {} and ends at {}",
                    tour.id,
                    tour.time_start.format("%H:%M"),
                    tour.time_end.format("%H:%M")
                ),
            ));
        }
    }

    for error in &report.errors {
        log::warn!("{}: {}", month, error);
    }
    for warning in &report.warnings {
        log::warn!(
            "{}: {} row {}: {}",
            month,
            warning.table,
            warning.row,
            warning.description
        );
    }
    log::info!(
        "{}: validation found {} errors and {} warnings",
        month,
        report.errors.len(),
        report.warnings.len()
    );

    report
}

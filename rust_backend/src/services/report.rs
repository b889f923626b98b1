//! Report assembly.
//!
//! A month report computes every metric for one [`MonthDataset`]. Metrics that
//! depend on parsed availability are grouped so a malformed availability
//! string fails only that group; the booking, skill and location metrics of
//! the same month are still produced.

use serde::Serialize;

use crate::api::types::{
    CombinedGuideDays, CombinedLocationDays, DateCount, GuideCount, GuideDayRow, LocationDays,
    LocationSlot, OccupancyRow, SlotUsage, TourCount,
};
use crate::core::domain::{MonthDataset, MonthKey};
use crate::core::error::{InsightsError, InsightsResult};
use crate::parsing::availability::AvailabilityParser;
use crate::services::reconciler::Reconciler;
use crate::services::validation::{validate_month, ValidationReport};
use crate::services::{bookings, combiner, guides, locations};

/// Number of rows kept in top-N tables unless configured otherwise.
pub const DEFAULT_TOP_N: usize = 10;

/// Knobs shared by every month of a report run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReportOptions {
    pub top_n: usize,
    pub parser: AvailabilityParser,
}

impl Default for ReportOptions {
    fn default() -> Self {
        Self {
            top_n: DEFAULT_TOP_N,
            parser: AvailabilityParser::default(),
        }
    }
}

/// Metrics computed from the availability reconciliation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AvailabilityMetrics {
    pub top_available_guides: Vec<GuideCount>,
    pub guide_day_counts: Vec<GuideDayRow>,
    pub occupancy: Vec<OccupancyRow>,
    pub not_available_days: Vec<GuideCount>,
    pub booked_slot_usage: Vec<SlotUsage>,
}

/// Every per-month metric.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthReport {
    pub month: MonthKey,
    pub validation: ValidationReport,
    pub top_tours: Vec<TourCount>,
    pub bookings_over_time: Vec<DateCount>,
    pub peak_booking_dates: Vec<DateCount>,
    pub top_active_guides: Vec<GuideCount>,
    pub top_skilled_guides: Vec<GuideCount>,
    pub weekly_operating_days: Vec<LocationDays>,
    pub monthly_operating_days: Vec<LocationDays>,
    pub most_common_slots: Vec<LocationSlot>,
    pub availability: Result<AvailabilityMetrics, InsightsError>,
}

/// All-months views.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CombinedReport {
    pub months: Vec<MonthKey>,
    pub bookings_over_time: Vec<DateCount>,
    pub guide_available_days: Result<Vec<CombinedGuideDays>, InsightsError>,
    pub location_operating_days: Vec<CombinedLocationDays>,
}

/// Month reports plus the combined views, as rendered by the CLI.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InsightsReport {
    pub months: Vec<MonthReport>,
    pub combined: CombinedReport,
}

/// Reconcile and compute the availability-dependent metrics.
pub fn availability_metrics(
    dataset: &MonthDataset,
    parser: AvailabilityParser,
    top_n: usize,
) -> InsightsResult<AvailabilityMetrics> {
    let reconciliation = Reconciler::new(parser).reconcile(dataset)?;

    Ok(AvailabilityMetrics {
        top_available_guides: guides::top_available_guides(dataset, &reconciliation, top_n),
        guide_day_counts: guides::guide_day_counts(dataset, &reconciliation),
        occupancy: guides::occupancy_table(dataset, &reconciliation),
        not_available_days: guides::not_available_days(dataset, &reconciliation),
        booked_slot_usage: guides::booked_slot_usage(&reconciliation),
    })
}

/// Build the report for one month.
pub fn build_month_report(dataset: &MonthDataset, options: &ReportOptions) -> MonthReport {
    let month = dataset.month;
    log::info!(
        "{}: building report ({} bookings, {} tours, {} guides)",
        month,
        dataset.bookings.len(),
        dataset.tours.len(),
        dataset.guides.len()
    );

    let availability = availability_metrics(dataset, options.parser, options.top_n);
    if let Err(err) = &availability {
        log::warn!("{}: availability metrics unavailable: {}", month, err);
    }

    let report = MonthReport {
        month,
        validation: validate_month(dataset),
        top_tours: bookings::top_tours(dataset, options.top_n),
        bookings_over_time: bookings::bookings_over_time(dataset),
        peak_booking_dates: bookings::peak_booking_dates(dataset, options.top_n),
        top_active_guides: bookings::top_active_guides(dataset, options.top_n),
        top_skilled_guides: guides::top_skilled_guides(dataset, options.top_n),
        weekly_operating_days: locations::weekly_operating_days(dataset),
        monthly_operating_days: locations::monthly_operating_days(dataset),
        most_common_slots: locations::most_common_slot(dataset),
        availability,
    };

    log::info!("{}: report complete", month);
    report
}

/// Combine month reports into the all-months views.
///
/// The combined available-days view fails when any month's availability
/// metrics failed, carrying that month's error; the other views are always
/// produced.
pub fn combine_reports(reports: &[MonthReport]) -> CombinedReport {
    let months: Vec<MonthKey> = reports.iter().map(|report| report.month).collect();

    let bookings_over_time = combiner::combine_bookings_over_time(
        reports.iter().map(|report| report.bookings_over_time.as_slice()),
    );

    let location_months: Vec<(MonthKey, &[LocationDays])> = reports
        .iter()
        .map(|report| (report.month, report.weekly_operating_days.as_slice()))
        .collect();
    let location_operating_days = combiner::combine_location_operating_days(&location_months);

    let guide_available_days = reports
        .iter()
        .map(|report| {
            report
                .availability
                .as_ref()
                .map(|metrics| (report.month, metrics.guide_day_counts.as_slice()))
                .map_err(Clone::clone)
        })
        .collect::<InsightsResult<Vec<_>>>()
        .map(|guide_months| combiner::combine_guide_available_days(&guide_months));

    CombinedReport {
        months,
        bookings_over_time,
        guide_available_days,
        location_operating_days,
    }
}

/// Build every month report and the combined views.
pub fn build_report(datasets: &[MonthDataset], options: &ReportOptions) -> InsightsReport {
    let months: Vec<MonthReport> = datasets
        .iter()
        .map(|dataset| build_month_report(dataset, options))
        .collect();
    let combined = combine_reports(&months);
    InsightsReport { months, combined }
}

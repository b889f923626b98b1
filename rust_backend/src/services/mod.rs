//! Analytics services.
//!
//! Every service is a pure function of one month's tables (or of several
//! months' aggregates for the combiner); nothing here performs I/O or keeps
//! state between calls.

pub mod bookings;
pub mod combiner;
pub mod guides;
pub mod locations;
pub mod ranking;
pub mod reconciler;
pub mod report;
pub mod validation;


pub use reconciler::{reconcile_month, Reconciler, Reconciliation};
pub use report::{
    build_month_report, build_report, combine_reports, CombinedReport, InsightsReport,
    MonthReport, ReportOptions,
};
pub use validation::{validate_month, ValidationReport};

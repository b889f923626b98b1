//! Booking-table metrics: popular tours, booking time series and busy guides.

use crate::api::types::{DateCount, GuideCount, TourCount};
use crate::core::domain::MonthDataset;
use crate::services::ranking::{count_by, top_n};

/// Top-N tours by number of bookings, ties by ascending tour id.
///
/// The count only needs the booking's tour id; the Tour table supplies the
/// name. A tour missing from that table is still ranked, with no name.
pub fn top_tours(dataset: &MonthDataset, n: usize) -> Vec<TourCount> {
    let tours = dataset.tour_index();
    let counts = count_by(dataset.bookings.iter().map(|b| b.tour_id));

    top_n(counts.into_iter().collect(), n)
        .into_iter()
        .map(|(tour_id, bookings)| TourCount {
            tour_id,
            tour_name: tours.get(&tour_id).map(|tour| tour.name.clone()),
            bookings,
        })
        .collect()
}

/// Booking counts per date, ascending by date.
pub fn bookings_over_time(dataset: &MonthDataset) -> Vec<DateCount> {
    count_by(dataset.bookings.iter().map(|b| b.booking_date))
        .into_iter()
        .map(|(date, bookings)| DateCount { date, bookings })
        .collect()
}

/// Top-N dates by booking count, ties by ascending date.
pub fn peak_booking_dates(dataset: &MonthDataset, n: usize) -> Vec<DateCount> {
    let series = bookings_over_time(dataset)
        .into_iter()
        .map(|row| (row.date, row.bookings))
        .collect();

    top_n(series, n)
        .into_iter()
        .map(|(date, bookings)| DateCount { date, bookings })
        .collect()
}

/// Top-N guides by number of bookings, ties by ascending guide id.
///
/// Same rule as [`top_tours`]: a guide missing from the Guide table is
/// ranked under its id, with no name.
pub fn top_active_guides(dataset: &MonthDataset, n: usize) -> Vec<GuideCount> {
    let guides = dataset.guide_index();
    let counts = count_by(dataset.bookings.iter().map(|b| b.guide_id));

    top_n(counts.into_iter().collect(), n)
        .into_iter()
        .map(|(guide_id, count)| GuideCount {
            guide_id,
            guide_name: guides.get(&guide_id).map(|guide| guide.name.clone()),
            count,
        })
        .collect()
}

//! Location metrics over the Tour table.

use chrono::NaiveTime;
use std::collections::BTreeMap;

use crate::api::types::{LocationDays, LocationSlot};
use crate::core::domain::{MonthDataset, Tour};
use crate::time::calendar::operating_dates;

fn sum_by_location<F>(tours: &[Tour], days: F) -> Vec<LocationDays>
where
    F: Fn(&Tour) -> u32,
{
    let mut totals: BTreeMap<&str, u32> = BTreeMap::new();
    for tour in tours {
        *totals.entry(tour.location.as_str()).or_insert(0) += days(tour);
    }

    let mut rows: Vec<LocationDays> = totals
        .into_iter()
        .map(|(location, operating_days)| LocationDays {
            location: location.to_string(),
            operating_days,
        })
        .collect();
    rows.sort_by(|a, b| {
        b.operating_days
            .cmp(&a.operating_days)
            .then_with(|| a.location.cmp(&b.location))
    });
    rows
}

/// Operative weekdays summed per location, most first, ties by name.
pub fn weekly_operating_days(dataset: &MonthDataset) -> Vec<LocationDays> {
    sum_by_location(&dataset.tours, |tour| tour.operative_flags.count())
}

/// Calendar dates on which each location's tours run in `month`, summed per
/// location. Same ordering as [`weekly_operating_days`].
pub fn monthly_operating_days(dataset: &MonthDataset) -> Vec<LocationDays> {
    let month = dataset.month;
    sum_by_location(&dataset.tours, |tour| {
        operating_dates(month, &tour.operative_flags).len() as u32
    })
}

/// The most common (start, end) pair per location, locations ascending.
///
/// When several pairs are equally common the earliest start wins, then the
/// earliest end.
pub fn most_common_slot(dataset: &MonthDataset) -> Vec<LocationSlot> {
    let mut slots: BTreeMap<&str, BTreeMap<(NaiveTime, NaiveTime), usize>> = BTreeMap::new();
    for tour in &dataset.tours {
        *slots
            .entry(tour.location.as_str())
            .or_default()
            .entry((tour.time_start, tour.time_end))
            .or_insert(0) += 1;
    }

    slots
        .into_iter()
        .filter_map(|(location, counts)| {
            // Ascending key order plus a strict comparison keeps the earliest
            // slot on ties.
            let mut best: Option<((NaiveTime, NaiveTime), usize)> = None;
            for (slot, count) in counts {
                if best.map_or(true, |(_, top)| count > top) {
                    best = Some((slot, count));
                }
            }
            best.map(|((time_start, time_end), tour_count)| LocationSlot {
                location: location.to_string(),
                time_start,
                time_end,
                tour_count,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::domain::{MonthKey, OperativeFlags, TourId};

    fn t(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    fn tour(id: i64, location: &str, start: NaiveTime, end: NaiveTime, flags: [bool; 7]) -> Tour {
        Tour {
            id: TourId(id),
            name: format!("Tour {}", id),
            location: location.to_string(),
            time_start: start,
            time_end: end,
            operative_flags: OperativeFlags::new(flags),
        }
    }

    const WEEKDAYS: [bool; 7] = [true, true, true, true, true, false, false];
    const WEEKENDS: [bool; 7] = [false, false, false, false, false, true, true];
    const MONDAYS: [bool; 7] = [true, false, false, false, false, false, false];

    fn dataset(tours: Vec<Tour>) -> MonthDataset {
        let mut data = MonthDataset::new(MonthKey::new(2025, 3).unwrap());
        data.tours = tours;
        data
    }

    #[test]
    fn test_weekly_operating_days_sum_and_order() {
        let data = dataset(vec![
            tour(1, "Sevilla", t(9, 0), t(11, 0), WEEKENDS),
            tour(2, "Madrid", t(9, 0), t(11, 0), WEEKDAYS),
            tour(3, "Sevilla", t(9, 0), t(11, 0), WEEKENDS),
            tour(4, "Bilbao", t(9, 0), t(11, 0), MONDAYS),
            tour(5, "Bilbao", t(9, 0), t(11, 0), [false; 7]),
        ]);

        let rows = weekly_operating_days(&data);
        let summary: Vec<(&str, u32)> = rows
            .iter()
            .map(|r| (r.location.as_str(), r.operating_days))
            .collect();
        assert_eq!(summary, vec![("Madrid", 5), ("Sevilla", 4), ("Bilbao", 1)]);
    }

    /// March 2025 starts on a Saturday: five Saturdays, Sundays and Mondays,
    /// four of every other weekday.
    #[test]
    fn test_monthly_operating_days() {
        let data = dataset(vec![
            tour(1, "Sevilla", t(9, 0), t(11, 0), WEEKENDS),
            tour(2, "Madrid", t(9, 0), t(11, 0), WEEKDAYS),
            tour(3, "Bilbao", t(9, 0), t(11, 0), MONDAYS),
        ]);

        let rows = monthly_operating_days(&data);
        let summary: Vec<(&str, u32)> = rows
            .iter()
            .map(|r| (r.location.as_str(), r.operating_days))
            .collect();
        assert_eq!(summary, vec![("Madrid", 21), ("Sevilla", 10), ("Bilbao", 5)]);
    }

    #[test]
    fn test_most_common_slot_mode_and_tie_break() {
        let data = dataset(vec![
            tour(1, "Madrid", t(14, 0), t(16, 0), WEEKDAYS),
            tour(2, "Madrid", t(10, 0), t(12, 0), WEEKDAYS),
            tour(3, "Madrid", t(14, 0), t(16, 0), WEEKDAYS),
            tour(4, "Sevilla", t(18, 0), t(20, 0), WEEKDAYS),
            tour(5, "Sevilla", t(9, 0), t(13, 0), WEEKDAYS),
            tour(6, "Sevilla", t(9, 0), t(11, 0), WEEKDAYS),
        ]);

        let slots = most_common_slot(&data);
        assert_eq!(slots.len(), 2);
        assert_eq!(slots[0].location, "Madrid");
        assert_eq!((slots[0].time_start, slots[0].time_end), (t(14, 0), t(16, 0)));
        assert_eq!(slots[0].tour_count, 2);
        assert_eq!(slots[1].location, "Sevilla");
        assert_eq!((slots[1].time_start, slots[1].time_end), (t(9, 0), t(11, 0)));
        assert_eq!(slots[1].tour_count, 1);
    }

    #[test]
    fn test_no_tours() {
        let data = dataset(Vec::new());
        assert!(weekly_operating_days(&data).is_empty());
        assert!(most_common_slot(&data).is_empty());
    }
}

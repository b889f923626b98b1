//! Guide metrics derived from the reconciliation and the skills table.

use std::collections::{BTreeMap, BTreeSet, HashMap};

use crate::api::types::{GuideCount, GuideDayRow, OccupancyRow, SlotUsage};
use crate::core::domain::{Guide, GuideId, MonthDataset, OperativeFlags, TimeInterval};
use crate::services::ranking::{rank_desc, top_n};
use crate::services::reconciler::Reconciliation;
use crate::time::calendar::weekday_index;

fn guide_name(guides: &HashMap<GuideId, &Guide>, guide_id: GuideId) -> Option<String> {
    guides.get(&guide_id).map(|guide| guide.name.clone())
}

/// Available/occupied/unavailable day counts for every reconciled guide,
/// ordered by guide id.
pub fn guide_day_counts(dataset: &MonthDataset, reconciliation: &Reconciliation) -> Vec<GuideDayRow> {
    let guides = dataset.guide_index();
    reconciliation
        .day_counts()
        .into_iter()
        .map(|counts| GuideDayRow {
            guide_id: counts.guide_id,
            guide_name: guide_name(&guides, counts.guide_id),
            available_days: counts.available,
            occupied_days: counts.occupied,
            unavailable_days: counts.unavailable,
        })
        .collect()
}

/// Top-N guides by Available-day count, ties by ascending guide id.
pub fn top_available_guides(
    dataset: &MonthDataset,
    reconciliation: &Reconciliation,
    n: usize,
) -> Vec<GuideCount> {
    let guides = dataset.guide_index();
    let entries = reconciliation
        .day_counts()
        .into_iter()
        .map(|counts| (counts.guide_id, counts.available))
        .collect();

    top_n(entries, n)
        .into_iter()
        .map(|(guide_id, count)| GuideCount {
            guide_id,
            guide_name: guide_name(&guides, guide_id),
            count,
        })
        .collect()
}

/// Occupancy rate per guide, highest first, ties by ascending guide id.
///
/// Guides with no reported days have no rate and are left out.
pub fn occupancy_table(dataset: &MonthDataset, reconciliation: &Reconciliation) -> Vec<OccupancyRow> {
    let guides = dataset.guide_index();
    let mut rows: Vec<OccupancyRow> = reconciliation
        .day_counts()
        .into_iter()
        .filter_map(|counts| {
            counts.occupancy_pct().map(|pct| OccupancyRow {
                guide_id: counts.guide_id,
                guide_name: guide_name(&guides, counts.guide_id),
                occupied_days: counts.occupied,
                reported_days: counts.reported(),
                occupancy_pct: pct,
            })
        })
        .collect();

    rows.sort_by(|a, b| {
        b.occupancy_pct
            .total_cmp(&a.occupancy_pct)
            .then_with(|| a.guide_id.cmp(&b.guide_id))
    });
    rows
}

/// Calendar days each guide was not Available: days in month minus
/// Available days. Covers every guide in the Guide table, most first.
pub fn not_available_days(dataset: &MonthDataset, reconciliation: &Reconciliation) -> Vec<GuideCount> {
    let guides = dataset.guide_index();
    let days_in_month = dataset.month.days_in_month() as usize;
    let available: HashMap<GuideId, usize> = reconciliation
        .day_counts()
        .into_iter()
        .map(|counts| (counts.guide_id, counts.available))
        .collect();

    let ids: BTreeSet<GuideId> = guides.keys().copied().collect();
    let entries = ids
        .into_iter()
        .map(|guide_id| {
            let free = available.get(&guide_id).copied().unwrap_or(0);
            (guide_id, days_in_month.saturating_sub(free))
        })
        .collect();

    rank_desc(entries)
        .into_iter()
        .map(|(guide_id, count)| GuideCount {
            guide_id,
            guide_name: guide_name(&guides, guide_id),
            count,
        })
        .collect()
}

/// Top-N guides by the number of distinct tours they are skilled for.
///
/// A repeated (guide, tour) pair counts once. Rows pointing at a guide or tour
/// missing from the month's tables are left out.
pub fn top_skilled_guides(dataset: &MonthDataset, n: usize) -> Vec<GuideCount> {
    let guides = dataset.guide_index();
    let tours = dataset.tour_index();

    let mut skills: BTreeMap<GuideId, BTreeSet<_>> = BTreeMap::new();
    for skill in &dataset.skills {
        if guides.contains_key(&skill.guide_id) && tours.contains_key(&skill.tour_id) {
            skills.entry(skill.guide_id).or_default().insert(skill.tour_id);
        }
    }

    let entries = skills
        .into_iter()
        .map(|(guide_id, tours)| (guide_id, tours.len()))
        .collect();

    top_n(entries, n)
        .into_iter()
        .map(|(guide_id, count)| GuideCount {
            guide_id,
            guide_name: guide_name(&guides, guide_id),
            count,
        })
        .collect()
}

/// Guide-days worked per (weekday, tour slot), busiest first.
///
/// Ties are ordered by weekday (Monday first) then slot.
pub fn booked_slot_usage(reconciliation: &Reconciliation) -> Vec<SlotUsage> {
    let mut usage: BTreeMap<(usize, TimeInterval), BTreeSet<_>> = BTreeMap::new();
    for day in reconciliation.days() {
        let weekday = weekday_index(day.date);
        for slot in day.booked.iter().filter_map(|slot| slot.interval) {
            usage
                .entry((weekday, slot))
                .or_default()
                .insert((day.guide_id, day.date));
        }
    }

    let entries = usage
        .into_iter()
        .map(|(key, guide_days)| (key, guide_days.len()))
        .collect();

    rank_desc(entries)
        .into_iter()
        .map(|((weekday, slot), guide_days)| SlotUsage {
            weekday: OperativeFlags::WEEKDAY_NAMES[weekday].to_string(),
            slot,
            guide_days,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::domain::{
        Booking, BookingId, GuideAvailability, GuideSkill, MonthKey, Tour, TourId,
    };
    use crate::services::reconciler::reconcile_month;
    use chrono::{NaiveDate, NaiveTime};

    fn d(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, day).unwrap()
    }

    fn avail(guide_id: i64, day: u32, raw: &str) -> GuideAvailability {
        GuideAvailability {
            guide_id: GuideId(guide_id),
            date: d(day),
            raw_slots: raw.to_string(),
        }
    }

    fn booking(id: i64, guide_id: i64, day: u32) -> Booking {
        Booking {
            id: BookingId(id),
            tour_id: TourId(1),
            booking_date: d(day),
            guide_id: GuideId(guide_id),
        }
    }

    fn dataset() -> MonthDataset {
        let mut data = MonthDataset::new(MonthKey::new(2025, 3).unwrap());
        data.guides = (1..=3)
            .map(|id| Guide {
                id: GuideId(id),
                name: format!("Guide {}", id),
                location: "Madrid".to_string(),
            })
            .collect();
        data.tours = (1..=2)
            .map(|id| Tour {
                id: TourId(id),
                name: format!("Tour {}", id),
                location: "Madrid".to_string(),
                time_start: NaiveTime::from_hms_opt(10, 0, 0).unwrap(),
                time_end: NaiveTime::from_hms_opt(12, 0, 0).unwrap(),
                operative_flags: OperativeFlags::new([true; 7]),
            })
            .collect();
        data
    }

    #[test]
    fn test_day_counts_and_top_available() {
        let mut data = dataset();
        data.availability = vec![
            avail(1, 3, "09:00-12:00"),
            avail(2, 3, "09:00-12:00"),
            avail(2, 4, "09:00-12:00"),
            avail(2, 5, ""),
        ];
        data.bookings = vec![booking(1, 1, 4)];
        let rec = reconcile_month(&data).unwrap();

        let counts = guide_day_counts(&data, &rec);
        assert_eq!(counts.len(), 2);
        assert_eq!(
            (counts[0].available_days, counts[0].occupied_days),
            (1, 1)
        );
        assert_eq!(counts[1].unavailable_days, 1);

        let top = top_available_guides(&data, &rec, 1);
        assert_eq!(top.len(), 1);
        assert_eq!(top[0].guide_id, GuideId(2));
        assert_eq!(top[0].count, 2);
    }

    #[test]
    fn test_occupancy_table_order_and_exclusion() {
        let mut data = dataset();
        data.availability = vec![
            avail(1, 3, "09:00-12:00"),
            avail(2, 3, "09:00-12:00"),
            avail(2, 4, ""),
        ];
        data.bookings = vec![booking(1, 1, 4), booking(2, 2, 5)];
        let rec = reconcile_month(&data).unwrap();

        let table = occupancy_table(&data, &rec);
        assert_eq!(table.len(), 2);
        assert_eq!(table[0].guide_id, GuideId(1));
        assert_eq!(table[0].occupancy_pct, 50.0);
        assert_eq!(table[1].occupancy_pct, 33.3);
        assert!(table.iter().all(|row| row.guide_id != GuideId(3)));
    }

    #[test]
    fn test_not_available_days_covers_all_guides() {
        let mut data = dataset();
        data.availability = vec![avail(1, 3, "09:00-12:00"), avail(1, 4, "09:00-12:00")];
        let rec = reconcile_month(&data).unwrap();

        let rows = not_available_days(&data, &rec);
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0].guide_id, GuideId(2));
        assert_eq!(rows[0].count, 31);
        assert_eq!(rows[2].guide_id, GuideId(1));
        assert_eq!(rows[2].count, 29);
    }

    /// Duplicate skill rows count once
    #[test]
    fn test_top_skilled_guides_set_semantics() {
        let mut data = dataset();
        let skill = |g, t| GuideSkill {
            guide_id: GuideId(g),
            tour_id: TourId(t),
        };
        data.skills = vec![
            skill(1, 1),
            skill(1, 1),
            skill(1, 2),
            skill(2, 1),
            skill(3, 2),
            skill(3, 9),
            skill(8, 1),
        ];

        let top = top_skilled_guides(&data, 10);
        let summary: Vec<(i64, usize)> = top.iter().map(|r| (r.guide_id.value(), r.count)).collect();
        assert_eq!(summary, vec![(1, 2), (2, 1), (3, 1)]);
    }

    #[test]
    fn test_booked_slot_usage() {
        let mut data = dataset();
        // 2025-03-03 and 2025-03-10 are Mondays, 2025-03-04 a Tuesday
        data.bookings = vec![booking(1, 1, 3), booking(2, 2, 3), booking(3, 1, 10), booking(4, 1, 4)];
        let rec = reconcile_month(&data).unwrap();

        let usage = booked_slot_usage(&rec);
        assert_eq!(usage.len(), 2);
        assert_eq!(usage[0].weekday, "Monday");
        assert_eq!(usage[0].guide_days, 3);
        assert_eq!(usage[1].weekday, "Tuesday");
        assert_eq!(usage[0].slot.to_string(), "10:00-12:00");
    }
}

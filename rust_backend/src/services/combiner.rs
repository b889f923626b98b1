//! All-months views built from per-month aggregates.
//!
//! The same id in different months denotes the same tour or guide; nothing
//! else is assumed about identity across months.

use std::collections::BTreeMap;

use crate::api::types::{
    CombinedGuideDays, CombinedLocationDays, DateCount, GuideDayRow, LocationDays,
};
use crate::core::domain::{GuideId, MonthKey};

/// Merge per-month booking series; equal dates are summed, output ascending.
pub fn combine_bookings_over_time<'a, I>(series: I) -> Vec<DateCount>
where
    I: IntoIterator<Item = &'a [DateCount]>,
{
    let mut totals = BTreeMap::new();
    for rows in series {
        for row in rows {
            *totals.entry(row.date).or_insert(0) += row.bookings;
        }
    }
    totals
        .into_iter()
        .map(|(date, bookings)| DateCount { date, bookings })
        .collect()
}

/// Sum available days per guide across months.
///
/// Every guide gets an entry for every month in `months`; a guide missing
/// from a month contributes 0 there. Output is ordered by descending total,
/// ties by ascending guide id. The most recent known name is kept.
pub fn combine_guide_available_days(months: &[(MonthKey, &[GuideDayRow])]) -> Vec<CombinedGuideDays> {
    let mut names: BTreeMap<GuideId, Option<String>> = BTreeMap::new();
    let mut per_guide: BTreeMap<GuideId, BTreeMap<MonthKey, usize>> = BTreeMap::new();

    for (month, rows) in months {
        for row in rows.iter() {
            *per_guide
                .entry(row.guide_id)
                .or_default()
                .entry(*month)
                .or_insert(0) += row.available_days;
            let name = names.entry(row.guide_id).or_insert(None);
            if row.guide_name.is_some() {
                *name = row.guide_name.clone();
            }
        }
    }

    let mut combined: Vec<CombinedGuideDays> = per_guide
        .into_iter()
        .map(|(guide_id, counts)| {
            let per_month: BTreeMap<String, usize> = months
                .iter()
                .map(|(month, _)| (month.to_string(), counts.get(month).copied().unwrap_or(0)))
                .collect();
            CombinedGuideDays {
                guide_id,
                guide_name: names.remove(&guide_id).flatten(),
                total: counts.values().sum(),
                per_month,
            }
        })
        .collect();

    combined.sort_by(|a, b| b.total.cmp(&a.total).then_with(|| a.guide_id.cmp(&b.guide_id)));
    combined
}

/// Sum weekly operating days per location across months, most first, ties by
/// location name.
pub fn combine_location_operating_days(
    months: &[(MonthKey, &[LocationDays])],
) -> Vec<CombinedLocationDays> {
    let mut per_location: BTreeMap<&str, BTreeMap<MonthKey, u32>> = BTreeMap::new();
    for (month, rows) in months {
        for row in rows.iter() {
            *per_location
                .entry(row.location.as_str())
                .or_default()
                .entry(*month)
                .or_insert(0) += row.operating_days;
        }
    }

    let mut combined: Vec<CombinedLocationDays> = per_location
        .into_iter()
        .map(|(location, counts)| CombinedLocationDays {
            location: location.to_string(),
            per_month: months
                .iter()
                .map(|(month, _)| (month.to_string(), counts.get(month).copied().unwrap_or(0)))
                .collect(),
            total: counts.values().sum(),
        })
        .collect();

    combined.sort_by(|a, b| b.total.cmp(&a.total).then_with(|| a.location.cmp(&b.location)));
    combined
}

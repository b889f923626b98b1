//! Interval-set arithmetic over same-day time intervals.

use crate::core::domain::TimeInterval;

/// Merge overlapping or touching intervals into a sorted disjoint list.
pub fn merge(intervals: &[TimeInterval]) -> Vec<TimeInterval> {
    let mut sorted = intervals.to_vec();
    sorted.sort();

    let mut merged: Vec<TimeInterval> = Vec::with_capacity(sorted.len());
    for interval in sorted {
        match merged.last_mut() {
            Some(last) if interval.start <= last.end => {
                if interval.end > last.end {
                    last.end = interval.end;
                }
            }
            _ => merged.push(interval),
        }
    }
    merged
}

/// Total minutes covered by the union of `intervals`.
pub fn covered_minutes(intervals: &[TimeInterval]) -> i64 {
    merge(intervals).iter().map(TimeInterval::duration_minutes).sum()
}

/// Minutes covered by both interval sets.
///
/// Each side is merged first, so double-declared ranges are not counted twice.
pub fn overlap_minutes(a: &[TimeInterval], b: &[TimeInterval]) -> i64 {
    let a = merge(a);
    let b = merge(b);

    let (mut i, mut j) = (0, 0);
    let mut total = 0;
    while i < a.len() && j < b.len() {
        if let Some(common) = a[i].intersection(&b[j]) {
            total += common.duration_minutes();
        }
        if a[i].end <= b[j].end {
            i += 1;
        } else {
            j += 1;
        }
    }
    total
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveTime;

    fn iv(sh: u32, sm: u32, eh: u32, em: u32) -> TimeInterval {
        TimeInterval::new(
            NaiveTime::from_hms_opt(sh, sm, 0).unwrap(),
            NaiveTime::from_hms_opt(eh, em, 0).unwrap(),
        )
        .unwrap()
    }

    #[test]
    fn test_merge_overlapping_and_adjacent() {
        let merged = merge(&[iv(14, 0, 15, 0), iv(9, 0, 12, 0), iv(10, 0, 14, 0)]);
        assert_eq!(merged, vec![iv(9, 0, 15, 0)]);
    }

    #[test]
    fn test_merge_keeps_gaps() {
        let merged = merge(&[iv(9, 0, 10, 0), iv(11, 0, 12, 0)]);
        assert_eq!(merged.len(), 2);
    }

    #[test]
    fn test_covered_minutes_counts_overlap_once() {
        assert_eq!(covered_minutes(&[iv(9, 0, 12, 0), iv(11, 0, 13, 0)]), 240);
        assert_eq!(covered_minutes(&[]), 0);
    }

    #[test]
    fn test_overlap_minutes() {
        let declared = [iv(9, 0, 12, 0), iv(14, 0, 18, 0)];
        let booked = [iv(11, 0, 15, 0)];
        assert_eq!(overlap_minutes(&declared, &booked), 60 + 60);
        assert_eq!(overlap_minutes(&declared, &[]), 0);
    }

    #[test]
    fn test_overlap_with_duplicated_declarations() {
        let declared = [iv(9, 0, 12, 0), iv(9, 0, 12, 0)];
        let booked = [iv(10, 0, 11, 0)];
        assert_eq!(overlap_minutes(&declared, &booked), 60);
    }
}

//! Calendar resolution for monthly datasets.
//!
//! Dates are plain calendar dates: no time zone is attached and no
//! conversion is ever performed.

use chrono::{Datelike, NaiveDate};

use crate::core::domain::{MonthKey, OperativeFlags, Tour};

/// Weekday index of `date`, 0 = Monday .. 6 = Sunday, matching
/// [`OperativeFlags`] ordering.
pub fn weekday_index(date: NaiveDate) -> usize {
    date.weekday().num_days_from_monday() as usize
}

/// Number of days in `month`, leap years included.
pub fn days_in_month(month: MonthKey) -> u32 {
    month_dates(month).count() as u32
}

/// Every calendar date of `month` in ascending order.
pub fn month_dates(month: MonthKey) -> impl Iterator<Item = NaiveDate> {
    NaiveDate::from_ymd_opt(month.year, month.month, 1)
        .into_iter()
        .flat_map(|first| first.iter_days())
        .take_while(move |date| month.contains(*date))
}

/// Dates of `month` whose weekday is operative in `flags`.
///
/// # Examples
///
/// ```
/// use tour_insights::core::domain::{MonthKey, OperativeFlags};
/// use tour_insights::time::calendar::operating_dates;
///
/// // March 2025 starts on a Saturday: five Mondays (3rd to 31st), four Tuesdays
/// let march = MonthKey::new(2025, 3).unwrap();
/// let mondays_only = OperativeFlags::new([true, false, false, false, false, false, false]);
/// let tuesdays_only = OperativeFlags::new([false, true, false, false, false, false, false]);
/// assert_eq!(operating_dates(march, &mondays_only).len(), 5);
/// assert_eq!(operating_dates(march, &tuesdays_only).len(), 4);
/// ```
pub fn operating_dates(month: MonthKey, flags: &OperativeFlags) -> Vec<NaiveDate> {
    month_dates(month)
        .filter(|date| flags.runs_on(weekday_index(*date)))
        .collect()
}

/// Whether `tour` operates on the weekday of `date`.
pub fn tour_runs_on(tour: &Tour, date: NaiveDate) -> bool {
    tour.operative_flags.runs_on(weekday_index(date))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Weekday;

    fn month(year: i32, month: u32) -> MonthKey {
        MonthKey::new(year, month).unwrap()
    }

    #[test]
    fn test_weekday_index_matches_flag_order() {
        // 2025-03-01 is a Saturday, 2025-03-10 a Monday
        assert_eq!(weekday_index(NaiveDate::from_ymd_opt(2025, 3, 1).unwrap()), 5);
        assert_eq!(weekday_index(NaiveDate::from_ymd_opt(2025, 3, 10).unwrap()), 0);
        assert_eq!(weekday_index(NaiveDate::from_ymd_opt(2025, 3, 16).unwrap()), 6);
    }

    #[test]
    fn test_days_in_month_handles_leap_years() {
        assert_eq!(days_in_month(month(2024, 2)), 29);
        assert_eq!(days_in_month(month(2025, 2)), 28);
        assert_eq!(days_in_month(month(2000, 2)), 29);
        assert_eq!(days_in_month(month(1900, 2)), 28);
        assert_eq!(days_in_month(month(2025, 4)), 30);
        assert_eq!(days_in_month(month(2025, 12)), 31);
    }

    #[test]
    fn test_month_dates_stop_at_boundary() {
        let dates: Vec<_> = month_dates(month(2025, 12)).collect();
        assert_eq!(dates.len(), 31);
        assert_eq!(dates[0], NaiveDate::from_ymd_opt(2025, 12, 1).unwrap());
        assert_eq!(dates[30], NaiveDate::from_ymd_opt(2025, 12, 31).unwrap());
    }

    #[test]
    fn test_march_2025_mondays() {
        let flags = OperativeFlags::new([true, false, false, false, false, false, false]);
        let dates = operating_dates(month(2025, 3), &flags);
        assert_eq!(dates.len(), 5);
        assert!(dates.iter().all(|d| d.weekday() == Weekday::Mon));
        assert_eq!(dates[0], NaiveDate::from_ymd_opt(2025, 3, 3).unwrap());
        assert_eq!(dates[4], NaiveDate::from_ymd_opt(2025, 3, 31).unwrap());
    }

    #[test]
    fn test_weekend_tour_in_march_2025() {
        // Five Saturdays and five Sundays
        let flags = OperativeFlags::new([false, false, false, false, false, true, true]);
        assert_eq!(operating_dates(month(2025, 3), &flags).len(), 10);
    }

    #[test]
    fn test_no_flags_no_dates() {
        assert!(operating_dates(month(2025, 3), &OperativeFlags::default()).is_empty());
    }

    #[test]
    fn test_every_day_flags() {
        let flags = OperativeFlags::new([true; 7]);
        assert_eq!(operating_dates(month(2024, 2), &flags).len(), 29);
    }
}

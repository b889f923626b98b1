#[cfg(test)]
mod tests {
    use crate::parsing::availability::parse_availability_string;
    use chrono::NaiveTime;
    use proptest::prelude::*;

    fn t(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    /// Test the two-range example from the reporting notebook
    #[test]
    fn test_parse_two_ranges() {
        let slots = parse_availability_string("09:00-12:00/14:00-16:00").unwrap();
        assert_eq!(slots.len(), 2);
        assert_eq!((slots[0].start, slots[0].end), (t(9, 0), t(12, 0)));
        assert_eq!((slots[1].start, slots[1].end), (t(14, 0), t(16, 0)));
    }

    #[test]
    fn test_parse_empty_and_blank() {
        assert!(parse_availability_string("").unwrap().is_empty());
        assert!(parse_availability_string("   \t").unwrap().is_empty());
    }

    #[test]
    fn test_start_after_end_rejected() {
        let err = parse_availability_string("09:00-08:00").unwrap_err();
        assert_eq!(err.segment, "09:00-08:00");
        assert!(err.reason.contains("before"));
    }

    #[test]
    fn test_zero_length_range_rejected() {
        assert!(parse_availability_string("10:00-10:00").is_err());
    }

    /// Single digit hours are not accepted; the export always pads to HH:MM
    #[test]
    fn test_single_digit_hour_rejected() {
        assert!(parse_availability_string("9:00-12:00").is_err());
    }

    #[test]
    fn test_wrong_token_count_rejected() {
        assert!(parse_availability_string("09:00").is_err());
        assert!(parse_availability_string("09:00-10:00-11:00").is_err());
    }

    #[test]
    fn test_parenthesised_tokens_rejected() {
        assert!(parse_availability_string("(09:00-12:00)").is_err());
    }

    #[test]
    fn test_trailing_separator_rejected() {
        let err = parse_availability_string("09:00-12:00/").unwrap_err();
        assert_eq!(err.reason, "empty range");
    }

    #[test]
    fn test_whitespace_around_tokens_is_trimmed() {
        let slots = parse_availability_string(" 09:00 - 12:00 / 14:00-16:00 ").unwrap();
        assert_eq!(slots.len(), 2);
        assert_eq!(slots[0].end, t(12, 0));
    }

    /// Overlapping and adjacent ranges stay as written
    #[test]
    fn test_overlapping_ranges_preserved() {
        let slots = parse_availability_string("10:00-14:00/09:00-12:00/14:00-15:00").unwrap();
        assert_eq!(slots.len(), 3);
        assert_eq!(slots[0].start, t(9, 0));
        assert_eq!(slots[1].start, t(10, 0));
        assert_eq!(slots[2].start, t(14, 0));
    }

    #[test]
    fn test_one_bad_range_fails_whole_string() {
        let err = parse_availability_string("09:00-12:00/14:00-1600").unwrap_err();
        assert_eq!(err.raw, "09:00-12:00/14:00-1600");
        assert_eq!(err.segment, "14:00-1600");
    }

    fn minute_of_day() -> impl Strategy<Value = u32> {
        0u32..(24 * 60)
    }

    proptest! {
        #[test]
        fn prop_well_formed_ranges_parse_sorted(
            pairs in proptest::collection::vec((minute_of_day(), minute_of_day()), 1..6)
        ) {
            let ranges: Vec<(u32, u32)> = pairs
                .into_iter()
                .filter(|(a, b)| a != b)
                .map(|(a, b)| (a.min(b), a.max(b)))
                .collect();
            prop_assume!(!ranges.is_empty());

            let raw = ranges
                .iter()
                .map(|(s, e)| format!("{:02}:{:02}-{:02}:{:02}", s / 60, s % 60, e / 60, e % 60))
                .collect::<Vec<_>>()
                .join("/");

            let parsed = parse_availability_string(&raw).unwrap();
            prop_assert_eq!(parsed.len(), ranges.len());
            for slot in &parsed {
                prop_assert!(slot.start < slot.end);
            }
            for pair in parsed.windows(2) {
                prop_assert!(pair[0] <= pair[1]);
            }
        }

        #[test]
        fn prop_parsing_is_deterministic(raw in "[0-9:/ -]{0,24}") {
            let first = parse_availability_string(&raw);
            let second = parse_availability_string(&raw);
            prop_assert_eq!(first, second);
        }
    }
}

use chrono::NaiveTime;

use crate::core::domain::TimeInterval;
use crate::core::error::IntervalParseError;

/// Separator between ranges in exported availability strings.
pub const DEFAULT_SLOT_SEPARATOR: char = '/';

/// Parser for guide availability strings such as `"09:00-12:00/14:00-16:00"`.
///
/// Ranges are kept exactly as written: overlapping or adjacent ranges are not
/// merged, and the output is ordered by start (then end) so the result does
/// not depend on how the guide happened to write the ranges.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct AvailabilityParser {
    separator: char,
}

impl Default for AvailabilityParser {
    fn default() -> Self {
        Self {
            separator: DEFAULT_SLOT_SEPARATOR,
        }
    }
}

impl AvailabilityParser {
    pub fn new(separator: char) -> Self {
        Self { separator }
    }

    pub fn separator(&self) -> char {
        self.separator
    }

    /// Parse an availability string into intervals, earliest start first.
    ///
    /// Empty or whitespace-only input means "no declared availability".
    ///
    /// # Examples
    ///
    /// ```
    /// use tour_insights::parsing::availability::AvailabilityParser;
    ///
    /// let parser = AvailabilityParser::default();
    /// let slots = parser.parse("14:00-16:00/09:00-12:00").unwrap();
    /// assert_eq!(slots.len(), 2);
    /// assert_eq!(slots[0].to_string(), "09:00-12:00");
    /// assert!(parser.parse("   ").unwrap().is_empty());
    /// assert!(parser.parse("9:00-12:00").is_err());
    /// ```
    pub fn parse(&self, raw: &str) -> Result<Vec<TimeInterval>, IntervalParseError> {
        if raw.trim().is_empty() {
            return Ok(Vec::new());
        }

        let mut intervals = raw
            .split(self.separator)
            .map(|segment| parse_range(raw, segment))
            .collect::<Result<Vec<_>, _>>()?;

        intervals.sort();
        Ok(intervals)
    }
}

/// Parse with the default `/` separator.
pub fn parse_availability_string(raw: &str) -> Result<Vec<TimeInterval>, IntervalParseError> {
    AvailabilityParser::default().parse(raw)
}

fn parse_range(raw: &str, segment: &str) -> Result<TimeInterval, IntervalParseError> {
    let trimmed = segment.trim();
    if trimmed.is_empty() {
        return Err(IntervalParseError::new(raw, segment, "empty range"));
    }

    let tokens: Vec<&str> = trimmed.split('-').collect();
    if tokens.len() != 2 {
        return Err(IntervalParseError::new(
            raw,
            segment,
            format!("expected HH:MM-HH:MM, found {} token(s)", tokens.len()),
        ));
    }

    let fault = |reason: String| IntervalParseError::new(raw, segment, reason);
    let start = parse_hh_mm(tokens[0].trim()).map_err(fault)?;
    let end = parse_hh_mm(tokens[1].trim()).map_err(fault)?;

    TimeInterval::new(start, end)
        .ok_or_else(|| IntervalParseError::new(raw, segment, "start must be before end"))
}

/// Strict 24-hour `HH:MM`: two digit hour, colon, two digit minute.
fn parse_hh_mm(token: &str) -> Result<NaiveTime, String> {
    let bytes = token.as_bytes();
    let well_formed = bytes.len() == 5
        && bytes[2] == b':'
        && [0, 1, 3, 4].iter().all(|&i| bytes[i].is_ascii_digit());
    if !well_formed {
        return Err(format!("{:?} is not HH:MM", token));
    }

    let hour = u32::from(bytes[0] - b'0') * 10 + u32::from(bytes[1] - b'0');
    let minute = u32::from(bytes[3] - b'0') * 10 + u32::from(bytes[4] - b'0');

    NaiveTime::from_hms_opt(hour, minute, 0)
        .ok_or_else(|| format!("{:?} is not a valid 24-hour time", token))
}

//! CSV row schemas for the five monthly export tables.
//!
//! This is the load boundary: every field is coerced and standardised here so
//! the analytics core only ever sees typed records. Availability strings are
//! the exception and are passed through verbatim.

use anyhow::{anyhow, Context, Result};
use chrono::{NaiveDate, NaiveTime};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::io::Read;

use crate::core::domain::{
    Booking, BookingId, Guide, GuideAvailability, GuideId, GuideSkill, OperativeFlags, Tour,
    TourId,
};

#[derive(Debug, Deserialize)]
struct BookingRow {
    #[serde(default, alias = "BookingID")]
    id: Option<i64>,
    #[serde(rename = "TourID")]
    tour_id: i64,
    #[serde(rename = "BookingDate")]
    booking_date: String,
    #[serde(rename = "GuideID")]
    guide_id: i64,
}

#[derive(Debug, Deserialize)]
struct TourRow {
    #[serde(alias = "TourID")]
    id: i64,
    #[serde(rename = "TourName", default)]
    name: String,
    #[serde(rename = "TourLocation", default)]
    location: String,
    #[serde(rename = "TimeStart")]
    time_start: String,
    #[serde(rename = "TimeEnd")]
    time_end: String,
    #[serde(rename = "Op_Monday")]
    op_monday: String,
    #[serde(rename = "Op_Tuesday")]
    op_tuesday: String,
    #[serde(rename = "Op_Wednesday")]
    op_wednesday: String,
    #[serde(rename = "Op_Thursday")]
    op_thursday: String,
    #[serde(rename = "Op_Friday")]
    op_friday: String,
    #[serde(rename = "Op_Saturday")]
    op_saturday: String,
    #[serde(rename = "Op_Sunday")]
    op_sunday: String,
}

#[derive(Debug, Deserialize)]
struct GuideRow {
    #[serde(alias = "GuideID")]
    id: i64,
    #[serde(rename = "GuideName", default)]
    name: String,
    #[serde(rename = "GuideLocation", default)]
    location: String,
}

#[derive(Debug, Deserialize)]
struct AvailabilityRow {
    #[serde(rename = "GuideID")]
    guide_id: i64,
    #[serde(rename = "AvailabilityDate")]
    date: String,
    #[serde(rename = "GuideAvailability", default)]
    raw_slots: Option<String>,
}

#[derive(Debug, Deserialize)]
struct SkillRow {
    #[serde(rename = "GuideID")]
    guide_id: i64,
    #[serde(rename = "TourID")]
    tour_id: i64,
}

/// Deserialize every record of a headered CSV stream.
fn read_rows<T: DeserializeOwned, R: Read>(reader: R, table: &str) -> Result<Vec<T>> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    csv_reader
        .deserialize()
        .enumerate()
        .map(|(row, record)| {
            record.with_context(|| format!("Failed to read {} row {}", table, row + 1))
        })
        .collect()
}

pub fn parse_bookings<R: Read>(reader: R) -> Result<Vec<Booking>> {
    read_rows::<BookingRow, _>(reader, "bookings")?
        .into_iter()
        .enumerate()
        .map(|(row, raw)| {
            let booking_date = parse_date(&raw.booking_date)
                .with_context(|| format!("Invalid BookingDate at bookings row {}", row + 1))?;
            Ok(Booking {
                id: BookingId(raw.id.unwrap_or(row as i64 + 1)),
                tour_id: TourId(raw.tour_id),
                booking_date,
                guide_id: GuideId(raw.guide_id),
            })
        })
        .collect()
}

pub fn parse_tours<R: Read>(reader: R) -> Result<Vec<Tour>> {
    read_rows::<TourRow, _>(reader, "tours")?
        .into_iter()
        .enumerate()
        .map(|(row, raw)| {
            let context = || format!("Invalid tour row {} (id {})", row + 1, raw.id);
            let flags = [
                &raw.op_monday,
                &raw.op_tuesday,
                &raw.op_wednesday,
                &raw.op_thursday,
                &raw.op_friday,
                &raw.op_saturday,
                &raw.op_sunday,
            ];
            let mut operative = [false; 7];
            for (slot, value) in operative.iter_mut().zip(flags) {
                *slot = parse_flag(value).with_context(context)?;
            }

            Ok(Tour {
                id: TourId(raw.id),
                name: standardize_text(&raw.name),
                location: standardize_text(&raw.location),
                time_start: parse_time(&raw.time_start).with_context(context)?,
                time_end: parse_time(&raw.time_end).with_context(context)?,
                operative_flags: OperativeFlags::new(operative),
            })
        })
        .collect()
}

pub fn parse_guides<R: Read>(reader: R) -> Result<Vec<Guide>> {
    Ok(read_rows::<GuideRow, _>(reader, "guides")?
        .into_iter()
        .map(|raw| Guide {
            id: GuideId(raw.id),
            name: standardize_text(&raw.name),
            location: standardize_text(&raw.location),
        })
        .collect())
}

pub fn parse_availability<R: Read>(reader: R) -> Result<Vec<GuideAvailability>> {
    read_rows::<AvailabilityRow, _>(reader, "availability")?
        .into_iter()
        .enumerate()
        .map(|(row, raw)| {
            let date = parse_date(&raw.date).with_context(|| {
                format!("Invalid AvailabilityDate at availability row {}", row + 1)
            })?;
            Ok(GuideAvailability {
                guide_id: GuideId(raw.guide_id),
                date,
                raw_slots: raw.raw_slots.unwrap_or_default(),
            })
        })
        .collect()
}

pub fn parse_skills<R: Read>(reader: R) -> Result<Vec<GuideSkill>> {
    Ok(read_rows::<SkillRow, _>(reader, "skills")?
        .into_iter()
        .map(|raw| GuideSkill {
            guide_id: GuideId(raw.guide_id),
            tour_id: TourId(raw.tour_id),
        })
        .collect())
}

/// Strip surrounding quotes and spaces, then title-case each word.
///
/// ```
/// use tour_insights::parsing::csv_parser::standardize_text;
///
/// assert_eq!(standardize_text("  'old TOWN walk' "), "Old Town Walk");
/// assert_eq!(standardize_text("\"09:30\""), "09:30");
/// ```
pub fn standardize_text(value: &str) -> String {
    let stripped = value.trim_matches(|c: char| c == '\'' || c == '"' || c == ' ');

    let mut out = String::with_capacity(stripped.len());
    let mut previous_is_letter = false;
    for ch in stripped.chars() {
        if ch.is_alphabetic() {
            if previous_is_letter {
                out.extend(ch.to_lowercase());
            } else {
                out.extend(ch.to_uppercase());
            }
            previous_is_letter = true;
        } else {
            out.push(ch);
            previous_is_letter = false;
        }
    }
    out
}

/// `YYYY-MM-DD`, optionally followed by a time part.
fn parse_date(value: &str) -> Result<NaiveDate> {
    let stripped = value.trim_matches(|c: char| c == '\'' || c == '"' || c == ' ');
    let date_part = stripped
        .split(|c: char| c == ' ' || c == 'T')
        .next()
        .unwrap_or_default();
    NaiveDate::parse_from_str(date_part, "%Y-%m-%d")
        .with_context(|| format!("Expected YYYY-MM-DD, found {:?}", value))
}

/// `HH:MM` or `HH:MM:SS`.
fn parse_time(value: &str) -> Result<NaiveTime> {
    let stripped = standardize_text(value);
    NaiveTime::parse_from_str(&stripped, "%H:%M:%S")
        .or_else(|_| NaiveTime::parse_from_str(&stripped, "%H:%M"))
        .with_context(|| format!("Expected HH:MM, found {:?}", value))
}

fn parse_flag(value: &str) -> Result<bool> {
    match value.trim().to_lowercase().as_str() {
        "1" | "1.0" | "true" | "t" | "yes" | "y" => Ok(true),
        "0" | "0.0" | "false" | "f" | "no" | "n" => Ok(false),
        other => Err(anyhow!("Expected an operative flag, found {:?}", other)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_flag_variants() {
        assert!(parse_flag("1").unwrap());
        assert!(parse_flag("True").unwrap());
        assert!(!parse_flag("0.0").unwrap());
        assert!(!parse_flag("FALSE").unwrap());
        assert!(parse_flag("maybe").is_err());
        assert!(parse_flag("").is_err());
    }

    #[test]
    fn test_parse_date_with_time_part() {
        let expected = NaiveDate::from_ymd_opt(2025, 3, 10).unwrap();
        assert_eq!(parse_date("2025-03-10").unwrap(), expected);
        assert_eq!(parse_date("2025-03-10 00:00:00").unwrap(), expected);
        assert_eq!(parse_date("2025-03-10T08:00:00").unwrap(), expected);
        assert!(parse_date("10/03/2025").is_err());
    }

    #[test]
    fn test_parse_time_formats() {
        let expected = NaiveTime::from_hms_opt(9, 30, 0).unwrap();
        assert_eq!(parse_time("09:30").unwrap(), expected);
        assert_eq!(parse_time("'09:30:00'").unwrap(), expected);
        assert!(parse_time("half past nine").is_err());
    }

    #[test]
    fn test_standardize_text_title_case() {
        assert_eq!(standardize_text("MARÍA lópez"), "María López");
        assert_eq!(standardize_text("o'neil-smith"), "O'Neil-Smith");
        assert_eq!(standardize_text(""), "");
    }
}

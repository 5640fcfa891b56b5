//! Last-contact date handling.
//!
//! Sheet cells carry dates typed by hand, so parsing accepts, in order:
//! `DD/MM/YYYY HH:mm`, the legacy `DDMM/YYYY HH:mm` (day and month glued
//! together), bare `DD/MM/YYYY` at midnight, and finally a handful of
//! generic ISO/RFC/US shapes. Everything is treated as wall-clock time.

use chrono::{DateTime, Local, NaiveDate, NaiveDateTime};
use once_cell::sync::Lazy;
use regex::{Captures, Regex};

pub const CANONICAL_FORMAT: &str = "%d/%m/%Y %H:%M";

static CANONICAL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(\d{2})/(\d{2})/(\d{4}) (\d{2}):(\d{2})$").expect("canonical date pattern")
});
static LEGACY: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(\d{2})(\d{2})/(\d{4}) (\d{2}):(\d{2})$").expect("legacy date pattern")
});
static DATE_ONLY: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\d{2})/(\d{2})/(\d{4})$").expect("date-only pattern"));

const GENERIC_DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y/%m/%d %H:%M:%S",
    "%Y/%m/%d %H:%M",
    "%m/%d/%Y %H:%M:%S",
    "%m/%d/%Y %H:%M",
];
const GENERIC_DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y"];

/// Which rule recognised a value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateShape {
    Canonical,
    Legacy,
    DateOnly,
    Generic,
}

pub fn parse_contact_date(value: &str) -> Option<NaiveDateTime> {
    parse_with_shape(value).map(|(parsed, _)| parsed)
}

/// A value matching one of the fixed patterns but naming an impossible
/// date (31/02, 25:00) is rejected outright instead of falling through.
pub fn parse_with_shape(value: &str) -> Option<(NaiveDateTime, DateShape)> {
    if value.is_empty() {
        return None;
    }

    if let Some(caps) = CANONICAL.captures(value) {
        return from_captures(&caps, true).map(|dt| (dt, DateShape::Canonical));
    }
    if let Some(caps) = LEGACY.captures(value) {
        return from_captures(&caps, true).map(|dt| (dt, DateShape::Legacy));
    }
    if let Some(caps) = DATE_ONLY.captures(value) {
        return from_captures(&caps, false).map(|dt| (dt, DateShape::DateOnly));
    }

    parse_generic(value.trim()).map(|dt| (dt, DateShape::Generic))
}

/// Milliseconds used for recency ordering; unparseable or empty is 0.
pub fn contact_timestamp(value: &str) -> i64 {
    parse_contact_date(value)
        .map(|dt| dt.and_utc().timestamp_millis())
        .unwrap_or(0)
}

pub fn format_canonical(value: &NaiveDateTime) -> String {
    value.format(CANONICAL_FORMAT).to_string()
}

/// The string an edit form should show for a last-contact cell, or `None`
/// when the value cannot be interpreted and must be left as typed.
pub fn canonical_editable(value: &str) -> Option<String> {
    match parse_with_shape(value)? {
        (_, DateShape::Canonical) => Some(value.to_string()),
        (parsed, _) => Some(format_canonical(&parsed)),
    }
}

fn from_captures(caps: &Captures<'_>, with_time: bool) -> Option<NaiveDateTime> {
    let number = |idx: usize| caps.get(idx).and_then(|m| m.as_str().parse::<u32>().ok());
    let day = number(1)?;
    let month = number(2)?;
    let year = caps.get(3)?.as_str().parse::<i32>().ok()?;
    let (hour, minute) = if with_time {
        (number(4)?, number(5)?)
    } else {
        (0, 0)
    };

    NaiveDate::from_ymd_opt(year, month, day)?.and_hms_opt(hour, minute, 0)
}

fn parse_generic(value: &str) -> Option<NaiveDateTime> {
    if value.is_empty() {
        return None;
    }
    if let Ok(parsed) = DateTime::parse_from_rfc3339(value) {
        return Some(parsed.with_timezone(&Local).naive_local());
    }
    if let Ok(parsed) = DateTime::parse_from_rfc2822(value) {
        return Some(parsed.with_timezone(&Local).naive_local());
    }
    for format in GENERIC_DATETIME_FORMATS {
        if let Ok(parsed) = NaiveDateTime::parse_from_str(value, format) {
            return Some(parsed);
        }
    }
    for format in GENERIC_DATE_FORMATS {
        if let Ok(parsed) = NaiveDate::parse_from_str(value, format) {
            return parsed.and_hms_opt(0, 0, 0);
        }
    }
    None
}

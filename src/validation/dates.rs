//! Date-range primitives.
//!
//! Strict `YYYY-MM-DD` parsing, range normalization and the inclusive
//! overlap predicate every other validator builds on.

use chrono::NaiveDate;

use crate::error::{AbsenceError, AbsenceResult};

/// The only accepted textual date format.
pub const ISO_DATE_FORMAT: &str = "%Y-%m-%d";

/// Parses a `YYYY-MM-DD` date.
///
/// Surrounding whitespace is ignored. Anything that is not exactly four
/// year digits, two month digits and two day digits forming a real calendar
/// date yields `None`.
///
/// # Example
///
/// ```
/// use absence_engine::validation::parse_iso_date;
/// use chrono::NaiveDate;
///
/// assert_eq!(parse_iso_date("2025-01-10"), NaiveDate::from_ymd_opt(2025, 1, 10));
/// assert_eq!(parse_iso_date("2025-1-10"), None);
/// assert_eq!(parse_iso_date("2025-02-30"), None);
/// ```
pub fn parse_iso_date(value: &str) -> Option<NaiveDate> {
    let value = value.trim();
    let bytes = value.as_bytes();
    if bytes.len() != 10 {
        return None;
    }
    let shape_ok = bytes.iter().enumerate().all(|(i, b)| match i {
        4 | 7 => *b == b'-',
        _ => b.is_ascii_digit(),
    });
    if !shape_ok {
        return None;
    }
    NaiveDate::parse_from_str(value, ISO_DATE_FORMAT).ok()
}

/// Parses a required `YYYY-MM-DD` field, naming the field on failure.
pub fn require_iso_date(field: &str, value: &str) -> AbsenceResult<NaiveDate> {
    if value.trim().is_empty() {
        return Err(AbsenceError::validation(field, "is required"));
    }
    parse_iso_date(value).ok_or_else(|| {
        AbsenceError::validation(
            field,
            format!("must be a valid date in YYYY-MM-DD format, got '{}'", value),
        )
    })
}

/// Orders a pair of dates so the earlier comes first.
pub fn normalize_range(start: NaiveDate, end: NaiveDate) -> (NaiveDate, NaiveDate) {
    if start > end { (end, start) } else { (start, end) }
}

/// Closed-interval intersection test.
///
/// Both ranges are normalized first. A single shared day is an overlap.
///
/// # Example
///
/// ```
/// use absence_engine::validation::ranges_overlap;
/// use chrono::NaiveDate;
///
/// let d = |m, day| NaiveDate::from_ymd_opt(2025, m, day).unwrap();
/// assert!(ranges_overlap((d(1, 1), d(1, 10)), (d(1, 10), d(1, 20))));
/// assert!(!ranges_overlap((d(1, 1), d(1, 10)), (d(1, 11), d(1, 20))));
/// ```
pub fn ranges_overlap(a: (NaiveDate, NaiveDate), b: (NaiveDate, NaiveDate)) -> bool {
    let (a_start, a_end) = normalize_range(a.0, a.1);
    let (b_start, b_end) = normalize_range(b.0, b.1);
    a_start <= b_end && a_end >= b_start
}

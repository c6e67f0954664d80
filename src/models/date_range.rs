//! Date range models used by the overlap validator.
//!
//! This module contains [`AbsenceRange`], the normalized inclusive range the
//! validator compares, and the [`Conflict`] and [`OverlapResult`] types it
//! reports.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// An inclusive calendar date range belonging to one absence.
///
/// Construction through [`AbsenceRange::new`] swaps reversed bounds, so
/// `start_date <= end_date` always holds.
///
/// # Example
///
/// ```
/// use absence_engine::models::AbsenceRange;
/// use chrono::NaiveDate;
///
/// let range = AbsenceRange::new(
///     "abs_001",
///     NaiveDate::from_ymd_opt(2025, 2, 1).unwrap(),
///     NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
/// );
/// assert_eq!(range.start_date, NaiveDate::from_ymd_opt(2025, 1, 1).unwrap());
/// assert_eq!(range.end_date, NaiveDate::from_ymd_opt(2025, 2, 1).unwrap());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AbsenceRange {
    /// Identifier of the absence this range came from.
    pub id: String,
    /// First day (inclusive).
    pub start_date: NaiveDate,
    /// Last day (inclusive).
    pub end_date: NaiveDate,
}

impl AbsenceRange {
    /// Creates a range, swapping the bounds if they are reversed.
    pub fn new(id: impl Into<String>, start_date: NaiveDate, end_date: NaiveDate) -> Self {
        let (start_date, end_date) = if start_date > end_date {
            (end_date, start_date)
        } else {
            (start_date, end_date)
        };
        Self {
            id: id.into(),
            start_date,
            end_date,
        }
    }
}

/// An existing absence that clashes with a proposed one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Conflict {
    /// Identifier of the existing absence.
    pub id: String,
    /// Its first day.
    pub start_date: NaiveDate,
    /// Its effective last day.
    pub end_date: NaiveDate,
}

/// Fields are public, so a range built without [`AbsenceRange::new`] may be
/// reversed. The conflict always reports `start_date <= end_date`.
impl From<&AbsenceRange> for Conflict {
    fn from(range: &AbsenceRange) -> Self {
        Conflict {
            id: range.id.clone(),
            start_date: range.start_date.min(range.end_date),
            end_date: range.start_date.max(range.end_date),
        }
    }
}

/// The outcome of an overlap check.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OverlapResult {
    /// `true` iff `conflicts` is non-empty.
    pub has_overlap: bool,
    /// Every existing range that overlaps, in input order.
    pub conflicts: Vec<Conflict>,
}

impl OverlapResult {
    /// A result with no conflicts.
    pub fn clear() -> Self {
        Self::default()
    }

    /// Builds a result from a list of conflicts.
    pub fn from_conflicts(conflicts: Vec<Conflict>) -> Self {
        Self {
            has_overlap: !conflicts.is_empty(),
            conflicts,
        }
    }
}

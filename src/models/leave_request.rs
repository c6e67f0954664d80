//! Leave-creation request models.
//!
//! These are the single, typed request shapes the engine accepts. Dates are
//! kept as the raw strings the caller sent so that format problems can be
//! reported against the right field; field-name aliases are resolved before
//! a request reaches this shape.

use std::fmt;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::AbsenceType;

/// A request to record a single-range absence.
///
/// Used for every type except parental bereavement leave, which has its own
/// multi-block shape in [`BereavementLeaveRequest`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaveRequest {
    /// The company the employee belongs to.
    pub company_id: String,
    /// The absent employee.
    pub employee_id: String,
    /// The kind of absence.
    pub absence_type: AbsenceType,
    /// First day, `YYYY-MM-DD`.
    pub start_date: String,
    /// Last day, `YYYY-MM-DD`.
    pub end_date: String,
    /// Days booked; required for annual leave.
    #[serde(default)]
    pub total_days: Option<Decimal>,
    /// Free-text notes.
    #[serde(default)]
    pub reference_notes: Option<String>,
}

/// How a parent has chosen to take parental bereavement leave.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BereavementLeaveOption {
    /// A single week.
    OneWeek,
    /// Two consecutive weeks.
    TwoWeeksTogether,
    /// Two separate weeks.
    TwoWeeksSeparate,
}

impl BereavementLeaveOption {
    /// Number of blocks the option must be booked as.
    pub fn required_blocks(&self) -> usize {
        match self {
            BereavementLeaveOption::TwoWeeksSeparate => 2,
            BereavementLeaveOption::OneWeek | BereavementLeaveOption::TwoWeeksTogether => 1,
        }
    }
}

impl fmt::Display for BereavementLeaveOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BereavementLeaveOption::OneWeek => write!(f, "one_week"),
            BereavementLeaveOption::TwoWeeksTogether => write!(f, "two_weeks_together"),
            BereavementLeaveOption::TwoWeeksSeparate => write!(f, "two_weeks_separate"),
        }
    }
}

/// One continuous block of bereavement leave, as requested.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaveBlock {
    /// First day, `YYYY-MM-DD`.
    pub start_date: String,
    /// Last day, `YYYY-MM-DD`.
    pub end_date: String,
}

/// A request to record parental bereavement leave.
///
/// # Example
///
/// ```
/// use absence_engine::models::{BereavementLeaveOption, BereavementLeaveRequest, LeaveBlock};
///
/// let request = BereavementLeaveRequest {
///     company_id: "co_001".to_string(),
///     employee_id: "emp_001".to_string(),
///     event_date: "2025-01-06".to_string(),
///     leave_option: BereavementLeaveOption::OneWeek,
///     blocks: vec![LeaveBlock {
///         start_date: "2025-01-13".to_string(),
///         end_date: "2025-01-19".to_string(),
///     }],
///     reference_notes: None,
/// };
/// assert_eq!(request.leave_option.required_blocks(), 1);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BereavementLeaveRequest {
    /// The company the employee belongs to.
    pub company_id: String,
    /// The bereaved employee.
    pub employee_id: String,
    /// Date of the bereavement, `YYYY-MM-DD`.
    pub event_date: String,
    /// How the leave is being taken.
    pub leave_option: BereavementLeaveOption,
    /// The requested blocks.
    pub blocks: Vec<LeaveBlock>,
    /// Free-text notes.
    #[serde(default)]
    pub reference_notes: Option<String>,
}

/// A [`LeaveRequest`] that has passed its leave-type rules.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedLeave {
    /// The company the employee belongs to.
    pub company_id: String,
    /// The absent employee.
    pub employee_id: String,
    /// The kind of absence.
    pub absence_type: AbsenceType,
    /// First day.
    pub start_date: NaiveDate,
    /// Last day.
    pub end_date: NaiveDate,
    /// Days booked.
    pub total_days: Option<Decimal>,
    /// Free-text notes.
    pub reference_notes: String,
}

/// A [`BereavementLeaveRequest`] that has passed its window rules.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedBereavementLeave {
    /// The company the employee belongs to.
    pub company_id: String,
    /// The bereaved employee.
    pub employee_id: String,
    /// Date of the bereavement.
    pub event_date: NaiveDate,
    /// How the leave is being taken.
    pub leave_option: BereavementLeaveOption,
    /// Parsed `(start, end)` blocks in request order.
    pub blocks: Vec<(NaiveDate, NaiveDate)>,
    /// Free-text notes.
    pub reference_notes: String,
}

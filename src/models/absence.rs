//! Absence record models.
//!
//! This module contains the persisted [`AbsenceRecord`] shape together with
//! its [`AbsenceType`] and [`AbsenceStatus`] enumerations. Records are owned by
//! the record store; the engine only reads them and creates new ones.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// The kind of absence an employee is taking.
///
/// # Example
///
/// ```
/// use absence_engine::models::AbsenceType;
///
/// let absence_type: AbsenceType = "parental_bereavement".parse().unwrap();
/// assert_eq!(absence_type, AbsenceType::ParentalBereavement);
/// assert_eq!(absence_type.to_string(), "parental_bereavement");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AbsenceType {
    /// Sickness absence (the basis for SSP).
    Sickness,
    /// Paid annual leave.
    AnnualLeave,
    /// Statutory maternity leave.
    Maternity,
    /// Statutory adoption leave.
    AdoptionLeave,
    /// Statutory paternity leave.
    PaternityLeave,
    /// Shared parental leave.
    SharedParentalLeave,
    /// Statutory parental bereavement leave.
    ParentalBereavement,
    /// Paternity leave taken by a bereaved partner.
    BereavedPartnersPaternity,
    /// Unpaid leave.
    UnpaidLeave,
}

impl AbsenceType {
    /// All absence types, in declaration order.
    pub const ALL: [AbsenceType; 9] = [
        AbsenceType::Sickness,
        AbsenceType::AnnualLeave,
        AbsenceType::Maternity,
        AbsenceType::AdoptionLeave,
        AbsenceType::PaternityLeave,
        AbsenceType::SharedParentalLeave,
        AbsenceType::ParentalBereavement,
        AbsenceType::BereavedPartnersPaternity,
        AbsenceType::UnpaidLeave,
    ];

    /// The wire name of this type.
    pub fn as_str(&self) -> &'static str {
        match self {
            AbsenceType::Sickness => "sickness",
            AbsenceType::AnnualLeave => "annual_leave",
            AbsenceType::Maternity => "maternity",
            AbsenceType::AdoptionLeave => "adoption_leave",
            AbsenceType::PaternityLeave => "paternity_leave",
            AbsenceType::SharedParentalLeave => "shared_parental_leave",
            AbsenceType::ParentalBereavement => "parental_bereavement",
            AbsenceType::BereavedPartnersPaternity => "bereaved_partners_paternity",
            AbsenceType::UnpaidLeave => "unpaid_leave",
        }
    }

    /// Whether a request for this type must carry a positive `total_days`.
    pub fn requires_total_days(&self) -> bool {
        matches!(self, AbsenceType::AnnualLeave)
    }
}

impl fmt::Display for AbsenceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AbsenceType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        AbsenceType::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| format!("Invalid absence type: {}", s))
    }
}

/// Lifecycle state of an absence record.
///
/// Transitions are owned by the surrounding application; the engine only
/// cares whether a record is cancelled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AbsenceStatus {
    /// Newly recorded, not yet submitted.
    Draft,
    /// Submitted for approval.
    Submitted,
    /// Approved by a manager.
    Approved,
    /// The employee is currently absent.
    Active,
    /// The absence has ended.
    Completed,
    /// Withdrawn; ignored for overlap and SSP purposes.
    Cancelled,
}

impl AbsenceStatus {
    /// Returns `true` if the record still counts as an absence.
    pub fn is_live(&self) -> bool {
        !matches!(self, AbsenceStatus::Cancelled)
    }
}

/// A persisted absence record.
///
/// # Example
///
/// ```
/// use absence_engine::models::{AbsenceRecord, AbsenceStatus, AbsenceType};
/// use chrono::NaiveDate;
///
/// let record = AbsenceRecord {
///     id: "abs_001".to_string(),
///     employee_id: "emp_001".to_string(),
///     company_id: "co_001".to_string(),
///     absence_type: AbsenceType::Sickness,
///     status: AbsenceStatus::Active,
///     first_day: NaiveDate::from_ymd_opt(2025, 3, 1).unwrap(),
///     last_day_expected: NaiveDate::from_ymd_opt(2025, 3, 10),
///     last_day_actual: None,
///     total_days: None,
///     reference_notes: String::new(),
/// };
///
/// assert_eq!(record.effective_end_date(), NaiveDate::from_ymd_opt(2025, 3, 10).unwrap());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AbsenceRecord {
    /// Store-assigned identifier.
    pub id: String,
    /// The absent employee.
    pub employee_id: String,
    /// The employing company.
    pub company_id: String,
    /// The kind of absence.
    #[serde(rename = "type")]
    pub absence_type: AbsenceType,
    /// Lifecycle state.
    pub status: AbsenceStatus,
    /// First day of absence (inclusive).
    pub first_day: NaiveDate,
    /// Planned last day, if known.
    #[serde(default)]
    pub last_day_expected: Option<NaiveDate>,
    /// Actual last day, once the employee has returned.
    #[serde(default)]
    pub last_day_actual: Option<NaiveDate>,
    /// Number of days booked, for types that track it.
    #[serde(default)]
    pub total_days: Option<Decimal>,
    /// Free-text notes.
    #[serde(default)]
    pub reference_notes: String,
}

impl AbsenceRecord {
    /// The last day of the absence for overlap purposes.
    ///
    /// The actual last day wins over the expected one; a record with neither
    /// is a single-day absence.
    pub fn effective_end_date(&self) -> NaiveDate {
        self.last_day_actual
            .or(self.last_day_expected)
            .unwrap_or(self.first_day)
    }
}

/// An absence record that has not been persisted yet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewAbsence {
    /// The absent employee.
    pub employee_id: String,
    /// The employing company.
    pub company_id: String,
    /// The kind of absence.
    pub absence_type: AbsenceType,
    /// Initial lifecycle state.
    pub status: AbsenceStatus,
    /// First day of absence (inclusive).
    pub first_day: NaiveDate,
    /// Planned last day.
    pub last_day_expected: Option<NaiveDate>,
    /// Number of days booked, for types that track it.
    pub total_days: Option<Decimal>,
    /// Free-text notes.
    pub reference_notes: String,
}

impl NewAbsence {
    /// Attaches a store-assigned id, producing the persisted record.
    pub fn into_record(self, id: String) -> AbsenceRecord {
        AbsenceRecord {
            id,
            employee_id: self.employee_id,
            company_id: self.company_id,
            absence_type: self.absence_type,
            status: self.status,
            first_day: self.first_day,
            last_day_expected: self.last_day_expected,
            last_day_actual: None,
            total_days: self.total_days,
            reference_notes: self.reference_notes,
        }
    }
}

//! Statutory Sick Pay result models.
//!
//! This module contains the [`QualifyingDaysPerWeek`] work-pattern setting
//! and the per-employee and per-company SSP outputs.

use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{AbsenceError, AbsenceResult};

use super::PayPeriod;

/// How many days per week are SSP qualifying days.
///
/// Qualifying days are taken from the start of the week: a setting of 5
/// means Monday to Friday, 7 means every day.
///
/// # Example
///
/// ```
/// use absence_engine::models::QualifyingDaysPerWeek;
/// use chrono::NaiveDate;
///
/// let pattern = QualifyingDaysPerWeek::new(5).unwrap();
/// // 2025-04-05 is a Saturday
/// assert!(!pattern.is_qualifying_day(NaiveDate::from_ymd_opt(2025, 4, 5).unwrap()));
/// assert!(QualifyingDaysPerWeek::new(8).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct QualifyingDaysPerWeek(u8);

impl QualifyingDaysPerWeek {
    /// Creates the setting, accepting 1 to 7.
    pub fn new(days: u8) -> AbsenceResult<Self> {
        if (1..=7).contains(&days) {
            Ok(Self(days))
        } else {
            Err(AbsenceError::validation(
                "qualifying_days_per_week",
                format!("must be between 1 and 7, got {}", days),
            ))
        }
    }

    /// The number of qualifying days per week.
    pub fn get(&self) -> u8 {
        self.0
    }

    /// Returns `true` if `date` is a qualifying day under this pattern.
    pub fn is_qualifying_day(&self, date: NaiveDate) -> bool {
        date.weekday().num_days_from_monday() < u32::from(self.0)
    }
}

impl TryFrom<u8> for QualifyingDaysPerWeek {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        QualifyingDaysPerWeek::new(value).map_err(|e| e.to_string())
    }
}

impl From<QualifyingDaysPerWeek> for u8 {
    fn from(value: QualifyingDaysPerWeek) -> Self {
        value.0
    }
}

/// Qualifying and payable day counts for one employee in one window.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SspDayCount {
    /// Qualifying days inside a period of incapacity within the window.
    pub qualifying_days: u32,
    /// Of those, the days spent serving waiting days.
    pub waiting_days: u32,
    /// Qualifying days for which SSP is due.
    pub payable_days: u32,
}

/// SSP outcome for one employee.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SspEmployeeResult {
    /// The employee.
    pub employee_id: String,
    /// Total qualifying days in the window.
    pub total_qualifying_days: u32,
    /// Waiting days served in the window.
    pub waiting_days: u32,
    /// Total payable days in the window.
    pub total_payable_days: u32,
    /// `total_payable_days * daily_rate`, rounded to 2 decimal places.
    pub amount: Decimal,
}

/// A request to preview SSP for one company over a pay run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SspPreviewRequest {
    /// The company to preview.
    pub company_id: String,
    /// The pay run window.
    pub period: PayPeriod,
    /// Daily rate to use instead of the configured weekly rate.
    pub daily_rate: Option<Decimal>,
    /// Work pattern; the configured default applies when absent.
    pub qualifying_days_per_week: Option<QualifyingDaysPerWeek>,
}

/// SSP outcome for every employee of a company in a pay run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SspPreview {
    /// The company previewed.
    pub company_id: String,
    /// The pay run window.
    pub period: PayPeriod,
    /// The work pattern used.
    pub qualifying_days_per_week: QualifyingDaysPerWeek,
    /// The daily rate used.
    pub daily_rate: Decimal,
    /// One entry per employee with sickness in or linked to the window,
    /// ordered by employee id.
    pub employees: Vec<SspEmployeeResult>,
    /// Sum of every employee's amount.
    pub total_amount: Decimal,
}

//! Pay run window model.
//!
//! This module contains the [`PayPeriod`] type that bounds an SSP
//! computation.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{AbsenceError, AbsenceResult};

/// The date window of a pay run.
///
/// # Example
///
/// ```
/// use absence_engine::models::PayPeriod;
/// use chrono::NaiveDate;
///
/// let period = PayPeriod::new(
///     NaiveDate::from_ymd_opt(2025, 4, 1).unwrap(),
///     NaiveDate::from_ymd_opt(2025, 4, 30).unwrap(),
/// )
/// .unwrap();
///
/// assert!(period.contains_date(NaiveDate::from_ymd_opt(2025, 4, 15).unwrap()));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayPeriod {
    /// The start date of the pay period (inclusive).
    pub start_date: NaiveDate,
    /// The end date of the pay period (inclusive).
    pub end_date: NaiveDate,
}

impl PayPeriod {
    /// Creates a pay period, rejecting one that ends before it starts.
    ///
    /// Unlike absence ranges, a reversed pay period is treated as a caller
    /// mistake rather than silently swapped.
    pub fn new(start_date: NaiveDate, end_date: NaiveDate) -> AbsenceResult<Self> {
        if end_date < start_date {
            return Err(AbsenceError::validation(
                "end",
                format!("pay period end {} is before start {}", end_date, start_date),
            ));
        }
        Ok(Self {
            start_date,
            end_date,
        })
    }

    /// Checks if a given date falls within this pay period (inclusive).
    pub fn contains_date(&self, date: NaiveDate) -> bool {
        date >= self.start_date && date <= self.end_date
    }
}

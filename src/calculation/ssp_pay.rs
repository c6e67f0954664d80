//! SSP daily rate and amount calculation.
//!
//! This module turns per-employee day counts into money: the daily rate is
//! the weekly flat rate spread over the qualifying days of a week, and the
//! amount is payable days times the daily rate, rounded to pence.

use std::collections::BTreeMap;

use rust_decimal::{Decimal, RoundingStrategy};

use crate::config::SspPolicy;
use crate::models::{
    AbsenceRange, AbsenceRecord, AbsenceType, PayPeriod, QualifyingDaysPerWeek, SspEmployeeResult,
};
use crate::validation::record_to_range;

use super::count_ssp_days;

/// Derives the SSP daily rate from the weekly flat rate.
///
/// The rate is not rounded; only the final amount is.
///
/// # Example
///
/// ```
/// use absence_engine::calculation::ssp_daily_rate;
/// use absence_engine::models::QualifyingDaysPerWeek;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let weekly = Decimal::from_str("118.75").unwrap();
/// let daily = ssp_daily_rate(weekly, QualifyingDaysPerWeek::new(5).unwrap());
/// assert_eq!(daily, Decimal::from_str("23.75").unwrap());
/// ```
pub fn ssp_daily_rate(weekly_rate: Decimal, pattern: QualifyingDaysPerWeek) -> Decimal {
    weekly_rate / Decimal::from(pattern.get())
}

/// Calculates the SSP amount for a number of payable days.
///
/// Rounded to 2 decimal places, halves away from zero.
///
/// # Example
///
/// ```
/// use absence_engine::calculation::ssp_amount;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let amount = ssp_amount(4, Decimal::from_str("21.35").unwrap());
/// assert_eq!(amount.to_string(), "85.40");
/// ```
pub fn ssp_amount(payable_days: u32, daily_rate: Decimal) -> Decimal {
    (Decimal::from(payable_days) * daily_rate)
        .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Calculates SSP for every employee with sickness records.
///
/// Records that are cancelled or are not sickness absences are ignored, so
/// callers may pass a company's whole absence history. Results are ordered by
/// employee id; the same input always yields the same output.
pub fn calculate_ssp(
    records: &[AbsenceRecord],
    period: &PayPeriod,
    pattern: QualifyingDaysPerWeek,
    daily_rate: Decimal,
    policy: &SspPolicy,
) -> Vec<SspEmployeeResult> {
    let mut by_employee: BTreeMap<&str, Vec<AbsenceRange>> = BTreeMap::new();
    for record in records
        .iter()
        .filter(|r| r.absence_type == AbsenceType::Sickness && r.status.is_live())
    {
        by_employee
            .entry(record.employee_id.as_str())
            .or_default()
            .push(record_to_range(record));
    }

    by_employee
        .into_iter()
        .map(|(employee_id, sickness)| {
            let count = count_ssp_days(&sickness, period, pattern, policy);
            SspEmployeeResult {
                employee_id: employee_id.to_string(),
                total_qualifying_days: count.qualifying_days,
                waiting_days: count.waiting_days,
                total_payable_days: count.payable_days,
                amount: ssp_amount(count.payable_days, daily_rate),
            }
        })
        .collect()
}

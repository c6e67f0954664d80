//! Leave-type rules for single-range absences.
//!
//! Every simple leave type shares one contract: the ids must be present,
//! both dates must be `YYYY-MM-DD`, the range must not run backwards, and
//! any day count must be a positive number (and present, for types that
//! book days). Parental bereavement leave has its own rules in
//! [`bereavement`](super::validate_bereavement_request).

use rust_decimal::Decimal;

use crate::error::{AbsenceError, AbsenceResult};
use crate::models::{AbsenceType, LeaveRequest, ValidatedLeave};

use super::dates::require_iso_date;

/// Validates a single-range leave request before any record is loaded.
///
/// # Errors
///
/// Returns [`AbsenceError::Validation`] naming the first field at fault.
///
/// # Example
///
/// ```
/// use absence_engine::models::{AbsenceType, LeaveRequest};
/// use absence_engine::validation::validate_leave_request;
///
/// let request = LeaveRequest {
///     company_id: "co_001".to_string(),
///     employee_id: "emp_001".to_string(),
///     absence_type: AbsenceType::Sickness,
///     start_date: "2025-03-03".to_string(),
///     end_date: "2025-03-07".to_string(),
///     total_days: None,
///     reference_notes: None,
/// };
///
/// let leave = validate_leave_request(&request).unwrap();
/// assert_eq!(leave.start_date.to_string(), "2025-03-03");
/// ```
pub fn validate_leave_request(request: &LeaveRequest) -> AbsenceResult<ValidatedLeave> {
    require_id("company_id", &request.company_id)?;
    require_id("employee_id", &request.employee_id)?;

    if request.absence_type == AbsenceType::ParentalBereavement {
        return Err(AbsenceError::validation(
            "absence_type",
            "parental bereavement leave must be requested with an event date and leave blocks",
        ));
    }

    let start_date = require_iso_date("start_date", &request.start_date)?;
    let end_date = require_iso_date("end_date", &request.end_date)?;

    if end_date < start_date {
        return Err(AbsenceError::validation(
            "end_date",
            format!("{} is before start date {}", end_date, start_date),
        ));
    }

    let total_days = validate_total_days(request.absence_type, request.total_days)?;

    Ok(ValidatedLeave {
        company_id: request.company_id.trim().to_string(),
        employee_id: request.employee_id.trim().to_string(),
        absence_type: request.absence_type,
        start_date,
        end_date,
        total_days,
        reference_notes: request.reference_notes.clone().unwrap_or_default(),
    })
}

fn require_id(field: &str, value: &str) -> AbsenceResult<()> {
    if value.trim().is_empty() {
        return Err(AbsenceError::validation(field, "is required"));
    }
    Ok(())
}

fn validate_total_days(
    absence_type: AbsenceType,
    total_days: Option<Decimal>,
) -> AbsenceResult<Option<Decimal>> {
    match total_days {
        None if absence_type.requires_total_days() => Err(AbsenceError::validation(
            "total_days",
            format!("is required for {}", absence_type),
        )),
        Some(days) if days <= Decimal::ZERO => Err(AbsenceError::validation(
            "total_days",
            format!("must be a positive number, got {}", days),
        )),
        other => Ok(other),
    }
}

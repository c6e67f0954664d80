//! Request types for the Absence Engine API.
//!
//! Clients send either `snake_case` or `camelCase` field names; both are
//! accepted here and converted into the single typed request each core
//! operation takes. Identifier and date fields default to empty strings so a
//! missing field is reported by the core validators with the field name.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::AbsenceResult;
use crate::models::{
    AbsenceType, BereavementLeaveOption, BereavementLeaveRequest, LeaveBlock, LeaveRequest,
    PayPeriod, QualifyingDaysPerWeek, SspPreviewRequest,
};
use crate::validation::require_iso_date;

/// Request body for `POST /absences/check-overlap`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CheckOverlapBody {
    /// The employing company.
    #[serde(default, alias = "companyId")]
    pub company_id: String,
    /// The employee.
    #[serde(default, alias = "employeeId")]
    pub employee_id: String,
    /// Proposed first day, `YYYY-MM-DD`.
    #[serde(default, alias = "startDate", alias = "first_day", alias = "firstDay")]
    pub start_date: String,
    /// Proposed last day, `YYYY-MM-DD`.
    #[serde(
        default,
        alias = "endDate",
        alias = "last_day_expected",
        alias = "lastDayExpected"
    )]
    pub end_date: String,
    /// Id of the absence being edited, if any.
    #[serde(default, alias = "excludeId", alias = "absence_id", alias = "absenceId")]
    pub exclude_id: Option<String>,
}

/// Request body for `POST /absences`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateLeaveBody {
    /// The employing company.
    #[serde(default, alias = "companyId")]
    pub company_id: String,
    /// The employee.
    #[serde(default, alias = "employeeId")]
    pub employee_id: String,
    /// The kind of absence.
    #[serde(rename = "type", alias = "absence_type", alias = "absenceType")]
    pub absence_type: AbsenceType,
    /// First day, `YYYY-MM-DD`.
    #[serde(default, alias = "startDate", alias = "first_day", alias = "firstDay")]
    pub start_date: String,
    /// Last day, `YYYY-MM-DD`.
    #[serde(
        default,
        alias = "endDate",
        alias = "last_day_expected",
        alias = "lastDayExpected"
    )]
    pub end_date: String,
    /// Days booked; required for annual leave.
    #[serde(default, alias = "totalDays")]
    pub total_days: Option<Decimal>,
    /// Free-text notes.
    #[serde(default, alias = "referenceNotes", alias = "notes")]
    pub reference_notes: Option<String>,
}

impl From<CreateLeaveBody> for LeaveRequest {
    fn from(body: CreateLeaveBody) -> Self {
        LeaveRequest {
            company_id: body.company_id,
            employee_id: body.employee_id,
            absence_type: body.absence_type,
            start_date: body.start_date,
            end_date: body.end_date,
            total_days: body.total_days,
            reference_notes: body.reference_notes,
        }
    }
}

/// One block of bereavement leave in a request body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LeaveBlockBody {
    /// First day, `YYYY-MM-DD`.
    #[serde(default, alias = "startDate")]
    pub start_date: String,
    /// Last day, `YYYY-MM-DD`.
    #[serde(default, alias = "endDate")]
    pub end_date: String,
}

/// Request body for `POST /absences/parental-bereavement`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BereavementLeaveBody {
    /// The employing company.
    #[serde(default, alias = "companyId")]
    pub company_id: String,
    /// The bereaved employee.
    #[serde(default, alias = "employeeId")]
    pub employee_id: String,
    /// Date of the bereavement, `YYYY-MM-DD`.
    #[serde(default, alias = "eventDate", alias = "date_of_death", alias = "dateOfDeath")]
    pub event_date: String,
    /// How the leave is split.
    #[serde(alias = "leaveOption")]
    pub leave_option: BereavementLeaveOption,
    /// The leave blocks.
    #[serde(default)]
    pub blocks: Vec<LeaveBlockBody>,
    /// Free-text notes.
    #[serde(default, alias = "referenceNotes", alias = "notes")]
    pub reference_notes: Option<String>,
}

impl From<BereavementLeaveBody> for BereavementLeaveRequest {
    fn from(body: BereavementLeaveBody) -> Self {
        BereavementLeaveRequest {
            company_id: body.company_id,
            employee_id: body.employee_id,
            event_date: body.event_date,
            leave_option: body.leave_option,
            blocks: body
                .blocks
                .into_iter()
                .map(|b| LeaveBlock {
                    start_date: b.start_date,
                    end_date: b.end_date,
                })
                .collect(),
            reference_notes: body.reference_notes,
        }
    }
}

/// Request body for `POST /ssp/preview`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SspPreviewBody {
    /// The company to preview.
    #[serde(default, alias = "companyId")]
    pub company_id: String,
    /// First day of the pay run, `YYYY-MM-DD`.
    #[serde(default, alias = "start_date", alias = "startDate")]
    pub start: String,
    /// Last day of the pay run, `YYYY-MM-DD`.
    #[serde(default, alias = "end_date", alias = "endDate")]
    pub end: String,
    /// Daily rate override.
    #[serde(default, alias = "dailyRate")]
    pub daily_rate: Option<Decimal>,
    /// Qualifying days per week, 1 to 7.
    #[serde(default, alias = "qualifyingDaysPerWeek")]
    pub qualifying_days_per_week: Option<u8>,
}

impl SspPreviewBody {
    /// Parses dates and the work pattern into a typed request.
    pub fn into_request(self) -> AbsenceResult<SspPreviewRequest> {
        let start = require_iso_date("start", &self.start)?;
        let end = require_iso_date("end", &self.end)?;
        let qualifying_days_per_week = self
            .qualifying_days_per_week
            .map(QualifyingDaysPerWeek::new)
            .transpose()?;
        Ok(SspPreviewRequest {
            company_id: self.company_id,
            period: PayPeriod::new(start, end)?,
            daily_rate: self.daily_rate,
            qualifying_days_per_week,
        })
    }
}

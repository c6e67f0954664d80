//! Core data models for the Absence Engine.
//!
//! This module contains all the domain models used throughout the engine.

mod absence;
mod date_range;
mod leave_request;
mod pay_period;
mod ssp;

pub use absence::{AbsenceRecord, AbsenceStatus, AbsenceType, NewAbsence};
pub use date_range::{AbsenceRange, Conflict, OverlapResult};
pub use leave_request::{
    BereavementLeaveOption, BereavementLeaveRequest, LeaveBlock, LeaveRequest,
    ValidatedBereavementLeave, ValidatedLeave,
};
pub use pay_period::PayPeriod;
pub use ssp::{
    QualifyingDaysPerWeek, SspDayCount, SspEmployeeResult, SspPreview, SspPreviewRequest,
};

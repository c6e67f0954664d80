//! Error types for the Absence Engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for every failure that can occur while validating, recording or costing
//! absences. Overlap conflicts found by the validator are *results*, not
//! errors; they only become an [`AbsenceError::Overlap`] once a leave-creation
//! request has to be refused because of them.

use chrono::NaiveDate;
use thiserror::Error;

use crate::models::{BereavementLeaveOption, Conflict};

/// The main error type for the Absence Engine.
///
/// # Example
///
/// ```
/// use absence_engine::error::AbsenceError;
///
/// let error = AbsenceError::ConfigNotFound {
///     path: "/missing/policy.yaml".to_string(),
/// };
/// assert_eq!(error.to_string(), "Configuration file not found: /missing/policy.yaml");
/// ```
#[derive(Debug, Error)]
pub enum AbsenceError {
    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// No SSP weekly rate is effective on the given date.
    #[error("No SSP rate is effective on {date}")]
    RateNotFound {
        /// The date for which the rate was requested.
        date: NaiveDate,
    },

    /// A request field was missing or malformed.
    #[error("Invalid field '{field}': {message}")]
    Validation {
        /// The offending field.
        field: String,
        /// What was wrong with it.
        message: String,
    },

    /// A parental bereavement leave request broke one of the window rules.
    #[error(transparent)]
    Window(#[from] WindowViolation),

    /// The requested dates overlap existing absences for the employee.
    #[error("Absence dates overlap {} existing absence(s)", .conflicts.len())]
    Overlap {
        /// The existing absences that overlap. May be empty when the record
        /// store rejected the insert and the conflicts could not be reloaded.
        conflicts: Vec<Conflict>,
    },

    /// The employee does not exist in the given company.
    #[error("Employee '{employee_id}' not found in company '{company_id}'")]
    EmployeeNotFound {
        /// The company that was searched.
        company_id: String,
        /// The employee that was not found.
        employee_id: String,
    },

    /// The record store failed.
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl AbsenceError {
    /// Creates a validation error for `field`.
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// A violated parental bereavement leave rule.
///
/// Each rule has its own variant so callers can tell the user exactly which
/// correction to make.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WindowViolation {
    /// The employee or company id was blank.
    #[error("{field} is required")]
    MissingId {
        /// Either `employee_id` or `company_id`.
        field: &'static str,
    },

    /// The bereavement date was missing or not `YYYY-MM-DD`.
    #[error("event_date must be a valid date in YYYY-MM-DD format, got '{value}'")]
    InvalidEventDate {
        /// The value as supplied.
        value: String,
    },

    /// A block date was missing or not `YYYY-MM-DD`.
    #[error("blocks[{index}].{field} must be a valid date in YYYY-MM-DD format, got '{value}'")]
    InvalidBlockDate {
        /// Zero-based block index.
        index: usize,
        /// Either `start_date` or `end_date`.
        field: &'static str,
        /// The value as supplied.
        value: String,
    },

    /// A block ends before it starts.
    #[error("blocks[{index}] ends on {end_date}, before its start date {start_date}")]
    BlockEndsBeforeStart {
        /// Zero-based block index.
        index: usize,
        /// The block's start date.
        start_date: NaiveDate,
        /// The block's end date.
        end_date: NaiveDate,
    },

    /// The number of blocks does not match the leave option.
    #[error("leave option '{option}' requires exactly {expected} block(s), got {actual}")]
    WrongBlockCount {
        /// The selected leave option.
        option: BereavementLeaveOption,
        /// The block count the option requires.
        expected: usize,
        /// The block count supplied.
        actual: usize,
    },

    /// A block starts before the bereavement.
    #[error("blocks[{index}] starts on {start_date}, before the bereavement on {event_date}")]
    StartsBeforeEvent {
        /// Zero-based block index.
        index: usize,
        /// The block's start date.
        start_date: NaiveDate,
        /// The bereavement date.
        event_date: NaiveDate,
    },

    /// A block ends after the statutory window closes.
    #[error(
        "blocks[{index}] ends on {end_date}, after the leave window closes on {latest_end_date}"
    )]
    EndsAfterWindow {
        /// Zero-based block index.
        index: usize,
        /// The block's end date.
        end_date: NaiveDate,
        /// The last date leave may be taken.
        latest_end_date: NaiveDate,
    },

    /// Two separate blocks share at least one day.
    #[error("the two leave blocks overlap each other")]
    BlocksOverlap,
}

impl WindowViolation {
    /// Machine-readable code for the violated rule.
    pub fn code(&self) -> &'static str {
        match self {
            WindowViolation::MissingId { .. } => "MISSING_ID",
            WindowViolation::InvalidEventDate { .. } => "INVALID_EVENT_DATE",
            WindowViolation::InvalidBlockDate { .. } => "INVALID_BLOCK_DATE",
            WindowViolation::BlockEndsBeforeStart { .. } => "BLOCK_ENDS_BEFORE_START",
            WindowViolation::WrongBlockCount { .. } => "WRONG_BLOCK_COUNT",
            WindowViolation::StartsBeforeEvent { .. } => "STARTS_BEFORE_EVENT",
            WindowViolation::EndsAfterWindow { .. } => "ENDS_AFTER_WINDOW",
            WindowViolation::BlocksOverlap => "BLOCKS_OVERLAP",
        }
    }
}

/// An error reported by the record store.
///
/// Mirrors the shape of a database error: an optional vendor error code plus
/// a message. Whether it means "overlap" is decided by
/// [`crate::store::StoreConflictClassifier`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Record store error{}: {message}", .code.as_deref().map(|c| format!(" [{c}]")).unwrap_or_default())]
pub struct StoreError {
    /// Vendor error code, if the store supplied one.
    pub code: Option<String>,
    /// The store's error message.
    pub message: String,
}

impl StoreError {
    /// Creates a store error without a code.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            code: None,
            message: message.into(),
        }
    }

    /// Creates a store error carrying a vendor error code.
    pub fn with_code(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: Some(code.into()),
            message: message.into(),
        }
    }
}

/// A type alias for Results that return AbsenceError.
pub type AbsenceResult<T> = Result<T, AbsenceError>;

//! Response types for the Absence Engine API.
//!
//! This module defines the error response structures, the mapping from
//! [`AbsenceError`] to HTTP status codes, and the check-overlap response body.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};

use crate::error::AbsenceError;
use crate::models::Conflict;
use crate::service::OverlapCheck;

/// Error code returned whenever absence dates overlap, whether the clash was
/// found up front or raised by the record store.
pub const ABSENCE_DATE_OVERLAP: &str = "ABSENCE_DATE_OVERLAP";

/// API error response structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    /// Error code for programmatic handling.
    pub code: String,
    /// Human-readable error message.
    pub message: String,
    /// Optional details about the error.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
    /// The existing absences that clash, for overlap errors.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub conflicts: Option<Vec<Conflict>>,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
            conflicts: None,
        }
    }

    /// Creates a new API error with details.
    pub fn with_details(
        code: impl Into<String>,
        message: impl Into<String>,
        details: impl Into<String>,
    ) -> Self {
        Self {
            details: Some(details.into()),
            ..Self::new(code, message)
        }
    }

    /// Creates a validation error response.
    pub fn validation_error(message: impl Into<String>) -> Self {
        Self::new("VALIDATION_ERROR", message)
    }

    /// Creates a malformed JSON error response.
    pub fn malformed_json(message: impl Into<String>) -> Self {
        Self::new("MALFORMED_JSON", message)
    }

    /// Creates the overlap error response, carrying the conflicts verbatim.
    pub fn overlap(conflicts: Vec<Conflict>) -> Self {
        Self {
            conflicts: Some(conflicts),
            ..Self::new(
                ABSENCE_DATE_OVERLAP,
                "Absence dates overlap an existing absence for this employee",
            )
        }
    }
}

/// API error with HTTP status code.
pub struct ApiErrorResponse {
    /// The HTTP status code.
    pub status: StatusCode,
    /// The error body.
    pub error: ApiError,
}

impl IntoResponse for ApiErrorResponse {
    fn into_response(self) -> Response {
        (self.status, Json(self.error)).into_response()
    }
}

impl From<AbsenceError> for ApiErrorResponse {
    fn from(error: AbsenceError) -> Self {
        match error {
            AbsenceError::ConfigNotFound { path } => ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::with_details(
                    "CONFIG_ERROR",
                    "Configuration error",
                    format!("Configuration file not found: {}", path),
                ),
            },
            AbsenceError::ConfigParseError { path, message } => ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::with_details(
                    "CONFIG_ERROR",
                    "Configuration parse error",
                    format!("Failed to parse {}: {}", path, message),
                ),
            },
            AbsenceError::RateNotFound { date } => ApiErrorResponse {
                status: StatusCode::BAD_REQUEST,
                error: ApiError::with_details(
                    "RATE_NOT_FOUND",
                    format!("No SSP rate is effective on {}", date),
                    "Supply a daily_rate or choose a period covered by the configured rates",
                ),
            },
            AbsenceError::Validation { field, message } => ApiErrorResponse {
                status: StatusCode::BAD_REQUEST,
                error: ApiError::with_details(
                    "VALIDATION_ERROR",
                    format!("{} {}", field, message),
                    field,
                ),
            },
            AbsenceError::Window(violation) => ApiErrorResponse {
                status: StatusCode::BAD_REQUEST,
                error: ApiError::new(violation.code(), violation.to_string()),
            },
            AbsenceError::Overlap { conflicts } => ApiErrorResponse {
                status: StatusCode::CONFLICT,
                error: ApiError::overlap(conflicts),
            },
            AbsenceError::EmployeeNotFound {
                company_id,
                employee_id,
            } => ApiErrorResponse {
                status: StatusCode::NOT_FOUND,
                error: ApiError::new(
                    "EMPLOYEE_NOT_FOUND",
                    format!(
                        "Employee '{}' not found in company '{}'",
                        employee_id, company_id
                    ),
                ),
            },
            AbsenceError::Store(store) => ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::with_details(
                    "STORE_ERROR",
                    "Absence records could not be read or written",
                    store.to_string(),
                ),
            },
        }
    }
}

/// Response body for `POST /absences/check-overlap`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckOverlapResponse {
    /// `true` when the proposed dates may be recorded.
    pub ok: bool,
    /// `false` when existing absences could not be loaded and the check
    /// failed open.
    pub verified: bool,
    /// `true` if any existing absence overlaps.
    pub has_overlap: bool,
    /// Every overlapping absence.
    pub conflicts: Vec<Conflict>,
    /// Why the check is unverified.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub warning: Option<String>,
}

impl From<OverlapCheck> for CheckOverlapResponse {
    fn from(check: OverlapCheck) -> Self {
        match check {
            OverlapCheck::Verified(result) => CheckOverlapResponse {
                ok: !result.has_overlap,
                verified: true,
                has_overlap: result.has_overlap,
                conflicts: result.conflicts,
                warning: None,
            },
            OverlapCheck::Unverified { reason } => CheckOverlapResponse {
                ok: true,
                verified: false,
                has_overlap: false,
                conflicts: Vec::new(),
                warning: Some(reason),
            },
        }
    }
}

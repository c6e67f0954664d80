//! HTTP API module for the Absence Engine.
//!
//! This module provides the REST endpoints for checking absence overlaps,
//! recording leave, recording parental bereavement leave and previewing
//! Statutory Sick Pay.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::{BereavementLeaveBody, CheckOverlapBody, CreateLeaveBody, SspPreviewBody};
pub use response::{ABSENCE_DATE_OVERLAP, ApiError, ApiErrorResponse, CheckOverlapResponse};
pub use state::AppState;

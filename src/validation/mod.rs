//! Validation logic for the Absence Engine.
//!
//! This module contains the pure checks run before an absence is recorded:
//! date parsing and the inclusive overlap predicate, the overlap validator,
//! the record-to-range mapper, the single-range leave rules and the parental
//! bereavement leave window rules. Nothing here performs I/O.

mod bereavement;
mod dates;
mod leave_window;
mod overlap;
mod range_mapper;

pub use bereavement::{latest_end_date, validate_bereavement_request};
pub use dates::{
    ISO_DATE_FORMAT, normalize_range, parse_iso_date, ranges_overlap, require_iso_date,
};
pub use leave_window::validate_leave_request;
pub use overlap::{validate_overlap, validate_overlap_dates};
pub use range_mapper::{ranges_for_overlap, record_to_range};

//! Absence Engine for UK statutory absence rules
//!
//! This crate validates employee absences before they are recorded: it
//! detects date-range overlaps against an employee's existing absences,
//! enforces the parental bereavement leave window, and reclassifies the
//! record store's own overlap-constraint errors into the same conflict
//! response. It also computes Statutory Sick Pay qualifying days, payable
//! days and amounts for a pay run.

#![warn(missing_docs)]

pub mod api;
pub mod calculation;
pub mod config;
pub mod error;
pub mod models;
pub mod service;
pub mod store;
pub mod validation;

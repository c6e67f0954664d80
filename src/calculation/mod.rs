//! Statutory Sick Pay calculation for the Absence Engine.
//!
//! This module contains the SSP day model (merging sickness into periods of
//! incapacity, linking them, serving waiting days and counting qualifying
//! and payable days) and the conversion of payable days into an amount.

mod ssp_days;
mod ssp_pay;

pub use ssp_days::{count_ssp_days, merge_sickness_spells};
pub use ssp_pay::{calculate_ssp, ssp_amount, ssp_daily_rate};

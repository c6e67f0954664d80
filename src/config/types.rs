//! Configuration types for statutory absence rules.
//!
//! This module contains the strongly-typed configuration structures that
//! are deserialized from YAML configuration files.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::QualifyingDaysPerWeek;

/// Metadata about the rule set.
#[derive(Debug, Clone, Deserialize)]
pub struct JurisdictionMetadata {
    /// Short code (e.g., "UK").
    pub code: String,
    /// Human-readable name of the rule set.
    pub name: String,
    /// The version or effective date of the rule set.
    pub version: String,
    /// URL to the official guidance.
    pub source_url: String,
}

/// The SSP day model.
#[derive(Debug, Clone, Deserialize)]
pub struct SspPolicy {
    /// Work pattern used when a request does not supply one.
    pub default_qualifying_days_per_week: QualifyingDaysPerWeek,
    /// Qualifying days served before SSP becomes payable in a linked series.
    pub waiting_days: u32,
    /// Minimum consecutive calendar days of sickness forming a period of
    /// incapacity for work.
    pub piw_min_days: u32,
    /// Maximum gap in days between two periods of incapacity that still
    /// links them.
    pub linking_gap_days: u32,
}

/// Parental bereavement leave window.
#[derive(Debug, Clone, Deserialize)]
pub struct BereavementPolicy {
    /// Weeks after the bereavement within which leave must end.
    pub window_weeks: u32,
}

impl BereavementPolicy {
    /// The window expressed in days.
    pub fn window_days(&self) -> i64 {
        i64::from(self.window_weeks) * 7
    }
}

/// What `check_overlap` does when the existing absences cannot be loaded.
///
/// There is deliberately no default; every deployment has to choose.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OverlapCheckFailurePolicy {
    /// Report the check as passed but unverified, letting creation proceed
    /// to the store's own constraint.
    FailOpen,
    /// Surface the load failure to the caller.
    FailClosed,
}

/// Store error signatures that mean "overlap constraint violated".
#[derive(Debug, Clone, Default, Deserialize)]
pub struct StoreConflictSignatures {
    /// Error codes that signal an overlap.
    #[serde(default)]
    pub codes: Vec<String>,
    /// Message substrings that signal an overlap.
    #[serde(default)]
    pub message_patterns: Vec<String>,
}

/// Overlap checking behaviour.
#[derive(Debug, Clone, Deserialize)]
pub struct OverlapPolicy {
    /// Behaviour when the pre-check cannot load existing absences.
    pub on_check_failure: OverlapCheckFailurePolicy,
    /// Signatures used to reclassify store errors as overlaps.
    #[serde(default)]
    pub store_conflict: StoreConflictSignatures,
}

/// The structure of `policy.yaml`.
#[derive(Debug, Clone, Deserialize)]
pub struct PolicyFile {
    /// Rule set metadata.
    pub jurisdiction: JurisdictionMetadata,
    /// SSP day model.
    pub ssp: SspPolicy,
    /// Bereavement window.
    pub bereavement: BereavementPolicy,
    /// Overlap checking behaviour.
    pub overlap: OverlapPolicy,
}

/// Rate configuration for a specific effective date.
#[derive(Debug, Clone, Deserialize)]
pub struct RateConfig {
    /// The effective date for these rates.
    pub effective_date: NaiveDate,
    /// The SSP weekly flat rate.
    pub ssp_weekly_rate: Decimal,
}

/// The complete statutory configuration loaded from YAML files.
#[derive(Debug, Clone)]
pub struct StatutoryConfig {
    policy: PolicyFile,
    /// Rate configurations by effective date (sorted oldest first).
    rates: Vec<RateConfig>,
}

impl StatutoryConfig {
    /// Creates a new StatutoryConfig from its component parts.
    pub fn new(policy: PolicyFile, rates: Vec<RateConfig>) -> Self {
        let mut sorted_rates = rates;
        sorted_rates.sort_by(|a, b| a.effective_date.cmp(&b.effective_date));
        Self {
            policy,
            rates: sorted_rates,
        }
    }

    /// Returns the rule set metadata.
    pub fn jurisdiction(&self) -> &JurisdictionMetadata {
        &self.policy.jurisdiction
    }

    /// Returns the SSP day model.
    pub fn ssp(&self) -> &SspPolicy {
        &self.policy.ssp
    }

    /// Returns the bereavement window.
    pub fn bereavement(&self) -> &BereavementPolicy {
        &self.policy.bereavement
    }

    /// Returns the overlap checking behaviour.
    pub fn overlap(&self) -> &OverlapPolicy {
        &self.policy.overlap
    }

    /// Returns all rate configurations.
    pub fn rates(&self) -> &[RateConfig] {
        &self.rates
    }
}

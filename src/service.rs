//! Absence service: the operations behind the HTTP endpoints.
//!
//! [`AbsenceService`] combines the pure validators with an [`AbsenceStore`]
//! and the statutory configuration. It loads an employee's existing absences,
//! runs the overlap and leave-window checks, inserts new records as drafts and
//! turns the store's own overlap-constraint errors into the same
//! [`AbsenceError::Overlap`] the in-process check produces.

use std::collections::HashSet;
use std::sync::Arc;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use tracing::{debug, info, warn};

use crate::calculation::{calculate_ssp, ssp_daily_rate};
use crate::config::{ConfigLoader, OverlapCheckFailurePolicy};
use crate::error::{AbsenceError, AbsenceResult, StoreError};
use crate::models::{
    AbsenceRange, AbsenceRecord, AbsenceStatus, AbsenceType, BereavementLeaveRequest, Conflict,
    LeaveRequest, NewAbsence, OverlapResult, SspPreview, SspPreviewRequest,
};
use crate::store::{AbsenceFilter, AbsenceStore, StoreConflictClassifier};
use crate::validation::{
    ranges_for_overlap, require_iso_date, validate_bereavement_request, validate_leave_request,
    validate_overlap_dates,
};

/// The outcome of [`AbsenceService::check_overlap`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OverlapCheck {
    /// Existing absences were loaded and compared.
    Verified(OverlapResult),
    /// Existing absences could not be loaded and the service is configured
    /// to fail open. Creation will still hit the store's constraint.
    Unverified {
        /// Why the check could not be completed.
        reason: String,
    },
}

impl OverlapCheck {
    /// Returns `true` if a verified overlap was found.
    pub fn has_overlap(&self) -> bool {
        matches!(self, OverlapCheck::Verified(result) if result.has_overlap)
    }
}

/// Absence operations over a record store.
///
/// # Example
///
/// ```no_run
/// use std::sync::Arc;
/// use absence_engine::config::ConfigLoader;
/// use absence_engine::service::AbsenceService;
/// use absence_engine::store::InMemoryAbsenceStore;
///
/// let store = InMemoryAbsenceStore::new();
/// store.register_employee("co_001", "emp_001");
///
/// let config = ConfigLoader::load("./config/uk_statutory").unwrap();
/// let service = AbsenceService::new(Arc::new(store), Arc::new(config));
///
/// let check = service
///     .check_overlap("co_001", "emp_001", "2025-03-03", "2025-03-07", None)
///     .unwrap();
/// assert!(!check.has_overlap());
/// ```
#[derive(Clone)]
pub struct AbsenceService {
    store: Arc<dyn AbsenceStore>,
    config: Arc<ConfigLoader>,
    classifier: StoreConflictClassifier,
    failure_policy: OverlapCheckFailurePolicy,
}

impl AbsenceService {
    /// Creates a service using the configured failure policy and store
    /// conflict signatures.
    pub fn new(store: Arc<dyn AbsenceStore>, config: Arc<ConfigLoader>) -> Self {
        let overlap = config.config().overlap();
        let classifier = StoreConflictClassifier::from_config(&overlap.store_conflict);
        let failure_policy = overlap.on_check_failure;
        Self {
            store,
            config,
            classifier,
            failure_policy,
        }
    }

    /// Overrides the configured overlap-check failure policy.
    pub fn with_failure_policy(mut self, policy: OverlapCheckFailurePolicy) -> Self {
        self.failure_policy = policy;
        self
    }

    /// The failure policy in effect.
    pub fn failure_policy(&self) -> OverlapCheckFailurePolicy {
        self.failure_policy
    }

    /// Checks a proposed range against the employee's existing absences.
    ///
    /// `exclude_id` skips one record, so an absence being edited does not
    /// conflict with itself. It is trimmed like the other ids; a blank id
    /// excludes nothing.
    ///
    /// If the existing absences cannot be loaded, or the employee is unknown,
    /// the configured [`OverlapCheckFailurePolicy`] decides the outcome:
    /// fail open yields [`OverlapCheck::Unverified`], fail closed returns the
    /// error.
    pub fn check_overlap(
        &self,
        company_id: &str,
        employee_id: &str,
        start_date: &str,
        end_date: &str,
        exclude_id: Option<&str>,
    ) -> AbsenceResult<OverlapCheck> {
        let company_id = require_id("company_id", company_id)?;
        let employee_id = require_id("employee_id", employee_id)?;
        let start = require_iso_date("start_date", start_date)?;
        let end = require_iso_date("end_date", end_date)?;
        let exclude_id = exclude_id.map(str::trim).filter(|id| !id.is_empty());

        let existing = match self.load_ranges(company_id, employee_id) {
            Ok(existing) => existing,
            Err(error) => return self.on_check_failure(error),
        };

        let result = validate_overlap_dates(start, end, &existing, exclude_id);
        debug!(
            company_id,
            employee_id,
            existing = existing.len(),
            conflicts = result.conflicts.len(),
            "Overlap check complete"
        );
        Ok(OverlapCheck::Verified(result))
    }

    /// Records a single-range absence as a draft.
    ///
    /// # Errors
    ///
    /// Returns a validation error for a malformed request,
    /// [`AbsenceError::Overlap`] if the dates clash with an existing absence
    /// (whether found up front or raised by the store), and
    /// [`AbsenceError::EmployeeNotFound`] for an unknown employee.
    pub fn create_leave(&self, request: &LeaveRequest) -> AbsenceResult<AbsenceRecord> {
        let leave = validate_leave_request(request)?;
        let proposed = [(leave.start_date, leave.end_date)];

        let existing = self.load_ranges(&leave.company_id, &leave.employee_id)?;
        let conflicts = conflicts_for(&proposed, &existing);
        if !conflicts.is_empty() {
            return Err(AbsenceError::Overlap { conflicts });
        }

        let new = NewAbsence {
            employee_id: leave.employee_id.clone(),
            company_id: leave.company_id.clone(),
            absence_type: leave.absence_type,
            status: AbsenceStatus::Draft,
            first_day: leave.start_date,
            last_day_expected: Some(leave.end_date),
            total_days: leave.total_days,
            reference_notes: leave.reference_notes,
        };

        let mut inserted = self
            .store
            .insert(vec![new])
            .map_err(|e| self.reclassify(e, &leave.company_id, &leave.employee_id, &proposed))?;
        let record = inserted
            .pop()
            .ok_or_else(|| StoreError::new("insert returned no record"))?;

        info!(
            id = %record.id,
            employee_id = %record.employee_id,
            absence_type = %record.absence_type,
            "Absence recorded"
        );
        Ok(record)
    }

    /// Records parental bereavement leave, one draft record per block.
    ///
    /// # Errors
    ///
    /// Returns [`AbsenceError::Window`] for the first broken window rule,
    /// [`AbsenceError::Overlap`] with every distinct conflicting absence, and
    /// [`AbsenceError::EmployeeNotFound`] for an unknown employee.
    pub fn create_bereavement_leave(
        &self,
        request: &BereavementLeaveRequest,
    ) -> AbsenceResult<Vec<AbsenceRecord>> {
        let leave = validate_bereavement_request(request, self.config.config().bereavement())?;

        let existing = self.load_ranges(&leave.company_id, &leave.employee_id)?;
        let conflicts = conflicts_for(&leave.blocks, &existing);
        if !conflicts.is_empty() {
            return Err(AbsenceError::Overlap { conflicts });
        }

        let block_count = leave.blocks.len();
        let records = leave
            .blocks
            .iter()
            .enumerate()
            .map(|(index, &(first_day, last_day))| NewAbsence {
                employee_id: leave.employee_id.clone(),
                company_id: leave.company_id.clone(),
                absence_type: AbsenceType::ParentalBereavement,
                status: AbsenceStatus::Draft,
                first_day,
                last_day_expected: Some(last_day),
                total_days: Some(Decimal::from((last_day - first_day).num_days() + 1)),
                reference_notes: bereavement_notes(
                    leave.event_date,
                    index,
                    block_count,
                    &leave.reference_notes,
                ),
            })
            .collect();

        let inserted = self.store.insert(records).map_err(|e| {
            self.reclassify(e, &leave.company_id, &leave.employee_id, &leave.blocks)
        })?;

        info!(
            employee_id = %leave.employee_id,
            event_date = %leave.event_date,
            leave_option = %leave.leave_option,
            blocks = inserted.len(),
            "Parental bereavement leave recorded"
        );
        Ok(inserted)
    }

    /// Previews SSP for every employee of a company over a pay run.
    ///
    /// The daily rate is the request's override if given, otherwise the
    /// weekly rate in force on the first day of the period divided by the
    /// qualifying days per week.
    pub fn preview_ssp(&self, request: &SspPreviewRequest) -> AbsenceResult<SspPreview> {
        let company_id = require_id("company_id", &request.company_id)?;
        let ssp_policy = self.config.config().ssp();
        let pattern = request
            .qualifying_days_per_week
            .unwrap_or(ssp_policy.default_qualifying_days_per_week);

        let daily_rate = match request.daily_rate {
            Some(rate) if rate <= Decimal::ZERO => {
                return Err(AbsenceError::validation(
                    "daily_rate",
                    "must be greater than zero",
                ));
            }
            Some(rate) => rate,
            None => ssp_daily_rate(
                self.config.ssp_weekly_rate(request.period.start_date)?,
                pattern,
            ),
        };

        let records = self
            .store
            .select(&AbsenceFilter::for_company(company_id).with_type(AbsenceType::Sickness))?;
        let employees = calculate_ssp(&records, &request.period, pattern, daily_rate, ssp_policy);
        let total_amount: Decimal = employees.iter().map(|e| e.amount).sum();

        debug!(
            company_id,
            employees = employees.len(),
            %total_amount,
            "SSP preview computed"
        );
        Ok(SspPreview {
            company_id: company_id.to_string(),
            period: request.period,
            qualifying_days_per_week: pattern,
            daily_rate,
            employees,
            total_amount,
        })
    }

    fn load_ranges(&self, company_id: &str, employee_id: &str) -> AbsenceResult<Vec<AbsenceRange>> {
        if !self.store.employee_exists(company_id, employee_id)? {
            return Err(AbsenceError::EmployeeNotFound {
                company_id: company_id.to_string(),
                employee_id: employee_id.to_string(),
            });
        }
        let records = self
            .store
            .select(&AbsenceFilter::for_employee(company_id, employee_id))?;
        Ok(ranges_for_overlap(&records, company_id, employee_id))
    }

    fn on_check_failure(&self, error: AbsenceError) -> AbsenceResult<OverlapCheck> {
        match self.failure_policy {
            OverlapCheckFailurePolicy::FailOpen => {
                warn!(error = %error, "Overlap check could not load absences; failing open");
                Ok(OverlapCheck::Unverified {
                    reason: error.to_string(),
                })
            }
            OverlapCheckFailurePolicy::FailClosed => {
                warn!(error = %error, "Overlap check could not load absences; failing closed");
                Err(error)
            }
        }
    }

    /// Maps an insert failure to an engine error, reloading the conflicts
    /// when the store reports an overlap another writer caused.
    fn reclassify(
        &self,
        error: StoreError,
        company_id: &str,
        employee_id: &str,
        proposed: &[(NaiveDate, NaiveDate)],
    ) -> AbsenceError {
        match self.classifier.classify(error) {
            AbsenceError::Overlap { .. } => {
                let conflicts = match self.load_ranges(company_id, employee_id) {
                    Ok(existing) => conflicts_for(proposed, &existing),
                    Err(reload) => {
                        warn!(error = %reload, "Could not reload conflicts after store overlap");
                        Vec::new()
                    }
                };
                warn!(
                    employee_id,
                    conflicts = conflicts.len(),
                    "Store rejected absence as overlapping"
                );
                AbsenceError::Overlap { conflicts }
            }
            other => other,
        }
    }
}

fn require_id<'a>(field: &str, value: &'a str) -> AbsenceResult<&'a str> {
    let value = value.trim();
    if value.is_empty() {
        return Err(AbsenceError::validation(field, "is required"));
    }
    Ok(value)
}

/// Every distinct existing absence that overlaps any proposed range, in the
/// order first found.
fn conflicts_for(proposed: &[(NaiveDate, NaiveDate)], existing: &[AbsenceRange]) -> Vec<Conflict> {
    let mut seen = HashSet::new();
    proposed
        .iter()
        .flat_map(|&(start, end)| validate_overlap_dates(start, end, existing, None).conflicts)
        .filter(|conflict| seen.insert(conflict.id.clone()))
        .collect()
}

fn bereavement_notes(event_date: NaiveDate, index: usize, blocks: usize, notes: &str) -> String {
    let mut text = format!("Parental bereavement leave for bereavement on {}", event_date);
    if blocks > 1 {
        text.push_str(&format!(" (block {} of {})", index + 1, blocks));
    }
    if !notes.trim().is_empty() {
        text.push_str(": ");
        text.push_str(notes.trim());
    }
    text
}

//! Absence record store for the Absence Engine.
//!
//! The engine never talks to a database directly. It reads and writes absence
//! records through the [`AbsenceStore`] trait; [`InMemoryAbsenceStore`] is the
//! bundled implementation and enforces the same "no overlapping live absences"
//! constraint a production store is expected to carry. Errors that store
//! raises for that constraint are recognised by [`StoreConflictClassifier`].

mod conflict;
mod memory;

pub use conflict::{ConflictSignature, StoreConflictClassifier};
pub use memory::InMemoryAbsenceStore;

use crate::error::StoreError;
use crate::models::{AbsenceRecord, AbsenceStatus, AbsenceType, NewAbsence};

/// Selects absence records for one company.
///
/// # Example
///
/// ```
/// use absence_engine::store::AbsenceFilter;
/// use absence_engine::models::AbsenceType;
///
/// let filter = AbsenceFilter::for_employee("co_001", "emp_001").with_type(AbsenceType::Sickness);
/// assert_eq!(filter.employee_id.as_deref(), Some("emp_001"));
/// assert!(!filter.include_cancelled);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AbsenceFilter {
    /// The company whose records are wanted.
    pub company_id: String,
    /// Restrict to one employee.
    pub employee_id: Option<String>,
    /// Restrict to one absence type.
    pub absence_type: Option<AbsenceType>,
    /// Include cancelled records.
    pub include_cancelled: bool,
}

impl AbsenceFilter {
    /// All live records of one employee.
    pub fn for_employee(company_id: impl Into<String>, employee_id: impl Into<String>) -> Self {
        Self {
            company_id: company_id.into(),
            employee_id: Some(employee_id.into()),
            absence_type: None,
            include_cancelled: false,
        }
    }

    /// All live records of a company.
    pub fn for_company(company_id: impl Into<String>) -> Self {
        Self {
            company_id: company_id.into(),
            employee_id: None,
            absence_type: None,
            include_cancelled: false,
        }
    }

    /// Restricts the filter to one absence type.
    pub fn with_type(mut self, absence_type: AbsenceType) -> Self {
        self.absence_type = Some(absence_type);
        self
    }

    /// Returns `true` if `record` is selected by this filter.
    pub fn matches(&self, record: &AbsenceRecord) -> bool {
        record.company_id == self.company_id
            && self
                .employee_id
                .as_deref()
                .is_none_or(|employee| record.employee_id == employee)
            && self.absence_type.is_none_or(|t| record.absence_type == t)
            && (self.include_cancelled || record.status != AbsenceStatus::Cancelled)
    }
}

/// Persistence for absence records.
///
/// Implementations must be safe to share between request handlers.
pub trait AbsenceStore: Send + Sync {
    /// Returns every record matching `filter`, ordered by first day.
    ///
    /// # Errors
    ///
    /// Returns a [`StoreError`] if the records cannot be read.
    fn select(&self, filter: &AbsenceFilter) -> Result<Vec<AbsenceRecord>, StoreError>;

    /// Inserts a batch of records atomically.
    ///
    /// Either every record is stored and returned with its assigned id, or
    /// none is.
    ///
    /// # Errors
    ///
    /// Returns a [`StoreError`] if any record violates a store constraint,
    /// including the overlap constraint, or if the write fails.
    fn insert(&self, records: Vec<NewAbsence>) -> Result<Vec<AbsenceRecord>, StoreError>;

    /// Deletes a record by id, returning `true` if it existed.
    ///
    /// # Errors
    ///
    /// Returns a [`StoreError`] if the write fails.
    fn delete(&self, id: &str) -> Result<bool, StoreError>;

    /// Returns `true` if the employee belongs to the company.
    ///
    /// # Errors
    ///
    /// Returns a [`StoreError`] if the lookup fails.
    fn employee_exists(&self, company_id: &str, employee_id: &str) -> Result<bool, StoreError>;
}

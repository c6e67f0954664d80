//! In-memory absence store.

use std::collections::HashSet;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use tracing::debug;

use crate::error::StoreError;
use crate::models::{AbsenceRecord, NewAbsence};
use crate::validation::ranges_overlap;

use super::{AbsenceFilter, AbsenceStore};

const ID_PREFIX: &str = "abs_";

/// Error code raised when a live absence would overlap another.
const EXCLUSION_VIOLATION: &str = "23P01";

/// Error code raised when a record names an unknown employee.
const FOREIGN_KEY_VIOLATION: &str = "23503";

#[derive(Debug, Default)]
struct Inner {
    records: Vec<AbsenceRecord>,
    employees: HashSet<(String, String)>,
    next_id: u64,
}

impl Inner {
    /// Next sequential id not already held by a stored record.
    fn fresh_id(&mut self) -> String {
        loop {
            self.next_id += 1;
            let id = format!("{}{:06}", ID_PREFIX, self.next_id);
            if !self.records.iter().any(|r| r.id == id) {
                return id;
            }
        }
    }
}

/// A thread-safe absence store held in memory.
///
/// Inserts are rejected with code `23P01` when a live record would overlap
/// another live record of the same employee, matching an exclusion
/// constraint named `absences_no_overlap`.
///
/// # Example
///
/// ```
/// use absence_engine::store::{AbsenceFilter, AbsenceStore, InMemoryAbsenceStore};
///
/// let store = InMemoryAbsenceStore::new();
/// store.register_employee("co_001", "emp_001");
///
/// assert!(store.employee_exists("co_001", "emp_001").unwrap());
/// assert!(store.select(&AbsenceFilter::for_employee("co_001", "emp_001")).unwrap().is_empty());
/// ```
#[derive(Debug, Default)]
pub struct InMemoryAbsenceStore {
    inner: RwLock<Inner>,
}

impl InMemoryAbsenceStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store pre-loaded with records.
    ///
    /// Every employee referenced by `records` is registered. The overlap
    /// constraint is not checked for seeded records. New ids continue after
    /// the highest seeded `abs_NNNNNN` id.
    pub fn with_records(records: Vec<AbsenceRecord>) -> Self {
        let employees = records
            .iter()
            .map(|r| (r.company_id.clone(), r.employee_id.clone()))
            .collect();
        let next_id = records
            .iter()
            .filter_map(|r| r.id.strip_prefix(ID_PREFIX)?.parse::<u64>().ok())
            .max()
            .unwrap_or(0);
        Self {
            inner: RwLock::new(Inner {
                next_id,
                records,
                employees,
            }),
        }
    }

    /// Registers an employee so absences can be recorded for them.
    ///
    /// A poisoned lock is recovered, since registration cannot leave the
    /// store half-written.
    pub fn register_employee(&self, company_id: &str, employee_id: &str) {
        let mut inner = self
            .inner
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        inner
            .employees
            .insert((company_id.to_string(), employee_id.to_string()));
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, Inner>, StoreError> {
        self.inner
            .read()
            .map_err(|_| StoreError::new("absence store lock poisoned"))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, Inner>, StoreError> {
        self.inner
            .write()
            .map_err(|_| StoreError::new("absence store lock poisoned"))
    }
}

fn overlaps(a: &NewAbsence, b_start: chrono::NaiveDate, b_end: chrono::NaiveDate) -> bool {
    let a_end = a.last_day_expected.unwrap_or(a.first_day);
    ranges_overlap((a.first_day, a_end), (b_start, b_end))
}

fn exclusion_violation(employee_id: &str) -> StoreError {
    StoreError::with_code(
        EXCLUSION_VIOLATION,
        format!(
            "conflicting key value violates exclusion constraint \"absences_no_overlap\" for employee {}",
            employee_id
        ),
    )
}

impl AbsenceStore for InMemoryAbsenceStore {
    fn select(&self, filter: &AbsenceFilter) -> Result<Vec<AbsenceRecord>, StoreError> {
        let inner = self.read()?;
        let mut records: Vec<AbsenceRecord> = inner
            .records
            .iter()
            .filter(|r| filter.matches(r))
            .cloned()
            .collect();
        records.sort_by(|a, b| a.first_day.cmp(&b.first_day).then_with(|| a.id.cmp(&b.id)));
        Ok(records)
    }

    fn insert(&self, records: Vec<NewAbsence>) -> Result<Vec<AbsenceRecord>, StoreError> {
        let mut inner = self.write()?;

        for (index, new) in records.iter().enumerate() {
            if !inner
                .employees
                .contains(&(new.company_id.clone(), new.employee_id.clone()))
            {
                return Err(StoreError::with_code(
                    FOREIGN_KEY_VIOLATION,
                    format!(
                        "insert violates foreign key constraint \"absences_employee_fkey\": employee {} not in company {}",
                        new.employee_id, new.company_id
                    ),
                ));
            }
            if !new.status.is_live() {
                continue;
            }

            let clashes_with_stored = inner.records.iter().any(|existing| {
                existing.status.is_live()
                    && existing.company_id == new.company_id
                    && existing.employee_id == new.employee_id
                    && overlaps(new, existing.first_day, existing.effective_end_date())
            });
            let clashes_within_batch = records[..index].iter().any(|earlier| {
                earlier.status.is_live()
                    && earlier.company_id == new.company_id
                    && earlier.employee_id == new.employee_id
                    && overlaps(
                        new,
                        earlier.first_day,
                        earlier.last_day_expected.unwrap_or(earlier.first_day),
                    )
            });
            if clashes_with_stored || clashes_within_batch {
                return Err(exclusion_violation(&new.employee_id));
            }
        }

        let mut inserted = Vec::with_capacity(records.len());
        for new in records {
            let id = inner.fresh_id();
            let record = new.into_record(id);
            debug!(id = %record.id, employee_id = %record.employee_id, "Stored absence");
            inner.records.push(record.clone());
            inserted.push(record);
        }
        Ok(inserted)
    }

    fn delete(&self, id: &str) -> Result<bool, StoreError> {
        let mut inner = self.write()?;
        let before = inner.records.len();
        inner.records.retain(|r| r.id != id);
        Ok(inner.records.len() != before)
    }

    fn employee_exists(&self, company_id: &str, employee_id: &str) -> Result<bool, StoreError> {
        let inner = self.read()?;
        Ok(inner
            .employees
            .contains(&(company_id.to_string(), employee_id.to_string())))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{AbsenceStatus, AbsenceType};
    use chrono::NaiveDate;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn new_absence(employee: &str, start: &str, end: &str) -> NewAbsence {
        NewAbsence {
            employee_id: employee.to_string(),
            company_id: "co_001".to_string(),
            absence_type: AbsenceType::AnnualLeave,
            status: AbsenceStatus::Draft,
            first_day: date(start),
            last_day_expected: Some(date(end)),
            total_days: None,
            reference_notes: String::new(),
        }
    }

    fn store() -> InMemoryAbsenceStore {
        let store = InMemoryAbsenceStore::new();
        store.register_employee("co_001", "emp_001");
        store.register_employee("co_001", "emp_002");
        store
    }

    #[test]
    fn test_insert_assigns_sequential_ids() {
        let store = store();
        let inserted = store
            .insert(vec![
                new_absence("emp_001", "2025-03-03", "2025-03-07"),
                new_absence("emp_001", "2025-04-07", "2025-04-11"),
            ])
            .unwrap();
        assert_eq!(inserted[0].id, "abs_000001");
        assert_eq!(inserted[1].id, "abs_000002");
        assert_eq!(inserted[0].status, AbsenceStatus::Draft);
    }

    #[test]
    fn test_select_orders_by_first_day() {
        let store = store();
        store
            .insert(vec![new_absence("emp_001", "2025-04-07", "2025-04-11")])
            .unwrap();
        store
            .insert(vec![new_absence("emp_001", "2025-03-03", "2025-03-07")])
            .unwrap();
        let records = store
            .select(&AbsenceFilter::for_employee("co_001", "emp_001"))
            .unwrap();
        assert_eq!(records[0].first_day, date("2025-03-03"));
        assert_eq!(records[1].first_day, date("2025-04-07"));
    }

    #[test]
    fn test_overlapping_insert_is_rejected_with_exclusion_code() {
        let store = store();
        store
            .insert(vec![new_absence("emp_001", "2025-03-03", "2025-03-07")])
            .unwrap();
        let error = store
            .insert(vec![new_absence("emp_001", "2025-03-07", "2025-03-10")])
            .unwrap_err();
        assert_eq!(error.code.as_deref(), Some("23P01"));
        assert!(error.message.contains("absences_no_overlap"));
    }

    #[test]
    fn test_other_employees_do_not_clash() {
        let store = store();
        store
            .insert(vec![new_absence("emp_001", "2025-03-03", "2025-03-07")])
            .unwrap();
        assert!(store
            .insert(vec![new_absence("emp_002", "2025-03-03", "2025-03-07")])
            .is_ok());
    }

    #[test]
    fn test_cancelled_records_do_not_clash() {
        let store = store();
        let inserted = store
            .insert(vec![new_absence("emp_001", "2025-03-03", "2025-03-07")])
            .unwrap();
        store.delete(&inserted[0].id).unwrap();

        let mut cancelled = new_absence("emp_001", "2025-03-03", "2025-03-07");
        cancelled.status = AbsenceStatus::Cancelled;
        store.insert(vec![cancelled]).unwrap();
        assert!(store
            .insert(vec![new_absence("emp_001", "2025-03-04", "2025-03-05")])
            .is_ok());
    }

    #[test]
    fn test_batch_is_atomic() {
        let store = store();
        let error = store
            .insert(vec![
                new_absence("emp_001", "2025-03-03", "2025-03-07"),
                new_absence("emp_001", "2025-03-05", "2025-03-12"),
            ])
            .unwrap_err();
        assert_eq!(error.code.as_deref(), Some("23P01"));
        assert!(store
            .select(&AbsenceFilter::for_employee("co_001", "emp_001"))
            .unwrap()
            .is_empty());
    }

    #[test]
    fn test_unknown_employee_is_a_foreign_key_error() {
        let store = store();
        let error = store
            .insert(vec![new_absence("emp_999", "2025-03-03", "2025-03-07")])
            .unwrap_err();
        assert_eq!(error.code.as_deref(), Some("23503"));
    }

    #[test]
    fn test_delete_reports_whether_record_existed() {
        let store = store();
        let inserted = store
            .insert(vec![new_absence("emp_001", "2025-03-03", "2025-03-07")])
            .unwrap();
        assert!(store.delete(&inserted[0].id).unwrap());
        assert!(!store.delete(&inserted[0].id).unwrap());
    }

    #[test]
    fn test_with_records_registers_employees() {
        let record = new_absence("emp_003", "2025-03-03", "2025-03-07").into_record("abs_x".into());
        let store = InMemoryAbsenceStore::with_records(vec![record]);
        assert!(store.employee_exists("co_001", "emp_003").unwrap());
        assert!(!store.employee_exists("co_002", "emp_003").unwrap());
    }

    #[test]
    fn test_ids_continue_after_highest_seeded_id() {
        let seeded = new_absence("emp_001", "2025-01-06", "2025-01-10")
            .into_record("abs_000002".into());
        let store = InMemoryAbsenceStore::with_records(vec![seeded]);

        let inserted = store
            .insert(vec![new_absence("emp_001", "2025-03-03", "2025-03-07")])
            .unwrap();
        assert_eq!(inserted[0].id, "abs_000003");
    }

    #[test]
    fn test_generated_ids_skip_ids_already_held() {
        let seeded = vec![
            new_absence("emp_001", "2025-01-06", "2025-01-10").into_record("legacy_1".into()),
            new_absence("emp_001", "2025-02-03", "2025-02-07").into_record("abs_000001".into()),
        ];
        let store = InMemoryAbsenceStore::with_records(seeded);

        store
            .insert(vec![
                new_absence("emp_001", "2025-03-03", "2025-03-07"),
                new_absence("emp_001", "2025-04-07", "2025-04-11"),
            ])
            .unwrap();

        let all = store
            .select(&AbsenceFilter::for_employee("co_001", "emp_001"))
            .unwrap();
        let ids: HashSet<_> = all.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids.len(), all.len());
        assert_eq!(all.len(), 4);
    }
}

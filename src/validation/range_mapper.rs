//! Persisted record to date range mapping.

use crate::models::{AbsenceRange, AbsenceRecord};

/// Maps a persisted absence to the range used for overlap checks.
///
/// Never fails: the end of the range is the actual last day, else the
/// expected last day, else the first day.
///
/// # Example
///
/// ```
/// use absence_engine::models::{AbsenceRecord, AbsenceStatus, AbsenceType};
/// use absence_engine::validation::record_to_range;
/// use chrono::NaiveDate;
///
/// let record = AbsenceRecord {
///     id: "abs_001".to_string(),
///     employee_id: "emp_001".to_string(),
///     company_id: "co_001".to_string(),
///     absence_type: AbsenceType::Sickness,
///     status: AbsenceStatus::Active,
///     first_day: NaiveDate::from_ymd_opt(2025, 3, 1).unwrap(),
///     last_day_expected: NaiveDate::from_ymd_opt(2025, 3, 10),
///     last_day_actual: NaiveDate::from_ymd_opt(2025, 3, 5),
///     total_days: None,
///     reference_notes: String::new(),
/// };
///
/// let range = record_to_range(&record);
/// assert_eq!(range.end_date, NaiveDate::from_ymd_opt(2025, 3, 5).unwrap());
/// ```
pub fn record_to_range(record: &AbsenceRecord) -> AbsenceRange {
    AbsenceRange::new(
        record.id.clone(),
        record.first_day,
        record.effective_end_date(),
    )
}

/// Scopes records to one employee of one company, drops cancelled ones and
/// maps the rest to ranges.
pub fn ranges_for_overlap(
    records: &[AbsenceRecord],
    company_id: &str,
    employee_id: &str,
) -> Vec<AbsenceRange> {
    records
        .iter()
        .filter(|r| r.company_id == company_id && r.employee_id == employee_id)
        .filter(|r| r.status.is_live())
        .map(record_to_range)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{AbsenceStatus, AbsenceType};
    use chrono::NaiveDate;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn record(id: &str, company: &str, employee: &str, status: AbsenceStatus) -> AbsenceRecord {
        AbsenceRecord {
            id: id.to_string(),
            employee_id: employee.to_string(),
            company_id: company.to_string(),
            absence_type: AbsenceType::AnnualLeave,
            status,
            first_day: date(2025, 3, 1),
            last_day_expected: Some(date(2025, 3, 10)),
            last_day_actual: None,
            total_days: None,
            reference_notes: String::new(),
        }
    }

    #[test]
    fn test_expected_end_used_until_actual_recorded() {
        let mut r = record("abs_1", "co", "emp", AbsenceStatus::Active);
        assert_eq!(record_to_range(&r).end_date, date(2025, 3, 10));

        r.last_day_actual = Some(date(2025, 3, 5));
        assert_eq!(record_to_range(&r).end_date, date(2025, 3, 5));
    }

    #[test]
    fn test_start_only_record_is_single_day() {
        let mut r = record("abs_1", "co", "emp", AbsenceStatus::Draft);
        r.last_day_expected = None;
        let range = record_to_range(&r);
        assert_eq!(range.start_date, range.end_date);
        assert_eq!(range.id, "abs_1");
    }

    #[test]
    fn test_actual_before_first_day_is_normalized() {
        let mut r = record("abs_1", "co", "emp", AbsenceStatus::Completed);
        r.last_day_actual = Some(date(2025, 2, 27));
        let range = record_to_range(&r);
        assert_eq!(range.start_date, date(2025, 2, 27));
        assert_eq!(range.end_date, date(2025, 3, 1));
    }

    #[test]
    fn test_scoping_drops_other_employees_companies_and_cancelled() {
        let records = vec![
            record("keep", "co", "emp", AbsenceStatus::Approved),
            record("other_emp", "co", "emp_2", AbsenceStatus::Approved),
            record("other_co", "co_2", "emp", AbsenceStatus::Approved),
            record("cancelled", "co", "emp", AbsenceStatus::Cancelled),
            record("draft", "co", "emp", AbsenceStatus::Draft),
        ];
        let ids: Vec<_> = ranges_for_overlap(&records, "co", "emp")
            .into_iter()
            .map(|r| r.id)
            .collect();
        assert_eq!(ids, vec!["keep".to_string(), "draft".to_string()]);
    }
}

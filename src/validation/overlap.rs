//! Absence date-overlap validation.
//!
//! This module answers one question: does a proposed absence share any day
//! with the employee's existing absences? It is pure; loading and scoping
//! the existing absences is the caller's job (see
//! [`ranges_for_overlap`](super::ranges_for_overlap)).

use chrono::NaiveDate;

use crate::models::{AbsenceRange, Conflict, OverlapResult};

use super::dates::{normalize_range, parse_iso_date, ranges_overlap};

/// Checks a proposed `YYYY-MM-DD` range against existing absences.
///
/// Reversed bounds are swapped rather than rejected. If either date cannot
/// be parsed the result is "no overlap": date format is validated separately
/// by the caller, and this function never fails.
///
/// # Arguments
///
/// * `proposed_start` / `proposed_end` - The proposed range, inclusive
/// * `existing` - The employee's live absences, already scoped by the caller
/// * `exclude_id` - The absence being edited, which must not conflict with itself
///
/// # Example
///
/// ```
/// use absence_engine::models::AbsenceRange;
/// use absence_engine::validation::validate_overlap;
/// use chrono::NaiveDate;
///
/// let d = |m, day| NaiveDate::from_ymd_opt(2025, m, day).unwrap();
/// let existing = vec![
///     AbsenceRange::new("abs_1", d(1, 1), d(1, 10)),
///     AbsenceRange::new("abs_2", d(3, 1), d(3, 5)),
/// ];
///
/// let result = validate_overlap("2025-01-10", "2025-01-20", &existing, None);
/// assert!(result.has_overlap);
/// assert_eq!(result.conflicts.len(), 1);
/// assert_eq!(result.conflicts[0].id, "abs_1");
/// ```
pub fn validate_overlap(
    proposed_start: &str,
    proposed_end: &str,
    existing: &[AbsenceRange],
    exclude_id: Option<&str>,
) -> OverlapResult {
    match (parse_iso_date(proposed_start), parse_iso_date(proposed_end)) {
        (Some(start), Some(end)) => validate_overlap_dates(start, end, existing, exclude_id),
        _ => OverlapResult::clear(),
    }
}

/// Checks an already-parsed proposed range against existing absences.
///
/// Every overlapping range is reported, in the order given.
pub fn validate_overlap_dates(
    proposed_start: NaiveDate,
    proposed_end: NaiveDate,
    existing: &[AbsenceRange],
    exclude_id: Option<&str>,
) -> OverlapResult {
    let proposed = normalize_range(proposed_start, proposed_end);

    let conflicts = existing
        .iter()
        .filter(|range| exclude_id != Some(range.id.as_str()))
        .filter(|range| ranges_overlap(proposed, (range.start_date, range.end_date)))
        .map(Conflict::from)
        .collect();

    OverlapResult::from_conflicts(conflicts)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn range(id: &str, start: &str, end: &str) -> AbsenceRange {
        AbsenceRange::new(id, date(start), date(end))
    }

    fn january() -> Vec<AbsenceRange> {
        vec![range("abs_1", "2025-01-01", "2025-01-10")]
    }

    #[test]
    fn test_boundary_touching_is_overlap() {
        let result = validate_overlap("2025-01-10", "2025-01-20", &january(), None);
        assert!(result.has_overlap);
        assert_eq!(
            result.conflicts,
            vec![Conflict {
                id: "abs_1".to_string(),
                start_date: date("2025-01-01"),
                end_date: date("2025-01-10"),
            }]
        );
    }

    #[test]
    fn test_adjacent_range_is_not_overlap() {
        let result = validate_overlap("2025-01-11", "2025-01-20", &january(), None);
        assert!(!result.has_overlap);
        assert!(result.conflicts.is_empty());
    }

    #[test]
    fn test_reversed_proposal_behaves_like_ordered() {
        let existing = vec![
            range("abs_1", "2025-01-05", "2025-01-06"),
            range("abs_2", "2025-03-01", "2025-03-02"),
        ];
        let forward = validate_overlap("2025-01-01", "2025-02-01", &existing, None);
        let reversed = validate_overlap("2025-02-01", "2025-01-01", &existing, None);
        assert_eq!(forward, reversed);
        assert_eq!(forward.conflicts.len(), 1);
    }

    #[test]
    fn test_reversed_existing_range_is_normalized() {
        // Built without the normalizing constructor.
        let existing = vec![AbsenceRange {
            id: "abs_r".to_string(),
            start_date: date("2025-01-20"),
            end_date: date("2025-01-10"),
        }];
        let result = validate_overlap("2025-01-15", "2025-01-15", &existing, None);
        assert!(result.has_overlap);
        assert_eq!(result.conflicts[0].start_date, date("2025-01-10"));
        assert_eq!(result.conflicts[0].end_date, date("2025-01-20"));
    }

    #[test]
    fn test_exclude_id_skips_record_being_edited() {
        let existing = vec![range("abs_self", "2025-02-01", "2025-02-07")];
        let result = validate_overlap("2025-02-01", "2025-02-07", &existing, Some("abs_self"));
        assert!(!result.has_overlap);
    }

    #[test]
    fn test_exclude_id_still_reports_other_conflicts() {
        let existing = vec![
            range("abs_self", "2025-02-01", "2025-02-07"),
            range("abs_other", "2025-02-05", "2025-02-06"),
        ];
        let result = validate_overlap("2025-02-01", "2025-02-07", &existing, Some("abs_self"));
        assert_eq!(result.conflicts.len(), 1);
        assert_eq!(result.conflicts[0].id, "abs_other");
    }

    #[test]
    fn test_every_conflict_is_reported_in_input_order() {
        let existing = vec![
            range("abs_c", "2025-05-20", "2025-05-22"),
            range("abs_a", "2025-05-01", "2025-05-03"),
            range("abs_x", "2025-07-01", "2025-07-03"),
            range("abs_b", "2025-05-10", "2025-05-10"),
        ];
        let result = validate_overlap("2025-05-01", "2025-05-31", &existing, None);
        let ids: Vec<_> = result.conflicts.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["abs_c", "abs_a", "abs_b"]);
    }

    #[test]
    fn test_unparseable_dates_report_no_overlap() {
        let existing = january();
        assert!(!validate_overlap("garbage", "2025-01-05", &existing, None).has_overlap);
        assert!(!validate_overlap("2025-01-05", "", &existing, None).has_overlap);
        assert!(!validate_overlap("2025-02-30", "2025-01-05", &existing, None).has_overlap);
    }

    #[test]
    fn test_no_existing_ranges() {
        let result = validate_overlap("2025-01-01", "2025-01-31", &[], None);
        assert_eq!(result, OverlapResult::clear());
    }

    fn arb_range(id: &'static str) -> impl Strategy<Value = AbsenceRange> {
        (0i64..400, 0i64..400).prop_map(move |(a, b)| {
            let base = date("2025-01-01");
            AbsenceRange::new(id, base + chrono::Duration::days(a), base + chrono::Duration::days(b))
        })
    }

    proptest! {
        #[test]
        fn prop_overlap_symmetry_through_validator(a in arb_range("a"), b in arb_range("b")) {
            let ab = validate_overlap_dates(a.start_date, a.end_date, std::slice::from_ref(&b), None);
            let ba = validate_overlap_dates(b.start_date, b.end_date, std::slice::from_ref(&a), None);
            prop_assert_eq!(ab.has_overlap, ba.has_overlap);
        }

        #[test]
        fn prop_self_exclusion_never_conflicts(a in arb_range("self")) {
            let result = validate_overlap_dates(a.start_date, a.end_date, std::slice::from_ref(&a), Some("self"));
            prop_assert!(!result.has_overlap);
        }

        #[test]
        fn prop_deterministic(a in arb_range("a"), b in arb_range("b"), c in arb_range("c")) {
            let existing = vec![a.clone(), b, c];
            let first = validate_overlap_dates(a.start_date, a.end_date, &existing, None);
            let second = validate_overlap_dates(a.start_date, a.end_date, &existing, None);
            prop_assert_eq!(first, second);
        }
    }
}

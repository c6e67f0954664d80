//! SSP qualifying and payable day counting.
//!
//! Sickness absences are merged into spells. A spell of at least
//! `piw_min_days` calendar days is a period of incapacity for work (PIW).
//! PIWs separated by no more than `linking_gap_days` form a linked series,
//! and the first `waiting_days` qualifying days of a series are unpaid.
//! Only days inside the pay period are counted, but waiting days served
//! before the period still count as served.

use chrono::{Duration, NaiveDate};

use crate::config::SspPolicy;
use crate::models::{AbsenceRange, PayPeriod, QualifyingDaysPerWeek, SspDayCount};
use crate::validation::normalize_range;

/// Merges overlapping or back-to-back ranges into continuous spells.
///
/// The result is sorted by start date and no two spells touch.
pub fn merge_sickness_spells(ranges: &[AbsenceRange]) -> Vec<(NaiveDate, NaiveDate)> {
    let mut sorted: Vec<(NaiveDate, NaiveDate)> = ranges
        .iter()
        .map(|r| normalize_range(r.start_date, r.end_date))
        .collect();
    sorted.sort();

    let mut spells: Vec<(NaiveDate, NaiveDate)> = Vec::with_capacity(sorted.len());
    for (start, end) in sorted {
        match spells.last_mut() {
            Some(last) if start <= last.1 + Duration::days(1) => {
                if end > last.1 {
                    last.1 = end;
                }
            }
            _ => spells.push((start, end)),
        }
    }
    spells
}

/// Counts qualifying, waiting and payable days for one employee.
///
/// # Arguments
///
/// * `sickness` - The employee's live sickness ranges; may extend outside the period
/// * `period` - The pay run window
/// * `pattern` - Which weekdays are qualifying days
/// * `policy` - Waiting days, PIW minimum and linking gap
///
/// # Example
///
/// ```
/// use absence_engine::calculation::count_ssp_days;
/// use absence_engine::config::SspPolicy;
/// use absence_engine::models::{AbsenceRange, PayPeriod, QualifyingDaysPerWeek};
/// use chrono::NaiveDate;
///
/// let d = |m, day| NaiveDate::from_ymd_opt(2025, m, day).unwrap();
/// let policy = SspPolicy {
///     default_qualifying_days_per_week: QualifyingDaysPerWeek::new(5).unwrap(),
///     waiting_days: 3,
///     piw_min_days: 4,
///     linking_gap_days: 56,
/// };
/// let period = PayPeriod::new(d(4, 1), d(4, 30)).unwrap();
///
/// // Monday 7th to Friday 11th April: five qualifying days, three waiting
/// let sickness = vec![AbsenceRange::new("abs_1", d(4, 7), d(4, 11))];
/// let count = count_ssp_days(&sickness, &period, QualifyingDaysPerWeek::new(5).unwrap(), &policy);
///
/// assert_eq!(count.qualifying_days, 5);
/// assert_eq!(count.waiting_days, 3);
/// assert_eq!(count.payable_days, 2);
/// ```
pub fn count_ssp_days(
    sickness: &[AbsenceRange],
    period: &PayPeriod,
    pattern: QualifyingDaysPerWeek,
    policy: &SspPolicy,
) -> SspDayCount {
    let mut count = SspDayCount::default();
    let mut waiting_served: u32 = 0;
    let mut previous_piw_end: Option<NaiveDate> = None;

    let piws = merge_sickness_spells(sickness)
        .into_iter()
        .filter(|(start, end)| (*end - *start).num_days() + 1 >= i64::from(policy.piw_min_days));

    for (start, end) in piws {
        if start > period.end_date {
            break;
        }

        if let Some(previous_end) = previous_piw_end {
            let gap_days = (start - previous_end).num_days() - 1;
            if gap_days > i64::from(policy.linking_gap_days) {
                waiting_served = 0;
            }
        }
        previous_piw_end = Some(end);

        for day in start.iter_days().take_while(|d| *d <= end && *d <= period.end_date) {
            if !pattern.is_qualifying_day(day) {
                continue;
            }
            let in_period = period.contains_date(day);
            if in_period {
                count.qualifying_days += 1;
            }
            if waiting_served < policy.waiting_days {
                waiting_served += 1;
                if in_period {
                    count.waiting_days += 1;
                }
            } else if in_period {
                count.payable_days += 1;
            }
        }
    }

    count
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

    fn policy() -> SspPolicy {
        SspPolicy {
            default_qualifying_days_per_week: QualifyingDaysPerWeek::new(5).unwrap(),
            waiting_days: 3,
            piw_min_days: 4,
            linking_gap_days: 56,
        }
    }

    fn five_day() -> QualifyingDaysPerWeek {
        QualifyingDaysPerWeek::new(5).unwrap()
    }

    fn period(start: &str, end: &str) -> PayPeriod {
        PayPeriod::new(date(start), date(end)).unwrap()
    }

    #[test]
    fn test_merge_joins_overlapping_and_adjacent_ranges() {
        let spells = merge_sickness_spells(&[
            range("c", "2025-04-20", "2025-04-22"),
            range("a", "2025-04-01", "2025-04-03"),
            range("b", "2025-04-04", "2025-04-05"),
            range("d", "2025-04-21", "2025-04-25"),
        ]);
        assert_eq!(
            spells,
            vec![
                (date("2025-04-01"), date("2025-04-05")),
                (date("2025-04-20"), date("2025-04-25")),
            ]
        );
    }

    #[test]
    fn test_merge_keeps_gapped_ranges_apart() {
        let spells = merge_sickness_spells(&[
            range("a", "2025-04-01", "2025-04-03"),
            range("b", "2025-04-05", "2025-04-06"),
        ]);
        assert_eq!(spells.len(), 2);
    }

    #[test]
    fn test_short_spell_is_not_a_piw() {
        // Monday to Wednesday: three days, below the four-day minimum
        let count = count_ssp_days(
            &[range("a", "2025-04-07", "2025-04-09")],
            &period("2025-04-01", "2025-04-30"),
            five_day(),
            &policy(),
        );
        assert_eq!(count, SspDayCount::default());
    }

    #[test]
    fn test_adjacent_short_spells_merge_into_piw() {
        // Mon-Tue then Wed-Thu: merged into a four-day PIW
        let count = count_ssp_days(
            &[
                range("a", "2025-04-07", "2025-04-08"),
                range("b", "2025-04-09", "2025-04-10"),
            ],
            &period("2025-04-01", "2025-04-30"),
            five_day(),
            &policy(),
        );
        assert_eq!(count.qualifying_days, 4);
        assert_eq!(count.waiting_days, 3);
        assert_eq!(count.payable_days, 1);
    }

    #[test]
    fn test_weekend_days_are_not_qualifying() {
        // Thursday 10th to Tuesday 15th April: Thu, Fri, Mon, Tue qualify
        let count = count_ssp_days(
            &[range("a", "2025-04-10", "2025-04-15")],
            &period("2025-04-01", "2025-04-30"),
            five_day(),
            &policy(),
        );
        assert_eq!(count.qualifying_days, 4);
        assert_eq!(count.payable_days, 1);
    }

    #[test]
    fn test_seven_day_pattern_counts_weekends() {
        let count = count_ssp_days(
            &[range("a", "2025-04-10", "2025-04-15")],
            &period("2025-04-01", "2025-04-30"),
            QualifyingDaysPerWeek::new(7).unwrap(),
            &policy(),
        );
        assert_eq!(count.qualifying_days, 6);
        assert_eq!(count.payable_days, 3);
    }

    #[test]
    fn test_linked_piw_does_not_serve_waiting_days_again() {
        // Two PIWs four weeks apart: the second is linked
        let count = count_ssp_days(
            &[
                range("a", "2025-04-07", "2025-04-11"),
                range("b", "2025-05-05", "2025-05-09"),
            ],
            &period("2025-04-01", "2025-05-31"),
            five_day(),
            &policy(),
        );
        assert_eq!(count.qualifying_days, 10);
        assert_eq!(count.waiting_days, 3);
        assert_eq!(count.payable_days, 7);
    }

    #[test]
    fn test_unlinked_piw_serves_waiting_days_again() {
        // Gap of more than eight weeks breaks the link
        let count = count_ssp_days(
            &[
                range("a", "2025-01-06", "2025-01-10"),
                range("b", "2025-04-07", "2025-04-11"),
            ],
            &period("2025-01-01", "2025-04-30"),
            five_day(),
            &policy(),
        );
        assert_eq!(count.qualifying_days, 10);
        assert_eq!(count.waiting_days, 6);
        assert_eq!(count.payable_days, 4);
    }

    #[test]
    fn test_gap_of_exactly_56_days_still_links() {
        // First PIW ends Fri 10 Jan; Sat 8 Mar leaves 56 clear days between
        let count = count_ssp_days(
            &[
                range("a", "2025-01-06", "2025-01-10"),
                range("b", "2025-03-08", "2025-03-14"),
            ],
            &period("2025-03-01", "2025-03-31"),
            five_day(),
            &policy(),
        );
        assert_eq!(count.waiting_days, 0);
        assert_eq!(count.payable_days, 5);
    }

    #[test]
    fn test_gap_of_57_days_breaks_link() {
        let count = count_ssp_days(
            &[
                range("a", "2025-01-06", "2025-01-10"),
                range("b", "2025-03-09", "2025-03-14"),
            ],
            &period("2025-03-01", "2025-03-31"),
            five_day(),
            &policy(),
        );
        assert_eq!(count.waiting_days, 3);
        assert_eq!(count.payable_days, 2);
    }

    #[test]
    fn test_waiting_days_served_before_period_still_count() {
        // PIW starts Mon 24 March; pay period starts 1 April
        let count = count_ssp_days(
            &[range("a", "2025-03-24", "2025-04-04")],
            &period("2025-04-01", "2025-04-30"),
            five_day(),
            &policy(),
        );
        assert_eq!(count.qualifying_days, 4);
        assert_eq!(count.waiting_days, 0);
        assert_eq!(count.payable_days, 4);
    }

    #[test]
    fn test_days_after_period_are_ignored() {
        let count = count_ssp_days(
            &[range("a", "2025-04-28", "2025-05-09")],
            &period("2025-04-01", "2025-04-30"),
            five_day(),
            &policy(),
        );
        assert_eq!(count.qualifying_days, 3);
        assert_eq!(count.waiting_days, 3);
        assert_eq!(count.payable_days, 0);
    }

    #[test]
    fn test_no_waiting_days_configured() {
        let mut no_wait = policy();
        no_wait.waiting_days = 0;
        let count = count_ssp_days(
            &[range("a", "2025-04-07", "2025-04-11")],
            &period("2025-04-01", "2025-04-30"),
            five_day(),
            &no_wait,
        );
        assert_eq!(count.payable_days, 5);
    }

    proptest! {
        #[test]
        fn prop_counts_are_consistent_and_repeatable(
            spans in proptest::collection::vec((0i64..120, 0i64..20), 0..6),
            days in 1u8..=7,
        ) {
            let base = date("2025-03-01");
            let ranges: Vec<_> = spans
                .iter()
                .enumerate()
                .map(|(i, (offset, len))| {
                    let start = base + Duration::days(*offset);
                    AbsenceRange::new(format!("abs_{}", i), start, start + Duration::days(*len))
                })
                .collect();
            let window = period("2025-04-01", "2025-05-31");
            let pattern = QualifyingDaysPerWeek::new(days).unwrap();

            let first = count_ssp_days(&ranges, &window, pattern, &policy());
            let second = count_ssp_days(&ranges, &window, pattern, &policy());

            prop_assert_eq!(first, second);
            prop_assert_eq!(first.qualifying_days, first.waiting_days + first.payable_days);
            prop_assert!(first.waiting_days <= 3 * (spans.len() as u32));
        }
    }
}

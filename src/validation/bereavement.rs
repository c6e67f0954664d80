//! Parental bereavement leave window rules.
//!
//! Leave may be taken as one block, or as two separate blocks, and every
//! day of it must fall between the bereavement and the end of the statutory
//! window (56 weeks in the shipped configuration). The window is a hard
//! ceiling: blocks that run past it are rejected, never clamped.
//!
//! Rules are checked in a fixed order and the first violation is reported:
//!
//! 1. employee and company ids present
//! 2. event date valid
//! 3. block count matches the leave option
//! 4. each block's dates valid and ordered
//! 5. no block starts before the event
//! 6. no block ends after the window
//! 7. two blocks do not overlap each other

use chrono::{Duration, NaiveDate};

use crate::config::BereavementPolicy;
use crate::error::WindowViolation;
use crate::models::{BereavementLeaveRequest, LeaveBlock, ValidatedBereavementLeave};

use super::dates::{parse_iso_date, ranges_overlap};

/// The last day on which leave for a bereavement on `event_date` may fall.
///
/// The window is `window_weeks` from `config/uk_statutory/policy.yaml`. The
/// shipped 56 weeks puts the limit for a bereavement on 2025-01-06 at
/// 2026-02-02, so a block ending 2026-01-07 is accepted; at 52 weeks it is
/// rejected.
pub fn latest_end_date(event_date: NaiveDate, policy: &BereavementPolicy) -> NaiveDate {
    event_date + Duration::days(policy.window_days())
}

/// Validates a parental bereavement leave request before any record is loaded.
///
/// # Example
///
/// ```
/// use absence_engine::config::BereavementPolicy;
/// use absence_engine::error::WindowViolation;
/// use absence_engine::models::{BereavementLeaveOption, BereavementLeaveRequest, LeaveBlock};
/// use absence_engine::validation::validate_bereavement_request;
///
/// let policy = BereavementPolicy { window_weeks: 56 };
/// let request = BereavementLeaveRequest {
///     company_id: "co_001".to_string(),
///     employee_id: "emp_001".to_string(),
///     event_date: "2025-01-06".to_string(),
///     leave_option: BereavementLeaveOption::TwoWeeksSeparate,
///     blocks: vec![LeaveBlock {
///         start_date: "2025-01-13".to_string(),
///         end_date: "2025-01-19".to_string(),
///     }],
///     reference_notes: None,
/// };
///
/// let violation = validate_bereavement_request(&request, &policy).unwrap_err();
/// assert_eq!(violation.code(), "WRONG_BLOCK_COUNT");
/// ```
pub fn validate_bereavement_request(
    request: &BereavementLeaveRequest,
    policy: &BereavementPolicy,
) -> Result<ValidatedBereavementLeave, WindowViolation> {
    if request.employee_id.trim().is_empty() {
        return Err(WindowViolation::MissingId {
            field: "employee_id",
        });
    }
    if request.company_id.trim().is_empty() {
        return Err(WindowViolation::MissingId {
            field: "company_id",
        });
    }

    let event_date =
        parse_iso_date(&request.event_date).ok_or_else(|| WindowViolation::InvalidEventDate {
            value: request.event_date.clone(),
        })?;

    let expected = request.leave_option.required_blocks();
    if request.blocks.len() != expected {
        return Err(WindowViolation::WrongBlockCount {
            option: request.leave_option,
            expected,
            actual: request.blocks.len(),
        });
    }

    let blocks = request
        .blocks
        .iter()
        .enumerate()
        .map(|(index, block)| parse_block(index, block))
        .collect::<Result<Vec<_>, _>>()?;

    let latest_end_date = latest_end_date(event_date, policy);
    for (index, &(start_date, end_date)) in blocks.iter().enumerate() {
        if start_date < event_date {
            return Err(WindowViolation::StartsBeforeEvent {
                index,
                start_date,
                event_date,
            });
        }
        if end_date > latest_end_date {
            return Err(WindowViolation::EndsAfterWindow {
                index,
                end_date,
                latest_end_date,
            });
        }
    }

    if let [first, second] = blocks.as_slice() {
        if ranges_overlap(*first, *second) {
            return Err(WindowViolation::BlocksOverlap);
        }
    }

    Ok(ValidatedBereavementLeave {
        company_id: request.company_id.trim().to_string(),
        employee_id: request.employee_id.trim().to_string(),
        event_date,
        leave_option: request.leave_option,
        blocks,
        reference_notes: request.reference_notes.clone().unwrap_or_default(),
    })
}

fn parse_block(index: usize, block: &LeaveBlock) -> Result<(NaiveDate, NaiveDate), WindowViolation> {
    let start_date =
        parse_iso_date(&block.start_date).ok_or_else(|| WindowViolation::InvalidBlockDate {
            index,
            field: "start_date",
            value: block.start_date.clone(),
        })?;
    let end_date =
        parse_iso_date(&block.end_date).ok_or_else(|| WindowViolation::InvalidBlockDate {
            index,
            field: "end_date",
            value: block.end_date.clone(),
        })?;
    if end_date < start_date {
        return Err(WindowViolation::BlockEndsBeforeStart {
            index,
            start_date,
            end_date,
        });
    }
    Ok((start_date, end_date))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::BereavementLeaveOption;

    fn policy() -> BereavementPolicy {
        BereavementPolicy { window_weeks: 56 }
    }

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn block(start: &str, end: &str) -> LeaveBlock {
        LeaveBlock {
            start_date: start.to_string(),
            end_date: end.to_string(),
        }
    }

    fn request(option: BereavementLeaveOption, blocks: Vec<LeaveBlock>) -> BereavementLeaveRequest {
        BereavementLeaveRequest {
            company_id: "co_001".to_string(),
            employee_id: "emp_001".to_string(),
            event_date: "2025-01-06".to_string(),
            leave_option: option,
            blocks,
            reference_notes: None,
        }
    }

    #[test]
    fn test_window_closes_56_weeks_after_event() {
        assert_eq!(latest_end_date(date("2025-01-06"), &policy()), date("2026-02-02"));
    }

    #[test]
    fn test_single_week_after_event_is_accepted() {
        let r = request(
            BereavementLeaveOption::OneWeek,
            vec![block("2025-01-13", "2025-01-19")],
        );
        let leave = validate_bereavement_request(&r, &policy()).unwrap();
        assert_eq!(leave.event_date, date("2025-01-06"));
        assert_eq!(leave.blocks, vec![(date("2025-01-13"), date("2025-01-19"))]);
    }

    #[test]
    fn test_block_starting_on_event_date_is_accepted() {
        let r = request(
            BereavementLeaveOption::OneWeek,
            vec![block("2025-01-06", "2025-01-12")],
        );
        assert!(validate_bereavement_request(&r, &policy()).is_ok());
    }

    #[test]
    fn test_block_ending_within_window_is_accepted() {
        let r = request(
            BereavementLeaveOption::OneWeek,
            vec![block("2025-12-30", "2026-01-05")],
        );
        assert!(validate_bereavement_request(&r, &policy()).is_ok());
    }

    #[test]
    fn test_block_ending_on_last_window_day_is_accepted() {
        let r = request(
            BereavementLeaveOption::OneWeek,
            vec![block("2026-01-27", "2026-02-02")],
        );
        assert!(validate_bereavement_request(&r, &policy()).is_ok());
    }

    #[test]
    fn test_block_ending_after_window_is_rejected() {
        let r = request(
            BereavementLeaveOption::OneWeek,
            vec![block("2026-01-28", "2026-02-03")],
        );
        assert_eq!(
            validate_bereavement_request(&r, &policy()),
            Err(WindowViolation::EndsAfterWindow {
                index: 0,
                end_date: date("2026-02-03"),
                latest_end_date: date("2026-02-02"),
            })
        );
    }

    #[test]
    fn test_shorter_configured_window_is_honoured() {
        let short = BereavementPolicy { window_weeks: 52 };
        let r = request(
            BereavementLeaveOption::OneWeek,
            vec![block("2026-01-01", "2026-01-07")],
        );
        let violation = validate_bereavement_request(&r, &short).unwrap_err();
        assert_eq!(violation.code(), "ENDS_AFTER_WINDOW");
    }

    #[test]
    fn test_block_before_event_is_rejected() {
        let r = request(
            BereavementLeaveOption::OneWeek,
            vec![block("2025-01-05", "2025-01-11")],
        );
        assert_eq!(
            validate_bereavement_request(&r, &policy()),
            Err(WindowViolation::StartsBeforeEvent {
                index: 0,
                start_date: date("2025-01-05"),
                event_date: date("2025-01-06"),
            })
        );
    }

    #[test]
    fn test_two_weeks_separate_with_one_block_is_rejected() {
        let r = request(
            BereavementLeaveOption::TwoWeeksSeparate,
            vec![block("2025-01-13", "2025-01-19")],
        );
        assert_eq!(
            validate_bereavement_request(&r, &policy()),
            Err(WindowViolation::WrongBlockCount {
                option: BereavementLeaveOption::TwoWeeksSeparate,
                expected: 2,
                actual: 1,
            })
        );
    }

    #[test]
    fn test_single_block_options_reject_two_blocks() {
        for option in [
            BereavementLeaveOption::OneWeek,
            BereavementLeaveOption::TwoWeeksTogether,
        ] {
            let r = request(
                option,
                vec![block("2025-01-13", "2025-01-19"), block("2025-02-03", "2025-02-09")],
            );
            assert_eq!(
                validate_bereavement_request(&r, &policy()).unwrap_err().code(),
                "WRONG_BLOCK_COUNT"
            );
        }
    }

    #[test]
    fn test_no_blocks_is_rejected() {
        let r = request(BereavementLeaveOption::OneWeek, vec![]);
        assert_eq!(
            validate_bereavement_request(&r, &policy()).unwrap_err().code(),
            "WRONG_BLOCK_COUNT"
        );
    }

    #[test]
    fn test_two_separate_blocks_are_accepted() {
        let r = request(
            BereavementLeaveOption::TwoWeeksSeparate,
            vec![block("2025-01-13", "2025-01-19"), block("2025-06-02", "2025-06-08")],
        );
        let leave = validate_bereavement_request(&r, &policy()).unwrap();
        assert_eq!(leave.blocks.len(), 2);
    }

    #[test]
    fn test_two_overlapping_blocks_are_rejected() {
        let r = request(
            BereavementLeaveOption::TwoWeeksSeparate,
            vec![block("2025-01-13", "2025-01-19"), block("2025-01-19", "2025-01-25")],
        );
        assert_eq!(
            validate_bereavement_request(&r, &policy()),
            Err(WindowViolation::BlocksOverlap)
        );
    }

    #[test]
    fn test_missing_employee_id() {
        let mut r = request(
            BereavementLeaveOption::OneWeek,
            vec![block("2025-01-13", "2025-01-19")],
        );
        r.employee_id = String::new();
        assert_eq!(
            validate_bereavement_request(&r, &policy()),
            Err(WindowViolation::MissingId {
                field: "employee_id"
            })
        );
    }

    #[test]
    fn test_invalid_event_date() {
        let mut r = request(
            BereavementLeaveOption::OneWeek,
            vec![block("2025-01-13", "2025-01-19")],
        );
        r.event_date = "06/01/2025".to_string();
        assert_eq!(
            validate_bereavement_request(&r, &policy()).unwrap_err().code(),
            "INVALID_EVENT_DATE"
        );
    }

    #[test]
    fn test_invalid_block_date_names_block_and_field() {
        let r = request(
            BereavementLeaveOption::TwoWeeksSeparate,
            vec![block("2025-01-13", "2025-01-19"), block("2025-06-02", "soon")],
        );
        assert_eq!(
            validate_bereavement_request(&r, &policy()),
            Err(WindowViolation::InvalidBlockDate {
                index: 1,
                field: "end_date",
                value: "soon".to_string(),
            })
        );
    }

    #[test]
    fn test_reversed_block_is_rejected() {
        let r = request(
            BereavementLeaveOption::OneWeek,
            vec![block("2025-01-19", "2025-01-13")],
        );
        assert_eq!(
            validate_bereavement_request(&r, &policy()).unwrap_err().code(),
            "BLOCK_ENDS_BEFORE_START"
        );
    }
}

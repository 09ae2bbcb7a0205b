//! Date-range policy.
//!
//! Asserts presence, coercibility, ordering, and optional advance notice for
//! a `(start, end)` pair of raw date fields. The update variant falls back to
//! the persisted current values for fields the payload omitted, so a partial
//! update is still validated against the effective pair.

use chrono::{DateTime, Duration, Utc};
use mockable::Clock;
use serde_json::json;

use crate::domain::policies::{coerce, Requirement};
use crate::domain::DomainError;

/// Detail code attached when `start` does not precede `end`.
pub const CODE_BACKWARDS_RANGE: &str = "backwards_range";
/// Detail code attached when `start` violates the advance-notice floor.
pub const CODE_INSUFFICIENT_NOTICE: &str = "insufficient_notice";

/// Configuration for one resource's date-range check.
#[derive(Debug, Clone, Copy)]
pub struct DateRangeRules {
    /// Payload label of the start field, used in error details.
    pub start_field: &'static str,
    /// Payload label of the end field, used in error details.
    pub end_field: &'static str,
    /// Presence mode for the pair.
    pub requirement: Requirement,
    /// Accept `start == end` when set.
    pub allow_equal: bool,
    /// Minimum hours between now and `start`. `Some(0)` degrades to the
    /// weaker check that `start` is not in the past.
    pub min_hours_before_start: Option<i64>,
}

/// Coerced values for the fields the payload actually supplied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateRangeValues {
    /// Coerced start, when supplied.
    pub start: Option<DateTime<Utc>>,
    /// Coerced end, when supplied.
    pub end: Option<DateTime<Utc>>,
}

/// Validate a create payload's date pair.
pub fn check_create(
    rules: &DateRangeRules,
    raw_start: Option<&str>,
    raw_end: Option<&str>,
    clock: &dyn Clock,
) -> Result<DateRangeValues, DomainError> {
    check(rules, raw_start, raw_end, None, None, clock)
}

/// Validate an update payload's date pair against the persisted current
/// values.
pub fn check_update(
    rules: &DateRangeRules,
    raw_start: Option<&str>,
    raw_end: Option<&str>,
    current_start: Option<DateTime<Utc>>,
    current_end: Option<DateTime<Utc>>,
    clock: &dyn Clock,
) -> Result<DateRangeValues, DomainError> {
    check(rules, raw_start, raw_end, current_start, current_end, clock)
}

fn check(
    rules: &DateRangeRules,
    raw_start: Option<&str>,
    raw_end: Option<&str>,
    current_start: Option<DateTime<Utc>>,
    current_end: Option<DateTime<Utc>>,
    clock: &dyn Clock,
) -> Result<DateRangeValues, DomainError> {
    let supplied_start = raw_start
        .map(|raw| coerce::date_time(rules.start_field, raw))
        .transpose()?;
    let supplied_end = raw_end
        .map(|raw| coerce::date_time(rules.end_field, raw))
        .transpose()?;

    let effective_start = supplied_start.or(current_start);
    let effective_end = supplied_end.or(current_end);

    rules.requirement.check(
        (rules.start_field, effective_start.is_some()),
        (rules.end_field, effective_end.is_some()),
    )?;

    if let Some(start) = supplied_start {
        check_advance_notice(rules, start, clock)?;
    }

    if let (Some(start), Some(end)) = (effective_start, effective_end) {
        let ordered = if rules.allow_equal {
            start <= end
        } else {
            start < end
        };
        if !ordered {
            return Err(DomainError::invalid_request(format!(
                "{} must be before {}",
                rules.start_field, rules.end_field
            ))
            .with_details(json!({
                "fields": [rules.start_field, rules.end_field],
                "code": CODE_BACKWARDS_RANGE,
                "start": start.to_rfc3339(),
                "end": end.to_rfc3339(),
            })));
        }
    }

    Ok(DateRangeValues {
        start: supplied_start,
        end: supplied_end,
    })
}

fn check_advance_notice(
    rules: &DateRangeRules,
    start: DateTime<Utc>,
    clock: &dyn Clock,
) -> Result<(), DomainError> {
    let Some(min_hours) = rules.min_hours_before_start else {
        return Ok(());
    };

    let now = clock.utc();
    let floor = now + Duration::hours(min_hours.max(0));
    if start >= floor {
        return Ok(());
    }

    let message = if min_hours > 0 {
        format!(
            "{} must be at least {min_hours} hours from now",
            rules.start_field
        )
    } else {
        format!("{} must not be in the past", rules.start_field)
    };
    Err(DomainError::invalid_request(message).with_details(json!({
        "field": rules.start_field,
        "code": CODE_INSUFFICIENT_NOTICE,
        "minHoursBeforeStart": min_hours,
    })))
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use chrono::TimeZone;
    use mockable::MockClock;
    use rstest::{fixture, rstest};

    fn rules(requirement: Requirement, allow_equal: bool) -> DateRangeRules {
        DateRangeRules {
            start_field: "checkIn",
            end_field: "checkOut",
            requirement,
            allow_equal,
            min_hours_before_start: None,
        }
    }

    #[fixture]
    fn clock() -> MockClock {
        let mut clock = MockClock::new();
        clock
            .expect_utc()
            .returning(|| Utc.with_ymd_and_hms(2026, 9, 1, 12, 0, 0).unwrap());
        clock
    }

    #[rstest]
    fn accepts_ordered_pair(clock: MockClock) {
        let values = check_create(
            &rules(Requirement::Both, false),
            Some("2026-09-10T14:00:00Z"),
            Some("2026-09-14T10:00:00Z"),
            &clock,
        )
        .expect("ordered pair is valid");
        assert!(values.start.is_some());
        assert!(values.end.is_some());
    }

    #[rstest]
    fn rejects_backwards_pair_naming_both_fields(clock: MockClock) {
        let err = check_create(
            &rules(Requirement::Both, false),
            Some("2026-09-14T10:00:00Z"),
            Some("2026-09-10T14:00:00Z"),
            &clock,
        )
        .expect_err("backwards pair must fail");
        let details = err.details().expect("details attached");
        assert_eq!(details["code"], CODE_BACKWARDS_RANGE);
        assert_eq!(details["fields"][0], "checkIn");
        assert_eq!(details["fields"][1], "checkOut");
    }

    #[rstest]
    #[case(false, false)]
    #[case(true, true)]
    fn equal_bounds_follow_allow_equal(
        clock: MockClock,
        #[case] allow_equal: bool,
        #[case] accepted: bool,
    ) {
        let outcome = check_create(
            &rules(Requirement::Both, allow_equal),
            Some("2026-09-10T14:00:00Z"),
            Some("2026-09-10T14:00:00Z"),
            &clock,
        );
        assert_eq!(outcome.is_ok(), accepted);
    }

    #[rstest]
    fn both_mode_rejects_missing_end(clock: MockClock) {
        let err = check_create(
            &rules(Requirement::Both, false),
            Some("2026-09-10T14:00:00Z"),
            None,
            &clock,
        )
        .expect_err("missing end must fail");
        let details = err.details().expect("details attached");
        assert_eq!(details["field"], "checkOut");
    }

    #[rstest]
    fn unparsable_start_names_the_field(clock: MockClock) {
        let err = check_create(
            &rules(Requirement::Both, false),
            Some("not a date"),
            Some("2026-09-10T14:00:00Z"),
            &clock,
        )
        .expect_err("unparsable start must fail");
        let details = err.details().expect("details attached");
        assert_eq!(details["field"], "checkIn");
        assert_eq!(details["code"], coerce::CODE_INVALID_DATE);
    }

    #[rstest]
    fn advance_notice_uses_injected_clock(clock: MockClock) {
        let mut rules = rules(Requirement::Both, false);
        rules.min_hours_before_start = Some(48);

        let err = check_create(
            &rules,
            Some("2026-09-02T12:00:00Z"),
            Some("2026-09-14T10:00:00Z"),
            &clock,
        )
        .expect_err("24 hours of notice is below the 48 hour floor");
        let details = err.details().expect("details attached");
        assert_eq!(details["code"], CODE_INSUFFICIENT_NOTICE);

        check_create(
            &rules,
            Some("2026-09-04T12:00:00Z"),
            Some("2026-09-14T10:00:00Z"),
            &clock,
        )
        .expect("72 hours of notice clears the floor");
    }

    #[rstest]
    fn zero_notice_degrades_to_not_in_past(clock: MockClock) {
        let mut rules = rules(Requirement::Both, false);
        rules.min_hours_before_start = Some(0);

        let err = check_create(
            &rules,
            Some("2026-08-31T12:00:00Z"),
            Some("2026-09-14T10:00:00Z"),
            &clock,
        )
        .expect_err("past start must fail");
        assert!(err.message().contains("must not be in the past"));
    }

    #[rstest]
    fn update_merges_current_values_before_the_pair_check(clock: MockClock) {
        let current_start = Utc.with_ymd_and_hms(2026, 9, 10, 14, 0, 0).unwrap();

        let err = check_update(
            &rules(Requirement::Both, false),
            None,
            Some("2026-09-09T10:00:00Z"),
            Some(current_start),
            Some(Utc.with_ymd_and_hms(2026, 9, 14, 10, 0, 0).unwrap()),
            &clock,
        )
        .expect_err("new end before persisted start must fail");
        let details = err.details().expect("details attached");
        assert_eq!(details["code"], CODE_BACKWARDS_RANGE);

        let values = check_update(
            &rules(Requirement::Both, false),
            None,
            Some("2026-09-12T10:00:00Z"),
            Some(current_start),
            Some(Utc.with_ymd_and_hms(2026, 9, 14, 10, 0, 0).unwrap()),
            &clock,
        )
        .expect("end after persisted start is valid");
        assert_eq!(values.start, None);
        assert!(values.end.is_some());
    }
}

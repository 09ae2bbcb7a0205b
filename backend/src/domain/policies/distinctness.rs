//! Origin/destination distinctness policy.
//!
//! Asserts that two location fields differ after normalization. The update
//! variant merges with persisted current values, so changing only one side
//! of the pair still validates the effective combination.

use serde_json::json;

use crate::domain::policies::{coerce, Requirement};
use crate::domain::DomainError;

/// Detail code attached when the two normalized values are equal.
pub const CODE_NOT_DISTINCT: &str = "not_distinct";

/// Configuration for one resource's distinctness check.
#[derive(Debug, Clone, Copy)]
pub struct DistinctnessRules {
    /// Payload label of the first field, used in error details.
    pub a_field: &'static str,
    /// Payload label of the second field, used in error details.
    pub b_field: &'static str,
    /// Presence mode for the pair.
    pub requirement: Requirement,
    /// Trim surrounding whitespace before comparing.
    pub trim: bool,
    /// Fold case before comparing.
    pub ignore_case: bool,
    /// Accept equal values when set, which disables the comparison.
    pub allow_equal: bool,
}

/// Coerced values for the fields the payload actually supplied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DistinctValues {
    /// Coerced first value, when supplied.
    pub a: Option<String>,
    /// Coerced second value, when supplied.
    pub b: Option<String>,
}

/// Validate a create payload's location pair.
pub fn check_create(
    rules: &DistinctnessRules,
    raw_a: Option<&str>,
    raw_b: Option<&str>,
) -> Result<DistinctValues, DomainError> {
    check(rules, raw_a, raw_b, None, None)
}

/// Validate an update payload's location pair against the persisted current
/// values.
pub fn check_update(
    rules: &DistinctnessRules,
    raw_a: Option<&str>,
    raw_b: Option<&str>,
    current_a: Option<&str>,
    current_b: Option<&str>,
) -> Result<DistinctValues, DomainError> {
    check(rules, raw_a, raw_b, current_a, current_b)
}

fn check(
    rules: &DistinctnessRules,
    raw_a: Option<&str>,
    raw_b: Option<&str>,
    current_a: Option<&str>,
    current_b: Option<&str>,
) -> Result<DistinctValues, DomainError> {
    let supplied_a = raw_a
        .map(|raw| coerce::text(rules.a_field, raw))
        .transpose()?;
    let supplied_b = raw_b
        .map(|raw| coerce::text(rules.b_field, raw))
        .transpose()?;

    let effective_a = supplied_a.as_deref().or(current_a);
    let effective_b = supplied_b.as_deref().or(current_b);

    rules.requirement.check(
        (rules.a_field, effective_a.is_some()),
        (rules.b_field, effective_b.is_some()),
    )?;

    if !rules.allow_equal {
        if let (Some(a), Some(b)) = (effective_a, effective_b) {
            if normalize(rules, a) == normalize(rules, b) {
                return Err(DomainError::invalid_request(format!(
                    "{} and {} must differ",
                    rules.a_field, rules.b_field
                ))
                .with_details(json!({
                    "fields": [rules.a_field, rules.b_field],
                    "code": CODE_NOT_DISTINCT,
                    "value": normalize(rules, a),
                })));
            }
        }
    }

    Ok(DistinctValues {
        a: supplied_a,
        b: supplied_b,
    })
}

fn normalize(rules: &DistinctnessRules, value: &str) -> String {
    let trimmed = if rules.trim { value.trim() } else { value };
    if rules.ignore_case {
        trimmed.to_lowercase()
    } else {
        trimmed.to_owned()
    }
}

//! Price-pair policy.
//!
//! Asserts presence, coercibility, and `paid <= total` for a pair of raw
//! monetary fields. The update variant defaults absent fields to the
//! persisted current pair before the comparison runs.

use rust_decimal::Decimal;
use serde_json::json;

use crate::domain::policies::{coerce, Requirement};
use crate::domain::DomainError;

/// Detail code attached when `paid` exceeds `total`.
pub const CODE_PAID_EXCEEDS_TOTAL: &str = "paid_exceeds_total";

/// Configuration for one resource's price-pair check.
#[derive(Debug, Clone, Copy)]
pub struct PricePairRules {
    /// Payload label of the total field, used in error details.
    pub total_field: &'static str,
    /// Payload label of the paid field, used in error details.
    pub paid_field: &'static str,
    /// Presence mode for the pair.
    pub requirement: Requirement,
}

/// Coerced values for the fields the payload actually supplied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PricePairValues {
    /// Coerced total, when supplied.
    pub total: Option<Decimal>,
    /// Coerced paid amount, when supplied.
    pub paid: Option<Decimal>,
}

/// Validate a create payload's price pair.
pub fn check_create(
    rules: &PricePairRules,
    raw_total: Option<&str>,
    raw_paid: Option<&str>,
) -> Result<PricePairValues, DomainError> {
    check(rules, raw_total, raw_paid, None, None)
}

/// Validate an update payload's price pair, defaulting absent fields to the
/// persisted current values.
pub fn check_update(
    rules: &PricePairRules,
    raw_total: Option<&str>,
    raw_paid: Option<&str>,
    current_total: Decimal,
    current_paid: Decimal,
) -> Result<PricePairValues, DomainError> {
    check(rules, raw_total, raw_paid, Some(current_total), Some(current_paid))
}

fn check(
    rules: &PricePairRules,
    raw_total: Option<&str>,
    raw_paid: Option<&str>,
    current_total: Option<Decimal>,
    current_paid: Option<Decimal>,
) -> Result<PricePairValues, DomainError> {
    let supplied_total = raw_total
        .map(|raw| coerce::amount(rules.total_field, raw))
        .transpose()?;
    let supplied_paid = raw_paid
        .map(|raw| coerce::amount(rules.paid_field, raw))
        .transpose()?;

    let effective_total = supplied_total.or(current_total);
    let effective_paid = supplied_paid.or(current_paid);

    rules.requirement.check(
        (rules.total_field, effective_total.is_some()),
        (rules.paid_field, effective_paid.is_some()),
    )?;

    if let (Some(total), Some(paid)) = (effective_total, effective_paid) {
        if paid > total {
            return Err(DomainError::invalid_request(format!(
                "{} must not exceed {}",
                rules.paid_field, rules.total_field
            ))
            .with_details(json!({
                "fields": [rules.total_field, rules.paid_field],
                "code": CODE_PAID_EXCEEDS_TOTAL,
                "total": total.to_string(),
                "paid": paid.to_string(),
            })));
        }
    }

    Ok(PricePairValues {
        total: supplied_total,
        paid: supplied_paid,
    })
}

//! Stateless validation policies asserted before any persistence occurs.
//!
//! Policies are pure: they coerce raw payload fields, assert invariants on
//! the effective values, and return the coerced values for downstream use.
//! A failure aborts the operation before a transaction opens.

pub mod coerce;
pub mod date_range;
pub mod distinctness;
pub mod documents;
pub mod price_pair;

use serde_json::json;

use crate::domain::DomainError;

/// Presence mode governing how many of a policy's two fields must be
/// supplied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Requirement {
    /// Both fields must be present.
    Both,
    /// At least one field must be present.
    Any,
    /// No presence constraint.
    None,
}

impl Requirement {
    /// Assert the presence mode against two labelled fields.
    ///
    /// `a` and `b` pair each field's label with whether an effective value is
    /// available for it.
    pub(crate) fn check(
        self,
        a: (&str, bool),
        b: (&str, bool),
    ) -> Result<(), DomainError> {
        let (a_field, a_present) = a;
        let (b_field, b_present) = b;
        match self {
            Self::Both => {
                if !a_present {
                    return Err(coerce::missing_field(a_field));
                }
                if !b_present {
                    return Err(coerce::missing_field(b_field));
                }
                Ok(())
            }
            Self::Any => {
                if a_present || b_present {
                    Ok(())
                } else {
                    Err(DomainError::invalid_request(format!(
                        "either {a_field} or {b_field} is required"
                    ))
                    .with_details(json!({
                        "fields": [a_field, b_field],
                        "code": coerce::CODE_MISSING_FIELD,
                    })))
                }
            }
            Self::None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(Requirement::Both, true, true, true)]
    #[case(Requirement::Both, true, false, false)]
    #[case(Requirement::Both, false, true, false)]
    #[case(Requirement::Any, true, false, true)]
    #[case(Requirement::Any, false, true, true)]
    #[case(Requirement::Any, false, false, false)]
    #[case(Requirement::None, false, false, true)]
    fn presence_modes(
        #[case] requirement: Requirement,
        #[case] a_present: bool,
        #[case] b_present: bool,
        #[case] accepted: bool,
    ) {
        let outcome = requirement.check(("start", a_present), ("end", b_present));
        assert_eq!(outcome.is_ok(), accepted);
    }

    #[rstest]
    fn both_mode_names_the_missing_field() {
        let err = Requirement::Both
            .check(("checkIn", false), ("checkOut", true))
            .expect_err("missing field must fail");
        let details = err.details().expect("details attached");
        assert_eq!(details["field"], "checkIn");
    }
}

//! Passenger document policy.
//!
//! A passenger must carry at least one identity document (DNI or passport)
//! at creation. An expiration without its number is always invalid; a number
//! without an expiration is fine. Updates only re-check the pairing rule for
//! the document fields the payload actually supplied.

use chrono::NaiveDate;
use serde_json::json;

use crate::domain::policies::coerce;
use crate::domain::DomainError;

/// Detail code attached when neither document is supplied at creation.
pub const CODE_MISSING_DOCUMENT: &str = "missing_document";
/// Detail code attached when an expiration arrives without its number.
pub const CODE_EXPIRATION_WITHOUT_NUMBER: &str = "expiration_without_number";

/// Raw document fields as supplied by the payload.
#[derive(Debug, Clone, Copy, Default)]
pub struct DocumentInput<'a> {
    /// Payload label of the number field, used in error details.
    pub number_field: &'static str,
    /// Payload label of the expiration field, used in error details.
    pub expiration_field: &'static str,
    /// Raw document number, when supplied.
    pub number: Option<&'a str>,
    /// Raw expiration date, when supplied.
    pub expiration: Option<&'a str>,
}

/// Coerced document fields the payload actually supplied.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DocumentValues {
    /// Coerced number, when supplied.
    pub number: Option<String>,
    /// Coerced expiration, when supplied.
    pub expiration: Option<NaiveDate>,
}

/// Validate a create payload's documents, requiring at least one number.
pub fn check_create(
    dni: DocumentInput<'_>,
    passport: DocumentInput<'_>,
) -> Result<(DocumentValues, DocumentValues), DomainError> {
    let dni_values = check_pairing(dni)?;
    let passport_values = check_pairing(passport)?;

    if dni_values.number.is_none() && passport_values.number.is_none() {
        return Err(DomainError::invalid_request(
            "a passenger needs at least one identity document",
        )
        .with_details(json!({
            "fields": [dni.number_field, passport.number_field],
            "code": CODE_MISSING_DOCUMENT,
        })));
    }

    Ok((dni_values, passport_values))
}

/// Validate an update payload's documents.
///
/// The at-least-one-document rule was satisfied at creation and is not
/// re-triggered by omitted fields; only the supplied fields are checked.
pub fn check_update(
    dni: DocumentInput<'_>,
    passport: DocumentInput<'_>,
) -> Result<(DocumentValues, DocumentValues), DomainError> {
    Ok((check_pairing(dni)?, check_pairing(passport)?))
}

fn check_pairing(input: DocumentInput<'_>) -> Result<DocumentValues, DomainError> {
    let number = coerce::optional_text(input.number_field, input.number)?;
    let expiration = input
        .expiration
        .map(|raw| coerce::calendar_date(input.expiration_field, raw))
        .transpose()?;

    if expiration.is_some() && number.is_none() {
        return Err(DomainError::invalid_request(format!(
            "{} requires {}",
            input.expiration_field, input.number_field
        ))
        .with_details(json!({
            "field": input.expiration_field,
            "code": CODE_EXPIRATION_WITHOUT_NUMBER,
        })));
    }

    Ok(DocumentValues { number, expiration })
}

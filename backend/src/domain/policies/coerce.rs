//! Coercion helpers turning loosely-typed textual input into canonical
//! comparable values.
//!
//! Every policy funnels raw payload fields through these helpers so a failed
//! coercion always carries the offending field name in its structured
//! details.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde_json::json;

use crate::domain::money::Currency;
use crate::domain::DomainError;

/// Detail code attached when a required field is absent.
pub const CODE_MISSING_FIELD: &str = "missing_field";
/// Detail code attached when a present field is blank once trimmed.
pub const CODE_BLANK_VALUE: &str = "blank_value";
/// Detail code attached when a date fails to parse.
pub const CODE_INVALID_DATE: &str = "invalid_date";
/// Detail code attached when an amount fails to parse.
pub const CODE_INVALID_AMOUNT: &str = "invalid_amount";
/// Detail code attached when a currency code is malformed.
pub const CODE_INVALID_CURRENCY: &str = "invalid_currency";

/// Build an `invalid_request` error naming the offending field.
pub fn field_error(
    field: &str,
    code: &str,
    value: Option<&str>,
    message: impl Into<String>,
) -> DomainError {
    DomainError::invalid_request(message).with_details(json!({
        "field": field,
        "code": code,
        "value": value,
    }))
}

/// Error for a field that a presence mode requires but the payload omitted.
pub fn missing_field(field: &str) -> DomainError {
    field_error(
        field,
        CODE_MISSING_FIELD,
        None,
        format!("{field} is required"),
    )
}

/// Coerce a present raw value into a trimmed, non-empty string.
pub fn text(field: &str, raw: &str) -> Result<String, DomainError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(field_error(
            field,
            CODE_BLANK_VALUE,
            Some(raw),
            format!("{field} must not be blank"),
        ));
    }
    Ok(trimmed.to_owned())
}

/// Coerce an optional raw value, treating absence as `None`.
pub fn optional_text(field: &str, raw: Option<&str>) -> Result<Option<String>, DomainError> {
    raw.map(|value| text(field, value)).transpose()
}

/// Coerce a field the payload must supply into a trimmed, non-empty string.
pub fn required_text(field: &str, raw: Option<&str>) -> Result<String, DomainError> {
    text(field, raw.ok_or_else(|| missing_field(field))?)
}

/// Coerce a raw value into a UTC instant.
///
/// Accepts RFC 3339 timestamps and bare `YYYY-MM-DD` dates, which resolve to
/// midnight UTC.
pub fn date_time(field: &str, raw: &str) -> Result<DateTime<Utc>, DomainError> {
    let trimmed = raw.trim();
    if let Ok(parsed) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(parsed.with_timezone(&Utc));
    }
    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        return Ok(date.and_time(chrono::NaiveTime::MIN).and_utc());
    }
    Err(field_error(
        field,
        CODE_INVALID_DATE,
        Some(raw),
        format!("{field} must be an ISO 8601 date"),
    ))
}

/// Coerce a raw value into a calendar date (`YYYY-MM-DD`).
pub fn calendar_date(field: &str, raw: &str) -> Result<NaiveDate, DomainError> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d").map_err(|_| {
        field_error(
            field,
            CODE_INVALID_DATE,
            Some(raw),
            format!("{field} must be a YYYY-MM-DD date"),
        )
    })
}

/// Coerce a raw value into a finite decimal amount.
///
/// A comma decimal separator is tolerated when the value carries no dot, so
/// `"1234,56"` parses as `1234.56`.
pub fn amount(field: &str, raw: &str) -> Result<Decimal, DomainError> {
    let trimmed = raw.trim();
    let normalized = if trimmed.contains(',') && !trimmed.contains('.') {
        trimmed.replace(',', ".")
    } else {
        trimmed.to_owned()
    };

    normalized.parse::<Decimal>().map_err(|_| {
        field_error(
            field,
            CODE_INVALID_AMOUNT,
            Some(raw),
            format!("{field} must be a decimal amount"),
        )
    })
}

/// Coerce a raw value into a validated currency code.
pub fn currency(field: &str, raw: &str) -> Result<Currency, DomainError> {
    Currency::new(raw).map_err(|err| {
        field_error(field, CODE_INVALID_CURRENCY, Some(raw), err.to_string())
    })
}

/// Unwrap a value a presence mode has already guaranteed.
///
/// Reaching the `None` arm means a policy was mis-configured, which is an
/// internal fault rather than a client error.
pub fn expect_present<T>(field: &str, value: Option<T>) -> Result<T, DomainError> {
    value.ok_or_else(|| DomainError::internal(format!("{field} missing after presence check")))
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use chrono::TimeZone;
    use rstest::rstest;

    #[rstest]
    #[case("  Palma  ", "Palma")]
    #[case("Madrid", "Madrid")]
    fn text_trims_input(#[case] raw: &str, #[case] expected: &str) {
        assert_eq!(text("origin", raw).expect("valid text"), expected);
    }

    #[rstest]
    fn text_rejects_blank_input() {
        let err = text("origin", "   ").expect_err("blank text must fail");
        let details = err.details().expect("details attached");
        assert_eq!(details["field"], "origin");
        assert_eq!(details["code"], CODE_BLANK_VALUE);
    }

    #[rstest]
    fn date_time_parses_rfc3339() {
        let parsed = date_time("checkIn", "2026-09-01T12:30:00Z").expect("valid timestamp");
        assert_eq!(parsed, Utc.with_ymd_and_hms(2026, 9, 1, 12, 30, 0).unwrap());
    }

    #[rstest]
    fn date_time_parses_bare_dates_as_midnight() {
        let parsed = date_time("checkIn", "2026-09-01").expect("valid date");
        assert_eq!(parsed, Utc.with_ymd_and_hms(2026, 9, 1, 0, 0, 0).unwrap());
    }

    #[rstest]
    #[case("next tuesday")]
    #[case("01/09/2026")]
    #[case("")]
    fn date_time_rejects_unparsable_input(#[case] raw: &str) {
        let err = date_time("checkIn", raw).expect_err("unparsable dates must fail");
        let details = err.details().expect("details attached");
        assert_eq!(details["code"], CODE_INVALID_DATE);
    }

    #[rstest]
    #[case("100", "100")]
    #[case("100.50", "100.50")]
    #[case("1234,56", "1234.56")]
    #[case("  -40 ", "-40")]
    fn amount_tolerates_comma_separator(#[case] raw: &str, #[case] expected: &str) {
        let parsed = amount("totalPrice", raw).expect("valid amount");
        assert_eq!(parsed, expected.parse::<Decimal>().expect("literal"));
    }

    #[rstest]
    #[case("abc")]
    #[case("1.2.3")]
    #[case("")]
    fn amount_rejects_unparsable_input(#[case] raw: &str) {
        let err = amount("totalPrice", raw).expect_err("unparsable amounts must fail");
        let details = err.details().expect("details attached");
        assert_eq!(details["code"], CODE_INVALID_AMOUNT);
        assert_eq!(details["field"], "totalPrice");
    }

    #[rstest]
    fn currency_reports_field_in_details() {
        let err = currency("currency", "EURO").expect_err("invalid code must fail");
        let details = err.details().expect("details attached");
        assert_eq!(details["code"], CODE_INVALID_CURRENCY);
    }

    #[rstest]
    fn expect_present_flags_internal_faults() {
        let err = expect_present::<i32>("checkIn", None).expect_err("must fail");
        assert_eq!(err.code(), crate::domain::ErrorCode::InternalError);
    }
}

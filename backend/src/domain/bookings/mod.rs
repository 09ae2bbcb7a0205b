//! Bookable service records.
//!
//! Seven resource kinds share one orchestration shape: raw payload in,
//! policy-validated values out, with monetary fields feeding the parent
//! reservation's aggregate. Each kind implements [`BookingResource`] and the
//! generic service and repositories are written against that trait, so the
//! merge-then-validate step exists exactly once.

pub mod car_rental;
pub mod cruise;
pub mod excursion;
pub mod flight;
pub mod hotel;
pub mod medical_assist;
pub mod transfer;

use std::fmt;

use mockable::Clock;
use rust_decimal::Decimal;
use serde_json::json;
use uuid::Uuid;

use crate::domain::money::BookingMoney;
use crate::domain::policies::price_pair::{self, PricePairRules};
use crate::domain::policies::{coerce, Requirement};
use crate::domain::DomainError;

/// Detail code attached when an update tries to change a record's currency.
pub const CODE_CURRENCY_IMMUTABLE: &str = "currency_immutable";

const CREATE_PRICE_RULES: PricePairRules = PricePairRules {
    total_field: "totalPrice",
    paid_field: "amountPaid",
    requirement: Requirement::Both,
};

const UPDATE_PRICE_RULES: PricePairRules = PricePairRules {
    total_field: "totalPrice",
    paid_field: "amountPaid",
    requirement: Requirement::None,
};

/// Behaviour every persisted booking row exposes to the generic service.
pub trait BookingRecord: fmt::Debug + Clone + Send + Sync + 'static {
    /// Stable identifier of the row.
    fn id(&self) -> Uuid;
    /// Parent reservation the row belongs to.
    fn reservation_id(&self) -> Uuid;
}

/// One bookable service kind.
///
/// `Payload` carries raw transport-layer strings and serves both create and
/// update; `New` and `Changes` are the validated shapes handed to storage.
pub trait BookingResource: Send + Sync + 'static {
    /// Singular human-readable kind name, used in error messages and logs.
    const KIND: &'static str;

    /// Persisted row shape served back to clients.
    type Record: BookingRecord;
    /// Raw payload fields as supplied by the transport layer.
    type Payload: Send + Sync;
    /// Validated insert payload.
    type New: Send;
    /// Validated partial-update payload.
    type Changes: Send;

    /// Validate a raw create payload into a typed insert.
    fn validate_create(
        payload: &Self::Payload,
        clock: &dyn Clock,
    ) -> Result<Self::New, DomainError>;

    /// Validate a raw update payload against the persisted current row.
    ///
    /// Fields the payload omitted fall back to `current` for the pair checks
    /// and are absent from the returned changes, so storage leaves them
    /// untouched.
    fn validate_update(
        payload: &Self::Payload,
        current: &Self::Record,
        clock: &dyn Clock,
    ) -> Result<Self::Changes, DomainError>;
}

/// Raw monetary fields shared by every booking payload.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MoneyPayload {
    /// Raw currency code.
    pub currency: Option<String>,
    /// Raw total price.
    pub total_price: Option<String>,
    /// Raw amount paid.
    pub amount_paid: Option<String>,
}

/// Validated monetary changes an update payload supplied.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MoneyChanges {
    /// New total, when supplied.
    pub total_price: Option<Decimal>,
    /// New paid amount, when supplied.
    pub amount_paid: Option<Decimal>,
}

impl MoneyChanges {
    /// Whether the payload supplied no monetary fields.
    pub fn is_empty(&self) -> bool {
        self.total_price.is_none() && self.amount_paid.is_none()
    }
}

/// Validate a create payload's monetary fields, all of which are required.
pub fn money_on_create(payload: &MoneyPayload) -> Result<BookingMoney, DomainError> {
    let currency = coerce::currency(
        "currency",
        payload
            .currency
            .as_deref()
            .ok_or_else(|| coerce::missing_field("currency"))?,
    )?;
    let values = price_pair::check_create(
        &CREATE_PRICE_RULES,
        payload.total_price.as_deref(),
        payload.amount_paid.as_deref(),
    )?;
    let total_price = coerce::expect_present("totalPrice", values.total)?;
    let amount_paid = coerce::expect_present("amountPaid", values.paid)?;

    Ok(BookingMoney::new(currency, total_price, amount_paid))
}

/// Validate an update payload's monetary fields against the persisted row.
///
/// The currency is immutable after creation; changing it would make the
/// record's past aggregate contributions unattributable.
pub fn money_on_update(
    payload: &MoneyPayload,
    current: &BookingMoney,
) -> Result<MoneyChanges, DomainError> {
    if let Some(raw) = payload.currency.as_deref() {
        let supplied = coerce::currency("currency", raw)?;
        if supplied != current.currency {
            return Err(DomainError::invalid_request(
                "currency cannot change after creation",
            )
            .with_details(json!({
                "field": "currency",
                "code": CODE_CURRENCY_IMMUTABLE,
                "current": current.currency.as_ref(),
                "value": supplied.as_ref(),
            })));
        }
    }

    let values = price_pair::check_update(
        &UPDATE_PRICE_RULES,
        payload.total_price.as_deref(),
        payload.amount_paid.as_deref(),
        current.total_price,
        current.amount_paid,
    )?;

    Ok(MoneyChanges {
        total_price: values.total,
        amount_paid: values.paid,
    })
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use crate::domain::money::Currency;
    use crate::domain::policies::price_pair::CODE_PAID_EXCEEDS_TOTAL;
    use rstest::rstest;

    fn payload(currency: Option<&str>, total: Option<&str>, paid: Option<&str>) -> MoneyPayload {
        MoneyPayload {
            currency: currency.map(str::to_owned),
            total_price: total.map(str::to_owned),
            amount_paid: paid.map(str::to_owned),
        }
    }

    fn current() -> BookingMoney {
        BookingMoney::new(
            Currency::new("EUR").expect("EUR is a valid code"),
            "100".parse().expect("literal"),
            "40".parse().expect("literal"),
        )
    }

    #[rstest]
    fn create_requires_every_monetary_field() {
        let err = money_on_create(&payload(None, Some("100"), Some("40")))
            .expect_err("missing currency must fail");
        let details = err.details().expect("details attached");
        assert_eq!(details["field"], "currency");

        let err = money_on_create(&payload(Some("EUR"), Some("100"), None))
            .expect_err("missing paid must fail");
        let details = err.details().expect("details attached");
        assert_eq!(details["field"], "amountPaid");
    }

    #[rstest]
    fn create_folds_currency_case() {
        let money = money_on_create(&payload(Some("eur"), Some("100"), Some("40")))
            .expect("valid payload");
        assert_eq!(money.currency.as_ref(), "EUR");
    }

    #[rstest]
    fn update_accepts_the_unchanged_currency() {
        let changes = money_on_update(&payload(Some(" eur "), Some("150"), None), &current())
            .expect("restating the currency is valid");
        assert_eq!(changes.total_price, Some("150".parse().expect("literal")));
        assert_eq!(changes.amount_paid, None);
    }

    #[rstest]
    fn update_rejects_a_currency_change() {
        let err = money_on_update(&payload(Some("USD"), None, None), &current())
            .expect_err("changing the currency must fail");
        let details = err.details().expect("details attached");
        assert_eq!(details["code"], CODE_CURRENCY_IMMUTABLE);
        assert_eq!(details["current"], "EUR");
        assert_eq!(details["value"], "USD");
    }

    #[rstest]
    fn update_checks_the_pair_against_persisted_values() {
        let err = money_on_update(&payload(None, None, Some("150")), &current())
            .expect_err("paid above the persisted total must fail");
        let details = err.details().expect("details attached");
        assert_eq!(details["code"], CODE_PAID_EXCEEDS_TOTAL);
    }

    #[rstest]
    fn empty_update_is_detectable() {
        let changes =
            money_on_update(&MoneyPayload::default(), &current()).expect("empty payload is valid");
        assert!(changes.is_empty());
    }
}

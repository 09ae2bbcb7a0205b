//! Monetary value types shared by reservations and their bookable services.
//!
//! Amounts are `rust_decimal::Decimal` throughout so arithmetic on prices is
//! exact. Aggregate maintenance works in signed deltas, never recomputation.

use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Validation errors returned by [`Currency::new`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CurrencyValidationError {
    Empty,
    InvalidCode,
}

impl fmt::Display for CurrencyValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "currency must not be empty"),
            Self::InvalidCode => {
                write!(f, "currency must be a three-letter ISO 4217 code")
            }
        }
    }
}

impl std::error::Error for CurrencyValidationError {}

/// Upper-cased three-letter currency code.
///
/// ## Invariants
/// - Exactly three ASCII letters, stored upper-cased.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Currency(String);

impl Currency {
    /// Validate and construct a [`Currency`] from raw input.
    ///
    /// Leading and trailing whitespace is tolerated and the code is folded to
    /// upper case so `"eur"` and `" EUR "` compare equal.
    pub fn new(code: impl AsRef<str>) -> Result<Self, CurrencyValidationError> {
        let trimmed = code.as_ref().trim();
        if trimmed.is_empty() {
            return Err(CurrencyValidationError::Empty);
        }
        if trimmed.len() != 3 || !trimmed.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(CurrencyValidationError::InvalidCode);
        }
        Ok(Self(trimmed.to_ascii_uppercase()))
    }
}

impl AsRef<str> for Currency {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

impl From<Currency> for String {
    fn from(value: Currency) -> Self {
        value.0
    }
}

impl TryFrom<String> for Currency {
    type Error = CurrencyValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// The `(currency, total, paid)` triple every bookable service row carries.
///
/// ## Invariants
/// - `amount_paid <= total_price`, enforced by the price-pair policy before a
///   value of this type reaches storage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookingMoney {
    /// Currency the amounts are denominated in.
    pub currency: Currency,
    /// Full price of the booked service.
    pub total_price: Decimal,
    /// Amount already paid against the total.
    pub amount_paid: Decimal,
}

impl BookingMoney {
    /// Build a money triple from validated components.
    pub fn new(currency: Currency, total_price: Decimal, amount_paid: Decimal) -> Self {
        Self {
            currency,
            total_price,
            amount_paid,
        }
    }

    /// Positive delta applied to the parent aggregate when this record is
    /// created.
    pub fn as_creation_delta(&self) -> AggregateDelta {
        AggregateDelta {
            currency: self.currency.clone(),
            total: self.total_price,
            paid: self.amount_paid,
        }
    }

    /// Negative delta applied to the parent aggregate when this record is
    /// deleted.
    pub fn as_removal_delta(&self) -> AggregateDelta {
        AggregateDelta {
            currency: self.currency.clone(),
            total: -self.total_price,
            paid: -self.amount_paid,
        }
    }

    /// Delta moving the parent aggregate from `old` to `self`.
    ///
    /// Fields the caller left untouched contribute zero, so a no-op update
    /// produces a zero delta and the adjuster only stamps the audit fields.
    pub fn delta_from(&self, old: &Self) -> AggregateDelta {
        AggregateDelta {
            currency: self.currency.clone(),
            total: self.total_price - old.total_price,
            paid: self.amount_paid - old.amount_paid,
        }
    }
}

/// Signed adjustment applied to a reservation's running totals.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AggregateDelta {
    /// Currency scope for the per-currency aggregate table.
    pub currency: Currency,
    /// Signed change to the running total price.
    pub total: Decimal,
    /// Signed change to the running amount paid.
    pub paid: Decimal,
}

impl AggregateDelta {
    /// Whether both components are zero.
    ///
    /// A zero delta still counts as a touch on the parent reservation; only
    /// the atomic increments are skipped.
    pub fn is_zero(&self) -> bool {
        self.total.is_zero() && self.paid.is_zero()
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use rstest::rstest;
    use rust_decimal::Decimal;

    fn eur() -> Currency {
        Currency::new("EUR").expect("EUR is a valid code")
    }

    fn dec(raw: &str) -> Decimal {
        raw.parse().expect("test literals parse")
    }

    #[rstest]
    #[case("EUR", "EUR")]
    #[case("usd", "USD")]
    #[case(" gbp ", "GBP")]
    fn currency_normalizes_case_and_whitespace(#[case] raw: &str, #[case] expected: &str) {
        let currency = Currency::new(raw).expect("valid code");
        assert_eq!(currency.as_ref(), expected);
    }

    #[rstest]
    #[case("", CurrencyValidationError::Empty)]
    #[case("   ", CurrencyValidationError::Empty)]
    #[case("EU", CurrencyValidationError::InvalidCode)]
    #[case("EURO", CurrencyValidationError::InvalidCode)]
    #[case("E1R", CurrencyValidationError::InvalidCode)]
    fn currency_rejects_malformed_codes(
        #[case] raw: &str,
        #[case] expected: CurrencyValidationError,
    ) {
        let err = Currency::new(raw).expect_err("malformed codes must fail");
        assert_eq!(err, expected);
    }

    #[rstest]
    fn creation_and_removal_deltas_mirror_each_other() {
        let money = BookingMoney::new(eur(), dec("100"), dec("40"));

        let created = money.as_creation_delta();
        assert_eq!(created.total, dec("100"));
        assert_eq!(created.paid, dec("40"));

        let removed = money.as_removal_delta();
        assert_eq!(removed.total, dec("-100"));
        assert_eq!(removed.paid, dec("-40"));
    }

    #[rstest]
    fn delta_from_computes_new_minus_old() {
        let old = BookingMoney::new(eur(), dec("100"), dec("40"));
        let new = BookingMoney::new(eur(), dec("150"), dec("40"));

        let delta = new.delta_from(&old);
        assert_eq!(delta.total, dec("50"));
        assert_eq!(delta.paid, dec("0"));
        assert!(!delta.is_zero());
    }

    #[rstest]
    fn unchanged_money_yields_zero_delta() {
        let money = BookingMoney::new(eur(), dec("80"), dec("80"));
        let delta = money.delta_from(&money.clone());
        assert!(delta.is_zero());
    }

    #[rstest]
    fn round_trip_nets_to_zero() {
        let created = BookingMoney::new(eur(), dec("100"), dec("40"));
        let updated = BookingMoney::new(eur(), dec("150"), dec("40"));

        let net = created.as_creation_delta().total + updated.delta_from(&created).total
            + updated.as_removal_delta().total;
        assert_eq!(net, Decimal::ZERO);
    }
}

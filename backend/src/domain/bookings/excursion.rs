//! Excursion bookings.
//!
//! Excursions only need one known bound; a bare start or a bare end is
//! enough to place them on an itinerary, and instantaneous activities with
//! `starts_at == ends_at` are fine.

use chrono::{DateTime, Utc};
use mockable::Clock;
use rust_decimal::Decimal;
use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::bookings::{
    money_on_create, money_on_update, BookingRecord, BookingResource, MoneyChanges, MoneyPayload,
};
use crate::domain::money::{BookingMoney, Currency};
use crate::domain::policies::date_range::{self, DateRangeRules};
use crate::domain::policies::{coerce, Requirement};
use crate::domain::DomainError;

const DATE_RULES: DateRangeRules = DateRangeRules {
    start_field: "startsAt",
    end_field: "endsAt",
    requirement: Requirement::Any,
    allow_equal: true,
    min_hours_before_start: None,
};

/// Excursion row as served to clients.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Excursion {
    /// Stable identifier.
    pub id: Uuid,
    /// Parent reservation.
    pub reservation_id: Uuid,
    /// Activity name.
    pub name: String,
    /// Meeting point or venue, when known.
    pub location: Option<String>,
    /// Start instant, when known.
    pub starts_at: Option<DateTime<Utc>>,
    /// End instant, when known.
    pub ends_at: Option<DateTime<Utc>>,
    /// Supplier booking reference, when issued.
    pub booking_reference: Option<String>,
    /// Currency the amounts are denominated in.
    #[schema(value_type = String, example = "EUR")]
    pub currency: Currency,
    /// Full price of the excursion.
    pub total_price: Decimal,
    /// Amount already paid.
    pub amount_paid: Decimal,
    /// Actor who created the row.
    pub created_by: Uuid,
    /// Actor who last modified the row.
    pub updated_by: Uuid,
    /// Creation instant.
    pub created_at: DateTime<Utc>,
    /// Last modification instant.
    pub updated_at: DateTime<Utc>,
}

impl Excursion {
    /// Monetary triple carried by this row.
    pub fn money(&self) -> BookingMoney {
        BookingMoney::new(self.currency.clone(), self.total_price, self.amount_paid)
    }
}

impl BookingRecord for Excursion {
    fn id(&self) -> Uuid {
        self.id
    }

    fn reservation_id(&self) -> Uuid {
        self.reservation_id
    }
}

/// Raw excursion fields, as supplied by the transport layer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExcursionPayload {
    /// Raw activity name.
    pub name: Option<String>,
    /// Raw meeting point or venue.
    pub location: Option<String>,
    /// Raw start instant.
    pub starts_at: Option<String>,
    /// Raw end instant.
    pub ends_at: Option<String>,
    /// Raw supplier booking reference.
    pub booking_reference: Option<String>,
    /// Raw monetary fields.
    pub money: MoneyPayload,
}

/// Validated insert payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewExcursion {
    /// Activity name.
    pub name: String,
    /// Meeting point or venue, when supplied.
    pub location: Option<String>,
    /// Start instant, when supplied.
    pub starts_at: Option<DateTime<Utc>>,
    /// End instant, when supplied.
    pub ends_at: Option<DateTime<Utc>>,
    /// Supplier booking reference, when issued.
    pub booking_reference: Option<String>,
    /// Monetary triple.
    pub money: BookingMoney,
}

/// Validated partial-update payload.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExcursionChanges {
    /// New activity name, when supplied.
    pub name: Option<String>,
    /// New meeting point, when supplied.
    pub location: Option<String>,
    /// New start instant, when supplied.
    pub starts_at: Option<DateTime<Utc>>,
    /// New end instant, when supplied.
    pub ends_at: Option<DateTime<Utc>>,
    /// New supplier booking reference, when supplied.
    pub booking_reference: Option<String>,
    /// Supplied monetary fields.
    pub money: MoneyChanges,
}

impl BookingResource for Excursion {
    const KIND: &'static str = "excursion";

    type Record = Self;
    type Payload = ExcursionPayload;
    type New = NewExcursion;
    type Changes = ExcursionChanges;

    fn validate_create(
        payload: &ExcursionPayload,
        clock: &dyn Clock,
    ) -> Result<NewExcursion, DomainError> {
        let name = coerce::required_text("name", payload.name.as_deref())?;
        let location = coerce::optional_text("location", payload.location.as_deref())?;
        let dates = date_range::check_create(
            &DATE_RULES,
            payload.starts_at.as_deref(),
            payload.ends_at.as_deref(),
            clock,
        )?;
        let booking_reference =
            coerce::optional_text("bookingReference", payload.booking_reference.as_deref())?;
        let money = money_on_create(&payload.money)?;

        Ok(NewExcursion {
            name,
            location,
            starts_at: dates.start,
            ends_at: dates.end,
            booking_reference,
            money,
        })
    }

    fn validate_update(
        payload: &ExcursionPayload,
        current: &Excursion,
        clock: &dyn Clock,
    ) -> Result<ExcursionChanges, DomainError> {
        let name = coerce::optional_text("name", payload.name.as_deref())?;
        let location = coerce::optional_text("location", payload.location.as_deref())?;
        let dates = date_range::check_update(
            &DATE_RULES,
            payload.starts_at.as_deref(),
            payload.ends_at.as_deref(),
            current.starts_at,
            current.ends_at,
            clock,
        )?;
        let booking_reference =
            coerce::optional_text("bookingReference", payload.booking_reference.as_deref())?;
        let money = money_on_update(&payload.money, &current.money())?;

        Ok(ExcursionChanges {
            name,
            location,
            starts_at: dates.start,
            ends_at: dates.end,
            booking_reference,
            money,
        })
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use chrono::TimeZone;
    use mockable::MockClock;
    use rstest::{fixture, rstest};

    #[fixture]
    fn clock() -> MockClock {
        let mut clock = MockClock::new();
        clock
            .expect_utc()
            .returning(|| Utc.with_ymd_and_hms(2026, 9, 1, 12, 0, 0).unwrap());
        clock
    }

    fn payload() -> ExcursionPayload {
        ExcursionPayload {
            name: Some("Caves of Drach".to_owned()),
            location: Some("Porto Cristo".to_owned()),
            starts_at: Some("2026-09-11T09:00:00Z".to_owned()),
            ends_at: None,
            booking_reference: None,
            money: MoneyPayload {
                currency: Some("EUR".to_owned()),
                total_price: Some("60".to_owned()),
                amount_paid: Some("0".to_owned()),
            },
        }
    }

    #[rstest]
    fn create_accepts_a_bare_start(clock: MockClock) {
        let new = Excursion::validate_create(&payload(), &clock).expect("bare start is valid");
        assert!(new.starts_at.is_some());
        assert!(new.ends_at.is_none());
    }

    #[rstest]
    fn create_requires_at_least_one_bound(clock: MockClock) {
        let unbounded = ExcursionPayload {
            starts_at: None,
            ends_at: None,
            ..payload()
        };
        let err = Excursion::validate_create(&unbounded, &clock)
            .expect_err("no bounds at all must fail");
        let details = err.details().expect("details attached");
        assert_eq!(details["code"], coerce::CODE_MISSING_FIELD);
        assert_eq!(details["fields"][0], "startsAt");
    }

    #[rstest]
    fn create_accepts_an_instantaneous_activity(clock: MockClock) {
        let instant = ExcursionPayload {
            ends_at: payload().starts_at,
            ..payload()
        };
        Excursion::validate_create(&instant, &clock).expect("equal bounds are valid");
    }
}

//! Car rental bookings.
//!
//! Pickup and dropoff offices may coincide (return to the same office), and
//! the date pair tolerates equality for sub-day rentals.

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
use crate::domain::policies::distinctness::{self, DistinctnessRules};
use crate::domain::policies::{coerce, Requirement};
use crate::domain::DomainError;

const DATE_RULES: DateRangeRules = DateRangeRules {
    start_field: "pickupAt",
    end_field: "dropoffAt",
    requirement: Requirement::Both,
    allow_equal: true,
    min_hours_before_start: None,
};

const OFFICE_RULES: DistinctnessRules = DistinctnessRules {
    a_field: "pickupLocation",
    b_field: "dropoffLocation",
    requirement: Requirement::Both,
    trim: true,
    ignore_case: true,
    allow_equal: true,
};

/// Car rental row as served to clients.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CarRental {
    /// Stable identifier.
    pub id: Uuid,
    /// Parent reservation.
    pub reservation_id: Uuid,
    /// Rental company.
    pub company: String,
    /// Pickup office.
    pub pickup_location: String,
    /// Dropoff office.
    pub dropoff_location: String,
    /// Pickup instant.
    pub pickup_at: DateTime<Utc>,
    /// Dropoff instant.
    pub dropoff_at: DateTime<Utc>,
    /// Supplier booking reference, when issued.
    pub booking_reference: Option<String>,
    /// Currency the amounts are denominated in.
    #[schema(value_type = String, example = "EUR")]
    pub currency: Currency,
    /// Full price of the rental.
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

impl CarRental {
    /// Monetary triple carried by this row.
    pub fn money(&self) -> BookingMoney {
        BookingMoney::new(self.currency.clone(), self.total_price, self.amount_paid)
    }
}

impl BookingRecord for CarRental {
    fn id(&self) -> Uuid {
        self.id
    }

    fn reservation_id(&self) -> Uuid {
        self.reservation_id
    }
}

/// Raw car rental fields, as supplied by the transport layer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CarRentalPayload {
    /// Raw rental company.
    pub company: Option<String>,
    /// Raw pickup office.
    pub pickup_location: Option<String>,
    /// Raw dropoff office.
    pub dropoff_location: Option<String>,
    /// Raw pickup instant.
    pub pickup_at: Option<String>,
    /// Raw dropoff instant.
    pub dropoff_at: Option<String>,
    /// Raw supplier booking reference.
    pub booking_reference: Option<String>,
    /// Raw monetary fields.
    pub money: MoneyPayload,
}

/// Validated insert payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCarRental {
    /// Rental company.
    pub company: String,
    /// Pickup office.
    pub pickup_location: String,
    /// Dropoff office.
    pub dropoff_location: String,
    /// Pickup instant.
    pub pickup_at: DateTime<Utc>,
    /// Dropoff instant.
    pub dropoff_at: DateTime<Utc>,
    /// Supplier booking reference, when issued.
    pub booking_reference: Option<String>,
    /// Monetary triple.
    pub money: BookingMoney,
}

/// Validated partial-update payload.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CarRentalChanges {
    /// New rental company, when supplied.
    pub company: Option<String>,
    /// New pickup office, when supplied.
    pub pickup_location: Option<String>,
    /// New dropoff office, when supplied.
    pub dropoff_location: Option<String>,
    /// New pickup instant, when supplied.
    pub pickup_at: Option<DateTime<Utc>>,
    /// New dropoff instant, when supplied.
    pub dropoff_at: Option<DateTime<Utc>>,
    /// New supplier booking reference, when supplied.
    pub booking_reference: Option<String>,
    /// Supplied monetary fields.
    pub money: MoneyChanges,
}

impl BookingResource for CarRental {
    const KIND: &'static str = "car rental";

    type Record = Self;
    type Payload = CarRentalPayload;
    type New = NewCarRental;
    type Changes = CarRentalChanges;

    fn validate_create(
        payload: &CarRentalPayload,
        clock: &dyn Clock,
    ) -> Result<NewCarRental, DomainError> {
        let company = coerce::required_text("company", payload.company.as_deref())?;
        let offices = distinctness::check_create(
            &OFFICE_RULES,
            payload.pickup_location.as_deref(),
            payload.dropoff_location.as_deref(),
        )?;
        let dates = date_range::check_create(
            &DATE_RULES,
            payload.pickup_at.as_deref(),
            payload.dropoff_at.as_deref(),
            clock,
        )?;
        let booking_reference =
            coerce::optional_text("bookingReference", payload.booking_reference.as_deref())?;
        let money = money_on_create(&payload.money)?;

        Ok(NewCarRental {
            company,
            pickup_location: coerce::expect_present("pickupLocation", offices.a)?,
            dropoff_location: coerce::expect_present("dropoffLocation", offices.b)?,
            pickup_at: coerce::expect_present("pickupAt", dates.start)?,
            dropoff_at: coerce::expect_present("dropoffAt", dates.end)?,
            booking_reference,
            money,
        })
    }

    fn validate_update(
        payload: &CarRentalPayload,
        current: &CarRental,
        clock: &dyn Clock,
    ) -> Result<CarRentalChanges, DomainError> {
        let company = coerce::optional_text("company", payload.company.as_deref())?;
        let offices = distinctness::check_update(
            &OFFICE_RULES,
            payload.pickup_location.as_deref(),
            payload.dropoff_location.as_deref(),
            Some(current.pickup_location.as_str()),
            Some(current.dropoff_location.as_str()),
        )?;
        let dates = date_range::check_update(
            &DATE_RULES,
            payload.pickup_at.as_deref(),
            payload.dropoff_at.as_deref(),
            Some(current.pickup_at),
            Some(current.dropoff_at),
            clock,
        )?;
        let booking_reference =
            coerce::optional_text("bookingReference", payload.booking_reference.as_deref())?;
        let money = money_on_update(&payload.money, &current.money())?;

        Ok(CarRentalChanges {
            company,
            pickup_location: offices.a,
            dropoff_location: offices.b,
            pickup_at: dates.start,
            dropoff_at: dates.end,
            booking_reference,
            money,
        })
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use crate::domain::policies::date_range::CODE_BACKWARDS_RANGE;
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

    fn payload() -> CarRentalPayload {
        CarRentalPayload {
            company: Some("Hertz".to_owned()),
            pickup_location: Some("Palma Airport".to_owned()),
            dropoff_location: Some("Palma Airport".to_owned()),
            pickup_at: Some("2026-09-10T12:00:00Z".to_owned()),
            dropoff_at: Some("2026-09-14T09:00:00Z".to_owned()),
            booking_reference: None,
            money: MoneyPayload {
                currency: Some("EUR".to_owned()),
                total_price: Some("260".to_owned()),
                amount_paid: Some("0".to_owned()),
            },
        }
    }

    #[rstest]
    fn create_accepts_a_same_office_return(clock: MockClock) {
        let new = CarRental::validate_create(&payload(), &clock).expect("valid payload");
        assert_eq!(new.pickup_location, new.dropoff_location);
    }

    #[rstest]
    fn create_requires_both_instants(clock: MockClock) {
        let missing = CarRentalPayload {
            dropoff_at: None,
            ..payload()
        };
        let err =
            CarRental::validate_create(&missing, &clock).expect_err("missing dropoff must fail");
        let details = err.details().expect("details attached");
        assert_eq!(details["field"], "dropoffAt");
    }

    #[rstest]
    fn create_tolerates_equal_instants_but_not_inversion(clock: MockClock) {
        let instant = CarRentalPayload {
            dropoff_at: payload().pickup_at,
            ..payload()
        };
        CarRental::validate_create(&instant, &clock).expect("equal bounds are valid");

        let inverted = CarRentalPayload {
            pickup_at: Some("2026-09-14T09:00:00Z".to_owned()),
            dropoff_at: Some("2026-09-10T12:00:00Z".to_owned()),
            ..payload()
        };
        let err =
            CarRental::validate_create(&inverted, &clock).expect_err("inversion must fail");
        let details = err.details().expect("details attached");
        assert_eq!(details["code"], CODE_BACKWARDS_RANGE);
    }
}

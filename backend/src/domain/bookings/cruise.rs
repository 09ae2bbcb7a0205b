//! Cruise bookings.
//!
//! Round trips are common, so the port pair tolerates equality; the date
//! pair stays strict.

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
    start_field: "departsAt",
    end_field: "arrivesAt",
    requirement: Requirement::Both,
    allow_equal: false,
    min_hours_before_start: None,
};

const PORT_RULES: DistinctnessRules = DistinctnessRules {
    a_field: "departurePort",
    b_field: "arrivalPort",
    requirement: Requirement::Both,
    trim: true,
    ignore_case: true,
    allow_equal: true,
};

/// Cruise row as served to clients.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Cruise {
    /// Stable identifier.
    pub id: Uuid,
    /// Parent reservation.
    pub reservation_id: Uuid,
    /// Vessel name.
    pub ship_name: String,
    /// Embarkation port.
    pub departure_port: String,
    /// Disembarkation port.
    pub arrival_port: String,
    /// Embarkation instant.
    pub departs_at: DateTime<Utc>,
    /// Disembarkation instant.
    pub arrives_at: DateTime<Utc>,
    /// Supplier booking reference, when issued.
    pub booking_reference: Option<String>,
    /// Currency the amounts are denominated in.
    #[schema(value_type = String, example = "EUR")]
    pub currency: Currency,
    /// Full price of the cruise.
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

impl Cruise {
    /// Monetary triple carried by this row.
    pub fn money(&self) -> BookingMoney {
        BookingMoney::new(self.currency.clone(), self.total_price, self.amount_paid)
    }
}

impl BookingRecord for Cruise {
    fn id(&self) -> Uuid {
        self.id
    }

    fn reservation_id(&self) -> Uuid {
        self.reservation_id
    }
}

/// Raw cruise fields, as supplied by the transport layer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CruisePayload {
    /// Raw vessel name.
    pub ship_name: Option<String>,
    /// Raw embarkation port.
    pub departure_port: Option<String>,
    /// Raw disembarkation port.
    pub arrival_port: Option<String>,
    /// Raw embarkation instant.
    pub departs_at: Option<String>,
    /// Raw disembarkation instant.
    pub arrives_at: Option<String>,
    /// Raw supplier booking reference.
    pub booking_reference: Option<String>,
    /// Raw monetary fields.
    pub money: MoneyPayload,
}

/// Validated insert payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCruise {
    /// Vessel name.
    pub ship_name: String,
    /// Embarkation port.
    pub departure_port: String,
    /// Disembarkation port.
    pub arrival_port: String,
    /// Embarkation instant.
    pub departs_at: DateTime<Utc>,
    /// Disembarkation instant.
    pub arrives_at: DateTime<Utc>,
    /// Supplier booking reference, when issued.
    pub booking_reference: Option<String>,
    /// Monetary triple.
    pub money: BookingMoney,
}

/// Validated partial-update payload.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CruiseChanges {
    /// New vessel name, when supplied.
    pub ship_name: Option<String>,
    /// New embarkation port, when supplied.
    pub departure_port: Option<String>,
    /// New disembarkation port, when supplied.
    pub arrival_port: Option<String>,
    /// New embarkation instant, when supplied.
    pub departs_at: Option<DateTime<Utc>>,
    /// New disembarkation instant, when supplied.
    pub arrives_at: Option<DateTime<Utc>>,
    /// New supplier booking reference, when supplied.
    pub booking_reference: Option<String>,
    /// Supplied monetary fields.
    pub money: MoneyChanges,
}

impl BookingResource for Cruise {
    const KIND: &'static str = "cruise";

    type Record = Self;
    type Payload = CruisePayload;
    type New = NewCruise;
    type Changes = CruiseChanges;

    fn validate_create(
        payload: &CruisePayload,
        clock: &dyn Clock,
    ) -> Result<NewCruise, DomainError> {
        let ship_name = coerce::required_text("shipName", payload.ship_name.as_deref())?;
        let ports = distinctness::check_create(
            &PORT_RULES,
            payload.departure_port.as_deref(),
            payload.arrival_port.as_deref(),
        )?;
        let dates = date_range::check_create(
            &DATE_RULES,
            payload.departs_at.as_deref(),
            payload.arrives_at.as_deref(),
            clock,
        )?;
        let booking_reference =
            coerce::optional_text("bookingReference", payload.booking_reference.as_deref())?;
        let money = money_on_create(&payload.money)?;

        Ok(NewCruise {
            ship_name,
            departure_port: coerce::expect_present("departurePort", ports.a)?,
            arrival_port: coerce::expect_present("arrivalPort", ports.b)?,
            departs_at: coerce::expect_present("departsAt", dates.start)?,
            arrives_at: coerce::expect_present("arrivesAt", dates.end)?,
            booking_reference,
            money,
        })
    }

    fn validate_update(
        payload: &CruisePayload,
        current: &Cruise,
        clock: &dyn Clock,
    ) -> Result<CruiseChanges, DomainError> {
        let ship_name = coerce::optional_text("shipName", payload.ship_name.as_deref())?;
        let ports = distinctness::check_update(
            &PORT_RULES,
            payload.departure_port.as_deref(),
            payload.arrival_port.as_deref(),
            Some(current.departure_port.as_str()),
            Some(current.arrival_port.as_str()),
        )?;
        let dates = date_range::check_update(
            &DATE_RULES,
            payload.departs_at.as_deref(),
            payload.arrives_at.as_deref(),
            Some(current.departs_at),
            Some(current.arrives_at),
            clock,
        )?;
        let booking_reference =
            coerce::optional_text("bookingReference", payload.booking_reference.as_deref())?;
        let money = money_on_update(&payload.money, &current.money())?;

        Ok(CruiseChanges {
            ship_name,
            departure_port: ports.a,
            arrival_port: ports.b,
            departs_at: dates.start,
            arrives_at: dates.end,
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

    fn payload() -> CruisePayload {
        CruisePayload {
            ship_name: Some("MSC Seaview".to_owned()),
            departure_port: Some("Barcelona".to_owned()),
            arrival_port: Some("Barcelona".to_owned()),
            departs_at: Some("2026-10-03T17:00:00Z".to_owned()),
            arrives_at: Some("2026-10-10T08:00:00Z".to_owned()),
            booking_reference: Some("MSC-55120".to_owned()),
            money: MoneyPayload {
                currency: Some("EUR".to_owned()),
                total_price: Some("2100".to_owned()),
                amount_paid: Some("500".to_owned()),
            },
        }
    }

    #[rstest]
    fn create_accepts_a_round_trip(clock: MockClock) {
        let new = Cruise::validate_create(&payload(), &clock).expect("round trip is valid");
        assert_eq!(new.departure_port, "Barcelona");
        assert_eq!(new.arrival_port, "Barcelona");
    }

    #[rstest]
    fn create_requires_both_ports(clock: MockClock) {
        let missing = CruisePayload {
            arrival_port: None,
            ..payload()
        };
        let err =
            Cruise::validate_create(&missing, &clock).expect_err("missing port must fail");
        let details = err.details().expect("details attached");
        assert_eq!(details["field"], "arrivalPort");
        assert_eq!(details["code"], coerce::CODE_MISSING_FIELD);
    }

    #[rstest]
    fn create_keeps_the_date_pair_strict(clock: MockClock) {
        let inverted = CruisePayload {
            departs_at: Some("2026-10-10T08:00:00Z".to_owned()),
            arrives_at: Some("2026-10-03T17:00:00Z".to_owned()),
            ..payload()
        };
        let err =
            Cruise::validate_create(&inverted, &clock).expect_err("backwards pair must fail");
        let details = err.details().expect("details attached");
        assert_eq!(details["code"], CODE_BACKWARDS_RANGE);
    }
}

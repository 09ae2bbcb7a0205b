//! Flight bookings.
//!
//! Origin and destination must name different places after trimming and case
//! folding; `departs_at < arrives_at` strictly.

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

const ROUTE_RULES: DistinctnessRules = DistinctnessRules {
    a_field: "origin",
    b_field: "destination",
    requirement: Requirement::Both,
    trim: true,
    ignore_case: true,
    allow_equal: false,
};

/// Flight row as served to clients.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Flight {
    /// Stable identifier.
    pub id: Uuid,
    /// Parent reservation.
    pub reservation_id: Uuid,
    /// Departure place.
    pub origin: String,
    /// Arrival place.
    pub destination: String,
    /// Operating carrier, when known.
    pub carrier: Option<String>,
    /// Departure instant.
    pub departs_at: DateTime<Utc>,
    /// Arrival instant.
    pub arrives_at: DateTime<Utc>,
    /// Supplier booking reference, when issued.
    pub booking_reference: Option<String>,
    /// Currency the amounts are denominated in.
    #[schema(value_type = String, example = "EUR")]
    pub currency: Currency,
    /// Full price of the flight.
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

impl Flight {
    /// Monetary triple carried by this row.
    pub fn money(&self) -> BookingMoney {
        BookingMoney::new(self.currency.clone(), self.total_price, self.amount_paid)
    }
}

impl BookingRecord for Flight {
    fn id(&self) -> Uuid {
        self.id
    }

    fn reservation_id(&self) -> Uuid {
        self.reservation_id
    }
}

/// Raw flight fields, as supplied by the transport layer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FlightPayload {
    /// Raw departure place.
    pub origin: Option<String>,
    /// Raw arrival place.
    pub destination: Option<String>,
    /// Raw carrier name.
    pub carrier: Option<String>,
    /// Raw departure instant.
    pub departs_at: Option<String>,
    /// Raw arrival instant.
    pub arrives_at: Option<String>,
    /// Raw supplier booking reference.
    pub booking_reference: Option<String>,
    /// Raw monetary fields.
    pub money: MoneyPayload,
}

/// Validated insert payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewFlight {
    /// Departure place.
    pub origin: String,
    /// Arrival place.
    pub destination: String,
    /// Operating carrier, when known.
    pub carrier: Option<String>,
    /// Departure instant.
    pub departs_at: DateTime<Utc>,
    /// Arrival instant.
    pub arrives_at: DateTime<Utc>,
    /// Supplier booking reference, when issued.
    pub booking_reference: Option<String>,
    /// Monetary triple.
    pub money: BookingMoney,
}

/// Validated partial-update payload.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FlightChanges {
    /// New departure place, when supplied.
    pub origin: Option<String>,
    /// New arrival place, when supplied.
    pub destination: Option<String>,
    /// New carrier, when supplied.
    pub carrier: Option<String>,
    /// New departure instant, when supplied.
    pub departs_at: Option<DateTime<Utc>>,
    /// New arrival instant, when supplied.
    pub arrives_at: Option<DateTime<Utc>>,
    /// New supplier booking reference, when supplied.
    pub booking_reference: Option<String>,
    /// Supplied monetary fields.
    pub money: MoneyChanges,
}

impl BookingResource for Flight {
    const KIND: &'static str = "flight";

    type Record = Self;
    type Payload = FlightPayload;
    type New = NewFlight;
    type Changes = FlightChanges;

    fn validate_create(
        payload: &FlightPayload,
        clock: &dyn Clock,
    ) -> Result<NewFlight, DomainError> {
        let route = distinctness::check_create(
            &ROUTE_RULES,
            payload.origin.as_deref(),
            payload.destination.as_deref(),
        )?;
        let carrier = coerce::optional_text("carrier", payload.carrier.as_deref())?;
        let dates = date_range::check_create(
            &DATE_RULES,
            payload.departs_at.as_deref(),
            payload.arrives_at.as_deref(),
            clock,
        )?;
        let booking_reference =
            coerce::optional_text("bookingReference", payload.booking_reference.as_deref())?;
        let money = money_on_create(&payload.money)?;

        Ok(NewFlight {
            origin: coerce::expect_present("origin", route.a)?,
            destination: coerce::expect_present("destination", route.b)?,
            carrier,
            departs_at: coerce::expect_present("departsAt", dates.start)?,
            arrives_at: coerce::expect_present("arrivesAt", dates.end)?,
            booking_reference,
            money,
        })
    }

    fn validate_update(
        payload: &FlightPayload,
        current: &Flight,
        clock: &dyn Clock,
    ) -> Result<FlightChanges, DomainError> {
        let route = distinctness::check_update(
            &ROUTE_RULES,
            payload.origin.as_deref(),
            payload.destination.as_deref(),
            Some(current.origin.as_str()),
            Some(current.destination.as_str()),
        )?;
        let carrier = coerce::optional_text("carrier", payload.carrier.as_deref())?;
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

        Ok(FlightChanges {
            origin: route.a,
            destination: route.b,
            carrier,
            departs_at: dates.start,
            arrives_at: dates.end,
            booking_reference,
            money,
        })
    }
}

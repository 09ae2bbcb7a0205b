//! Ground transfer bookings.
//!
//! A transfer always has a pickup instant; the dropoff instant is optional
//! because suppliers rarely commit to one. When both are present they must
//! be strictly ordered.

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
    requirement: Requirement::None,
    allow_equal: false,
    min_hours_before_start: None,
};

const ROUTE_RULES: DistinctnessRules = DistinctnessRules {
    a_field: "pickupLocation",
    b_field: "dropoffLocation",
    requirement: Requirement::Both,
    trim: true,
    ignore_case: true,
    allow_equal: false,
};

/// Transfer row as served to clients.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Transfer {
    /// Stable identifier.
    pub id: Uuid,
    /// Parent reservation.
    pub reservation_id: Uuid,
    /// Pickup place.
    pub pickup_location: String,
    /// Dropoff place.
    pub dropoff_location: String,
    /// Pickup instant.
    pub pickup_at: DateTime<Utc>,
    /// Dropoff instant, when the supplier commits to one.
    pub dropoff_at: Option<DateTime<Utc>>,
    /// Supplier booking reference, when issued.
    pub booking_reference: Option<String>,
    /// Currency the amounts are denominated in.
    #[schema(value_type = String, example = "EUR")]
    pub currency: Currency,
    /// Full price of the transfer.
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

impl Transfer {
    /// Monetary triple carried by this row.
    pub fn money(&self) -> BookingMoney {
        BookingMoney::new(self.currency.clone(), self.total_price, self.amount_paid)
    }
}

impl BookingRecord for Transfer {
    fn id(&self) -> Uuid {
        self.id
    }

    fn reservation_id(&self) -> Uuid {
        self.reservation_id
    }
}

/// Raw transfer fields, as supplied by the transport layer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransferPayload {
    /// Raw pickup place.
    pub pickup_location: Option<String>,
    /// Raw dropoff place.
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
pub struct NewTransfer {
    /// Pickup place.
    pub pickup_location: String,
    /// Dropoff place.
    pub dropoff_location: String,
    /// Pickup instant.
    pub pickup_at: DateTime<Utc>,
    /// Dropoff instant, when supplied.
    pub dropoff_at: Option<DateTime<Utc>>,
    /// Supplier booking reference, when issued.
    pub booking_reference: Option<String>,
    /// Monetary triple.
    pub money: BookingMoney,
}

/// Validated partial-update payload.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransferChanges {
    /// New pickup place, when supplied.
    pub pickup_location: Option<String>,
    /// New dropoff place, when supplied.
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

impl BookingResource for Transfer {
    const KIND: &'static str = "transfer";

    type Record = Self;
    type Payload = TransferPayload;
    type New = NewTransfer;
    type Changes = TransferChanges;

    fn validate_create(
        payload: &TransferPayload,
        clock: &dyn Clock,
    ) -> Result<NewTransfer, DomainError> {
        let route = distinctness::check_create(
            &ROUTE_RULES,
            payload.pickup_location.as_deref(),
            payload.dropoff_location.as_deref(),
        )?;
        let dates = date_range::check_create(
            &DATE_RULES,
            payload.pickup_at.as_deref(),
            payload.dropoff_at.as_deref(),
            clock,
        )?;
        let pickup_at = dates
            .start
            .ok_or_else(|| coerce::missing_field("pickupAt"))?;
        let booking_reference =
            coerce::optional_text("bookingReference", payload.booking_reference.as_deref())?;
        let money = money_on_create(&payload.money)?;

        Ok(NewTransfer {
            pickup_location: coerce::expect_present("pickupLocation", route.a)?,
            dropoff_location: coerce::expect_present("dropoffLocation", route.b)?,
            pickup_at,
            dropoff_at: dates.end,
            booking_reference,
            money,
        })
    }

    fn validate_update(
        payload: &TransferPayload,
        current: &Transfer,
        clock: &dyn Clock,
    ) -> Result<TransferChanges, DomainError> {
        let route = distinctness::check_update(
            &ROUTE_RULES,
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
            current.dropoff_at,
            clock,
        )?;
        let booking_reference =
            coerce::optional_text("bookingReference", payload.booking_reference.as_deref())?;
        let money = money_on_update(&payload.money, &current.money())?;

        Ok(TransferChanges {
            pickup_location: route.a,
            dropoff_location: route.b,
            pickup_at: dates.start,
            dropoff_at: dates.end,
            booking_reference,
            money,
        })
    }
}

//! Hotel stay bookings.
//!
//! A stay needs a property name, a location, and a strictly ordered
//! `check_in < check_out` pair. Same-day stays are not bookable.

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
    start_field: "checkIn",
    end_field: "checkOut",
    requirement: Requirement::Both,
    allow_equal: false,
    min_hours_before_start: None,
};

/// Hotel stay row as served to clients.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Hotel {
    /// Stable identifier.
    pub id: Uuid,
    /// Parent reservation.
    pub reservation_id: Uuid,
    /// Property name.
    pub hotel_name: String,
    /// City or resort the property is in.
    pub location: String,
    /// Arrival instant.
    pub check_in: DateTime<Utc>,
    /// Departure instant.
    pub check_out: DateTime<Utc>,
    /// Supplier booking reference, when issued.
    pub booking_reference: Option<String>,
    /// Currency the amounts are denominated in.
    #[schema(value_type = String, example = "EUR")]
    pub currency: Currency,
    /// Full price of the stay.
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

impl Hotel {
    /// Monetary triple carried by this row.
    pub fn money(&self) -> BookingMoney {
        BookingMoney::new(self.currency.clone(), self.total_price, self.amount_paid)
    }
}

impl BookingRecord for Hotel {
    fn id(&self) -> Uuid {
        self.id
    }

    fn reservation_id(&self) -> Uuid {
        self.reservation_id
    }
}

/// Raw hotel fields, as supplied by the transport layer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HotelPayload {
    /// Raw property name.
    pub hotel_name: Option<String>,
    /// Raw location.
    pub location: Option<String>,
    /// Raw arrival instant.
    pub check_in: Option<String>,
    /// Raw departure instant.
    pub check_out: Option<String>,
    /// Raw supplier booking reference.
    pub booking_reference: Option<String>,
    /// Raw monetary fields.
    pub money: MoneyPayload,
}

/// Validated insert payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewHotel {
    /// Property name.
    pub hotel_name: String,
    /// City or resort the property is in.
    pub location: String,
    /// Arrival instant.
    pub check_in: DateTime<Utc>,
    /// Departure instant.
    pub check_out: DateTime<Utc>,
    /// Supplier booking reference, when issued.
    pub booking_reference: Option<String>,
    /// Monetary triple.
    pub money: BookingMoney,
}

/// Validated partial-update payload.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HotelChanges {
    /// New property name, when supplied.
    pub hotel_name: Option<String>,
    /// New location, when supplied.
    pub location: Option<String>,
    /// New arrival instant, when supplied.
    pub check_in: Option<DateTime<Utc>>,
    /// New departure instant, when supplied.
    pub check_out: Option<DateTime<Utc>>,
    /// New supplier booking reference, when supplied.
    pub booking_reference: Option<String>,
    /// Supplied monetary fields.
    pub money: MoneyChanges,
}

impl BookingResource for Hotel {
    const KIND: &'static str = "hotel";

    type Record = Self;
    type Payload = HotelPayload;
    type New = NewHotel;
    type Changes = HotelChanges;

    fn validate_create(payload: &HotelPayload, clock: &dyn Clock) -> Result<NewHotel, DomainError> {
        let hotel_name = coerce::required_text("hotelName", payload.hotel_name.as_deref())?;
        let location = coerce::required_text("location", payload.location.as_deref())?;
        let dates = date_range::check_create(
            &DATE_RULES,
            payload.check_in.as_deref(),
            payload.check_out.as_deref(),
            clock,
        )?;
        let booking_reference =
            coerce::optional_text("bookingReference", payload.booking_reference.as_deref())?;
        let money = money_on_create(&payload.money)?;

        Ok(NewHotel {
            hotel_name,
            location,
            check_in: coerce::expect_present("checkIn", dates.start)?,
            check_out: coerce::expect_present("checkOut", dates.end)?,
            booking_reference,
            money,
        })
    }

    fn validate_update(
        payload: &HotelPayload,
        current: &Hotel,
        clock: &dyn Clock,
    ) -> Result<HotelChanges, DomainError> {
        let hotel_name = coerce::optional_text("hotelName", payload.hotel_name.as_deref())?;
        let location = coerce::optional_text("location", payload.location.as_deref())?;
        let dates = date_range::check_update(
            &DATE_RULES,
            payload.check_in.as_deref(),
            payload.check_out.as_deref(),
            Some(current.check_in),
            Some(current.check_out),
            clock,
        )?;
        let booking_reference =
            coerce::optional_text("bookingReference", payload.booking_reference.as_deref())?;
        let money = money_on_update(&payload.money, &current.money())?;

        Ok(HotelChanges {
            hotel_name,
            location,
            check_in: dates.start,
            check_out: dates.end,
            booking_reference,
            money,
        })
    }
}

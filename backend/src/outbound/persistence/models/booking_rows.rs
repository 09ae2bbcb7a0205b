//! Row structs for the seven bookable service tables.
//!
//! Each kind carries the same monetary and audit tail; `money()` exposes the
//! stored triple so the repositories can compute aggregate deltas without a
//! full domain conversion.

use chrono::{DateTime, Utc};
use diesel::prelude::*;
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::domain::bookings::car_rental::{CarRental, CarRentalChanges, NewCarRental};
use crate::domain::bookings::cruise::{Cruise, CruiseChanges, NewCruise};
use crate::domain::bookings::excursion::{Excursion, ExcursionChanges, NewExcursion};
use crate::domain::bookings::flight::{Flight, FlightChanges, NewFlight};
use crate::domain::bookings::hotel::{Hotel, HotelChanges, NewHotel};
use crate::domain::bookings::medical_assist::{MedicalAssist, MedicalAssistChanges, NewMedicalAssist};
use crate::domain::bookings::transfer::{NewTransfer, Transfer, TransferChanges};
use crate::domain::money::BookingMoney;
use crate::domain::ports::StorageError;

use super::super::schema::{
    car_rentals, cruises, excursions, flights, hotels, medical_assists, transfers,
};
use super::parse_currency;

// ---- Hotel rows ----

/// Hotel stay row as stored.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = hotels)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct HotelRow {
    pub id: Uuid,
    pub reservation_id: Uuid,
    pub hotel_name: String,
    pub location: String,
    pub check_in: DateTime<Utc>,
    pub check_out: DateTime<Utc>,
    pub booking_reference: Option<String>,
    pub currency: String,
    pub total_price: Decimal,
    pub amount_paid: Decimal,
    pub created_by: Uuid,
    pub updated_by: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl HotelRow {
    /// Stored monetary triple.
    pub fn money(&self) -> Result<BookingMoney, StorageError> {
        Ok(BookingMoney::new(
            parse_currency(&self.currency)?,
            self.total_price,
            self.amount_paid,
        ))
    }
}

impl TryFrom<HotelRow> for Hotel {
    type Error = StorageError;

    fn try_from(row: HotelRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id: row.id,
            reservation_id: row.reservation_id,
            hotel_name: row.hotel_name,
            location: row.location,
            check_in: row.check_in,
            check_out: row.check_out,
            booking_reference: row.booking_reference,
            currency: parse_currency(&row.currency)?,
            total_price: row.total_price,
            amount_paid: row.amount_paid,
            created_by: row.created_by,
            updated_by: row.updated_by,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

/// Insert shape for a new hotel stay.
#[derive(Debug, Insertable)]
#[diesel(table_name = hotels)]
pub(crate) struct NewHotelRow {
    pub id: Uuid,
    pub reservation_id: Uuid,
    pub hotel_name: String,
    pub location: String,
    pub check_in: DateTime<Utc>,
    pub check_out: DateTime<Utc>,
    pub booking_reference: Option<String>,
    pub currency: String,
    pub total_price: Decimal,
    pub amount_paid: Decimal,
    pub created_by: Uuid,
    pub updated_by: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl NewHotelRow {
    pub fn from_new(
        new: &NewHotel,
        id: Uuid,
        reservation_id: Uuid,
        actor: Uuid,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            reservation_id,
            hotel_name: new.hotel_name.clone(),
            location: new.location.clone(),
            check_in: new.check_in,
            check_out: new.check_out,
            booking_reference: new.booking_reference.clone(),
            currency: new.money.currency.as_ref().to_owned(),
            total_price: new.money.total_price,
            amount_paid: new.money.amount_paid,
            created_by: actor,
            updated_by: actor,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Changeset for a hotel update; `None` fields stay untouched.
#[derive(Debug, AsChangeset)]
#[diesel(table_name = hotels)]
pub(crate) struct HotelRowUpdate {
    pub hotel_name: Option<String>,
    pub location: Option<String>,
    pub check_in: Option<DateTime<Utc>>,
    pub check_out: Option<DateTime<Utc>>,
    pub booking_reference: Option<String>,
    pub total_price: Option<Decimal>,
    pub amount_paid: Option<Decimal>,
    pub updated_by: Uuid,
    pub updated_at: DateTime<Utc>,
}

impl HotelRowUpdate {
    pub fn from_changes(changes: &HotelChanges, actor: Uuid, now: DateTime<Utc>) -> Self {
        Self {
            hotel_name: changes.hotel_name.clone(),
            location: changes.location.clone(),
            check_in: changes.check_in,
            check_out: changes.check_out,
            booking_reference: changes.booking_reference.clone(),
            total_price: changes.money.total_price,
            amount_paid: changes.money.amount_paid,
            updated_by: actor,
            updated_at: now,
        }
    }
}

// ---- Flight rows ----

/// Flight segment row as stored.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = flights)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct FlightRow {
    pub id: Uuid,
    pub reservation_id: Uuid,
    pub origin: String,
    pub destination: String,
    pub carrier: Option<String>,
    pub departs_at: DateTime<Utc>,
    pub arrives_at: DateTime<Utc>,
    pub booking_reference: Option<String>,
    pub currency: String,
    pub total_price: Decimal,
    pub amount_paid: Decimal,
    pub created_by: Uuid,
    pub updated_by: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl FlightRow {
    pub fn money(&self) -> Result<BookingMoney, StorageError> {
        Ok(BookingMoney::new(
            parse_currency(&self.currency)?,
            self.total_price,
            self.amount_paid,
        ))
    }
}

impl TryFrom<FlightRow> for Flight {
    type Error = StorageError;

    fn try_from(row: FlightRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id: row.id,
            reservation_id: row.reservation_id,
            origin: row.origin,
            destination: row.destination,
            carrier: row.carrier,
            departs_at: row.departs_at,
            arrives_at: row.arrives_at,
            booking_reference: row.booking_reference,
            currency: parse_currency(&row.currency)?,
            total_price: row.total_price,
            amount_paid: row.amount_paid,
            created_by: row.created_by,
            updated_by: row.updated_by,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

/// Insert shape for a new flight segment.
#[derive(Debug, Insertable)]
#[diesel(table_name = flights)]
pub(crate) struct NewFlightRow {
    pub id: Uuid,
    pub reservation_id: Uuid,
    pub origin: String,
    pub destination: String,
    pub carrier: Option<String>,
    pub departs_at: DateTime<Utc>,
    pub arrives_at: DateTime<Utc>,
    pub booking_reference: Option<String>,
    pub currency: String,
    pub total_price: Decimal,
    pub amount_paid: Decimal,
    pub created_by: Uuid,
    pub updated_by: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl NewFlightRow {
    pub fn from_new(
        new: &NewFlight,
        id: Uuid,
        reservation_id: Uuid,
        actor: Uuid,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            reservation_id,
            origin: new.origin.clone(),
            destination: new.destination.clone(),
            carrier: new.carrier.clone(),
            departs_at: new.departs_at,
            arrives_at: new.arrives_at,
            booking_reference: new.booking_reference.clone(),
            currency: new.money.currency.as_ref().to_owned(),
            total_price: new.money.total_price,
            amount_paid: new.money.amount_paid,
            created_by: actor,
            updated_by: actor,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Changeset for a flight update; `None` fields stay untouched.
#[derive(Debug, AsChangeset)]
#[diesel(table_name = flights)]
pub(crate) struct FlightRowUpdate {
    pub origin: Option<String>,
    pub destination: Option<String>,
    pub carrier: Option<String>,
    pub departs_at: Option<DateTime<Utc>>,
    pub arrives_at: Option<DateTime<Utc>>,
    pub booking_reference: Option<String>,
    pub total_price: Option<Decimal>,
    pub amount_paid: Option<Decimal>,
    pub updated_by: Uuid,
    pub updated_at: DateTime<Utc>,
}

impl FlightRowUpdate {
    pub fn from_changes(changes: &FlightChanges, actor: Uuid, now: DateTime<Utc>) -> Self {
        Self {
            origin: changes.origin.clone(),
            destination: changes.destination.clone(),
            carrier: changes.carrier.clone(),
            departs_at: changes.departs_at,
            arrives_at: changes.arrives_at,
            booking_reference: changes.booking_reference.clone(),
            total_price: changes.money.total_price,
            amount_paid: changes.money.amount_paid,
            updated_by: actor,
            updated_at: now,
        }
    }
}

// ---- Cruise rows ----

/// Cruise leg row as stored.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = cruises)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct CruiseRow {
    pub id: Uuid,
    pub reservation_id: Uuid,
    pub ship_name: String,
    pub departure_port: String,
    pub arrival_port: String,
    pub departs_at: DateTime<Utc>,
    pub arrives_at: DateTime<Utc>,
    pub booking_reference: Option<String>,
    pub currency: String,
    pub total_price: Decimal,
    pub amount_paid: Decimal,
    pub created_by: Uuid,
    pub updated_by: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl CruiseRow {
    pub fn money(&self) -> Result<BookingMoney, StorageError> {
        Ok(BookingMoney::new(
            parse_currency(&self.currency)?,
            self.total_price,
            self.amount_paid,
        ))
    }
}

impl TryFrom<CruiseRow> for Cruise {
    type Error = StorageError;

    fn try_from(row: CruiseRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id: row.id,
            reservation_id: row.reservation_id,
            ship_name: row.ship_name,
            departure_port: row.departure_port,
            arrival_port: row.arrival_port,
            departs_at: row.departs_at,
            arrives_at: row.arrives_at,
            booking_reference: row.booking_reference,
            currency: parse_currency(&row.currency)?,
            total_price: row.total_price,
            amount_paid: row.amount_paid,
            created_by: row.created_by,
            updated_by: row.updated_by,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

/// Insert shape for a new cruise leg.
#[derive(Debug, Insertable)]
#[diesel(table_name = cruises)]
pub(crate) struct NewCruiseRow {
    pub id: Uuid,
    pub reservation_id: Uuid,
    pub ship_name: String,
    pub departure_port: String,
    pub arrival_port: String,
    pub departs_at: DateTime<Utc>,
    pub arrives_at: DateTime<Utc>,
    pub booking_reference: Option<String>,
    pub currency: String,
    pub total_price: Decimal,
    pub amount_paid: Decimal,
    pub created_by: Uuid,
    pub updated_by: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl NewCruiseRow {
    pub fn from_new(
        new: &NewCruise,
        id: Uuid,
        reservation_id: Uuid,
        actor: Uuid,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            reservation_id,
            ship_name: new.ship_name.clone(),
            departure_port: new.departure_port.clone(),
            arrival_port: new.arrival_port.clone(),
            departs_at: new.departs_at,
            arrives_at: new.arrives_at,
            booking_reference: new.booking_reference.clone(),
            currency: new.money.currency.as_ref().to_owned(),
            total_price: new.money.total_price,
            amount_paid: new.money.amount_paid,
            created_by: actor,
            updated_by: actor,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Changeset for a cruise update; `None` fields stay untouched.
#[derive(Debug, AsChangeset)]
#[diesel(table_name = cruises)]
pub(crate) struct CruiseRowUpdate {
    pub ship_name: Option<String>,
    pub departure_port: Option<String>,
    pub arrival_port: Option<String>,
    pub departs_at: Option<DateTime<Utc>>,
    pub arrives_at: Option<DateTime<Utc>>,
    pub booking_reference: Option<String>,
    pub total_price: Option<Decimal>,
    pub amount_paid: Option<Decimal>,
    pub updated_by: Uuid,
    pub updated_at: DateTime<Utc>,
}

impl CruiseRowUpdate {
    pub fn from_changes(changes: &CruiseChanges, actor: Uuid, now: DateTime<Utc>) -> Self {
        Self {
            ship_name: changes.ship_name.clone(),
            departure_port: changes.departure_port.clone(),
            arrival_port: changes.arrival_port.clone(),
            departs_at: changes.departs_at,
            arrives_at: changes.arrives_at,
            booking_reference: changes.booking_reference.clone(),
            total_price: changes.money.total_price,
            amount_paid: changes.money.amount_paid,
            updated_by: actor,
            updated_at: now,
        }
    }
}

// ---- Transfer rows ----

/// Ground transfer row as stored.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = transfers)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct TransferRow {
    pub id: Uuid,
    pub reservation_id: Uuid,
    pub pickup_location: String,
    pub dropoff_location: String,
    pub pickup_at: DateTime<Utc>,
    pub dropoff_at: Option<DateTime<Utc>>,
    pub booking_reference: Option<String>,
    pub currency: String,
    pub total_price: Decimal,
    pub amount_paid: Decimal,
    pub created_by: Uuid,
    pub updated_by: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl TransferRow {
    pub fn money(&self) -> Result<BookingMoney, StorageError> {
        Ok(BookingMoney::new(
            parse_currency(&self.currency)?,
            self.total_price,
            self.amount_paid,
        ))
    }
}

impl TryFrom<TransferRow> for Transfer {
    type Error = StorageError;

    fn try_from(row: TransferRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id: row.id,
            reservation_id: row.reservation_id,
            pickup_location: row.pickup_location,
            dropoff_location: row.dropoff_location,
            pickup_at: row.pickup_at,
            dropoff_at: row.dropoff_at,
            booking_reference: row.booking_reference,
            currency: parse_currency(&row.currency)?,
            total_price: row.total_price,
            amount_paid: row.amount_paid,
            created_by: row.created_by,
            updated_by: row.updated_by,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

/// Insert shape for a new ground transfer.
#[derive(Debug, Insertable)]
#[diesel(table_name = transfers)]
pub(crate) struct NewTransferRow {
    pub id: Uuid,
    pub reservation_id: Uuid,
    pub pickup_location: String,
    pub dropoff_location: String,
    pub pickup_at: DateTime<Utc>,
    pub dropoff_at: Option<DateTime<Utc>>,
    pub booking_reference: Option<String>,
    pub currency: String,
    pub total_price: Decimal,
    pub amount_paid: Decimal,
    pub created_by: Uuid,
    pub updated_by: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl NewTransferRow {
    pub fn from_new(
        new: &NewTransfer,
        id: Uuid,
        reservation_id: Uuid,
        actor: Uuid,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            reservation_id,
            pickup_location: new.pickup_location.clone(),
            dropoff_location: new.dropoff_location.clone(),
            pickup_at: new.pickup_at,
            dropoff_at: new.dropoff_at,
            booking_reference: new.booking_reference.clone(),
            currency: new.money.currency.as_ref().to_owned(),
            total_price: new.money.total_price,
            amount_paid: new.money.amount_paid,
            created_by: actor,
            updated_by: actor,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Changeset for a transfer update; `None` fields stay untouched.
#[derive(Debug, AsChangeset)]
#[diesel(table_name = transfers)]
pub(crate) struct TransferRowUpdate {
    pub pickup_location: Option<String>,
    pub dropoff_location: Option<String>,
    pub pickup_at: Option<DateTime<Utc>>,
    pub dropoff_at: Option<DateTime<Utc>>,
    pub booking_reference: Option<String>,
    pub total_price: Option<Decimal>,
    pub amount_paid: Option<Decimal>,
    pub updated_by: Uuid,
    pub updated_at: DateTime<Utc>,
}

impl TransferRowUpdate {
    pub fn from_changes(changes: &TransferChanges, actor: Uuid, now: DateTime<Utc>) -> Self {
        Self {
            pickup_location: changes.pickup_location.clone(),
            dropoff_location: changes.dropoff_location.clone(),
            pickup_at: changes.pickup_at,
            dropoff_at: changes.dropoff_at,
            booking_reference: changes.booking_reference.clone(),
            total_price: changes.money.total_price,
            amount_paid: changes.money.amount_paid,
            updated_by: actor,
            updated_at: now,
        }
    }
}

// ---- Excursion rows ----

/// Excursion row as stored.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = excursions)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct ExcursionRow {
    pub id: Uuid,
    pub reservation_id: Uuid,
    pub name: String,
    pub location: Option<String>,
    pub starts_at: Option<DateTime<Utc>>,
    pub ends_at: Option<DateTime<Utc>>,
    pub booking_reference: Option<String>,
    pub currency: String,
    pub total_price: Decimal,
    pub amount_paid: Decimal,
    pub created_by: Uuid,
    pub updated_by: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ExcursionRow {
    pub fn money(&self) -> Result<BookingMoney, StorageError> {
        Ok(BookingMoney::new(
            parse_currency(&self.currency)?,
            self.total_price,
            self.amount_paid,
        ))
    }
}

impl TryFrom<ExcursionRow> for Excursion {
    type Error = StorageError;

    fn try_from(row: ExcursionRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id: row.id,
            reservation_id: row.reservation_id,
            name: row.name,
            location: row.location,
            starts_at: row.starts_at,
            ends_at: row.ends_at,
            booking_reference: row.booking_reference,
            currency: parse_currency(&row.currency)?,
            total_price: row.total_price,
            amount_paid: row.amount_paid,
            created_by: row.created_by,
            updated_by: row.updated_by,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

/// Insert shape for a new excursion.
#[derive(Debug, Insertable)]
#[diesel(table_name = excursions)]
pub(crate) struct NewExcursionRow {
    pub id: Uuid,
    pub reservation_id: Uuid,
    pub name: String,
    pub location: Option<String>,
    pub starts_at: Option<DateTime<Utc>>,
    pub ends_at: Option<DateTime<Utc>>,
    pub booking_reference: Option<String>,
    pub currency: String,
    pub total_price: Decimal,
    pub amount_paid: Decimal,
    pub created_by: Uuid,
    pub updated_by: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl NewExcursionRow {
    pub fn from_new(
        new: &NewExcursion,
        id: Uuid,
        reservation_id: Uuid,
        actor: Uuid,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            reservation_id,
            name: new.name.clone(),
            location: new.location.clone(),
            starts_at: new.starts_at,
            ends_at: new.ends_at,
            booking_reference: new.booking_reference.clone(),
            currency: new.money.currency.as_ref().to_owned(),
            total_price: new.money.total_price,
            amount_paid: new.money.amount_paid,
            created_by: actor,
            updated_by: actor,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Changeset for an excursion update; `None` fields stay untouched.
#[derive(Debug, AsChangeset)]
#[diesel(table_name = excursions)]
pub(crate) struct ExcursionRowUpdate {
    pub name: Option<String>,
    pub location: Option<String>,
    pub starts_at: Option<DateTime<Utc>>,
    pub ends_at: Option<DateTime<Utc>>,
    pub booking_reference: Option<String>,
    pub total_price: Option<Decimal>,
    pub amount_paid: Option<Decimal>,
    pub updated_by: Uuid,
    pub updated_at: DateTime<Utc>,
}

impl ExcursionRowUpdate {
    pub fn from_changes(changes: &ExcursionChanges, actor: Uuid, now: DateTime<Utc>) -> Self {
        Self {
            name: changes.name.clone(),
            location: changes.location.clone(),
            starts_at: changes.starts_at,
            ends_at: changes.ends_at,
            booking_reference: changes.booking_reference.clone(),
            total_price: changes.money.total_price,
            amount_paid: changes.money.amount_paid,
            updated_by: actor,
            updated_at: now,
        }
    }
}

// ---- Medical assist rows ----

/// Medical assistance row as stored.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = medical_assists)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct MedicalAssistRow {
    pub id: Uuid,
    pub reservation_id: Uuid,
    pub provider: String,
    pub description: Option<String>,
    pub starts_at: Option<DateTime<Utc>>,
    pub ends_at: Option<DateTime<Utc>>,
    pub booking_reference: Option<String>,
    pub currency: String,
    pub total_price: Decimal,
    pub amount_paid: Decimal,
    pub created_by: Uuid,
    pub updated_by: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl MedicalAssistRow {
    pub fn money(&self) -> Result<BookingMoney, StorageError> {
        Ok(BookingMoney::new(
            parse_currency(&self.currency)?,
            self.total_price,
            self.amount_paid,
        ))
    }
}

impl TryFrom<MedicalAssistRow> for MedicalAssist {
    type Error = StorageError;

    fn try_from(row: MedicalAssistRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id: row.id,
            reservation_id: row.reservation_id,
            provider: row.provider,
            description: row.description,
            starts_at: row.starts_at,
            ends_at: row.ends_at,
            booking_reference: row.booking_reference,
            currency: parse_currency(&row.currency)?,
            total_price: row.total_price,
            amount_paid: row.amount_paid,
            created_by: row.created_by,
            updated_by: row.updated_by,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

/// Insert shape for new medical assistance cover.
#[derive(Debug, Insertable)]
#[diesel(table_name = medical_assists)]
pub(crate) struct NewMedicalAssistRow {
    pub id: Uuid,
    pub reservation_id: Uuid,
    pub provider: String,
    pub description: Option<String>,
    pub starts_at: Option<DateTime<Utc>>,
    pub ends_at: Option<DateTime<Utc>>,
    pub booking_reference: Option<String>,
    pub currency: String,
    pub total_price: Decimal,
    pub amount_paid: Decimal,
    pub created_by: Uuid,
    pub updated_by: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl NewMedicalAssistRow {
    pub fn from_new(
        new: &NewMedicalAssist,
        id: Uuid,
        reservation_id: Uuid,
        actor: Uuid,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            reservation_id,
            provider: new.provider.clone(),
            description: new.description.clone(),
            starts_at: new.starts_at,
            ends_at: new.ends_at,
            booking_reference: new.booking_reference.clone(),
            currency: new.money.currency.as_ref().to_owned(),
            total_price: new.money.total_price,
            amount_paid: new.money.amount_paid,
            created_by: actor,
            updated_by: actor,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Changeset for a medical assist update; `None` fields stay untouched.
#[derive(Debug, AsChangeset)]
#[diesel(table_name = medical_assists)]
pub(crate) struct MedicalAssistRowUpdate {
    pub provider: Option<String>,
    pub description: Option<String>,
    pub starts_at: Option<DateTime<Utc>>,
    pub ends_at: Option<DateTime<Utc>>,
    pub booking_reference: Option<String>,
    pub total_price: Option<Decimal>,
    pub amount_paid: Option<Decimal>,
    pub updated_by: Uuid,
    pub updated_at: DateTime<Utc>,
}

impl MedicalAssistRowUpdate {
    pub fn from_changes(changes: &MedicalAssistChanges, actor: Uuid, now: DateTime<Utc>) -> Self {
        Self {
            provider: changes.provider.clone(),
            description: changes.description.clone(),
            starts_at: changes.starts_at,
            ends_at: changes.ends_at,
            booking_reference: changes.booking_reference.clone(),
            total_price: changes.money.total_price,
            amount_paid: changes.money.amount_paid,
            updated_by: actor,
            updated_at: now,
        }
    }
}

// ---- Car rental rows ----

/// Car rental row as stored.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = car_rentals)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct CarRentalRow {
    pub id: Uuid,
    pub reservation_id: Uuid,
    pub company: String,
    pub pickup_location: String,
    pub dropoff_location: String,
    pub pickup_at: DateTime<Utc>,
    pub dropoff_at: DateTime<Utc>,
    pub booking_reference: Option<String>,
    pub currency: String,
    pub total_price: Decimal,
    pub amount_paid: Decimal,
    pub created_by: Uuid,
    pub updated_by: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl CarRentalRow {
    pub fn money(&self) -> Result<BookingMoney, StorageError> {
        Ok(BookingMoney::new(
            parse_currency(&self.currency)?,
            self.total_price,
            self.amount_paid,
        ))
    }
}

impl TryFrom<CarRentalRow> for CarRental {
    type Error = StorageError;

    fn try_from(row: CarRentalRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id: row.id,
            reservation_id: row.reservation_id,
            company: row.company,
            pickup_location: row.pickup_location,
            dropoff_location: row.dropoff_location,
            pickup_at: row.pickup_at,
            dropoff_at: row.dropoff_at,
            booking_reference: row.booking_reference,
            currency: parse_currency(&row.currency)?,
            total_price: row.total_price,
            amount_paid: row.amount_paid,
            created_by: row.created_by,
            updated_by: row.updated_by,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

/// Insert shape for a new car rental.
#[derive(Debug, Insertable)]
#[diesel(table_name = car_rentals)]
pub(crate) struct NewCarRentalRow {
    pub id: Uuid,
    pub reservation_id: Uuid,
    pub company: String,
    pub pickup_location: String,
    pub dropoff_location: String,
    pub pickup_at: DateTime<Utc>,
    pub dropoff_at: DateTime<Utc>,
    pub booking_reference: Option<String>,
    pub currency: String,
    pub total_price: Decimal,
    pub amount_paid: Decimal,
    pub created_by: Uuid,
    pub updated_by: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl NewCarRentalRow {
    pub fn from_new(
        new: &NewCarRental,
        id: Uuid,
        reservation_id: Uuid,
        actor: Uuid,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            reservation_id,
            company: new.company.clone(),
            pickup_location: new.pickup_location.clone(),
            dropoff_location: new.dropoff_location.clone(),
            pickup_at: new.pickup_at,
            dropoff_at: new.dropoff_at,
            booking_reference: new.booking_reference.clone(),
            currency: new.money.currency.as_ref().to_owned(),
            total_price: new.money.total_price,
            amount_paid: new.money.amount_paid,
            created_by: actor,
            updated_by: actor,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Changeset for a car rental update; `None` fields stay untouched.
#[derive(Debug, AsChangeset)]
#[diesel(table_name = car_rentals)]
pub(crate) struct CarRentalRowUpdate {
    pub company: Option<String>,
    pub pickup_location: Option<String>,
    pub dropoff_location: Option<String>,
    pub pickup_at: Option<DateTime<Utc>>,
    pub dropoff_at: Option<DateTime<Utc>>,
    pub booking_reference: Option<String>,
    pub total_price: Option<Decimal>,
    pub amount_paid: Option<Decimal>,
    pub updated_by: Uuid,
    pub updated_at: DateTime<Utc>,
}

impl CarRentalRowUpdate {
    pub fn from_changes(changes: &CarRentalChanges, actor: Uuid, now: DateTime<Utc>) -> Self {
        Self {
            company: changes.company.clone(),
            pickup_location: changes.pickup_location.clone(),
            dropoff_location: changes.dropoff_location.clone(),
            pickup_at: changes.pickup_at,
            dropoff_at: changes.dropoff_at,
            booking_reference: changes.booking_reference.clone(),
            total_price: changes.money.total_price,
            amount_paid: changes.money.amount_paid,
            updated_by: actor,
            updated_at: now,
        }
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use crate::domain::bookings::hotel::HotelChanges;
    use crate::domain::bookings::MoneyChanges;
    use crate::domain::money::Currency;
    use rstest::rstest;

    fn hotel_row(currency: &str) -> HotelRow {
        let now = Utc::now();
        HotelRow {
            id: Uuid::new_v4(),
            reservation_id: Uuid::new_v4(),
            hotel_name: "Hotel Bellver".to_owned(),
            location: "Palma".to_owned(),
            check_in: now,
            check_out: now + chrono::Duration::days(4),
            booking_reference: None,
            currency: currency.to_owned(),
            total_price: "480".parse().expect("literal"),
            amount_paid: "100".parse().expect("literal"),
            created_by: Uuid::new_v4(),
            updated_by: Uuid::new_v4(),
            created_at: now,
            updated_at: now,
        }
    }

    #[rstest]
    fn rows_convert_into_their_domain_record() {
        let row = hotel_row("EUR");
        let id = row.id;
        let hotel = Hotel::try_from(row).expect("valid row");
        assert_eq!(hotel.id, id);
        assert_eq!(hotel.currency.as_ref(), "EUR");
    }

    #[rstest]
    fn a_corrupt_stored_currency_is_a_query_failure() {
        let err = Hotel::try_from(hotel_row("??")).expect_err("corrupt currency");
        assert!(matches!(err, StorageError::Query { .. }));
    }

    #[rstest]
    fn row_money_matches_the_stored_triple() {
        let money = hotel_row("EUR").money().expect("valid currency");
        assert_eq!(money.currency, Currency::new("EUR").expect("valid code"));
        assert_eq!(money.total_price, "480".parse().expect("literal"));
        assert_eq!(money.amount_paid, "100".parse().expect("literal"));
    }

    #[rstest]
    fn changesets_keep_only_supplied_fields() {
        let actor = Uuid::new_v4();
        let update = HotelRowUpdate::from_changes(
            &HotelChanges {
                location: Some("Palma Nova".to_owned()),
                money: MoneyChanges {
                    total_price: Some("900".parse().expect("literal")),
                    amount_paid: None,
                },
                ..HotelChanges::default()
            },
            actor,
            Utc::now(),
        );

        assert_eq!(update.location.as_deref(), Some("Palma Nova"));
        assert!(update.hotel_name.is_none());
        assert!(update.check_in.is_none());
        assert_eq!(update.total_price, Some("900".parse().expect("literal")));
        assert!(update.amount_paid.is_none());
        assert_eq!(update.updated_by, actor);
    }
}

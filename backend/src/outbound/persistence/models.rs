//! Row structs bridging the Diesel schema and the domain entities.
//!
//! Query rows convert into domain types fallibly because stored status and
//! currency strings re-enter the typed world here; a mismatch means the
//! database holds data this build cannot interpret, reported as a query
//! failure rather than a panic. Insert and changeset structs are built from
//! the validated domain payloads plus the acting user and instant, so
//! timestamps are always assigned application-side.

use chrono::{DateTime, NaiveDate, Utc};
use diesel::prelude::*;
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::domain::money::Currency;
use crate::domain::pax::{NewPax, Pax, PaxChanges};
use crate::domain::ports::StorageError;
use crate::domain::reservation::{
    CurrencyTotal, NewReservation, Reservation, ReservationChanges, ReservationStatus,
};
use crate::domain::user::{DisplayName, User, UserId};

use super::schema::{pax, reservation_currency_totals, reservations, users};

mod booking_rows;

pub(super) use booking_rows::{
    CarRentalRow, CarRentalRowUpdate, CruiseRow, CruiseRowUpdate, ExcursionRow,
    ExcursionRowUpdate, FlightRow, FlightRowUpdate, HotelRow, HotelRowUpdate, MedicalAssistRow,
    MedicalAssistRowUpdate, NewCarRentalRow, NewCruiseRow, NewExcursionRow, NewFlightRow,
    NewHotelRow, NewMedicalAssistRow, NewTransferRow, TransferRow, TransferRowUpdate,
};

/// Re-enter the typed currency world from a stored code.
fn parse_currency(raw: &str) -> Result<Currency, StorageError> {
    Currency::new(raw)
        .map_err(|err| StorageError::query(format!("stored currency {raw:?} is invalid: {err}")))
}

// ---- User models ----

/// Operator account row.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(super) struct UserRow {
    pub id: Uuid,
    pub display_name: String,
}

impl TryFrom<UserRow> for User {
    type Error = StorageError;

    fn try_from(row: UserRow) -> Result<Self, Self::Error> {
        let display_name = DisplayName::new(row.display_name)
            .map_err(|err| StorageError::query(format!("stored display name is invalid: {err}")))?;
        Ok(User::new(UserId::from_uuid(row.id), display_name))
    }
}

// ---- Reservation models ----

/// Reservation row as stored.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = reservations)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(super) struct ReservationRow {
    pub id: Uuid,
    pub reference_code: String,
    pub owner_id: Uuid,
    pub status: String,
    pub total_price: Decimal,
    pub amount_paid: Decimal,
    pub notes: Option<String>,
    pub created_by: Uuid,
    pub updated_by: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl TryFrom<ReservationRow> for Reservation {
    type Error = StorageError;

    fn try_from(row: ReservationRow) -> Result<Self, Self::Error> {
        let status = row
            .status
            .parse()
            .map_err(|err| StorageError::query(format!("stored status is invalid: {err}")))?;
        Ok(Self {
            id: row.id,
            reference_code: row.reference_code,
            owner_id: row.owner_id,
            status,
            total_price: row.total_price,
            amount_paid: row.amount_paid,
            notes: row.notes,
            created_by: row.created_by,
            updated_by: row.updated_by,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

/// Insert shape for a freshly created reservation.
#[derive(Debug, Insertable)]
#[diesel(table_name = reservations)]
pub(super) struct NewReservationRow<'a> {
    pub id: Uuid,
    pub reference_code: &'a str,
    pub owner_id: Uuid,
    pub status: &'static str,
    pub total_price: Decimal,
    pub amount_paid: Decimal,
    pub notes: Option<&'a str>,
    pub created_by: Uuid,
    pub updated_by: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl<'a> NewReservationRow<'a> {
    /// Build the insert from a validated payload.
    ///
    /// New reservations start as drafts with zero running sums.
    pub fn from_new(new: &'a NewReservation, id: Uuid, owner: Uuid, now: DateTime<Utc>) -> Self {
        Self {
            id,
            reference_code: &new.reference_code,
            owner_id: owner,
            status: ReservationStatus::Draft.as_str(),
            total_price: Decimal::ZERO,
            amount_paid: Decimal::ZERO,
            notes: new.notes.as_deref(),
            created_by: owner,
            updated_by: owner,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Changeset for a reservation patch.
///
/// `None` fields are skipped by Diesel, so omitted patch fields stay
/// untouched while the audit stamp is always written.
#[derive(Debug, AsChangeset)]
#[diesel(table_name = reservations)]
pub(super) struct ReservationRowUpdate {
    pub status: Option<&'static str>,
    pub notes: Option<String>,
    pub updated_by: Uuid,
    pub updated_at: DateTime<Utc>,
}

impl ReservationRowUpdate {
    /// Build the changeset from validated changes.
    pub fn from_changes(changes: &ReservationChanges, actor: Uuid, now: DateTime<Utc>) -> Self {
        Self {
            status: changes.status.map(ReservationStatus::as_str),
            notes: changes.notes.clone(),
            updated_by: actor,
            updated_at: now,
        }
    }
}

/// Per-currency aggregate row as stored.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = reservation_currency_totals)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(super) struct CurrencyTotalRow {
    pub reservation_id: Uuid,
    pub currency: String,
    pub total_price: Decimal,
    pub amount_paid: Decimal,
}

impl TryFrom<CurrencyTotalRow> for CurrencyTotal {
    type Error = StorageError;

    fn try_from(row: CurrencyTotalRow) -> Result<Self, Self::Error> {
        Ok(Self {
            currency: parse_currency(&row.currency)?,
            total_price: row.total_price,
            amount_paid: row.amount_paid,
        })
    }
}

// ---- Pax models ----

/// Passenger row as stored.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = pax)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(super) struct PaxRow {
    pub id: Uuid,
    pub reservation_id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub date_of_birth: Option<NaiveDate>,
    pub dni_number: Option<String>,
    pub dni_expiration: Option<NaiveDate>,
    pub passport_number: Option<String>,
    pub passport_expiration: Option<NaiveDate>,
    pub created_by: Uuid,
    pub updated_by: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<PaxRow> for Pax {
    fn from(row: PaxRow) -> Self {
        Self {
            id: row.id,
            reservation_id: row.reservation_id,
            first_name: row.first_name,
            last_name: row.last_name,
            date_of_birth: row.date_of_birth,
            dni_number: row.dni_number,
            dni_expiration: row.dni_expiration,
            passport_number: row.passport_number,
            passport_expiration: row.passport_expiration,
            created_by: row.created_by,
            updated_by: row.updated_by,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

/// Insert shape for a new passenger.
///
/// Owned strings: the insert runs inside a transaction closure that must be
/// `'static`.
#[derive(Debug, Insertable)]
#[diesel(table_name = pax)]
pub(super) struct NewPaxRow {
    pub id: Uuid,
    pub reservation_id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub date_of_birth: Option<NaiveDate>,
    pub dni_number: Option<String>,
    pub dni_expiration: Option<NaiveDate>,
    pub passport_number: Option<String>,
    pub passport_expiration: Option<NaiveDate>,
    pub created_by: Uuid,
    pub updated_by: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl NewPaxRow {
    /// Build the insert from a validated payload.
    pub fn from_new(
        new: &NewPax,
        id: Uuid,
        reservation_id: Uuid,
        actor: Uuid,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            reservation_id,
            first_name: new.first_name.clone(),
            last_name: new.last_name.clone(),
            date_of_birth: new.date_of_birth,
            dni_number: new.dni.number.clone(),
            dni_expiration: new.dni.expiration,
            passport_number: new.passport.number.clone(),
            passport_expiration: new.passport.expiration,
            created_by: actor,
            updated_by: actor,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Changeset for a passenger update.
#[derive(Debug, AsChangeset)]
#[diesel(table_name = pax)]
pub(super) struct PaxRowUpdate {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub date_of_birth: Option<NaiveDate>,
    pub dni_number: Option<String>,
    pub dni_expiration: Option<NaiveDate>,
    pub passport_number: Option<String>,
    pub passport_expiration: Option<NaiveDate>,
    pub updated_by: Uuid,
    pub updated_at: DateTime<Utc>,
}

impl PaxRowUpdate {
    /// Build the changeset from validated changes.
    pub fn from_changes(changes: &PaxChanges, actor: Uuid, now: DateTime<Utc>) -> Self {
        Self {
            first_name: changes.first_name.clone(),
            last_name: changes.last_name.clone(),
            date_of_birth: changes.date_of_birth,
            dni_number: changes.dni.number.clone(),
            dni_expiration: changes.dni.expiration,
            passport_number: changes.passport.number.clone(),
            passport_expiration: changes.passport.expiration,
            updated_by: actor,
            updated_at: now,
        }
    }
}

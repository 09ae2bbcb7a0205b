//! Diesel-backed repository for the seven bookable service kinds.
//!
//! The tables differ only in their descriptive columns, so the seven
//! [`BookingRepository`] impls are generated by one macro over the kind's
//! table, row, insert, and changeset types. Every mutation computes the
//! monetary delta and feeds it to the aggregate adjuster inside the same
//! transaction as the row write.

use async_trait::async_trait;
use chrono::Utc;
use diesel::prelude::*;
use diesel_async::scoped_futures::ScopedFutureExt as _;
use diesel_async::{AsyncConnection, RunQueryDsl};
use uuid::Uuid;

use crate::domain::bookings::car_rental::CarRental;
use crate::domain::bookings::cruise::Cruise;
use crate::domain::bookings::excursion::Excursion;
use crate::domain::bookings::flight::Flight;
use crate::domain::bookings::hotel::Hotel;
use crate::domain::bookings::medical_assist::MedicalAssist;
use crate::domain::bookings::transfer::Transfer;
use crate::domain::bookings::BookingResource;
use crate::domain::ports::{BookingRepository, StorageError};
use crate::domain::UserId;

use super::models::{
    CarRentalRow, CarRentalRowUpdate, CruiseRow, CruiseRowUpdate, ExcursionRow,
    ExcursionRowUpdate, FlightRow, FlightRowUpdate, HotelRow, HotelRowUpdate, MedicalAssistRow,
    MedicalAssistRowUpdate, NewCarRentalRow, NewCruiseRow, NewExcursionRow, NewFlightRow,
    NewHotelRow, NewMedicalAssistRow, NewTransferRow, TransferRow, TransferRowUpdate,
};
use super::pool::DbPool;
use super::schema::{
    car_rentals, cruises, excursions, flights, hotels, medical_assists, transfers,
};
use super::touch::touch_reservation;

/// Bookable service persistence backed by PostgreSQL via Diesel.
///
/// One value serves all seven kinds; the kind is picked by the
/// [`BookingRepository`] impl the caller goes through.
#[derive(Clone)]
pub struct DieselBookingRepository {
    pool: DbPool,
}

impl DieselBookingRepository {
    /// Create a repository backed by `pool`.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

macro_rules! booking_repository_impl {
    ($kind:ty, $table:ident, $row:ty, $new_row:ty, $changeset:ty, $order:expr) => {
        #[async_trait]
        impl BookingRepository<$kind> for DieselBookingRepository {
            async fn create(
                &self,
                reservation_id: Uuid,
                actor: &UserId,
                new: &<$kind as BookingResource>::New,
            ) -> Result<$kind, StorageError> {
                let actor_id = *actor.as_uuid();
                let delta = new.money.as_creation_delta();
                let row =
                    <$new_row>::from_new(new, Uuid::new_v4(), reservation_id, actor_id, Utc::now());
                let mut conn = self.pool.get().await?;

                conn.transaction(|conn| {
                    async move {
                        let inserted: $row = diesel::insert_into($table::table)
                            .values(&row)
                            .returning(<$row>::as_returning())
                            .get_result(conn)
                            .await?;

                        touch_reservation(conn, reservation_id, actor_id, Some(&delta)).await?;

                        inserted.try_into()
                    }
                    .scope_boxed()
                })
                .await
            }

            async fn find(&self, id: Uuid) -> Result<Option<$kind>, StorageError> {
                let mut conn = self.pool.get().await?;
                let row: Option<$row> = $table::table
                    .find(id)
                    .select(<$row>::as_select())
                    .first(&mut conn)
                    .await
                    .optional()?;

                row.map(TryInto::try_into).transpose()
            }

            async fn list_for_reservation(
                &self,
                reservation_id: Uuid,
            ) -> Result<Vec<$kind>, StorageError> {
                let mut conn = self.pool.get().await?;
                let rows: Vec<$row> = $table::table
                    .filter($table::reservation_id.eq(reservation_id))
                    .order($order.asc())
                    .select(<$row>::as_select())
                    .load(&mut conn)
                    .await?;

                rows.into_iter().map(TryInto::try_into).collect()
            }

            async fn update(
                &self,
                id: Uuid,
                actor: &UserId,
                changes: &<$kind as BookingResource>::Changes,
            ) -> Result<$kind, StorageError> {
                let actor_id = *actor.as_uuid();
                let changeset = <$changeset>::from_changes(changes, actor_id, Utc::now());
                let mut conn = self.pool.get().await?;

                conn.transaction(|conn| {
                    async move {
                        let locked: Option<$row> = $table::table
                            .find(id)
                            .for_update()
                            .select(<$row>::as_select())
                            .first(conn)
                            .await
                            .optional()?;
                        let current = locked.ok_or_else(|| {
                            StorageError::not_found(<$kind as BookingResource>::KIND)
                        })?;
                        let old_money = current.money()?;

                        let updated: $row = diesel::update($table::table.find(id))
                            .set(&changeset)
                            .returning(<$row>::as_returning())
                            .get_result(conn)
                            .await?;
                        let new_money = updated.money()?;

                        let delta = new_money.delta_from(&old_money);
                        touch_reservation(
                            conn,
                            current.reservation_id,
                            actor_id,
                            Some(&delta),
                        )
                        .await?;

                        updated.try_into()
                    }
                    .scope_boxed()
                })
                .await
            }

            async fn remove(&self, id: Uuid, actor: &UserId) -> Result<Uuid, StorageError> {
                let actor_id = *actor.as_uuid();
                let mut conn = self.pool.get().await?;

                conn.transaction(|conn| {
                    async move {
                        let deleted: Option<$row> = diesel::delete($table::table.find(id))
                            .returning(<$row>::as_returning())
                            .get_result(conn)
                            .await
                            .optional()?;
                        let row = deleted.ok_or_else(|| {
                            StorageError::not_found(<$kind as BookingResource>::KIND)
                        })?;

                        let delta = row.money()?.as_removal_delta();
                        touch_reservation(conn, row.reservation_id, actor_id, Some(&delta))
                            .await?;

                        Ok(row.id)
                    }
                    .scope_boxed()
                })
                .await
            }
        }
    };
}

booking_repository_impl!(Hotel, hotels, HotelRow, NewHotelRow, HotelRowUpdate, hotels::check_in);
booking_repository_impl!(
    Flight,
    flights,
    FlightRow,
    NewFlightRow,
    FlightRowUpdate,
    flights::departs_at
);
booking_repository_impl!(
    Cruise,
    cruises,
    CruiseRow,
    NewCruiseRow,
    CruiseRowUpdate,
    cruises::departs_at
);
booking_repository_impl!(
    Transfer,
    transfers,
    TransferRow,
    NewTransferRow,
    TransferRowUpdate,
    transfers::pickup_at
);
booking_repository_impl!(
    Excursion,
    excursions,
    ExcursionRow,
    NewExcursionRow,
    ExcursionRowUpdate,
    excursions::starts_at
);
booking_repository_impl!(
    MedicalAssist,
    medical_assists,
    MedicalAssistRow,
    NewMedicalAssistRow,
    MedicalAssistRowUpdate,
    medical_assists::starts_at
);
booking_repository_impl!(
    CarRental,
    car_rentals,
    CarRentalRow,
    NewCarRentalRow,
    CarRentalRowUpdate,
    car_rentals::pickup_at
);

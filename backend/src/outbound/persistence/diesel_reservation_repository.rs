//! Diesel-backed reservation repository.

use async_trait::async_trait;
use chrono::Utc;
use diesel::prelude::*;
use diesel_async::scoped_futures::ScopedFutureExt as _;
use diesel_async::{AsyncConnection, RunQueryDsl};
use uuid::Uuid;

use crate::domain::ports::{ReservationRepository, StorageError};
use crate::domain::{
    NewReservation, Reservation, ReservationChanges, ReservationWithTotals, UserId,
};

use super::models::{CurrencyTotalRow, NewReservationRow, ReservationRow, ReservationRowUpdate};
use super::pool::DbPool;
use super::schema::{
    car_rentals, cruises, excursions, flights, hotels, medical_assists, pax,
    reservation_currency_totals, reservations, transfers,
};

/// Reservation persistence backed by PostgreSQL via Diesel.
#[derive(Clone)]
pub struct DieselReservationRepository {
    pool: DbPool,
}

impl DieselReservationRepository {
    /// Create a repository backed by `pool`.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ReservationRepository for DieselReservationRepository {
    async fn create(
        &self,
        owner: &UserId,
        new: &NewReservation,
    ) -> Result<Reservation, StorageError> {
        let mut conn = self.pool.get().await?;
        let row = NewReservationRow::from_new(new, Uuid::new_v4(), *owner.as_uuid(), Utc::now());

        let inserted: ReservationRow = diesel::insert_into(reservations::table)
            .values(&row)
            .returning(ReservationRow::as_returning())
            .get_result(&mut conn)
            .await?;

        inserted.try_into()
    }

    async fn find(&self, id: Uuid) -> Result<Option<Reservation>, StorageError> {
        let mut conn = self.pool.get().await?;
        let row: Option<ReservationRow> = reservations::table
            .find(id)
            .select(ReservationRow::as_select())
            .first(&mut conn)
            .await
            .optional()?;

        row.map(Reservation::try_from).transpose()
    }

    async fn find_with_totals(
        &self,
        id: Uuid,
    ) -> Result<Option<ReservationWithTotals>, StorageError> {
        let mut conn = self.pool.get().await?;

        // Both reads happen inside one transaction so the totals match the
        // reservation row's MVCC snapshot.
        conn.transaction(|conn| {
            async move {
                let row: Option<ReservationRow> = reservations::table
                    .find(id)
                    .select(ReservationRow::as_select())
                    .first(conn)
                    .await
                    .optional()?;
                let Some(found) = row else {
                    return Ok(None);
                };
                let reservation = Reservation::try_from(found)?;

                let total_rows: Vec<CurrencyTotalRow> = reservation_currency_totals::table
                    .filter(reservation_currency_totals::reservation_id.eq(id))
                    .order(reservation_currency_totals::currency.asc())
                    .select(CurrencyTotalRow::as_select())
                    .load(conn)
                    .await?;
                let currency_totals = total_rows
                    .into_iter()
                    .map(TryInto::try_into)
                    .collect::<Result<Vec<_>, StorageError>>()?;

                Ok(Some(ReservationWithTotals {
                    reservation,
                    currency_totals,
                }))
            }
            .scope_boxed()
        })
        .await
    }

    async fn list_for_owner(&self, owner: &UserId) -> Result<Vec<Reservation>, StorageError> {
        let mut conn = self.pool.get().await?;
        let rows: Vec<ReservationRow> = reservations::table
            .filter(reservations::owner_id.eq(owner.as_uuid()))
            .order(reservations::created_at.desc())
            .select(ReservationRow::as_select())
            .load(&mut conn)
            .await?;

        rows.into_iter().map(TryInto::try_into).collect()
    }

    async fn update(
        &self,
        id: Uuid,
        actor: &UserId,
        changes: &ReservationChanges,
    ) -> Result<Reservation, StorageError> {
        let changeset = ReservationRowUpdate::from_changes(changes, *actor.as_uuid(), Utc::now());
        let mut conn = self.pool.get().await?;

        conn.transaction(|conn| {
            async move {
                // Lock the row first so a concurrent aggregate adjustment
                // cannot interleave with the patch.
                let locked: Option<ReservationRow> = reservations::table
                    .find(id)
                    .for_update()
                    .select(ReservationRow::as_select())
                    .first(conn)
                    .await
                    .optional()?;
                locked.ok_or_else(|| StorageError::not_found("reservation"))?;

                let updated: ReservationRow = diesel::update(reservations::table.find(id))
                    .set(&changeset)
                    .returning(ReservationRow::as_returning())
                    .get_result(conn)
                    .await?;

                updated.try_into()
            }
            .scope_boxed()
        })
        .await
    }

    async fn remove(&self, id: Uuid) -> Result<Uuid, StorageError> {
        let mut conn = self.pool.get().await?;

        // The schema carries no ON DELETE CASCADE; children go first.
        conn.transaction(|conn| {
            async move {
                diesel::delete(hotels::table.filter(hotels::reservation_id.eq(id)))
                    .execute(conn)
                    .await?;
                diesel::delete(flights::table.filter(flights::reservation_id.eq(id)))
                    .execute(conn)
                    .await?;
                diesel::delete(cruises::table.filter(cruises::reservation_id.eq(id)))
                    .execute(conn)
                    .await?;
                diesel::delete(transfers::table.filter(transfers::reservation_id.eq(id)))
                    .execute(conn)
                    .await?;
                diesel::delete(excursions::table.filter(excursions::reservation_id.eq(id)))
                    .execute(conn)
                    .await?;
                diesel::delete(
                    medical_assists::table.filter(medical_assists::reservation_id.eq(id)),
                )
                .execute(conn)
                .await?;
                diesel::delete(car_rentals::table.filter(car_rentals::reservation_id.eq(id)))
                    .execute(conn)
                    .await?;
                diesel::delete(pax::table.filter(pax::reservation_id.eq(id)))
                    .execute(conn)
                    .await?;
                diesel::delete(
                    reservation_currency_totals::table
                        .filter(reservation_currency_totals::reservation_id.eq(id)),
                )
                .execute(conn)
                .await?;

                let deleted: Option<Uuid> = diesel::delete(reservations::table.find(id))
                    .returning(reservations::id)
                    .get_result(conn)
                    .await
                    .optional()?;

                deleted.ok_or_else(|| StorageError::not_found("reservation"))
            }
            .scope_boxed()
        })
        .await
    }
}

//! Diesel-backed passenger repository.
//!
//! Passengers carry no money, so every mutation touches the parent
//! reservation with a zero delta: the audit stamp moves, the aggregates do
//! not.

use async_trait::async_trait;
use chrono::Utc;
use diesel::prelude::*;
use diesel_async::scoped_futures::ScopedFutureExt as _;
use diesel_async::{AsyncConnection, RunQueryDsl};
use uuid::Uuid;

use crate::domain::ports::{PaxRepository, StorageError};
use crate::domain::{NewPax, Pax, PaxChanges, UserId};

use super::models::{NewPaxRow, PaxRow, PaxRowUpdate};
use super::pool::DbPool;
use super::schema::pax;
use super::touch::touch_reservation;

/// Passenger persistence backed by PostgreSQL via Diesel.
#[derive(Clone)]
pub struct DieselPaxRepository {
    pool: DbPool,
}

impl DieselPaxRepository {
    /// Create a repository backed by `pool`.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PaxRepository for DieselPaxRepository {
    async fn create(
        &self,
        reservation_id: Uuid,
        actor: &UserId,
        new: &NewPax,
    ) -> Result<Pax, StorageError> {
        let actor_id = *actor.as_uuid();
        let row = NewPaxRow::from_new(new, Uuid::new_v4(), reservation_id, actor_id, Utc::now());
        let mut conn = self.pool.get().await?;

        conn.transaction(|conn| {
            async move {
                let inserted: PaxRow = diesel::insert_into(pax::table)
                    .values(&row)
                    .returning(PaxRow::as_returning())
                    .get_result(conn)
                    .await?;

                touch_reservation(conn, reservation_id, actor_id, None).await?;

                Ok(inserted.into())
            }
            .scope_boxed()
        })
        .await
    }

    async fn find(&self, id: Uuid) -> Result<Option<Pax>, StorageError> {
        let mut conn = self.pool.get().await?;
        let row: Option<PaxRow> = pax::table
            .find(id)
            .select(PaxRow::as_select())
            .first(&mut conn)
            .await
            .optional()?;

        Ok(row.map(Pax::from))
    }

    async fn list_for_reservation(&self, reservation_id: Uuid) -> Result<Vec<Pax>, StorageError> {
        let mut conn = self.pool.get().await?;
        let rows: Vec<PaxRow> = pax::table
            .filter(pax::reservation_id.eq(reservation_id))
            .order(pax::created_at.asc())
            .select(PaxRow::as_select())
            .load(&mut conn)
            .await?;

        Ok(rows.into_iter().map(Pax::from).collect())
    }

    async fn update(
        &self,
        id: Uuid,
        actor: &UserId,
        changes: &PaxChanges,
    ) -> Result<Pax, StorageError> {
        let actor_id = *actor.as_uuid();
        let changeset = PaxRowUpdate::from_changes(changes, actor_id, Utc::now());
        let mut conn = self.pool.get().await?;

        conn.transaction(|conn| {
            async move {
                let locked: Option<PaxRow> = pax::table
                    .find(id)
                    .for_update()
                    .select(PaxRow::as_select())
                    .first(conn)
                    .await
                    .optional()?;
                let current = locked.ok_or_else(|| StorageError::not_found("pax"))?;

                let updated: PaxRow = diesel::update(pax::table.find(id))
                    .set(&changeset)
                    .returning(PaxRow::as_returning())
                    .get_result(conn)
                    .await?;

                touch_reservation(conn, current.reservation_id, actor_id, None).await?;

                Ok(updated.into())
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
                let deleted: Option<PaxRow> = diesel::delete(pax::table.find(id))
                    .returning(PaxRow::as_returning())
                    .get_result(conn)
                    .await
                    .optional()?;
                let row = deleted.ok_or_else(|| StorageError::not_found("pax"))?;

                touch_reservation(conn, row.reservation_id, actor_id, None).await?;

                Ok(row.id)
            }
            .scope_boxed()
        })
        .await
    }
}

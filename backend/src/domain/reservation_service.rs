//! Reservation domain service.
//!
//! Orchestrates payload validation, ownership checks, and repository calls
//! for the reservation aggregate root. Storage failures arrive as
//! [`StorageError`](crate::domain::ports::StorageError) and convert into the
//! domain taxonomy at the `?` boundary.

use std::sync::Arc;

use uuid::Uuid;

use crate::domain::ports::ReservationRepository;
use crate::domain::{
    DomainError, NewReservation, Reservation, ReservationChanges, ReservationPatch,
    ReservationPayload, ReservationWithTotals, UserId,
};

/// Assert that `actor` owns `reservation`.
pub(crate) fn ensure_owner(
    reservation: &Reservation,
    actor: &UserId,
) -> Result<(), DomainError> {
    if reservation.owner_id != *actor.as_uuid() {
        return Err(DomainError::forbidden(
            "this reservation belongs to another operator",
        ));
    }
    Ok(())
}

/// Load a reservation and assert that `actor` owns it.
///
/// Used by every service that mutates rows hanging off a reservation.
pub(crate) async fn authorized_reservation(
    reservations: &dyn ReservationRepository,
    actor: &UserId,
    id: Uuid,
) -> Result<Reservation, DomainError> {
    let reservation = reservations
        .find(id)
        .await?
        .ok_or_else(|| DomainError::not_found("reservation not found"))?;
    ensure_owner(&reservation, actor)?;
    Ok(reservation)
}

/// Use-cases over the reservation aggregate root.
#[derive(Clone)]
pub struct ReservationService {
    reservations: Arc<dyn ReservationRepository>,
}

impl ReservationService {
    /// Create a new service over a reservation repository.
    pub fn new(reservations: Arc<dyn ReservationRepository>) -> Self {
        Self { reservations }
    }

    /// Create a draft reservation owned by `actor`.
    pub async fn create(
        &self,
        actor: &UserId,
        payload: &ReservationPayload,
    ) -> Result<Reservation, DomainError> {
        let new = NewReservation::from_payload(payload)?;
        Ok(self.reservations.create(actor, &new).await?)
    }

    /// Fetch one of `actor`'s reservations with its per-currency totals.
    pub async fn get(
        &self,
        actor: &UserId,
        id: Uuid,
    ) -> Result<ReservationWithTotals, DomainError> {
        let found = self
            .reservations
            .find_with_totals(id)
            .await?
            .ok_or_else(|| DomainError::not_found("reservation not found"))?;
        ensure_owner(&found.reservation, actor)?;
        Ok(found)
    }

    /// List `actor`'s reservations, newest first.
    pub async fn list(&self, actor: &UserId) -> Result<Vec<Reservation>, DomainError> {
        Ok(self.reservations.list_for_owner(actor).await?)
    }

    /// Patch status and notes, validating the lifecycle transition against
    /// the persisted state.
    pub async fn update(
        &self,
        actor: &UserId,
        id: Uuid,
        patch: &ReservationPatch,
    ) -> Result<Reservation, DomainError> {
        let current = authorized_reservation(self.reservations.as_ref(), actor, id).await?;
        let changes = ReservationChanges::from_patch(patch, current.status)?;
        Ok(self.reservations.update(id, actor, &changes).await?)
    }

    /// Delete a reservation and everything hanging off it.
    pub async fn remove(&self, actor: &UserId, id: Uuid) -> Result<Uuid, DomainError> {
        authorized_reservation(self.reservations.as_ref(), actor, id).await?;
        Ok(self.reservations.remove(id).await?)
    }
}

#[cfg(test)]
#[path = "reservation_service_tests.rs"]
mod tests;

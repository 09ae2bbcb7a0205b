//! Passenger domain service.
//!
//! Every operation first authorizes the parent reservation, so passenger
//! rows are only ever reachable by the operator who owns the reservation.

use std::sync::Arc;

use uuid::Uuid;

use crate::domain::ports::{PaxRepository, ReservationRepository};
use crate::domain::reservation_service::authorized_reservation;
use crate::domain::{DomainError, NewPax, Pax, PaxChanges, PaxPayload, UserId};

/// Use-cases over passengers attached to a reservation.
#[derive(Clone)]
pub struct PaxService {
    pax: Arc<dyn PaxRepository>,
    reservations: Arc<dyn ReservationRepository>,
}

impl PaxService {
    /// Create a new service over passenger and reservation repositories.
    pub fn new(pax: Arc<dyn PaxRepository>, reservations: Arc<dyn ReservationRepository>) -> Self {
        Self { pax, reservations }
    }

    /// Add a passenger to one of `actor`'s reservations.
    pub async fn create(
        &self,
        actor: &UserId,
        reservation_id: Uuid,
        payload: &PaxPayload,
    ) -> Result<Pax, DomainError> {
        let new = NewPax::from_payload(payload)?;
        authorized_reservation(self.reservations.as_ref(), actor, reservation_id).await?;
        Ok(self.pax.create(reservation_id, actor, &new).await?)
    }

    /// Fetch a single passenger.
    pub async fn get(&self, actor: &UserId, id: Uuid) -> Result<Pax, DomainError> {
        let pax = self.load(id).await?;
        authorized_reservation(self.reservations.as_ref(), actor, pax.reservation_id).await?;
        Ok(pax)
    }

    /// List a reservation's passengers in creation order.
    pub async fn list(
        &self,
        actor: &UserId,
        reservation_id: Uuid,
    ) -> Result<Vec<Pax>, DomainError> {
        authorized_reservation(self.reservations.as_ref(), actor, reservation_id).await?;
        Ok(self.pax.list_for_reservation(reservation_id).await?)
    }

    /// Apply a partial update to a passenger.
    pub async fn update(
        &self,
        actor: &UserId,
        id: Uuid,
        payload: &PaxPayload,
    ) -> Result<Pax, DomainError> {
        let changes = PaxChanges::from_payload(payload)?;
        let current = self.load(id).await?;
        authorized_reservation(self.reservations.as_ref(), actor, current.reservation_id).await?;
        Ok(self.pax.update(id, actor, &changes).await?)
    }

    /// Delete a passenger, touching the parent reservation's audit stamp.
    pub async fn remove(&self, actor: &UserId, id: Uuid) -> Result<Uuid, DomainError> {
        let current = self.load(id).await?;
        authorized_reservation(self.reservations.as_ref(), actor, current.reservation_id).await?;
        Ok(self.pax.remove(id, actor).await?)
    }

    async fn load(&self, id: Uuid) -> Result<Pax, DomainError> {
        self.pax
            .find(id)
            .await?
            .ok_or_else(|| DomainError::not_found("pax not found"))
    }
}

#[cfg(test)]
#[path = "pax_service_tests.rs"]
mod tests;

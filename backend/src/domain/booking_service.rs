//! Generic bookable service orchestration.
//!
//! One service drives create/read/update/remove for every service-record
//! kind. The kind contributes its validation through
//! [`BookingResource`]; the repository owns the transaction that applies the
//! row write together with the parent aggregate adjustment.

use std::sync::Arc;

use mockable::Clock;
use uuid::Uuid;

use crate::domain::bookings::{BookingRecord, BookingResource};
use crate::domain::ports::{BookingRepository, ReservationRepository};
use crate::domain::reservation_service::authorized_reservation;
use crate::domain::{DomainError, UserId};

/// Use-cases over service rows of kind `K`.
pub struct BookingService<K: BookingResource> {
    bookings: Arc<dyn BookingRepository<K>>,
    reservations: Arc<dyn ReservationRepository>,
    clock: Arc<dyn Clock>,
}

impl<K: BookingResource> Clone for BookingService<K> {
    fn clone(&self) -> Self {
        Self {
            bookings: Arc::clone(&self.bookings),
            reservations: Arc::clone(&self.reservations),
            clock: Arc::clone(&self.clock),
        }
    }
}

impl<K: BookingResource> BookingService<K> {
    /// Create a new service over the kind's repository.
    pub fn new(
        bookings: Arc<dyn BookingRepository<K>>,
        reservations: Arc<dyn ReservationRepository>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            bookings,
            reservations,
            clock,
        }
    }

    /// Validate a payload and insert a service row under one of `actor`'s
    /// reservations.
    pub async fn create(
        &self,
        actor: &UserId,
        reservation_id: Uuid,
        payload: &K::Payload,
    ) -> Result<K::Record, DomainError> {
        let new = K::validate_create(payload, self.clock.as_ref())?;
        authorized_reservation(self.reservations.as_ref(), actor, reservation_id).await?;
        Ok(self.bookings.create(reservation_id, actor, &new).await?)
    }

    /// Fetch a single service row.
    pub async fn get(&self, actor: &UserId, id: Uuid) -> Result<K::Record, DomainError> {
        let record = self.load(id).await?;
        authorized_reservation(self.reservations.as_ref(), actor, record.reservation_id())
            .await?;
        Ok(record)
    }

    /// List a reservation's service rows of this kind.
    pub async fn list(
        &self,
        actor: &UserId,
        reservation_id: Uuid,
    ) -> Result<Vec<K::Record>, DomainError> {
        authorized_reservation(self.reservations.as_ref(), actor, reservation_id).await?;
        Ok(self.bookings.list_for_reservation(reservation_id).await?)
    }

    /// Merge a partial payload against the persisted row, validate the
    /// result, and apply the supplied fields.
    pub async fn update(
        &self,
        actor: &UserId,
        id: Uuid,
        payload: &K::Payload,
    ) -> Result<K::Record, DomainError> {
        let current = self.load(id).await?;
        authorized_reservation(self.reservations.as_ref(), actor, current.reservation_id())
            .await?;
        let changes = K::validate_update(payload, &current, self.clock.as_ref())?;
        Ok(self.bookings.update(id, actor, &changes).await?)
    }

    /// Delete a service row, reversing its aggregate contribution.
    pub async fn remove(&self, actor: &UserId, id: Uuid) -> Result<Uuid, DomainError> {
        let current = self.load(id).await?;
        authorized_reservation(self.reservations.as_ref(), actor, current.reservation_id())
            .await?;
        Ok(self.bookings.remove(id, actor).await?)
    }

    async fn load(&self, id: Uuid) -> Result<K::Record, DomainError> {
        self.bookings
            .find(id)
            .await?
            .ok_or_else(|| DomainError::not_found(format!("{} not found", K::KIND)))
    }
}

#[cfg(test)]
#[path = "booking_service_tests.rs"]
mod tests;

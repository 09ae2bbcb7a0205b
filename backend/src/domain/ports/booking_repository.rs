//! Port for bookable service persistence, generic over the service kind.
//!
//! One trait covers all seven service tables. Adapters own the transaction:
//! every mutation applies the row change and feeds the monetary delta into
//! the parent reservation's aggregate before committing.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::bookings::{BookingRecord, BookingResource};
use crate::domain::UserId;

use super::StorageError;

/// Port for writing and reading bookable service rows of kind `K`.
#[async_trait]
pub trait BookingRepository<K: BookingResource>: Send + Sync {
    /// Insert a service row under `reservation_id`.
    async fn create(
        &self,
        reservation_id: Uuid,
        actor: &UserId,
        new: &K::New,
    ) -> Result<K::Record, StorageError>;

    /// Find a service row by id.
    async fn find(&self, id: Uuid) -> Result<Option<K::Record>, StorageError>;

    /// List a reservation's service rows of this kind in creation order.
    async fn list_for_reservation(
        &self,
        reservation_id: Uuid,
    ) -> Result<Vec<K::Record>, StorageError>;

    /// Apply validated changes and stamp `actor` into the audit fields.
    async fn update(
        &self,
        id: Uuid,
        actor: &UserId,
        changes: &K::Changes,
    ) -> Result<K::Record, StorageError>;

    /// Delete a service row, reversing its contribution to the aggregate.
    async fn remove(&self, id: Uuid, actor: &UserId) -> Result<Uuid, StorageError>;
}

/// Fixture implementation backed by at most one preset row.
#[derive(Debug, Clone)]
pub struct FixtureBookingRepository<K: BookingResource> {
    record: Option<K::Record>,
}

impl<K: BookingResource> FixtureBookingRepository<K> {
    /// Fixture that serves `record` from every read and write.
    pub fn with_record(record: K::Record) -> Self {
        Self {
            record: Some(record),
        }
    }
}

impl<K: BookingResource> Default for FixtureBookingRepository<K> {
    fn default() -> Self {
        Self { record: None }
    }
}

#[async_trait]
impl<K: BookingResource> BookingRepository<K> for FixtureBookingRepository<K> {
    async fn create(
        &self,
        _reservation_id: Uuid,
        _actor: &UserId,
        _new: &K::New,
    ) -> Result<K::Record, StorageError> {
        self.record
            .clone()
            .ok_or_else(|| StorageError::query(format!("fixture has no preset {}", K::KIND)))
    }

    async fn find(&self, id: Uuid) -> Result<Option<K::Record>, StorageError> {
        Ok(self.record.clone().filter(|record| record.id() == id))
    }

    async fn list_for_reservation(
        &self,
        reservation_id: Uuid,
    ) -> Result<Vec<K::Record>, StorageError> {
        Ok(self
            .record
            .clone()
            .filter(|record| record.reservation_id() == reservation_id)
            .into_iter()
            .collect())
    }

    async fn update(
        &self,
        id: Uuid,
        _actor: &UserId,
        _changes: &K::Changes,
    ) -> Result<K::Record, StorageError> {
        self.record
            .clone()
            .filter(|record| record.id() == id)
            .ok_or_else(|| StorageError::not_found(K::KIND))
    }

    async fn remove(&self, id: Uuid, _actor: &UserId) -> Result<Uuid, StorageError> {
        Ok(id)
    }
}

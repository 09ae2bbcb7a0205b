//! Port for reservation persistence.
//!
//! Adapters own their transaction scope: `update` and `remove` are expected
//! to lock the row, apply the change, and stamp the audit fields in a single
//! transaction before returning.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{
    NewReservation, Reservation, ReservationChanges, ReservationWithTotals, UserId,
};

use super::StorageError;

/// Port for writing and reading reservation aggregates.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ReservationRepository: Send + Sync {
    /// Insert a reservation owned by `owner` in the draft state.
    async fn create(
        &self,
        owner: &UserId,
        new: &NewReservation,
    ) -> Result<Reservation, StorageError>;

    /// Find a reservation by id.
    async fn find(&self, id: Uuid) -> Result<Option<Reservation>, StorageError>;

    /// Find a reservation by id together with its per-currency totals.
    async fn find_with_totals(
        &self,
        id: Uuid,
    ) -> Result<Option<ReservationWithTotals>, StorageError>;

    /// List an owner's reservations, newest first.
    async fn list_for_owner(&self, owner: &UserId) -> Result<Vec<Reservation>, StorageError>;

    /// Apply a validated patch and stamp `actor` into the audit fields.
    async fn update(
        &self,
        id: Uuid,
        actor: &UserId,
        changes: &ReservationChanges,
    ) -> Result<Reservation, StorageError>;

    /// Delete a reservation and everything hanging off it.
    async fn remove(&self, id: Uuid) -> Result<Uuid, StorageError>;
}

/// Fixture implementation backed by at most one preset reservation.
#[derive(Debug, Default, Clone)]
pub struct FixtureReservationRepository {
    record: Option<Reservation>,
}

impl FixtureReservationRepository {
    /// Fixture that serves `record` from every read and write.
    pub fn with_record(record: Reservation) -> Self {
        Self {
            record: Some(record),
        }
    }
}

#[async_trait]
impl ReservationRepository for FixtureReservationRepository {
    async fn create(
        &self,
        _owner: &UserId,
        _new: &NewReservation,
    ) -> Result<Reservation, StorageError> {
        self.record
            .clone()
            .ok_or_else(|| StorageError::query("fixture has no preset reservation"))
    }

    async fn find(&self, id: Uuid) -> Result<Option<Reservation>, StorageError> {
        Ok(self.record.clone().filter(|record| record.id == id))
    }

    async fn find_with_totals(
        &self,
        id: Uuid,
    ) -> Result<Option<ReservationWithTotals>, StorageError> {
        Ok(self
            .record
            .clone()
            .filter(|record| record.id == id)
            .map(|reservation| ReservationWithTotals {
                reservation,
                currency_totals: Vec::new(),
            }))
    }

    async fn list_for_owner(&self, owner: &UserId) -> Result<Vec<Reservation>, StorageError> {
        Ok(self
            .record
            .clone()
            .filter(|record| record.owner_id == *owner.as_uuid())
            .into_iter()
            .collect())
    }

    async fn update(
        &self,
        id: Uuid,
        _actor: &UserId,
        _changes: &ReservationChanges,
    ) -> Result<Reservation, StorageError> {
        self.record
            .clone()
            .filter(|record| record.id == id)
            .ok_or_else(|| StorageError::not_found("reservation"))
    }

    async fn remove(&self, id: Uuid) -> Result<Uuid, StorageError> {
        Ok(id)
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use chrono::Utc;
    use rstest::rstest;
    use rust_decimal::Decimal;

    use super::*;
    use crate::domain::ReservationStatus;

    fn reservation(owner: &UserId) -> Reservation {
        let now = Utc::now();
        Reservation {
            id: Uuid::new_v4(),
            reference_code: "WF-2026-0042".to_owned(),
            owner_id: *owner.as_uuid(),
            status: ReservationStatus::Draft,
            total_price: Decimal::ZERO,
            amount_paid: Decimal::ZERO,
            notes: None,
            created_by: *owner.as_uuid(),
            updated_by: *owner.as_uuid(),
            created_at: now,
            updated_at: now,
        }
    }

    #[rstest]
    #[tokio::test]
    async fn empty_fixture_finds_nothing() {
        let repo = FixtureReservationRepository::default();
        let found = repo.find(Uuid::new_v4()).await.expect("fixture lookup");
        assert!(found.is_none());
    }

    #[rstest]
    #[tokio::test]
    async fn preset_fixture_serves_its_record_by_id() {
        let owner = UserId::random();
        let record = reservation(&owner);
        let repo = FixtureReservationRepository::with_record(record.clone());

        let found = repo.find(record.id).await.expect("fixture lookup");
        assert_eq!(found, Some(record.clone()));

        let miss = repo.find(Uuid::new_v4()).await.expect("fixture lookup");
        assert!(miss.is_none());
    }

    #[rstest]
    #[tokio::test]
    async fn listing_filters_by_owner() {
        let owner = UserId::random();
        let record = reservation(&owner);
        let repo = FixtureReservationRepository::with_record(record.clone());

        let mine = repo.list_for_owner(&owner).await.expect("fixture list");
        assert_eq!(mine, vec![record]);

        let theirs = repo
            .list_for_owner(&UserId::random())
            .await
            .expect("fixture list");
        assert!(theirs.is_empty());
    }

    #[rstest]
    #[tokio::test]
    async fn totals_read_wraps_the_record_with_an_empty_breakdown() {
        let owner = UserId::random();
        let record = reservation(&owner);
        let repo = FixtureReservationRepository::with_record(record.clone());

        let found = repo
            .find_with_totals(record.id)
            .await
            .expect("fixture lookup")
            .expect("record present");
        assert_eq!(found.reservation, record);
        assert!(found.currency_totals.is_empty());
    }

    #[rstest]
    #[tokio::test]
    async fn update_on_an_absent_row_reports_not_found() {
        let repo = FixtureReservationRepository::default();
        let err = repo
            .update(
                Uuid::new_v4(),
                &UserId::random(),
                &ReservationChanges::default(),
            )
            .await
            .expect_err("absent row must fail");
        assert_eq!(err, StorageError::not_found("reservation"));
    }

    #[rstest]
    #[tokio::test]
    async fn remove_echoes_the_id() {
        let repo = FixtureReservationRepository::default();
        let id = Uuid::new_v4();
        assert_eq!(repo.remove(id).await.expect("fixture remove"), id);
    }
}

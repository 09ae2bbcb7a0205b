//! Port for passenger persistence.
//!
//! Every mutation touches the parent reservation's audit stamp inside the
//! adapter's transaction, so the port carries the acting operator even for
//! removals.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{NewPax, Pax, PaxChanges, UserId};

use super::StorageError;

/// Port for writing and reading passengers.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PaxRepository: Send + Sync {
    /// Insert a passenger under `reservation_id`.
    async fn create(
        &self,
        reservation_id: Uuid,
        actor: &UserId,
        new: &NewPax,
    ) -> Result<Pax, StorageError>;

    /// Find a passenger by id.
    async fn find(&self, id: Uuid) -> Result<Option<Pax>, StorageError>;

    /// List a reservation's passengers in creation order.
    async fn list_for_reservation(&self, reservation_id: Uuid) -> Result<Vec<Pax>, StorageError>;

    /// Apply validated changes and stamp `actor` into the audit fields.
    async fn update(
        &self,
        id: Uuid,
        actor: &UserId,
        changes: &PaxChanges,
    ) -> Result<Pax, StorageError>;

    /// Delete a passenger, touching the parent reservation.
    async fn remove(&self, id: Uuid, actor: &UserId) -> Result<Uuid, StorageError>;
}

/// Fixture implementation backed by at most one preset passenger.
#[derive(Debug, Default, Clone)]
pub struct FixturePaxRepository {
    record: Option<Pax>,
}

impl FixturePaxRepository {
    /// Fixture that serves `record` from every read and write.
    pub fn with_record(record: Pax) -> Self {
        Self {
            record: Some(record),
        }
    }
}

#[async_trait]
impl PaxRepository for FixturePaxRepository {
    async fn create(
        &self,
        _reservation_id: Uuid,
        _actor: &UserId,
        _new: &NewPax,
    ) -> Result<Pax, StorageError> {
        self.record
            .clone()
            .ok_or_else(|| StorageError::query("fixture has no preset passenger"))
    }

    async fn find(&self, id: Uuid) -> Result<Option<Pax>, StorageError> {
        Ok(self.record.clone().filter(|record| record.id == id))
    }

    async fn list_for_reservation(&self, reservation_id: Uuid) -> Result<Vec<Pax>, StorageError> {
        Ok(self
            .record
            .clone()
            .filter(|record| record.reservation_id == reservation_id)
            .into_iter()
            .collect())
    }

    async fn update(
        &self,
        id: Uuid,
        _actor: &UserId,
        _changes: &PaxChanges,
    ) -> Result<Pax, StorageError> {
        self.record
            .clone()
            .filter(|record| record.id == id)
            .ok_or_else(|| StorageError::not_found("pax"))
    }

    async fn remove(&self, id: Uuid, _actor: &UserId) -> Result<Uuid, StorageError> {
        Ok(id)
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use chrono::Utc;
    use rstest::rstest;

    use super::*;

    fn pax(reservation_id: Uuid) -> Pax {
        let now = Utc::now();
        let actor = Uuid::new_v4();
        Pax {
            id: Uuid::new_v4(),
            reservation_id,
            first_name: "Ada".to_owned(),
            last_name: "Lovelace".to_owned(),
            date_of_birth: None,
            dni_number: Some("12345678Z".to_owned()),
            dni_expiration: None,
            passport_number: None,
            passport_expiration: None,
            created_by: actor,
            updated_by: actor,
            created_at: now,
            updated_at: now,
        }
    }

    #[rstest]
    #[tokio::test]
    async fn empty_fixture_finds_nothing() {
        let repo = FixturePaxRepository::default();
        let found = repo.find(Uuid::new_v4()).await.expect("fixture lookup");
        assert!(found.is_none());
    }

    #[rstest]
    #[tokio::test]
    async fn listing_filters_by_reservation() {
        let reservation_id = Uuid::new_v4();
        let record = pax(reservation_id);
        let repo = FixturePaxRepository::with_record(record.clone());

        let listed = repo
            .list_for_reservation(reservation_id)
            .await
            .expect("fixture list");
        assert_eq!(listed, vec![record]);

        let other = repo
            .list_for_reservation(Uuid::new_v4())
            .await
            .expect("fixture list");
        assert!(other.is_empty());
    }

    #[rstest]
    #[tokio::test]
    async fn update_on_an_absent_row_reports_not_found() {
        let repo = FixturePaxRepository::default();
        let err = repo
            .update(Uuid::new_v4(), &UserId::random(), &PaxChanges::default())
            .await
            .expect_err("absent row must fail");
        assert_eq!(err, StorageError::not_found("pax"));
    }

    #[rstest]
    #[tokio::test]
    async fn remove_echoes_the_id() {
        let repo = FixturePaxRepository::default();
        let id = Uuid::new_v4();
        assert_eq!(
            repo.remove(id, &UserId::random()).await.expect("fixture remove"),
            id
        );
    }
}

//! Tests for the passenger service.

use std::sync::Arc;

use chrono::Utc;
use rust_decimal::Decimal;
use uuid::Uuid;

use super::*;
use crate::domain::ports::{MockPaxRepository, MockReservationRepository};
use crate::domain::{ErrorCode, Reservation, ReservationStatus};

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

fn valid_payload() -> PaxPayload {
    PaxPayload {
        first_name: Some("Ada".to_owned()),
        last_name: Some("Lovelace".to_owned()),
        dni_number: Some("12345678Z".to_owned()),
        ..PaxPayload::default()
    }
}

#[tokio::test]
async fn create_rejects_an_undocumented_passenger_before_touching_storage() {
    let mut pax_repo = MockPaxRepository::new();
    pax_repo.expect_create().times(0);
    let mut reservations = MockReservationRepository::new();
    reservations.expect_find().times(0);

    let service = PaxService::new(Arc::new(pax_repo), Arc::new(reservations));
    let error = service
        .create(
            &UserId::random(),
            Uuid::new_v4(),
            &PaxPayload {
                dni_number: None,
                ..valid_payload()
            },
        )
        .await
        .expect_err("undocumented passenger");

    assert_eq!(error.code(), ErrorCode::InvalidRequest);
}

#[tokio::test]
async fn create_requires_an_owned_parent() {
    let owner = UserId::random();
    let parent = reservation(&owner);
    let parent_id = parent.id;

    let mut pax_repo = MockPaxRepository::new();
    pax_repo.expect_create().times(0);
    let mut reservations = MockReservationRepository::new();
    reservations
        .expect_find()
        .times(1)
        .return_once(move |_| Ok(Some(parent)));

    let service = PaxService::new(Arc::new(pax_repo), Arc::new(reservations));
    let error = service
        .create(&UserId::random(), parent_id, &valid_payload())
        .await
        .expect_err("foreign parent");

    assert_eq!(error.code(), ErrorCode::Forbidden);
}

#[tokio::test]
async fn create_persists_under_an_owned_parent() {
    let actor = UserId::random();
    let parent = reservation(&actor);
    let parent_id = parent.id;
    let persisted = pax(parent_id);
    let returned = persisted.clone();

    let mut pax_repo = MockPaxRepository::new();
    pax_repo
        .expect_create()
        .times(1)
        .return_once(move |_, _, _| Ok(returned));
    let mut reservations = MockReservationRepository::new();
    reservations
        .expect_find()
        .times(1)
        .return_once(move |_| Ok(Some(parent)));

    let service = PaxService::new(Arc::new(pax_repo), Arc::new(reservations));
    let created = service
        .create(&actor, parent_id, &valid_payload())
        .await
        .expect("create succeeds");

    assert_eq!(created, persisted);
}

#[tokio::test]
async fn get_reports_not_found_when_the_row_is_missing() {
    let mut pax_repo = MockPaxRepository::new();
    pax_repo.expect_find().times(1).return_once(|_| Ok(None));
    let reservations = MockReservationRepository::new();

    let service = PaxService::new(Arc::new(pax_repo), Arc::new(reservations));
    let error = service
        .get(&UserId::random(), Uuid::new_v4())
        .await
        .expect_err("missing row");

    assert_eq!(error.code(), ErrorCode::NotFound);
}

#[tokio::test]
async fn update_still_enforces_document_pairing() {
    let mut pax_repo = MockPaxRepository::new();
    pax_repo.expect_find().times(0);
    pax_repo.expect_update().times(0);
    let reservations = MockReservationRepository::new();

    let service = PaxService::new(Arc::new(pax_repo), Arc::new(reservations));
    let error = service
        .update(
            &UserId::random(),
            Uuid::new_v4(),
            &PaxPayload {
                passport_expiration: Some("2031-05-01".to_owned()),
                ..PaxPayload::default()
            },
        )
        .await
        .expect_err("expiration without number");

    assert_eq!(error.code(), ErrorCode::InvalidRequest);
}

#[tokio::test]
async fn remove_authorizes_the_parent_then_deletes() {
    let actor = UserId::random();
    let parent = reservation(&actor);
    let current = pax(parent.id);
    let id = current.id;

    let mut pax_repo = MockPaxRepository::new();
    pax_repo
        .expect_find()
        .times(1)
        .return_once(move |_| Ok(Some(current)));
    pax_repo
        .expect_remove()
        .times(1)
        .return_once(move |id, _| Ok(id));
    let mut reservations = MockReservationRepository::new();
    reservations
        .expect_find()
        .times(1)
        .return_once(move |_| Ok(Some(parent)));

    let service = PaxService::new(Arc::new(pax_repo), Arc::new(reservations));
    let removed = service.remove(&actor, id).await.expect("remove succeeds");

    assert_eq!(removed, id);
}

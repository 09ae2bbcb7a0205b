//! Tests for the generic bookable service orchestration, driven through the
//! hotel kind.

use std::sync::Arc;

use chrono::{TimeZone, Utc};
use mockable::MockClock;
use rust_decimal::Decimal;
use uuid::Uuid;

use super::*;
use crate::domain::bookings::hotel::{Hotel, HotelPayload};
use crate::domain::bookings::MoneyPayload;
use crate::domain::policies::date_range::CODE_BACKWARDS_RANGE;
use crate::domain::ports::{FixtureBookingRepository, MockReservationRepository};
use crate::domain::{ErrorCode, Reservation, ReservationStatus};
use crate::domain::money::Currency;

fn clock() -> Arc<MockClock> {
    let mut clock = MockClock::new();
    clock
        .expect_utc()
        .returning(|| Utc.with_ymd_and_hms(2026, 9, 1, 12, 0, 0).unwrap());
    Arc::new(clock)
}

fn reservation(owner: &UserId, id: Uuid) -> Reservation {
    let now = Utc::now();
    Reservation {
        id,
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

fn hotel(reservation_id: Uuid) -> Hotel {
    let now = Utc::now();
    let actor = Uuid::new_v4();
    Hotel {
        id: Uuid::new_v4(),
        reservation_id,
        hotel_name: "Hotel Bellver".to_owned(),
        location: "Palma".to_owned(),
        check_in: Utc.with_ymd_and_hms(2026, 9, 10, 14, 0, 0).unwrap(),
        check_out: Utc.with_ymd_and_hms(2026, 9, 14, 10, 0, 0).unwrap(),
        booking_reference: None,
        currency: Currency::new("EUR").expect("EUR is a valid code"),
        total_price: "480".parse().expect("literal"),
        amount_paid: "100".parse().expect("literal"),
        created_by: actor,
        updated_by: actor,
        created_at: now,
        updated_at: now,
    }
}

fn valid_payload() -> HotelPayload {
    HotelPayload {
        hotel_name: Some("Hotel Bellver".to_owned()),
        location: Some("Palma".to_owned()),
        check_in: Some("2026-09-10T14:00:00Z".to_owned()),
        check_out: Some("2026-09-14T10:00:00Z".to_owned()),
        booking_reference: None,
        money: MoneyPayload {
            currency: Some("EUR".to_owned()),
            total_price: Some("480".to_owned()),
            amount_paid: Some("100".to_owned()),
        },
    }
}

fn service(
    bookings: FixtureBookingRepository<Hotel>,
    reservations: MockReservationRepository,
) -> BookingService<Hotel> {
    BookingService::new(Arc::new(bookings), Arc::new(reservations), clock())
}

#[tokio::test]
async fn create_rejects_an_invalid_payload_before_touching_storage() {
    let mut reservations = MockReservationRepository::new();
    reservations.expect_find().times(0);

    let svc = service(FixtureBookingRepository::default(), reservations);
    let error = svc
        .create(
            &UserId::random(),
            Uuid::new_v4(),
            &HotelPayload {
                hotel_name: None,
                ..valid_payload()
            },
        )
        .await
        .expect_err("invalid payload");

    assert_eq!(error.code(), ErrorCode::InvalidRequest);
}

#[tokio::test]
async fn create_requires_an_owned_parent() {
    let owner = UserId::random();
    let parent_id = Uuid::new_v4();
    let parent = reservation(&owner, parent_id);

    let mut reservations = MockReservationRepository::new();
    reservations
        .expect_find()
        .times(1)
        .return_once(move |_| Ok(Some(parent)));

    let svc = service(FixtureBookingRepository::default(), reservations);
    let error = svc
        .create(&UserId::random(), parent_id, &valid_payload())
        .await
        .expect_err("foreign parent");

    assert_eq!(error.code(), ErrorCode::Forbidden);
}

#[tokio::test]
async fn create_returns_the_persisted_record() {
    let actor = UserId::random();
    let parent_id = Uuid::new_v4();
    let parent = reservation(&actor, parent_id);
    let persisted = hotel(parent_id);

    let mut reservations = MockReservationRepository::new();
    reservations
        .expect_find()
        .times(1)
        .return_once(move |_| Ok(Some(parent)));

    let svc = service(
        FixtureBookingRepository::with_record(persisted.clone()),
        reservations,
    );
    let created = svc
        .create(&actor, parent_id, &valid_payload())
        .await
        .expect("create succeeds");

    assert_eq!(created, persisted);
}

#[tokio::test]
async fn get_names_the_kind_when_the_row_is_missing() {
    let svc = service(
        FixtureBookingRepository::default(),
        MockReservationRepository::new(),
    );
    let error = svc
        .get(&UserId::random(), Uuid::new_v4())
        .await
        .expect_err("missing row");

    assert_eq!(error.code(), ErrorCode::NotFound);
    assert_eq!(error.message(), "hotel not found");
}

#[tokio::test]
async fn update_validates_the_merge_against_the_persisted_row() {
    let actor = UserId::random();
    let parent_id = Uuid::new_v4();
    let parent = reservation(&actor, parent_id);
    let current = hotel(parent_id);
    let id = current.id;

    let mut reservations = MockReservationRepository::new();
    reservations
        .expect_find()
        .times(1)
        .return_once(move |_| Ok(Some(parent)));

    let svc = service(FixtureBookingRepository::with_record(current), reservations);
    let error = svc
        .update(
            &actor,
            id,
            &HotelPayload {
                check_out: Some("2026-09-09T10:00:00Z".to_owned()),
                ..HotelPayload::default()
            },
        )
        .await
        .expect_err("checkout before the persisted check-in");

    assert_eq!(error.code(), ErrorCode::InvalidRequest);
    let details = error.details().expect("details attached");
    assert_eq!(details["code"], CODE_BACKWARDS_RANGE);
}

#[tokio::test]
async fn remove_echoes_the_id_after_authorization() {
    let actor = UserId::random();
    let parent_id = Uuid::new_v4();
    let parent = reservation(&actor, parent_id);
    let current = hotel(parent_id);
    let id = current.id;

    let mut reservations = MockReservationRepository::new();
    reservations
        .expect_find()
        .times(1)
        .return_once(move |_| Ok(Some(parent)));

    let svc = service(FixtureBookingRepository::with_record(current), reservations);
    let removed = svc.remove(&actor, id).await.expect("remove succeeds");

    assert_eq!(removed, id);
}

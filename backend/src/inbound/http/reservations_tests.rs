//! HTTP-level coverage for the reservation handlers over fixture ports.

use std::sync::Arc;

use actix_web::cookie::Cookie;
use actix_web::http::StatusCode;
use actix_web::{test as actix_test, web, App};
use chrono::Utc;
use rstest::rstest;
use rust_decimal::Decimal;
use serde_json::{json, Value};
use uuid::Uuid;

use crate::domain::ports::{FixtureReservationRepository, FIXTURE_OPERATOR_ID};
use crate::domain::{Reservation, ReservationStatus, UserId};
use crate::inbound::http::test_utils::{fixture_state_with, test_session_middleware};
use crate::inbound::http::users::login;

use super::{
    create_reservation, delete_reservation, get_reservation, list_reservations,
    update_reservation,
};

fn operator() -> UserId {
    UserId::new(FIXTURE_OPERATOR_ID).expect("fixture operator id")
}

fn reservation(owner: &UserId, status: ReservationStatus) -> Reservation {
    let now = Utc::now();
    Reservation {
        id: Uuid::new_v4(),
        reference_code: "WF-2026-0042".to_owned(),
        owner_id: *owner.as_uuid(),
        status,
        total_price: Decimal::ZERO,
        amount_paid: Decimal::ZERO,
        notes: None,
        created_by: *owner.as_uuid(),
        updated_by: *owner.as_uuid(),
        created_at: now,
        updated_at: now,
    }
}

fn test_app(
    repository: FixtureReservationRepository,
) -> App<
    impl actix_web::dev::ServiceFactory<
        actix_web::dev::ServiceRequest,
        Config = (),
        Response = actix_web::dev::ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new()
        .app_data(web::Data::new(fixture_state_with(Arc::new(repository))))
        .wrap(test_session_middleware())
        .service(
            web::scope("/api/v1")
                .service(login)
                .service(create_reservation)
                .service(list_reservations)
                .service(get_reservation)
                .service(update_reservation)
                .service(delete_reservation),
        )
}

async fn login_cookie<S>(app: &S) -> Cookie<'static>
where
    S: actix_web::dev::Service<
        actix_http::Request,
        Response = actix_web::dev::ServiceResponse,
        Error = actix_web::Error,
    >,
{
    let request = actix_test::TestRequest::post()
        .uri("/api/v1/login")
        .set_json(json!({ "username": "admin", "password": "password" }))
        .to_request();
    let response = actix_test::call_service(app, request).await;
    assert!(response.status().is_success(), "login must succeed");
    response
        .response()
        .cookies()
        .find(|cookie| cookie.name() == "session")
        .expect("session cookie set")
        .into_owned()
}

#[actix_web::test]
async fn endpoints_require_a_session() {
    let app = actix_test::init_service(test_app(FixtureReservationRepository::default())).await;

    let response = actix_test::call_service(
        &app,
        actix_test::TestRequest::get()
            .uri("/api/v1/reservations")
            .to_request(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn create_rejects_a_missing_reference_code() {
    let app = actix_test::init_service(test_app(FixtureReservationRepository::default())).await;
    let cookie = login_cookie(&app).await;

    let response = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri("/api/v1/reservations")
            .cookie(cookie)
            .set_json(json!({ "notes": "two rooms" }))
            .to_request(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let value: Value =
        serde_json::from_slice(&actix_test::read_body(response).await).expect("error payload");
    assert_eq!(value["details"]["field"], "referenceCode");
    assert_eq!(value["details"]["code"], "missing_field");
}

#[actix_web::test]
async fn get_serves_the_reservation_with_totals() {
    let record = reservation(&operator(), ReservationStatus::Draft);
    let app = actix_test::init_service(test_app(FixtureReservationRepository::with_record(
        record.clone(),
    )))
    .await;
    let cookie = login_cookie(&app).await;

    let response = actix_test::call_service(
        &app,
        actix_test::TestRequest::get()
            .uri(&format!("/api/v1/reservations/{}", record.id))
            .cookie(cookie)
            .to_request(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let value: Value =
        serde_json::from_slice(&actix_test::read_body(response).await).expect("payload");
    assert_eq!(value["referenceCode"], "WF-2026-0042");
    assert_eq!(value["status"], "draft");
    assert!(value["currencyTotals"].as_array().expect("array").is_empty());
}

#[actix_web::test]
async fn get_rejects_another_operators_reservation() {
    let record = reservation(&UserId::random(), ReservationStatus::Draft);
    let app = actix_test::init_service(test_app(FixtureReservationRepository::with_record(
        record.clone(),
    )))
    .await;
    let cookie = login_cookie(&app).await;

    let response = actix_test::call_service(
        &app,
        actix_test::TestRequest::get()
            .uri(&format!("/api/v1/reservations/{}", record.id))
            .cookie(cookie)
            .to_request(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[rstest]
#[case("/api/v1/reservations/not-a-uuid")]
#[actix_web::test]
async fn malformed_ids_are_rejected_with_details(#[case] uri: &str) {
    let app = actix_test::init_service(test_app(FixtureReservationRepository::default())).await;
    let cookie = login_cookie(&app).await;

    let response = actix_test::call_service(
        &app,
        actix_test::TestRequest::get()
            .uri(uri)
            .cookie(cookie)
            .to_request(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let value: Value =
        serde_json::from_slice(&actix_test::read_body(response).await).expect("error payload");
    assert_eq!(value["details"]["code"], "invalid_uuid");
}

#[actix_web::test]
async fn patch_rejects_reopening_a_cancelled_reservation() {
    let record = reservation(&operator(), ReservationStatus::Cancelled);
    let app = actix_test::init_service(test_app(FixtureReservationRepository::with_record(
        record.clone(),
    )))
    .await;
    let cookie = login_cookie(&app).await;

    let response = actix_test::call_service(
        &app,
        actix_test::TestRequest::patch()
            .uri(&format!("/api/v1/reservations/{}", record.id))
            .cookie(cookie)
            .set_json(json!({ "status": "draft" }))
            .to_request(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let value: Value =
        serde_json::from_slice(&actix_test::read_body(response).await).expect("error payload");
    assert_eq!(value["details"]["code"], "forbidden_transition");
}

#[actix_web::test]
async fn delete_acknowledges_with_the_id() {
    let record = reservation(&operator(), ReservationStatus::Draft);
    let app = actix_test::init_service(test_app(FixtureReservationRepository::with_record(
        record.clone(),
    )))
    .await;
    let cookie = login_cookie(&app).await;

    let response = actix_test::call_service(
        &app,
        actix_test::TestRequest::delete()
            .uri(&format!("/api/v1/reservations/{}", record.id))
            .cookie(cookie)
            .to_request(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let value: Value =
        serde_json::from_slice(&actix_test::read_body(response).await).expect("payload");
    assert_eq!(value["id"], record.id.to_string());
}

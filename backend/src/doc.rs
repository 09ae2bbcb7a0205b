//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] generates the OpenAPI specification for the REST API: every
//! handler path from the inbound layer, the domain schemas they serve, and
//! the session cookie security scheme. Swagger UI serves the document in
//! debug builds.

use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::domain::bookings::car_rental::CarRental;
use crate::domain::bookings::cruise::Cruise;
use crate::domain::bookings::excursion::Excursion;
use crate::domain::bookings::flight::Flight;
use crate::domain::bookings::hotel::Hotel;
use crate::domain::bookings::medical_assist::MedicalAssist;
use crate::domain::bookings::transfer::Transfer;
use crate::domain::{
    CurrencyTotal, DomainError, ErrorCode, Pax, Reservation, ReservationStatus,
    ReservationWithTotals, User,
};
use crate::inbound::http::bookings::car_rentals::CarRentalRequestBody;
use crate::inbound::http::bookings::cruises::CruiseRequestBody;
use crate::inbound::http::bookings::excursions::ExcursionRequestBody;
use crate::inbound::http::bookings::flights::FlightRequestBody;
use crate::inbound::http::bookings::hotels::HotelRequestBody;
use crate::inbound::http::bookings::medical_assists::MedicalAssistRequestBody;
use crate::inbound::http::bookings::transfers::TransferRequestBody;
use crate::inbound::http::bookings::MoneyRequestBody;
use crate::inbound::http::pax::PaxRequestBody;
use crate::inbound::http::reservations::{
    CreateReservationRequestBody, UpdateReservationRequestBody,
};
use crate::inbound::http::users::LoginRequest;
use crate::inbound::http::DeletedResponse;

/// Enrich the generated document with the session cookie security scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            "SessionCookie",
            SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::with_description(
                "session",
                "Session cookie issued by POST /api/v1/login.",
            ))),
        );
    }
}

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Wayfarer reservation administration API",
        description = "CRUD surface for reservations, their bookable service \
            rows, and passengers, with per-currency aggregate totals."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    security(("SessionCookie" = [])),
    paths(
        crate::inbound::http::users::login,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
        crate::inbound::http::reservations::create_reservation,
        crate::inbound::http::reservations::list_reservations,
        crate::inbound::http::reservations::get_reservation,
        crate::inbound::http::reservations::update_reservation,
        crate::inbound::http::reservations::delete_reservation,
        crate::inbound::http::pax::create_pax,
        crate::inbound::http::pax::list_pax,
        crate::inbound::http::pax::get_pax,
        crate::inbound::http::pax::update_pax,
        crate::inbound::http::pax::delete_pax,
        crate::inbound::http::bookings::hotels::create_hotel,
        crate::inbound::http::bookings::hotels::list_hotels,
        crate::inbound::http::bookings::hotels::get_hotel,
        crate::inbound::http::bookings::hotels::update_hotel,
        crate::inbound::http::bookings::hotels::delete_hotel,
        crate::inbound::http::bookings::flights::create_flight,
        crate::inbound::http::bookings::flights::list_flights,
        crate::inbound::http::bookings::flights::get_flight,
        crate::inbound::http::bookings::flights::update_flight,
        crate::inbound::http::bookings::flights::delete_flight,
        crate::inbound::http::bookings::cruises::create_cruise,
        crate::inbound::http::bookings::cruises::list_cruises,
        crate::inbound::http::bookings::cruises::get_cruise,
        crate::inbound::http::bookings::cruises::update_cruise,
        crate::inbound::http::bookings::cruises::delete_cruise,
        crate::inbound::http::bookings::transfers::create_transfer,
        crate::inbound::http::bookings::transfers::list_transfers,
        crate::inbound::http::bookings::transfers::get_transfer,
        crate::inbound::http::bookings::transfers::update_transfer,
        crate::inbound::http::bookings::transfers::delete_transfer,
        crate::inbound::http::bookings::excursions::create_excursion,
        crate::inbound::http::bookings::excursions::list_excursions,
        crate::inbound::http::bookings::excursions::get_excursion,
        crate::inbound::http::bookings::excursions::update_excursion,
        crate::inbound::http::bookings::excursions::delete_excursion,
        crate::inbound::http::bookings::medical_assists::create_medical_assist,
        crate::inbound::http::bookings::medical_assists::list_medical_assists,
        crate::inbound::http::bookings::medical_assists::get_medical_assist,
        crate::inbound::http::bookings::medical_assists::update_medical_assist,
        crate::inbound::http::bookings::medical_assists::delete_medical_assist,
        crate::inbound::http::bookings::car_rentals::create_car_rental,
        crate::inbound::http::bookings::car_rentals::list_car_rentals,
        crate::inbound::http::bookings::car_rentals::get_car_rental,
        crate::inbound::http::bookings::car_rentals::update_car_rental,
        crate::inbound::http::bookings::car_rentals::delete_car_rental,
    ),
    components(schemas(
        DomainError,
        ErrorCode,
        User,
        Reservation,
        ReservationStatus,
        ReservationWithTotals,
        CurrencyTotal,
        Pax,
        Hotel,
        Flight,
        Cruise,
        Transfer,
        Excursion,
        MedicalAssist,
        CarRental,
        DeletedResponse,
        LoginRequest,
        CreateReservationRequestBody,
        UpdateReservationRequestBody,
        PaxRequestBody,
        MoneyRequestBody,
        HotelRequestBody,
        FlightRequestBody,
        CruiseRequestBody,
        TransferRequestBody,
        ExcursionRequestBody,
        MedicalAssistRequestBody,
        CarRentalRequestBody,
    )),
    tags(
        (name = "users", description = "Operator authentication"),
        (name = "health", description = "Health probes"),
        (name = "reservations", description = "Reservation aggregate roots"),
        (name = "pax", description = "Passengers attached to a reservation"),
        (name = "hotels", description = "Hotel stays"),
        (name = "flights", description = "Flight segments"),
        (name = "cruises", description = "Cruise legs"),
        (name = "transfers", description = "Ground transfers"),
        (name = "excursions", description = "Excursions and activities"),
        (name = "medical-assists", description = "Medical assistance cover"),
        (name = "car-rentals", description = "Car rentals")
    )
)]
pub struct ApiDoc;

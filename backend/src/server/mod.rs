//! Server construction and middleware wiring.

mod config;
mod state_builders;

pub use config::ServerConfig;

use state_builders::build_http_state;

use actix_session::{
    config::{CookieContentSecurity, PersistentSession},
    storage::CookieSessionStore,
    SessionMiddleware,
};
use actix_web::cookie::{Key, SameSite};
use actix_web::dev::{Server, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{web, App, HttpServer};
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

#[cfg(debug_assertions)]
use crate::doc::ApiDoc;
use crate::inbound::http::bookings::car_rentals::{
    create_car_rental, delete_car_rental, get_car_rental, list_car_rentals, update_car_rental,
};
use crate::inbound::http::bookings::cruises::{
    create_cruise, delete_cruise, get_cruise, list_cruises, update_cruise,
};
use crate::inbound::http::bookings::excursions::{
    create_excursion, delete_excursion, get_excursion, list_excursions, update_excursion,
};
use crate::inbound::http::bookings::flights::{
    create_flight, delete_flight, get_flight, list_flights, update_flight,
};
use crate::inbound::http::bookings::hotels::{
    create_hotel, delete_hotel, get_hotel, list_hotels, update_hotel,
};
use crate::inbound::http::bookings::medical_assists::{
    create_medical_assist, delete_medical_assist, get_medical_assist, list_medical_assists,
    update_medical_assist,
};
use crate::inbound::http::bookings::transfers::{
    create_transfer, delete_transfer, get_transfer, list_transfers, update_transfer,
};
use crate::inbound::http::health::{live, ready, HealthState};
use crate::inbound::http::pax::{create_pax, delete_pax, get_pax, list_pax, update_pax};
use crate::inbound::http::reservations::{
    create_reservation, delete_reservation, get_reservation, list_reservations,
    update_reservation,
};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::users::login;

#[derive(Clone)]
struct AppDependencies {
    health_state: web::Data<HealthState>,
    http_state: web::Data<HttpState>,
    key: Key,
    cookie_secure: bool,
    same_site: SameSite,
}

fn build_app(
    deps: AppDependencies,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let AppDependencies {
        health_state,
        http_state,
        key,
        cookie_secure,
        same_site,
    } = deps;

    let session = SessionMiddleware::builder(CookieSessionStore::default(), key)
        .cookie_name("session".into())
        .cookie_path("/".into())
        .cookie_secure(cookie_secure)
        .cookie_http_only(true)
        .cookie_content_security(CookieContentSecurity::Private)
        .cookie_same_site(same_site)
        .session_lifecycle(
            PersistentSession::default().session_ttl(actix_web::cookie::time::Duration::hours(2)),
        )
        .build();

    let api = web::scope("/api/v1")
        .wrap(session)
        .service(login)
        .service(create_reservation)
        .service(list_reservations)
        .service(get_reservation)
        .service(update_reservation)
        .service(delete_reservation)
        .service(create_pax)
        .service(list_pax)
        .service(get_pax)
        .service(update_pax)
        .service(delete_pax)
        .service(create_hotel)
        .service(list_hotels)
        .service(get_hotel)
        .service(update_hotel)
        .service(delete_hotel)
        .service(create_flight)
        .service(list_flights)
        .service(get_flight)
        .service(update_flight)
        .service(delete_flight)
        .service(create_cruise)
        .service(list_cruises)
        .service(get_cruise)
        .service(update_cruise)
        .service(delete_cruise)
        .service(create_transfer)
        .service(list_transfers)
        .service(get_transfer)
        .service(update_transfer)
        .service(delete_transfer)
        .service(create_excursion)
        .service(list_excursions)
        .service(get_excursion)
        .service(update_excursion)
        .service(delete_excursion)
        .service(create_medical_assist)
        .service(list_medical_assists)
        .service(get_medical_assist)
        .service(update_medical_assist)
        .service(delete_medical_assist)
        .service(create_car_rental)
        .service(list_car_rentals)
        .service(get_car_rental)
        .service(update_car_rental)
        .service(delete_car_rental);

    let app = App::new()
        .app_data(health_state)
        .app_data(http_state)
        .service(api)
        .service(ready)
        .service(live);

    #[cfg(debug_assertions)]
    let app = app.service(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()));
    #[cfg(not(debug_assertions))]
    let app = app;

    app
}

/// Construct an actix HTTP server from the provided configuration.
///
/// # Errors
///
/// Propagates [`std::io::Error`] when binding the socket fails.
pub fn create_server(
    health_state: web::Data<HealthState>,
    config: ServerConfig,
) -> std::io::Result<Server> {
    let server_health_state = health_state.clone();
    let http_state = build_http_state(&config);
    let ServerConfig {
        key,
        cookie_secure,
        same_site,
        bind_addr,
        db_pool: _,
    } = config;

    let server = HttpServer::new(move || {
        build_app(AppDependencies {
            health_state: server_health_state.clone(),
            http_state: http_state.clone(),
            key: key.clone(),
            cookie_secure,
            same_site,
        })
    })
    .bind(bind_addr)?
    .run();

    health_state.mark_ready();
    Ok(server)
}

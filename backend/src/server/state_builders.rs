//! Builders wiring persistence adapters (or fixtures) into the HTTP state.

use std::sync::Arc;

use actix_web::web;
use mockable::DefaultClock;

use crate::domain::bookings::car_rental::CarRental;
use crate::domain::bookings::cruise::Cruise;
use crate::domain::bookings::excursion::Excursion;
use crate::domain::bookings::flight::Flight;
use crate::domain::bookings::hotel::Hotel;
use crate::domain::bookings::medical_assist::MedicalAssist;
use crate::domain::bookings::transfer::Transfer;
use crate::domain::ports::{
    BookingRepository, FixtureBookingRepository, FixtureLoginService, FixturePaxRepository,
    FixtureReservationRepository,
};
use crate::inbound::http::state::{HttpState, HttpStatePorts};
use crate::outbound::persistence::{
    DbPool, DieselBookingRepository, DieselLoginService, DieselPaxRepository,
    DieselReservationRepository,
};

use super::ServerConfig;

fn diesel_ports(pool: &DbPool) -> HttpStatePorts {
    let bookings = Arc::new(DieselBookingRepository::new(pool.clone()));
    let hotels: Arc<dyn BookingRepository<Hotel>> = Arc::clone(&bookings) as _;
    let flights: Arc<dyn BookingRepository<Flight>> = Arc::clone(&bookings) as _;
    let cruises: Arc<dyn BookingRepository<Cruise>> = Arc::clone(&bookings) as _;
    let transfers: Arc<dyn BookingRepository<Transfer>> = Arc::clone(&bookings) as _;
    let excursions: Arc<dyn BookingRepository<Excursion>> = Arc::clone(&bookings) as _;
    let medical_assists: Arc<dyn BookingRepository<MedicalAssist>> = Arc::clone(&bookings) as _;
    let car_rentals: Arc<dyn BookingRepository<CarRental>> = bookings as _;
    HttpStatePorts {
        login: Arc::new(DieselLoginService::new(pool.clone())),
        reservations: Arc::new(DieselReservationRepository::new(pool.clone())),
        pax: Arc::new(DieselPaxRepository::new(pool.clone())),
        hotels,
        flights,
        cruises,
        transfers,
        excursions,
        medical_assists,
        car_rentals,
        clock: Arc::new(DefaultClock),
    }
}

fn fixture_ports() -> HttpStatePorts {
    HttpStatePorts {
        login: Arc::new(FixtureLoginService),
        reservations: Arc::new(FixtureReservationRepository::default()),
        pax: Arc::new(FixturePaxRepository::default()),
        hotels: Arc::new(FixtureBookingRepository::<Hotel>::default()),
        flights: Arc::new(FixtureBookingRepository::<Flight>::default()),
        cruises: Arc::new(FixtureBookingRepository::<Cruise>::default()),
        transfers: Arc::new(FixtureBookingRepository::<Transfer>::default()),
        excursions: Arc::new(FixtureBookingRepository::<Excursion>::default()),
        medical_assists: Arc::new(FixtureBookingRepository::<MedicalAssist>::default()),
        car_rentals: Arc::new(FixtureBookingRepository::<CarRental>::default()),
        clock: Arc::new(DefaultClock),
    }
}

/// Build the HTTP handler state from the server configuration.
///
/// Uses the database-backed adapters when a pool is configured; otherwise
/// falls back to fixture ports for local development and tests.
pub(super) fn build_http_state(config: &ServerConfig) -> web::Data<HttpState> {
    let ports = match &config.db_pool {
        Some(pool) => diesel_ports(pool),
        None => {
            tracing::warn!("no database pool configured; serving fixture data");
            fixture_ports()
        }
    };
    web::Data::new(HttpState::new(ports))
}

//! Test helpers for inbound HTTP components.

use std::sync::Arc;

use actix_session::{storage::CookieSessionStore, SessionMiddleware};
use actix_web::cookie::Key;
use mockable::DefaultClock;

use crate::domain::bookings::car_rental::CarRental;
use crate::domain::bookings::cruise::Cruise;
use crate::domain::bookings::excursion::Excursion;
use crate::domain::bookings::flight::Flight;
use crate::domain::bookings::hotel::Hotel;
use crate::domain::bookings::medical_assist::MedicalAssist;
use crate::domain::bookings::transfer::Transfer;
use crate::domain::ports::{
    FixtureBookingRepository, FixtureLoginService, FixturePaxRepository,
    FixtureReservationRepository, ReservationRepository,
};
use crate::inbound::http::state::{HttpState, HttpStatePorts};

/// Build a session middleware configured for tests.
///
/// - Generates a fresh signing/encryption key per invocation.
/// - Sets the cookie name to `session` and disables the `Secure` flag for
///   local HTTP tests.
pub fn test_session_middleware() -> SessionMiddleware<CookieSessionStore> {
    SessionMiddleware::builder(CookieSessionStore::default(), Key::generate())
        .cookie_name("session".to_owned())
        .cookie_secure(false)
        .build()
}

/// Ports wired entirely over empty fixtures.
///
/// Tests override individual fields with struct-update syntax:
/// `HttpStatePorts { reservations: Arc::new(preset), ..fixture_ports() }`.
pub fn fixture_ports() -> HttpStatePorts {
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

/// Handler state wired entirely over empty fixture ports.
pub fn fixture_state() -> HttpState {
    HttpState::new(fixture_ports())
}

/// Handler state over fixture ports, sharing `reservations` across services.
pub fn fixture_state_with(reservations: Arc<dyn ReservationRepository>) -> HttpState {
    HttpState::new(HttpStatePorts {
        reservations,
        ..fixture_ports()
    })
}

//! Domain ports and supporting types for the hexagonal boundary.

mod macros;
pub(crate) use macros::define_port_error;

mod booking_repository;
mod login_service;
mod pax_repository;
mod reservation_repository;
mod storage_error;

pub use booking_repository::{BookingRepository, FixtureBookingRepository};
pub use login_service::{FixtureLoginService, LoginService, FIXTURE_OPERATOR_ID};
#[cfg(test)]
pub use pax_repository::MockPaxRepository;
pub use pax_repository::{FixturePaxRepository, PaxRepository};
#[cfg(test)]
pub use reservation_repository::MockReservationRepository;
pub use reservation_repository::{FixtureReservationRepository, ReservationRepository};
pub use storage_error::StorageError;

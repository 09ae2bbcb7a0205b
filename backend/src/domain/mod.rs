//! Domain entities, policies, ports, and services.
//!
//! Purpose: Define strongly typed reservation-domain entities and the
//! use-case services that operate on them, independent of HTTP and
//! storage concerns. Keep types immutable and document invariants and
//! serialisation contracts (serde) in each type's Rustdoc.
//!
//! Public surface:
//! - DomainError / ErrorCode — taxonomy every fallible operation maps into.
//! - User / UserId — operator identity resolved from the session.
//! - Reservation and its payload/patch/changes companions.
//! - Pax and the seven bookable service kinds under [`bookings`].
//! - ReservationService / PaxService / BookingService — the use-cases.
//! - [`ports`] — repository and login traits the outbound adapters implement.

pub mod auth;
pub mod booking_service;
pub mod bookings;
pub mod error;
pub mod money;
pub mod pax;
pub mod pax_service;
pub mod policies;
pub mod ports;
pub mod reservation;
pub mod reservation_service;
pub mod user;

pub use self::auth::{LoginCredentials, LoginValidationError};
pub use self::booking_service::BookingService;
pub use self::error::{DomainError, DomainErrorValidationError, ErrorCode};
pub use self::money::{AggregateDelta, BookingMoney, Currency, CurrencyValidationError};
pub use self::pax::{NewPax, Pax, PaxChanges, PaxPayload};
pub use self::pax_service::PaxService;
pub use self::reservation::{
    CurrencyTotal, NewReservation, Reservation, ReservationChanges, ReservationPatch,
    ReservationPayload, ReservationStatus, ReservationWithTotals,
};
pub use self::reservation_service::ReservationService;
pub use self::user::{DisplayName, User, UserId, UserValidationError};

/// Convenient domain result alias.
///
/// # Examples
/// ```
/// use backend::domain::{DomainError, DomainResult};
///
/// fn guard() -> DomainResult<()> {
///     Err(DomainError::forbidden("nope"))
/// }
/// ```
pub type DomainResult<T> = Result<T, DomainError>;

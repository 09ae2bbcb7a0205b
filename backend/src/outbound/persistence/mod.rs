//! PostgreSQL persistence adapters using Diesel ORM.
//!
//! Concrete implementations of the domain repository ports backed by
//! PostgreSQL via `diesel-async` with `bb8` connection pooling.
//!
//! The adapters are thin: row structs in [`models`] translate between the
//! schema and the domain entities, and every mutation of a child row shares
//! its transaction with the aggregate adjuster in [`touch`], so the row write
//! and the parent reservation's running totals commit or roll back together.
//! Driver-level failures convert into [`StorageError`] once, in
//! [`error_map`], never at individual call sites.
//!
//! [`StorageError`]: crate::domain::ports::StorageError

mod diesel_booking_repository;
mod diesel_login_service;
mod diesel_pax_repository;
mod diesel_reservation_repository;
mod error_map;
mod models;
mod pool;
mod schema;
mod touch;

pub use diesel_booking_repository::DieselBookingRepository;
pub use diesel_login_service::DieselLoginService;
pub use diesel_pax_repository::DieselPaxRepository;
pub use diesel_reservation_repository::DieselReservationRepository;
pub use pool::{DbPool, PoolConfig, PoolError};

//! Wayfarer reservation administration backend.
//!
//! A hexagonal actix-web service for managing travel reservations and their
//! bookable service rows (hotels, flights, cruises, transfers, excursions,
//! medical assists, car rentals) plus passengers. The [`domain`] layer holds
//! entities, validation policies, ports, and use-case services; [`outbound`]
//! provides the Diesel-backed persistence adapters; [`inbound`] exposes the
//! HTTP surface; [`server`] wires adapters into ports and builds the app.
//!
//! The engineering core is aggregate consistency: every write to a bookable
//! service row shares a database transaction with an adjustment of the parent
//! reservation's running totals, applied as atomic SQL increments.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod outbound;
pub mod server;

pub use doc::ApiDoc;

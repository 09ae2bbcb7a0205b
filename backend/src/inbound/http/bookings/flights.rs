//! Flight endpoints.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::bookings::flight::{Flight, FlightPayload};

use super::{booking_endpoints, MoneyRequestBody};

/// Request body shared by flight create and update.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FlightRequestBody {
    /// Departure place.
    pub origin: Option<String>,
    /// Arrival place.
    pub destination: Option<String>,
    /// Operating carrier.
    pub carrier: Option<String>,
    /// Departure instant, RFC 3339.
    pub departs_at: Option<String>,
    /// Arrival instant, RFC 3339.
    pub arrives_at: Option<String>,
    /// Supplier booking reference.
    pub booking_reference: Option<String>,
    /// Monetary fields.
    #[serde(flatten)]
    pub money: MoneyRequestBody,
}

impl From<FlightRequestBody> for FlightPayload {
    fn from(body: FlightRequestBody) -> Self {
        Self {
            origin: body.origin,
            destination: body.destination,
            carrier: body.carrier,
            departs_at: body.departs_at,
            arrives_at: body.arrives_at,
            booking_reference: body.booking_reference,
            money: body.money.into(),
        }
    }
}

booking_endpoints!(
    kind: Flight,
    singular: flight,
    state: flights,
    body: FlightRequestBody,
    noun: "flight",
    tag: "flights",
    create_route: "/reservations/{id}/flights",
    item_route: "/flights/{id}",
    create_path: "/api/v1/reservations/{id}/flights",
    item_path: "/api/v1/flights/{id}",
);

#[cfg(test)]
#[path = "flights_tests.rs"]
mod tests;

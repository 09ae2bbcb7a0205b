//! Cruise endpoints.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::bookings::cruise::{Cruise, CruisePayload};

use super::{booking_endpoints, MoneyRequestBody};

/// Request body shared by cruise create and update.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CruiseRequestBody {
    /// Vessel name.
    pub ship_name: Option<String>,
    /// Port of departure.
    pub departure_port: Option<String>,
    /// Port of arrival.
    pub arrival_port: Option<String>,
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

impl From<CruiseRequestBody> for CruisePayload {
    fn from(body: CruiseRequestBody) -> Self {
        Self {
            ship_name: body.ship_name,
            departure_port: body.departure_port,
            arrival_port: body.arrival_port,
            departs_at: body.departs_at,
            arrives_at: body.arrives_at,
            booking_reference: body.booking_reference,
            money: body.money.into(),
        }
    }
}

booking_endpoints!(
    kind: Cruise,
    singular: cruise,
    state: cruises,
    body: CruiseRequestBody,
    noun: "cruise leg",
    tag: "cruises",
    create_route: "/reservations/{id}/cruises",
    item_route: "/cruises/{id}",
    create_path: "/api/v1/reservations/{id}/cruises",
    item_path: "/api/v1/cruises/{id}",
);

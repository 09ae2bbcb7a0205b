//! Hotel stay endpoints.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::bookings::hotel::{Hotel, HotelPayload};

use super::{booking_endpoints, MoneyRequestBody};

/// Request body shared by hotel create and update.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct HotelRequestBody {
    /// Property name.
    pub hotel_name: Option<String>,
    /// City or resort the property is in.
    pub location: Option<String>,
    /// Arrival instant, RFC 3339.
    pub check_in: Option<String>,
    /// Departure instant, RFC 3339.
    pub check_out: Option<String>,
    /// Supplier booking reference.
    pub booking_reference: Option<String>,
    /// Monetary fields.
    #[serde(flatten)]
    pub money: MoneyRequestBody,
}

impl From<HotelRequestBody> for HotelPayload {
    fn from(body: HotelRequestBody) -> Self {
        Self {
            hotel_name: body.hotel_name,
            location: body.location,
            check_in: body.check_in,
            check_out: body.check_out,
            booking_reference: body.booking_reference,
            money: body.money.into(),
        }
    }
}

booking_endpoints!(
    kind: Hotel,
    singular: hotel,
    state: hotels,
    body: HotelRequestBody,
    noun: "hotel stay",
    tag: "hotels",
    create_route: "/reservations/{id}/hotels",
    item_route: "/hotels/{id}",
    create_path: "/api/v1/reservations/{id}/hotels",
    item_path: "/api/v1/hotels/{id}",
);

#[cfg(test)]
#[path = "hotels_tests.rs"]
mod tests;

//! Car rental endpoints.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::bookings::car_rental::{CarRental, CarRentalPayload};

use super::{booking_endpoints, MoneyRequestBody};

/// Request body shared by car rental create and update.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CarRentalRequestBody {
    /// Rental company.
    pub company: Option<String>,
    /// Pickup place.
    pub pickup_location: Option<String>,
    /// Drop-off place.
    pub dropoff_location: Option<String>,
    /// Pickup instant, RFC 3339.
    pub pickup_at: Option<String>,
    /// Drop-off instant, RFC 3339.
    pub dropoff_at: Option<String>,
    /// Supplier booking reference.
    pub booking_reference: Option<String>,
    /// Monetary fields.
    #[serde(flatten)]
    pub money: MoneyRequestBody,
}

impl From<CarRentalRequestBody> for CarRentalPayload {
    fn from(body: CarRentalRequestBody) -> Self {
        Self {
            company: body.company,
            pickup_location: body.pickup_location,
            dropoff_location: body.dropoff_location,
            pickup_at: body.pickup_at,
            dropoff_at: body.dropoff_at,
            booking_reference: body.booking_reference,
            money: body.money.into(),
        }
    }
}

booking_endpoints!(
    kind: CarRental,
    singular: car_rental,
    state: car_rentals,
    body: CarRentalRequestBody,
    noun: "car rental",
    tag: "car-rentals",
    create_route: "/reservations/{id}/car-rentals",
    item_route: "/car-rentals/{id}",
    create_path: "/api/v1/reservations/{id}/car-rentals",
    item_path: "/api/v1/car-rentals/{id}",
);

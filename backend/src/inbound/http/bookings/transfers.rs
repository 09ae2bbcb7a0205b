//! Ground transfer endpoints.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::bookings::transfer::{Transfer, TransferPayload};

use super::{booking_endpoints, MoneyRequestBody};

/// Request body shared by transfer create and update.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TransferRequestBody {
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

impl From<TransferRequestBody> for TransferPayload {
    fn from(body: TransferRequestBody) -> Self {
        Self {
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
    kind: Transfer,
    singular: transfer,
    state: transfers,
    body: TransferRequestBody,
    noun: "ground transfer",
    tag: "transfers",
    create_route: "/reservations/{id}/transfers",
    item_route: "/transfers/{id}",
    create_path: "/api/v1/reservations/{id}/transfers",
    item_path: "/api/v1/transfers/{id}",
);

//! Excursion endpoints.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::bookings::excursion::{Excursion, ExcursionPayload};

use super::{booking_endpoints, MoneyRequestBody};

/// Request body shared by excursion create and update.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ExcursionRequestBody {
    /// Activity name.
    pub name: Option<String>,
    /// Where the activity takes place.
    pub location: Option<String>,
    /// Start instant, RFC 3339.
    pub starts_at: Option<String>,
    /// End instant, RFC 3339.
    pub ends_at: Option<String>,
    /// Supplier booking reference.
    pub booking_reference: Option<String>,
    /// Monetary fields.
    #[serde(flatten)]
    pub money: MoneyRequestBody,
}

impl From<ExcursionRequestBody> for ExcursionPayload {
    fn from(body: ExcursionRequestBody) -> Self {
        Self {
            name: body.name,
            location: body.location,
            starts_at: body.starts_at,
            ends_at: body.ends_at,
            booking_reference: body.booking_reference,
            money: body.money.into(),
        }
    }
}

booking_endpoints!(
    kind: Excursion,
    singular: excursion,
    state: excursions,
    body: ExcursionRequestBody,
    noun: "excursion",
    tag: "excursions",
    create_route: "/reservations/{id}/excursions",
    item_route: "/excursions/{id}",
    create_path: "/api/v1/reservations/{id}/excursions",
    item_path: "/api/v1/excursions/{id}",
);

//! Medical assistance endpoints.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::bookings::medical_assist::{MedicalAssist, MedicalAssistPayload};

use super::{booking_endpoints, MoneyRequestBody};

/// Request body shared by medical assist create and update.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MedicalAssistRequestBody {
    /// Assistance provider.
    pub provider: Option<String>,
    /// Cover description.
    pub description: Option<String>,
    /// Cover start instant, RFC 3339.
    pub starts_at: Option<String>,
    /// Cover end instant, RFC 3339.
    pub ends_at: Option<String>,
    /// Supplier booking reference.
    pub booking_reference: Option<String>,
    /// Monetary fields.
    #[serde(flatten)]
    pub money: MoneyRequestBody,
}

impl From<MedicalAssistRequestBody> for MedicalAssistPayload {
    fn from(body: MedicalAssistRequestBody) -> Self {
        Self {
            provider: body.provider,
            description: body.description,
            starts_at: body.starts_at,
            ends_at: body.ends_at,
            booking_reference: body.booking_reference,
            money: body.money.into(),
        }
    }
}

booking_endpoints!(
    kind: MedicalAssist,
    singular: medical_assist,
    state: medical_assists,
    body: MedicalAssistRequestBody,
    noun: "medical assist",
    tag: "medical-assists",
    create_route: "/reservations/{id}/medical-assists",
    item_route: "/medical-assists/{id}",
    create_path: "/api/v1/reservations/{id}/medical-assists",
    item_path: "/api/v1/medical-assists/{id}",
);

//! HTTP inbound adapter exposing REST endpoints under `/api/v1`.

pub mod bookings;
pub mod error;
pub mod health;
pub mod pax;
pub mod reservations;
pub mod session;
pub mod state;
#[cfg(test)]
pub mod test_utils;
pub mod users;
pub mod validation;

pub use error::ApiResult;

use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

/// Response body acknowledging a deletion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DeletedResponse {
    /// Identifier of the deleted row.
    pub id: Uuid,
}

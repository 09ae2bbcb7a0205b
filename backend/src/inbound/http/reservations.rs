//! Reservation HTTP handlers.
//!
//! ```text
//! POST   /api/v1/reservations
//! GET    /api/v1/reservations
//! GET    /api/v1/reservations/{id}
//! PATCH  /api/v1/reservations/{id}
//! DELETE /api/v1/reservations/{id}
//! ```

use actix_web::{delete, get, patch, post, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{Reservation, ReservationPatch, ReservationPayload, ReservationWithTotals};
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{parse_uuid, FieldName};
use crate::inbound::http::{ApiResult, DeletedResponse};

const ID_FIELD: FieldName = FieldName::new("id");

/// Request body for creating a reservation.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateReservationRequestBody {
    /// Human-facing unique reference code.
    pub reference_code: Option<String>,
    /// Free-form operator notes.
    pub notes: Option<String>,
}

impl From<CreateReservationRequestBody> for ReservationPayload {
    fn from(body: CreateReservationRequestBody) -> Self {
        Self {
            reference_code: body.reference_code,
            notes: body.notes,
        }
    }
}

/// Request body for patching a reservation.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateReservationRequestBody {
    /// New lifecycle status.
    pub status: Option<String>,
    /// New operator notes.
    pub notes: Option<String>,
}

impl From<UpdateReservationRequestBody> for ReservationPatch {
    fn from(body: UpdateReservationRequestBody) -> Self {
        Self {
            status: body.status,
            notes: body.notes,
        }
    }
}

/// Create a draft reservation owned by the authenticated operator.
#[utoipa::path(
    post,
    path = "/api/v1/reservations",
    request_body = CreateReservationRequestBody,
    responses(
        (status = 200, description = "Reservation created", body = Reservation),
        (status = 400, description = "Invalid request", body = crate::domain::DomainError),
        (status = 401, description = "Unauthorized", body = crate::domain::DomainError),
        (status = 409, description = "Duplicate reference code", body = crate::domain::DomainError)
    ),
    tags = ["reservations"],
    operation_id = "createReservation",
    security(("SessionCookie" = []))
)]
#[post("/reservations")]
pub async fn create_reservation(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<CreateReservationRequestBody>,
) -> ApiResult<web::Json<Reservation>> {
    let actor = session.require_user_id()?;
    let created = state
        .reservations
        .create(&actor, &payload.into_inner().into())
        .await?;
    Ok(web::Json(created))
}

/// List the authenticated operator's reservations, newest first.
#[utoipa::path(
    get,
    path = "/api/v1/reservations",
    responses(
        (status = 200, description = "Reservations", body = [Reservation]),
        (status = 401, description = "Unauthorized", body = crate::domain::DomainError)
    ),
    tags = ["reservations"],
    operation_id = "listReservations",
    security(("SessionCookie" = []))
)]
#[get("/reservations")]
pub async fn list_reservations(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<Vec<Reservation>>> {
    let actor = session.require_user_id()?;
    Ok(web::Json(state.reservations.list(&actor).await?))
}

/// Fetch one reservation with its per-currency totals.
#[utoipa::path(
    get,
    path = "/api/v1/reservations/{id}",
    params(("id" = String, Path, description = "Reservation id")),
    responses(
        (status = 200, description = "Reservation", body = ReservationWithTotals),
        (status = 401, description = "Unauthorized", body = crate::domain::DomainError),
        (status = 403, description = "Owned by another operator", body = crate::domain::DomainError),
        (status = 404, description = "Not found", body = crate::domain::DomainError)
    ),
    tags = ["reservations"],
    operation_id = "getReservation",
    security(("SessionCookie" = []))
)]
#[get("/reservations/{id}")]
pub async fn get_reservation(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
) -> ApiResult<web::Json<ReservationWithTotals>> {
    let actor = session.require_user_id()?;
    let id = parse_uuid(&path.into_inner(), ID_FIELD)?;
    Ok(web::Json(state.reservations.get(&actor, id).await?))
}

/// Patch a reservation's status and notes.
#[utoipa::path(
    patch,
    path = "/api/v1/reservations/{id}",
    params(("id" = String, Path, description = "Reservation id")),
    request_body = UpdateReservationRequestBody,
    responses(
        (status = 200, description = "Reservation updated", body = Reservation),
        (status = 400, description = "Invalid request", body = crate::domain::DomainError),
        (status = 401, description = "Unauthorized", body = crate::domain::DomainError),
        (status = 403, description = "Owned by another operator", body = crate::domain::DomainError),
        (status = 404, description = "Not found", body = crate::domain::DomainError)
    ),
    tags = ["reservations"],
    operation_id = "updateReservation",
    security(("SessionCookie" = []))
)]
#[patch("/reservations/{id}")]
pub async fn update_reservation(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
    payload: web::Json<UpdateReservationRequestBody>,
) -> ApiResult<web::Json<Reservation>> {
    let actor = session.require_user_id()?;
    let id = parse_uuid(&path.into_inner(), ID_FIELD)?;
    let updated = state
        .reservations
        .update(&actor, id, &payload.into_inner().into())
        .await?;
    Ok(web::Json(updated))
}

/// Delete a reservation and everything hanging off it.
#[utoipa::path(
    delete,
    path = "/api/v1/reservations/{id}",
    params(("id" = String, Path, description = "Reservation id")),
    responses(
        (status = 200, description = "Reservation deleted", body = DeletedResponse),
        (status = 401, description = "Unauthorized", body = crate::domain::DomainError),
        (status = 403, description = "Owned by another operator", body = crate::domain::DomainError),
        (status = 404, description = "Not found", body = crate::domain::DomainError)
    ),
    tags = ["reservations"],
    operation_id = "deleteReservation",
    security(("SessionCookie" = []))
)]
#[delete("/reservations/{id}")]
pub async fn delete_reservation(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
) -> ApiResult<web::Json<DeletedResponse>> {
    let actor = session.require_user_id()?;
    let id = parse_uuid(&path.into_inner(), ID_FIELD)?;
    let deleted = state.reservations.remove(&actor, id).await?;
    Ok(web::Json(DeletedResponse { id: deleted }))
}

#[cfg(test)]
#[path = "reservations_tests.rs"]
mod tests;

//! Passenger HTTP handlers.
//!
//! ```text
//! POST   /api/v1/reservations/{id}/pax
//! GET    /api/v1/reservations/{id}/pax
//! GET    /api/v1/pax/{id}
//! PATCH  /api/v1/pax/{id}
//! DELETE /api/v1/pax/{id}
//! ```

use actix_web::{delete, get, patch, post, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{Pax, PaxPayload};
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{parse_uuid, FieldName};
use crate::inbound::http::{ApiResult, DeletedResponse};

const ID_FIELD: FieldName = FieldName::new("id");
const RESERVATION_ID_FIELD: FieldName = FieldName::new("reservationId");

/// Request body shared by passenger create and update.
///
/// All fields are optional strings; the document policy decides which
/// combinations are acceptable per operation.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PaxRequestBody {
    /// Given name.
    pub first_name: Option<String>,
    /// Family name.
    pub last_name: Option<String>,
    /// Date of birth as an ISO 8601 calendar date.
    pub date_of_birth: Option<String>,
    /// DNI number.
    pub dni_number: Option<String>,
    /// DNI expiration date.
    pub dni_expiration: Option<String>,
    /// Passport number.
    pub passport_number: Option<String>,
    /// Passport expiration date.
    pub passport_expiration: Option<String>,
}

impl From<PaxRequestBody> for PaxPayload {
    fn from(body: PaxRequestBody) -> Self {
        Self {
            first_name: body.first_name,
            last_name: body.last_name,
            date_of_birth: body.date_of_birth,
            dni_number: body.dni_number,
            dni_expiration: body.dni_expiration,
            passport_number: body.passport_number,
            passport_expiration: body.passport_expiration,
        }
    }
}

/// Add a passenger to a reservation.
#[utoipa::path(
    post,
    path = "/api/v1/reservations/{id}/pax",
    params(("id" = String, Path, description = "Reservation id")),
    request_body = PaxRequestBody,
    responses(
        (status = 200, description = "Passenger created", body = Pax),
        (status = 400, description = "Invalid request", body = crate::domain::DomainError),
        (status = 401, description = "Unauthorized", body = crate::domain::DomainError),
        (status = 403, description = "Owned by another operator", body = crate::domain::DomainError),
        (status = 404, description = "Reservation not found", body = crate::domain::DomainError)
    ),
    tags = ["pax"],
    operation_id = "createPax",
    security(("SessionCookie" = []))
)]
#[post("/reservations/{id}/pax")]
pub async fn create_pax(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
    payload: web::Json<PaxRequestBody>,
) -> ApiResult<web::Json<Pax>> {
    let actor = session.require_user_id()?;
    let reservation_id = parse_uuid(&path.into_inner(), RESERVATION_ID_FIELD)?;
    let created = state
        .pax
        .create(&actor, reservation_id, &payload.into_inner().into())
        .await?;
    Ok(web::Json(created))
}

/// List a reservation's passengers in creation order.
#[utoipa::path(
    get,
    path = "/api/v1/reservations/{id}/pax",
    params(("id" = String, Path, description = "Reservation id")),
    responses(
        (status = 200, description = "Passengers", body = [Pax]),
        (status = 401, description = "Unauthorized", body = crate::domain::DomainError),
        (status = 403, description = "Owned by another operator", body = crate::domain::DomainError),
        (status = 404, description = "Reservation not found", body = crate::domain::DomainError)
    ),
    tags = ["pax"],
    operation_id = "listPax",
    security(("SessionCookie" = []))
)]
#[get("/reservations/{id}/pax")]
pub async fn list_pax(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
) -> ApiResult<web::Json<Vec<Pax>>> {
    let actor = session.require_user_id()?;
    let reservation_id = parse_uuid(&path.into_inner(), RESERVATION_ID_FIELD)?;
    Ok(web::Json(state.pax.list(&actor, reservation_id).await?))
}

/// Fetch a single passenger.
#[utoipa::path(
    get,
    path = "/api/v1/pax/{id}",
    params(("id" = String, Path, description = "Passenger id")),
    responses(
        (status = 200, description = "Passenger", body = Pax),
        (status = 401, description = "Unauthorized", body = crate::domain::DomainError),
        (status = 403, description = "Owned by another operator", body = crate::domain::DomainError),
        (status = 404, description = "Not found", body = crate::domain::DomainError)
    ),
    tags = ["pax"],
    operation_id = "getPax",
    security(("SessionCookie" = []))
)]
#[get("/pax/{id}")]
pub async fn get_pax(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
) -> ApiResult<web::Json<Pax>> {
    let actor = session.require_user_id()?;
    let id = parse_uuid(&path.into_inner(), ID_FIELD)?;
    Ok(web::Json(state.pax.get(&actor, id).await?))
}

/// Apply a partial update to a passenger.
#[utoipa::path(
    patch,
    path = "/api/v1/pax/{id}",
    params(("id" = String, Path, description = "Passenger id")),
    request_body = PaxRequestBody,
    responses(
        (status = 200, description = "Passenger updated", body = Pax),
        (status = 400, description = "Invalid request", body = crate::domain::DomainError),
        (status = 401, description = "Unauthorized", body = crate::domain::DomainError),
        (status = 403, description = "Owned by another operator", body = crate::domain::DomainError),
        (status = 404, description = "Not found", body = crate::domain::DomainError)
    ),
    tags = ["pax"],
    operation_id = "updatePax",
    security(("SessionCookie" = []))
)]
#[patch("/pax/{id}")]
pub async fn update_pax(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
    payload: web::Json<PaxRequestBody>,
) -> ApiResult<web::Json<Pax>> {
    let actor = session.require_user_id()?;
    let id = parse_uuid(&path.into_inner(), ID_FIELD)?;
    let updated = state
        .pax
        .update(&actor, id, &payload.into_inner().into())
        .await?;
    Ok(web::Json(updated))
}

/// Delete a passenger.
#[utoipa::path(
    delete,
    path = "/api/v1/pax/{id}",
    params(("id" = String, Path, description = "Passenger id")),
    responses(
        (status = 200, description = "Passenger deleted", body = DeletedResponse),
        (status = 401, description = "Unauthorized", body = crate::domain::DomainError),
        (status = 403, description = "Owned by another operator", body = crate::domain::DomainError),
        (status = 404, description = "Not found", body = crate::domain::DomainError)
    ),
    tags = ["pax"],
    operation_id = "deletePax",
    security(("SessionCookie" = []))
)]
#[delete("/pax/{id}")]
pub async fn delete_pax(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
) -> ApiResult<web::Json<DeletedResponse>> {
    let actor = session.require_user_id()?;
    let id = parse_uuid(&path.into_inner(), ID_FIELD)?;
    let deleted = state.pax.remove(&actor, id).await?;
    Ok(web::Json(DeletedResponse { id: deleted }))
}

#[cfg(test)]
#[path = "pax_handler_tests.rs"]
mod tests;

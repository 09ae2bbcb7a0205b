//! Bookable service HTTP handlers.
//!
//! Each of the seven kinds exposes the same five routes:
//!
//! ```text
//! POST   /api/v1/reservations/{id}/<collection>
//! GET    /api/v1/reservations/{id}/<collection>
//! GET    /api/v1/<collection>/{id}
//! PATCH  /api/v1/<collection>/{id}
//! DELETE /api/v1/<collection>/{id}
//! ```
//!
//! The handler bodies are identical up to the kind, so they are generated by
//! [`booking_endpoints!`]; the kind modules contribute only their request
//! DTO and its conversion into the domain payload.

pub mod car_rentals;
pub mod cruises;
pub mod excursions;
pub mod flights;
pub mod hotels;
pub mod medical_assists;
pub mod transfers;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::bookings::MoneyPayload;

/// Monetary request fields shared by every booking body.
///
/// Values are raw strings; the price-pair policy coerces and checks them.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MoneyRequestBody {
    /// Three-letter ISO 4217 currency code.
    pub currency: Option<String>,
    /// Full price of the booked service.
    pub total_price: Option<String>,
    /// Amount already paid against the total.
    pub amount_paid: Option<String>,
}

impl From<MoneyRequestBody> for MoneyPayload {
    fn from(body: MoneyRequestBody) -> Self {
        Self {
            currency: body.currency,
            total_price: body.total_price,
            amount_paid: body.amount_paid,
        }
    }
}

/// Generate the five handlers for one booking kind.
///
/// The request DTO must convert into the kind's domain payload via `From`.
macro_rules! booking_endpoints {
    (
        kind: $kind:ty,
        singular: $singular:ident,
        state: $state_field:ident,
        body: $body:ty,
        noun: $noun:literal,
        tag: $tag:literal,
        create_route: $create_route:literal,
        item_route: $item_route:literal,
        create_path: $create_path:literal,
        item_path: $item_path:literal $(,)?
    ) => {
        ::paste::paste! {
            #[doc = "Create a " $noun " under a reservation."]
            #[utoipa::path(
                post,
                path = $create_path,
                params(("id" = String, Path, description = "Reservation id")),
                request_body = $body,
                responses(
                    (status = 200, description = "Booking created", body = $kind),
                    (status = 400, description = "Invalid request",
                        body = $crate::domain::DomainError),
                    (status = 401, description = "Unauthorized",
                        body = $crate::domain::DomainError),
                    (status = 403, description = "Owned by another operator",
                        body = $crate::domain::DomainError),
                    (status = 404, description = "Reservation not found",
                        body = $crate::domain::DomainError),
                    (status = 409, description = "Duplicate booking reference",
                        body = $crate::domain::DomainError)
                ),
                tags = [$tag],
                security(("SessionCookie" = []))
            )]
            #[actix_web::post($create_route)]
            pub async fn [<create_ $singular>](
                state: ::actix_web::web::Data<$crate::inbound::http::state::HttpState>,
                session: $crate::inbound::http::session::SessionContext,
                path: ::actix_web::web::Path<String>,
                payload: ::actix_web::web::Json<$body>,
            ) -> $crate::inbound::http::ApiResult<::actix_web::web::Json<$kind>> {
                let actor = session.require_user_id()?;
                let reservation_id = $crate::inbound::http::validation::parse_uuid(
                    &path.into_inner(),
                    $crate::inbound::http::validation::FieldName::new("reservationId"),
                )?;
                let created = state
                    .$state_field
                    .create(&actor, reservation_id, &payload.into_inner().into())
                    .await?;
                Ok(::actix_web::web::Json(created))
            }

            #[doc = "List a reservation's " $noun " rows."]
            #[utoipa::path(
                get,
                path = $create_path,
                params(("id" = String, Path, description = "Reservation id")),
                responses(
                    (status = 200, description = "Bookings", body = [$kind]),
                    (status = 401, description = "Unauthorized",
                        body = $crate::domain::DomainError),
                    (status = 403, description = "Owned by another operator",
                        body = $crate::domain::DomainError),
                    (status = 404, description = "Reservation not found",
                        body = $crate::domain::DomainError)
                ),
                tags = [$tag],
                security(("SessionCookie" = []))
            )]
            #[actix_web::get($create_route)]
            pub async fn [<list_ $singular s>](
                state: ::actix_web::web::Data<$crate::inbound::http::state::HttpState>,
                session: $crate::inbound::http::session::SessionContext,
                path: ::actix_web::web::Path<String>,
            ) -> $crate::inbound::http::ApiResult<::actix_web::web::Json<Vec<$kind>>> {
                let actor = session.require_user_id()?;
                let reservation_id = $crate::inbound::http::validation::parse_uuid(
                    &path.into_inner(),
                    $crate::inbound::http::validation::FieldName::new("reservationId"),
                )?;
                let listed = state.$state_field.list(&actor, reservation_id).await?;
                Ok(::actix_web::web::Json(listed))
            }

            #[doc = "Fetch a single " $noun "."]
            #[utoipa::path(
                get,
                path = $item_path,
                params(("id" = String, Path, description = "Booking id")),
                responses(
                    (status = 200, description = "Booking", body = $kind),
                    (status = 401, description = "Unauthorized",
                        body = $crate::domain::DomainError),
                    (status = 403, description = "Owned by another operator",
                        body = $crate::domain::DomainError),
                    (status = 404, description = "Not found",
                        body = $crate::domain::DomainError)
                ),
                tags = [$tag],
                security(("SessionCookie" = []))
            )]
            #[actix_web::get($item_route)]
            pub async fn [<get_ $singular>](
                state: ::actix_web::web::Data<$crate::inbound::http::state::HttpState>,
                session: $crate::inbound::http::session::SessionContext,
                path: ::actix_web::web::Path<String>,
            ) -> $crate::inbound::http::ApiResult<::actix_web::web::Json<$kind>> {
                let actor = session.require_user_id()?;
                let id = $crate::inbound::http::validation::parse_uuid(
                    &path.into_inner(),
                    $crate::inbound::http::validation::FieldName::new("id"),
                )?;
                Ok(::actix_web::web::Json(state.$state_field.get(&actor, id).await?))
            }

            #[doc = "Apply a partial update to a " $noun "."]
            #[utoipa::path(
                patch,
                path = $item_path,
                params(("id" = String, Path, description = "Booking id")),
                request_body = $body,
                responses(
                    (status = 200, description = "Booking updated", body = $kind),
                    (status = 400, description = "Invalid request",
                        body = $crate::domain::DomainError),
                    (status = 401, description = "Unauthorized",
                        body = $crate::domain::DomainError),
                    (status = 403, description = "Owned by another operator",
                        body = $crate::domain::DomainError),
                    (status = 404, description = "Not found",
                        body = $crate::domain::DomainError)
                ),
                tags = [$tag],
                security(("SessionCookie" = []))
            )]
            #[actix_web::patch($item_route)]
            pub async fn [<update_ $singular>](
                state: ::actix_web::web::Data<$crate::inbound::http::state::HttpState>,
                session: $crate::inbound::http::session::SessionContext,
                path: ::actix_web::web::Path<String>,
                payload: ::actix_web::web::Json<$body>,
            ) -> $crate::inbound::http::ApiResult<::actix_web::web::Json<$kind>> {
                let actor = session.require_user_id()?;
                let id = $crate::inbound::http::validation::parse_uuid(
                    &path.into_inner(),
                    $crate::inbound::http::validation::FieldName::new("id"),
                )?;
                let updated = state
                    .$state_field
                    .update(&actor, id, &payload.into_inner().into())
                    .await?;
                Ok(::actix_web::web::Json(updated))
            }

            #[doc = "Delete a " $noun ", reversing its aggregate contribution."]
            #[utoipa::path(
                delete,
                path = $item_path,
                params(("id" = String, Path, description = "Booking id")),
                responses(
                    (status = 200, description = "Booking deleted",
                        body = $crate::inbound::http::DeletedResponse),
                    (status = 401, description = "Unauthorized",
                        body = $crate::domain::DomainError),
                    (status = 403, description = "Owned by another operator",
                        body = $crate::domain::DomainError),
                    (status = 404, description = "Not found",
                        body = $crate::domain::DomainError)
                ),
                tags = [$tag],
                security(("SessionCookie" = []))
            )]
            #[actix_web::delete($item_route)]
            pub async fn [<delete_ $singular>](
                state: ::actix_web::web::Data<$crate::inbound::http::state::HttpState>,
                session: $crate::inbound::http::session::SessionContext,
                path: ::actix_web::web::Path<String>,
            ) -> $crate::inbound::http::ApiResult<
                ::actix_web::web::Json<$crate::inbound::http::DeletedResponse>,
            > {
                let actor = session.require_user_id()?;
                let id = $crate::inbound::http::validation::parse_uuid(
                    &path.into_inner(),
                    $crate::inbound::http::validation::FieldName::new("id"),
                )?;
                let deleted = state.$state_field.remove(&actor, id).await?;
                Ok(::actix_web::web::Json(
                    $crate::inbound::http::DeletedResponse { id: deleted },
                ))
            }
        }
    };
}

pub(crate) use booking_endpoints;

//! HTTP adapter mapping for domain errors.
//!
//! Keeps [`DomainError`] HTTP-agnostic while letting actix handlers turn
//! domain failures into consistent JSON envelopes and status codes.

use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use tracing::error;

use crate::domain::{DomainError, ErrorCode};

/// Convenient result alias for HTTP handlers.
pub type ApiResult<T> = Result<T, DomainError>;

fn status_for(code: ErrorCode) -> StatusCode {
    match code {
        ErrorCode::InvalidRequest => StatusCode::BAD_REQUEST,
        ErrorCode::Unauthorized => StatusCode::UNAUTHORIZED,
        ErrorCode::Forbidden => StatusCode::FORBIDDEN,
        ErrorCode::NotFound => StatusCode::NOT_FOUND,
        ErrorCode::Conflict => StatusCode::CONFLICT,
        ErrorCode::Integrity => StatusCode::UNPROCESSABLE_ENTITY,
        ErrorCode::ServiceUnavailable => StatusCode::SERVICE_UNAVAILABLE,
        ErrorCode::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// Replace internal error messages with an opaque one before serialization.
fn redact_if_internal(error: &DomainError) -> DomainError {
    if matches!(error.code(), ErrorCode::InternalError) {
        DomainError::internal("Internal server error")
    } else {
        error.clone()
    }
}

impl ResponseError for DomainError {
    fn status_code(&self) -> StatusCode {
        status_for(self.code())
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(redact_if_internal(self))
    }
}

impl From<actix_web::Error> for DomainError {
    fn from(err: actix_web::Error) -> Self {
        // Do not leak implementation details to clients.
        error!(error = %err, "actix error promoted to domain error");
        DomainError::internal("Internal server error")
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use rstest::rstest;
    use serde_json::{json, Value};

    #[rstest]
    #[case(DomainError::invalid_request("bad"), StatusCode::BAD_REQUEST)]
    #[case(DomainError::unauthorized("login required"), StatusCode::UNAUTHORIZED)]
    #[case(DomainError::forbidden("not yours"), StatusCode::FORBIDDEN)]
    #[case(DomainError::not_found("missing"), StatusCode::NOT_FOUND)]
    #[case(DomainError::conflict("duplicate"), StatusCode::CONFLICT)]
    #[case(DomainError::integrity("rejected"), StatusCode::UNPROCESSABLE_ENTITY)]
    #[case(
        DomainError::unavailable("down"),
        StatusCode::SERVICE_UNAVAILABLE
    )]
    #[case(
        DomainError::internal("secret detail"),
        StatusCode::INTERNAL_SERVER_ERROR
    )]
    fn each_code_maps_to_its_status(#[case] err: DomainError, #[case] expected: StatusCode) {
        assert_eq!(err.status_code(), expected);
    }

    #[actix_rt::test]
    async fn internal_messages_are_redacted() {
        let err = DomainError::internal("connection string leaked");
        let response = err.error_response();
        let body = actix_web::body::to_bytes(response.into_body())
            .await
            .expect("body bytes");
        let value: Value = serde_json::from_slice(&body).expect("error payload");
        assert_eq!(value["message"], "Internal server error");
        assert_eq!(value["code"], "internal_error");
    }

    #[actix_rt::test]
    async fn client_errors_keep_message_and_details() {
        let err = DomainError::invalid_request("start must be before end")
            .with_details(json!({ "field": "checkIn" }));
        let response = err.error_response();
        let body = actix_web::body::to_bytes(response.into_body())
            .await
            .expect("body bytes");
        let value: Value = serde_json::from_slice(&body).expect("error payload");
        assert_eq!(value["message"], "start must be before end");
        assert_eq!(value["details"]["field"], "checkIn");
    }
}

//! Shared validation helpers for inbound HTTP adapters.
//!
//! Path and query values arrive as strings; these helpers parse them into
//! typed identifiers with the same structured error details the domain
//! policies attach, so clients see one envelope shape everywhere.

use serde_json::json;
use uuid::Uuid;

use crate::domain::DomainError;

/// Newtype wrapper for HTTP field names to provide type safety.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct FieldName(&'static str);

impl FieldName {
    pub(crate) const fn new(name: &'static str) -> Self {
        Self(name)
    }

    fn as_str(&self) -> &str {
        self.0
    }
}

pub(crate) fn invalid_uuid_error(field: FieldName, value: &str) -> DomainError {
    let field = field.as_str();
    DomainError::invalid_request(format!("{field} must be a valid UUID")).with_details(json!({
        "field": field,
        "value": value,
        "code": "invalid_uuid",
    }))
}

pub(crate) fn parse_uuid(value: &str, field: FieldName) -> Result<Uuid, DomainError> {
    Uuid::parse_str(value).map_err(|_| invalid_uuid_error(field, value))
}

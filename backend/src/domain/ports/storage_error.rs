//! Shared error type for repository ports and its domain translation.
//!
//! Adapters classify backend failures into this taxonomy once; the
//! [`From`] impl then decides what each class reveals to clients. Messages
//! for `Unavailable` and `Query` are logged here and replaced with opaque
//! text so driver internals never leak through an API response.

use crate::domain::DomainError;

use super::define_port_error;

define_port_error! {
    /// Errors raised by storage adapters behind the repository ports.
    pub enum StorageError {
        /// The addressed row does not exist.
        NotFound { entity: String } => "{entity} not found",
        /// A uniqueness guarantee was violated.
        Conflict { message: String } => "{message}",
        /// The write would leave the data set invalid.
        Integrity { message: String } => "{message}",
        /// The database is unreachable or the pool is exhausted.
        Unavailable { message: String } => "storage unavailable: {message}",
        /// Any other query failure.
        Query { message: String } => "storage query failed: {message}",
    }
}

impl From<StorageError> for DomainError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::NotFound { entity } => {
                DomainError::not_found(format!("{entity} not found"))
            }
            StorageError::Conflict { message } => DomainError::conflict(message),
            StorageError::Integrity { message } => DomainError::integrity(message),
            StorageError::Unavailable { message } => {
                tracing::error!(error = %message, "storage unavailable");
                DomainError::unavailable("the service is temporarily unavailable")
            }
            StorageError::Query { message } => {
                tracing::error!(error = %message, "storage query failed");
                DomainError::internal("an unexpected storage error occurred")
            }
        }
    }
}

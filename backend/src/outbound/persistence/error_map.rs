//! Translation of driver-level failures into the storage taxonomy.
//!
//! Repositories call Diesel and the pool through `?`, so the mapping lives
//! in `From` impls rather than per-call-site match blocks. Constraint
//! classes carry enough detail to produce a useful client message; anything
//! unrecognised degrades to an opaque query failure after a debug log.

use diesel::result::{DatabaseErrorInformation, DatabaseErrorKind, Error as DieselError};

use crate::domain::ports::StorageError;

use super::pool::PoolError;

impl From<PoolError> for StorageError {
    fn from(err: PoolError) -> Self {
        match err {
            PoolError::Checkout { message } | PoolError::Build { message } => {
                StorageError::unavailable(message)
            }
        }
    }
}

impl From<DieselError> for StorageError {
    fn from(err: DieselError) -> Self {
        match err {
            DieselError::NotFound => StorageError::not_found("record"),
            DieselError::DatabaseError(kind, info) => map_database_error(kind, info.as_ref()),
            other => {
                tracing::debug!(error = %other, "unmapped diesel error");
                StorageError::query(other.to_string())
            }
        }
    }
}

/// Classify a `DatabaseError` by its kind and attached server diagnostics.
fn map_database_error(
    kind: DatabaseErrorKind,
    info: &(dyn DatabaseErrorInformation + Send + Sync),
) -> StorageError {
    tracing::debug!(?kind, message = info.message(), "database error");
    match kind {
        DatabaseErrorKind::UniqueViolation => {
            let message = info.constraint_name().map_or_else(
                || "duplicate value".to_owned(),
                |constraint| format!("duplicate value for {constraint}"),
            );
            StorageError::conflict(message)
        }
        // Child rows always reference an existing parent through the service
        // layer, so a foreign key failure means the parent vanished between
        // the ownership check and the write.
        DatabaseErrorKind::ForeignKeyViolation => StorageError::not_found("reservation"),
        DatabaseErrorKind::CheckViolation | DatabaseErrorKind::NotNullViolation => {
            StorageError::integrity(info.message().to_owned())
        }
        DatabaseErrorKind::ClosedConnection | DatabaseErrorKind::UnableToSendCommand => {
            StorageError::unavailable(info.message().to_owned())
        }
        _ => StorageError::query(info.message().to_owned()),
    }
}

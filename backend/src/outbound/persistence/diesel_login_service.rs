//! Diesel-backed login service.
//!
//! Login keeps the fixture credential contract until credential persistence
//! lands: `admin` / `password` is the only accepted pair. A successful login
//! still resolves the operator's display name from the `users` table when a
//! row has been provisioned, so deployments can rename the operator without
//! a rebuild.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use uuid::Uuid;

use crate::domain::ports::{LoginService, StorageError, FIXTURE_OPERATOR_ID};
use crate::domain::{DomainError, LoginCredentials, User};

use super::models::UserRow;
use super::pool::DbPool;
use super::schema::users;

/// Authentication backed by the `users` table.
#[derive(Clone)]
pub struct DieselLoginService {
    pool: DbPool,
}

impl DieselLoginService {
    /// Create a login service backed by `pool`.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    async fn lookup(&self, id: Uuid) -> Result<Option<User>, StorageError> {
        let mut conn = self.pool.get().await?;
        let row: Option<UserRow> = users::table
            .find(id)
            .select(UserRow::as_select())
            .first(&mut conn)
            .await
            .optional()?;

        row.map(TryInto::try_into).transpose()
    }
}

#[async_trait]
impl LoginService for DieselLoginService {
    async fn authenticate(&self, credentials: &LoginCredentials) -> Result<User, DomainError> {
        if credentials.username() != "admin" || credentials.password() != "password" {
            return Err(DomainError::unauthorized("invalid credentials"));
        }

        let id = Uuid::parse_str(FIXTURE_OPERATOR_ID)
            .map_err(|err| DomainError::internal(format!("invalid fixture operator id: {err}")))?;

        match self.lookup(id).await? {
            Some(user) => Ok(user),
            None => User::try_from_strings(FIXTURE_OPERATOR_ID, "Administrator")
                .map_err(|err| DomainError::internal(format!("invalid fixture operator: {err}"))),
        }
    }
}

//! PostgreSQL-backed `IdentityGateway` storing Argon2 hashes in `accounts`.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use tracing::debug;

use crate::domain::ports::{AuthError, INVALID_CREDENTIALS_MESSAGE, IdentityGateway};
use crate::domain::{Credentials, SessionIdentity};
use crate::outbound::password::{hash_password, verify_password};

use super::error_mapping::{is_unique_violation, map_diesel_error, map_pool_error};
use super::models::{AccountRow, NewAccountRow};
use super::pool::{DbPool, PoolError};
use super::schema::accounts;

const ACCOUNT_EXISTS_MESSAGE: &str = "email already registered";

/// Diesel-backed implementation of the [`IdentityGateway`] port.
#[derive(Clone)]
pub struct DieselIdentityGateway {
    pool: DbPool,
}

impl DieselIdentityGateway {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn pool_error(error: PoolError) -> AuthError {
    map_pool_error(error, |message| AuthError::unavailable(message))
}

fn diesel_error(error: diesel::result::Error) -> AuthError {
    if is_unique_violation(&error) {
        return AuthError::account_exists(ACCOUNT_EXISTS_MESSAGE);
    }
    map_diesel_error(
        error,
        |message| AuthError::unavailable(message),
        |message| AuthError::unavailable(message),
    )
}

#[async_trait]
impl IdentityGateway for DieselIdentityGateway {
    async fn sign_in(&self, credentials: &Credentials) -> Result<SessionIdentity, AuthError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        let account: Option<AccountRow> = accounts::table
            .filter(accounts::email.eq(credentials.email().as_ref()))
            .select(AccountRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(diesel_error)?;
        let Some(account) = account else {
            return Err(AuthError::invalid_credentials(INVALID_CREDENTIALS_MESSAGE));
        };

        let password = credentials.password().to_owned();
        let matches =
            tokio::task::spawn_blocking(move || verify_password(&password, &account.password_hash))
                .await
                .map_err(|err| AuthError::unavailable(err.to_string()))?
                .unwrap_or_else(|err| {
                    debug!(%err, "stored password hash unreadable");
                    false
                });
        if !matches {
            return Err(AuthError::invalid_credentials(INVALID_CREDENTIALS_MESSAGE));
        }
        Ok(SessionIdentity::new(credentials.email().clone()))
    }

    async fn register(&self, credentials: &Credentials) -> Result<SessionIdentity, AuthError> {
        let password = credentials.password().to_owned();
        let hash = tokio::task::spawn_blocking(move || hash_password(&password))
            .await
            .map_err(|err| AuthError::unavailable(err.to_string()))?
            .map_err(|err| AuthError::rejected(format!("password could not be hashed: {err}")))?;

        let mut conn = self.pool.get().await.map_err(pool_error)?;
        diesel::insert_into(accounts::table)
            .values(&NewAccountRow {
                email: credentials.email().as_ref(),
                password_hash: &hash,
            })
            .execute(&mut conn)
            .await
            .map_err(diesel_error)?;
        Ok(SessionIdentity::new(credentials.email().clone()))
    }

    async fn sign_out(&self, _identity: &SessionIdentity) -> Result<(), AuthError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use diesel::result::{DatabaseErrorKind, Error as DieselError};
    use rstest::rstest;

    #[rstest]
    fn duplicate_email_maps_to_account_exists() {
        let error = DieselError::DatabaseError(
            DatabaseErrorKind::UniqueViolation,
            Box::new("duplicate key value violates unique constraint".to_owned()),
        );
        assert_eq!(
            diesel_error(error),
            AuthError::account_exists(ACCOUNT_EXISTS_MESSAGE)
        );
    }

    #[rstest]
    fn other_failures_mean_the_provider_is_unavailable() {
        assert!(matches!(
            diesel_error(DieselError::NotFound),
            AuthError::Unavailable { .. }
        ));
        assert!(matches!(
            pool_error(PoolError::checkout("timed out")),
            AuthError::Unavailable { .. }
        ));
    }
}

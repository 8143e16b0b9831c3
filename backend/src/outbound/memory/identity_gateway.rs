//! Account registry held in memory.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::debug;

use crate::domain::ports::{AuthError, INVALID_CREDENTIALS_MESSAGE, IdentityGateway};
use crate::domain::{Credentials, Email, SessionIdentity};
use crate::outbound::password::{hash_password, verify_password};

/// In-memory [`IdentityGateway`] storing Argon2 password hashes by email.
#[derive(Debug, Default)]
pub struct MemoryIdentityGateway {
    accounts: RwLock<HashMap<Email, String>>,
}

impl MemoryIdentityGateway {
    pub fn new() -> Self {
        Self::default()
    }
}

async fn hash_off_thread(password: String) -> Result<String, AuthError> {
    tokio::task::spawn_blocking(move || hash_password(&password))
        .await
        .map_err(|err| AuthError::unavailable(err.to_string()))?
        .map_err(|err| AuthError::rejected(format!("password could not be hashed: {err}")))
}

async fn verify_off_thread(password: String, stored: String) -> Result<bool, AuthError> {
    tokio::task::spawn_blocking(move || verify_password(&password, &stored))
        .await
        .map_err(|err| AuthError::unavailable(err.to_string()))?
        .map_err(|err| {
            debug!(%err, "stored password hash unreadable");
            AuthError::invalid_credentials(INVALID_CREDENTIALS_MESSAGE)
        })
}

#[async_trait]
impl IdentityGateway for MemoryIdentityGateway {
    async fn sign_in(&self, credentials: &Credentials) -> Result<SessionIdentity, AuthError> {
        let stored = self
            .accounts
            .read()
            .await
            .get(credentials.email())
            .cloned()
            .ok_or_else(|| AuthError::invalid_credentials(INVALID_CREDENTIALS_MESSAGE))?;
        if verify_off_thread(credentials.password().to_owned(), stored).await? {
            Ok(SessionIdentity::new(credentials.email().clone()))
        } else {
            Err(AuthError::invalid_credentials(INVALID_CREDENTIALS_MESSAGE))
        }
    }

    async fn register(&self, credentials: &Credentials) -> Result<SessionIdentity, AuthError> {
        if self.accounts.read().await.contains_key(credentials.email()) {
            return Err(AuthError::account_exists("email already registered"));
        }
        let hash = hash_off_thread(credentials.password().to_owned()).await?;
        let mut accounts = self.accounts.write().await;
        if accounts.contains_key(credentials.email()) {
            return Err(AuthError::account_exists("email already registered"));
        }
        accounts.insert(credentials.email().clone(), hash);
        Ok(SessionIdentity::new(credentials.email().clone()))
    }

    async fn sign_out(&self, _identity: &SessionIdentity) -> Result<(), AuthError> {
        Ok(())
    }
}

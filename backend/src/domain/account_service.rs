//! Account domain service bridging [`AccountService`] to an [`IdentityGateway`].

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{info, warn};

use crate::domain::ports::{AccountService, AuthError, IdentityGateway};
use crate::domain::{Credentials, Error, SessionIdentity};

/// Account service implementing the [`AccountService`] driving port.
#[derive(Clone)]
pub struct AccountsService<G> {
    gateway: Arc<G>,
}

impl<G> AccountsService<G> {
    pub fn new(gateway: Arc<G>) -> Self {
        Self { gateway }
    }
}

fn map_auth_error(error: AuthError) -> Error {
    match error {
        AuthError::InvalidCredentials { message } => Error::unauthorized(message),
        AuthError::AccountExists { message } => Error::conflict(message),
        AuthError::Unavailable { .. } => Error::service_unavailable(error.to_string()),
        AuthError::Rejected { message } => Error::invalid_request(message),
    }
}

#[async_trait]
impl<G> AccountService for AccountsService<G>
where
    G: IdentityGateway,
{
    async fn sign_in(&self, credentials: &Credentials) -> Result<SessionIdentity, Error> {
        let identity = self.gateway.sign_in(credentials).await.map_err(|err| {
            warn!(email = %credentials.email(), error = %err, "sign-in refused");
            map_auth_error(err)
        })?;
        info!(email = %identity.email(), "signed in");
        Ok(identity)
    }

    async fn register(&self, credentials: &Credentials) -> Result<SessionIdentity, Error> {
        let identity = self
            .gateway
            .register(credentials)
            .await
            .map_err(map_auth_error)?;
        info!(email = %identity.email(), "account registered");
        Ok(identity)
    }

    async fn sign_out(&self, identity: &SessionIdentity) -> Result<(), Error> {
        self.gateway.sign_out(identity).await.map_err(|err| {
            let mapped = map_auth_error(err);
            Error::try_new(mapped.code(), format!("Failed to logout: {}", mapped.message()))
                .unwrap_or(mapped)
        })?;
        info!(email = %identity.email(), "signed out");
        Ok(())
    }
}

//! Driving port for account use-cases.
//!
//! HTTP handlers authenticate through this port without knowing which
//! identity provider backs it.

use async_trait::async_trait;

use crate::domain::{Credentials, Error, SessionIdentity};

/// Use-case port for sign-in, registration, and sign-out.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AccountService: Send + Sync {
    async fn sign_in(&self, credentials: &Credentials) -> Result<SessionIdentity, Error>;

    async fn register(&self, credentials: &Credentials) -> Result<SessionIdentity, Error>;

    /// Errors are reported as `Failed to logout: …`.
    async fn sign_out(&self, identity: &SessionIdentity) -> Result<(), Error>;
}

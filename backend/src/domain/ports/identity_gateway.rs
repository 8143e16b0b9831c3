//! Driven port for the identity provider.
//!
//! Identity changes reach the domain through the session cookie, so the
//! gateway itself only performs the three account actions.

use async_trait::async_trait;

use crate::domain::{Credentials, SessionIdentity};

use super::define_port_error;

/// Message shown when an email/password pair does not match an account.
pub const INVALID_CREDENTIALS_MESSAGE: &str = "invalid email or password";

define_port_error! {
    /// Errors raised by identity gateway adapters.
    pub enum AuthError {
        /// Email/password pair did not match an account.
        InvalidCredentials { message: String } => "{message}",
        /// Registration collided with an existing account.
        AccountExists { message: String } => "{message}",
        /// The provider could not be reached.
        Unavailable { message: String } => "identity provider unavailable: {message}",
        /// The provider refused the request for another reason.
        Rejected { message: String } => "{message}",
    }
}

/// Port for account sign-in, registration, and sign-out.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait IdentityGateway: Send + Sync {
    /// Authenticate an existing account.
    async fn sign_in(&self, credentials: &Credentials) -> Result<SessionIdentity, AuthError>;

    /// Create an account and return its identity, already signed in.
    async fn register(&self, credentials: &Credentials) -> Result<SessionIdentity, AuthError>;

    /// End the provider-side session for `identity`.
    async fn sign_out(&self, identity: &SessionIdentity) -> Result<(), AuthError>;
}

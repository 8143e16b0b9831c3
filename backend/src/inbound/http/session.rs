//! Session helpers keeping Actix specifics out of the handlers.
//!
//! The session cookie plays the identity provider's role: the email stored
//! under [`EMAIL_KEY`] is the signed-in identity, and reading it is the one
//! identity notification a [`SessionController`] receives per request.

use actix_session::Session;
use actix_web::{FromRequest, HttpRequest, dev::Payload};
use futures_util::future::LocalBoxFuture;
use tracing::warn;

use crate::domain::{AdminRoster, Email, Error, SessionController, SessionIdentity};

pub(crate) const EMAIL_KEY: &str = "email";

/// Newtype wrapper exposing identity-level session operations.
#[derive(Clone)]
pub struct SessionContext(Session);

impl SessionContext {
    pub fn new(session: Session) -> Self {
        Self(session)
    }

    /// Store the signed-in identity, rotating the session id.
    pub fn persist_identity(&self, identity: &SessionIdentity) -> Result<(), Error> {
        self.0.renew();
        self.0
            .insert(EMAIL_KEY, identity.email().as_ref())
            .map_err(|error| Error::internal(format!("failed to persist session: {error}")))
    }

    /// Identity carried by the cookie, if any.
    ///
    /// A stored value that is no longer a valid email is treated as signed
    /// out.
    pub fn identity(&self) -> Result<Option<SessionIdentity>, Error> {
        let raw = self
            .0
            .get::<String>(EMAIL_KEY)
            .map_err(|error| Error::internal(format!("failed to read session: {error}")))?;
        let Some(raw) = raw else {
            return Ok(None);
        };
        match Email::new(&raw) {
            Ok(email) => Ok(Some(SessionIdentity::new(email))),
            Err(error) => {
                warn!(%error, "discarding malformed email in session cookie");
                Ok(None)
            }
        }
    }

    /// Drop every session entry and expire the cookie.
    pub fn clear(&self) {
        self.0.purge();
    }

    /// Controller for this request.
    ///
    /// The controller stays in its loading state when the cookie cannot be
    /// read, so callers answer `503` rather than treating the caller as a
    /// visitor.
    pub fn controller(&self, roster: &AdminRoster) -> SessionController {
        let mut controller = SessionController::pending(roster.clone());
        match self.identity() {
            Ok(identity) => controller.observe(identity),
            Err(error) => warn!(%error, "session identity unavailable"),
        }
        controller
    }
}

impl FromRequest for SessionContext {
    type Error = actix_web::Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let fut = Session::from_request(req, payload);
        Box::pin(async move { fut.await.map(SessionContext::new) })
    }
}

//! Test helpers for inbound HTTP components.

use std::sync::Arc;

use actix_http::Request;
use actix_session::{Session, SessionMiddleware, storage::CookieSessionStore};
use actix_web::cookie::{Cookie, Key};
use actix_web::dev::{Service, ServiceResponse};
use actix_web::{HttpResponse, test, web};

use crate::domain::AdminRoster;
use crate::domain::ports::{MockAccountService, MockComplaintCommand, MockComplaintQuery};
use crate::inbound::http::session::EMAIL_KEY;
use crate::inbound::http::state::{HttpState, HttpStatePorts};

/// Route template for [`sign_in_fixture`].
pub const SIGN_IN_FIXTURE_PATH: &str = "/test/sign-in/{email}";

/// Session middleware for tests: fresh key, cookie `session`, not `Secure`.
pub fn test_session_middleware() -> SessionMiddleware<CookieSessionStore> {
    SessionMiddleware::builder(CookieSessionStore::default(), Key::generate())
        .cookie_name("session".to_owned())
        .cookie_secure(false)
        .build()
}

/// Mocks for each driving port; unset expectations panic when called.
#[derive(Default)]
pub struct MockPorts {
    pub accounts: MockAccountService,
    pub complaints: MockComplaintCommand,
    pub complaints_query: MockComplaintQuery,
}

impl MockPorts {
    /// Freeze the mocks into handler state using the default roster.
    pub fn into_state(self) -> HttpState {
        HttpState::new(
            HttpStatePorts {
                accounts: Arc::new(self.accounts),
                complaints: Arc::new(self.complaints),
                complaints_query: Arc::new(self.complaints_query),
            },
            AdminRoster::default(),
        )
    }
}

/// The `session` cookie set by a response, if any.
pub fn session_cookie<B>(response: &ServiceResponse<B>) -> Option<Cookie<'static>> {
    response
        .response()
        .cookies()
        .find(|cookie| cookie.name() == "session")
        .map(|cookie| cookie.into_owned())
}

/// Writes the path email straight into the session, bypassing the accounts
/// port.
pub async fn sign_in_fixture(session: Session, path: web::Path<String>) -> HttpResponse {
    session
        .insert(EMAIL_KEY, path.into_inner())
        .expect("store fixture identity");
    HttpResponse::Ok().finish()
}

/// Session cookie for `email`, via an app that mounts [`sign_in_fixture`].
pub async fn sign_in_as<S>(app: &S, email: &str) -> Cookie<'static>
where
    S: Service<Request, Response = ServiceResponse, Error = actix_web::Error>,
{
    let res = test::call_service(
        app,
        test::TestRequest::post()
            .uri(&format!("/test/sign-in/{email}"))
            .to_request(),
    )
    .await;
    session_cookie(&res).expect("fixture session cookie")
}

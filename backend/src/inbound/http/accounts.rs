//! Account API handlers.
//!
//! ```text
//! POST /api/v1/register {"email":"citizen@example.com","password":"secret1"}
//! POST /api/v1/login {"email":"citizen@example.com","password":"secret1"}
//! POST /api/v1/logout
//! ```

use actix_web::{HttpResponse, post, web};
use serde::{Deserialize, Serialize};
use tracing::debug;
use utoipa::ToSchema;
use zeroize::Zeroize;

use crate::domain::{ApiResult, Credentials, Route, SessionIdentity};
use crate::inbound::http::cache_control::private_no_cache_header;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::credentials_error;

/// Request body for login and registration.
#[derive(Deserialize, Serialize, ToSchema)]
pub struct CredentialsRequest {
    #[schema(example = "citizen@example.com")]
    pub email: String,
    #[schema(example = "secret1")]
    pub password: String,
}

impl Drop for CredentialsRequest {
    fn drop(&mut self) {
        self.password.zeroize();
    }
}

/// Signed-in identity with its landing view.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SessionResponse {
    #[schema(example = "citizen@example.com")]
    pub email: String,
    /// `user` or `administrator`.
    #[schema(example = "user")]
    pub role: String,
    /// Where the client should navigate next.
    #[schema(example = "/dashboard")]
    pub home: String,
}

fn session_response(state: &HttpState, identity: &SessionIdentity) -> SessionResponse {
    let role = state.roster.role_of(Some(identity));
    SessionResponse {
        email: identity.email().to_string(),
        role: role.as_str().to_owned(),
        home: Route::home_of(role).path().to_owned(),
    }
}

/// Sign in and establish a session.
#[utoipa::path(
    post,
    path = "/api/v1/login",
    request_body = CredentialsRequest,
    responses(
        (status = 200, description = "Signed in", body = SessionResponse,
            headers(("Set-Cookie" = String, description = "Session cookie"))),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Invalid credentials", body = ErrorSchema),
        (status = 503, description = "Identity provider unavailable", body = ErrorSchema)
    ),
    tags = ["accounts"],
    operation_id = "login",
    security([])
)]
#[post("/login")]
pub async fn login(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<CredentialsRequest>,
) -> ApiResult<HttpResponse> {
    let credentials = Credentials::for_sign_in(&payload.email, &payload.password)
        .map_err(|err| credentials_error(&err))?;
    let identity = state.accounts.sign_in(&credentials).await?;
    session.persist_identity(&identity)?;
    Ok(HttpResponse::Ok()
        .insert_header(private_no_cache_header())
        .json(session_response(&state, &identity)))
}

/// Create an account and sign it in.
#[utoipa::path(
    post,
    path = "/api/v1/register",
    request_body = CredentialsRequest,
    responses(
        (status = 201, description = "Account created", body = SessionResponse,
            headers(("Set-Cookie" = String, description = "Session cookie"))),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 409, description = "Email already registered", body = ErrorSchema),
        (status = 503, description = "Identity provider unavailable", body = ErrorSchema)
    ),
    tags = ["accounts"],
    operation_id = "register",
    security([])
)]
#[post("/register")]
pub async fn register(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<CredentialsRequest>,
) -> ApiResult<HttpResponse> {
    let credentials = Credentials::for_registration(&payload.email, &payload.password)
        .map_err(|err| credentials_error(&err))?;
    let identity = state.accounts.register(&credentials).await?;
    session.persist_identity(&identity)?;
    Ok(HttpResponse::Created()
        .insert_header(private_no_cache_header())
        .json(session_response(&state, &identity)))
}

/// End the session.
///
/// The cookie is purged even when the provider reports a failure.
#[utoipa::path(
    post,
    path = "/api/v1/logout",
    responses(
        (status = 204, description = "Signed out"),
        (status = 503, description = "Sign-out failed upstream", body = ErrorSchema)
    ),
    tags = ["accounts"],
    operation_id = "logout"
)]
#[post("/logout")]
pub async fn logout(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<HttpResponse> {
    let identity = session.identity().unwrap_or_else(|err| {
        debug!(error = %err, "unreadable session during logout");
        None
    });
    session.clear();
    if let Some(identity) = identity {
        state.accounts.sign_out(&identity).await?;
    }
    Ok(HttpResponse::NoContent().finish())
}

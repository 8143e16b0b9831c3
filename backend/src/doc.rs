//! OpenAPI document for the portal.
//!
//! [`ApiDoc`] registers every view, API, and probe handler together with
//! the schema wrappers from [`crate::inbound::http::schemas`], and declares
//! the session cookie as the default security scheme. Swagger UI serves it in
//! debug builds and `cargo run --bin openapi-dump` prints it.

use crate::inbound::http::schemas::{ErrorCodeSchema, ErrorSchema};
use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

/// Adds the `SessionCookie` security scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            "SessionCookie",
            SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::with_description(
                "session",
                "Encrypted session cookie set by POST /api/v1/login or /api/v1/register.",
            ))),
        );
    }
}

#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Grievance portal API",
        description = "Role-gated complaint views and the JSON API behind them."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    security(("SessionCookie" = [])),
    paths(
        crate::inbound::http::views::root,
        crate::inbound::http::views::login_view,
        crate::inbound::http::views::register_view,
        crate::inbound::http::views::dashboard_view,
        crate::inbound::http::views::complaint_detail_view,
        crate::inbound::http::views::admin_view,
        crate::inbound::http::views::admin_complaint_detail_view,
        crate::inbound::http::accounts::login,
        crate::inbound::http::accounts::register,
        crate::inbound::http::accounts::logout,
        crate::inbound::http::complaints::submit_complaint,
        crate::inbound::http::complaints::transition_complaint,
        crate::inbound::http::theme::set_theme,
        crate::inbound::http::theme::toggle_theme,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(ErrorSchema, ErrorCodeSchema)),
    tags(
        (name = "views", description = "Role-gated pages; refused requests redirect with 303"),
        (name = "accounts", description = "Sign-in, registration, and sign-out"),
        (name = "complaints", description = "Filing complaints and changing their status"),
        (name = "theme", description = "Dark/light display preference"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;

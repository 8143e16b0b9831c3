//! Display theme preference.
//!
//! ```text
//! PUT  /api/v1/theme {"theme":"dark"}
//! POST /api/v1/theme/toggle
//! ```
//!
//! The preference lives in the `theme` cookie. Requests without one fall back
//! to the `Sec-CH-Prefers-Color-Scheme` client hint.

use actix_web::cookie::time::Duration;
use actix_web::cookie::{Cookie, SameSite};
use actix_web::{FromRequest, HttpRequest, HttpResponse, dev::Payload, post, put, web};
use futures_util::future::{Ready, ready};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{ApiResult, Theme};
use crate::inbound::http::cache_control::private_no_cache_header;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::validation::parse_theme;

pub const THEME_COOKIE: &str = "theme";
pub const COLOR_SCHEME_HINT: &str = "Sec-CH-Prefers-Color-Scheme";
const THEME_COOKIE_DAYS: i64 = 365;

/// Theme resolved for the current request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActiveTheme(pub Theme);

impl ActiveTheme {
    pub fn resolve(req: &HttpRequest) -> Self {
        let stored = req.cookie(THEME_COOKIE);
        let hint = req
            .headers()
            .get(COLOR_SCHEME_HINT)
            .and_then(|value| value.to_str().ok());
        Self(Theme::resolve(stored.as_ref().map(Cookie::value), hint))
    }
}

impl FromRequest for ActiveTheme {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(Ok(Self::resolve(req)))
    }
}

/// Request body for `PUT /api/v1/theme`.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct ThemeRequest {
    #[schema(example = "dark")]
    pub theme: String,
}

/// Theme now in effect.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct ThemeResponse {
    #[schema(example = "dark")]
    pub theme: String,
}

fn theme_cookie(theme: Theme) -> Cookie<'static> {
    Cookie::build(THEME_COOKIE, theme.as_str())
        .path("/")
        .max_age(Duration::days(THEME_COOKIE_DAYS))
        .same_site(SameSite::Lax)
        .finish()
}

fn theme_response(theme: Theme) -> HttpResponse {
    HttpResponse::Ok()
        .insert_header(private_no_cache_header())
        .cookie(theme_cookie(theme))
        .json(ThemeResponse {
            theme: theme.as_str().to_owned(),
        })
}

/// Store an explicit theme choice.
#[utoipa::path(
    put,
    path = "/api/v1/theme",
    request_body = ThemeRequest,
    responses(
        (status = 200, description = "Theme stored", body = ThemeResponse,
            headers(("Set-Cookie" = String, description = "theme cookie"))),
        (status = 400, description = "Unknown theme", body = ErrorSchema)
    ),
    tags = ["theme"],
    operation_id = "setTheme",
    security([])
)]
#[put("/theme")]
pub async fn set_theme(payload: web::Json<ThemeRequest>) -> ApiResult<HttpResponse> {
    let theme = parse_theme(&payload.theme)?;
    Ok(theme_response(theme))
}

/// Flip the resolved theme.
#[utoipa::path(
    post,
    path = "/api/v1/theme/toggle",
    responses(
        (status = 200, description = "Theme toggled", body = ThemeResponse,
            headers(("Set-Cookie" = String, description = "theme cookie")))
    ),
    tags = ["theme"],
    operation_id = "toggleTheme",
    security([])
)]
#[post("/theme/toggle")]
pub async fn toggle_theme(active: ActiveTheme) -> HttpResponse {
    theme_response(active.0.toggled())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Error;
    use actix_web::http::StatusCode;
    use actix_web::{App, test};
    use rstest::rstest;

    fn theme_app() -> App<
        impl actix_web::dev::ServiceFactory<
            actix_web::dev::ServiceRequest,
            Config = (),
            Response = actix_web::dev::ServiceResponse,
            Error = actix_web::Error,
            InitError = (),
        >,
    > {
        App::new().service(
            web::scope("/api/v1")
                .service(set_theme)
                .service(toggle_theme),
        )
    }

    #[rstest]
    #[case(None, None, "dark")]
    #[case(Some("dark"), None, "light")]
    #[case(None, Some("\"dark\""), "light")]
    #[case(Some("light"), Some("dark"), "dark")]
    #[actix_web::test]
    async fn toggle_flips_the_resolved_theme(
        #[case] cookie: Option<&str>,
        #[case] hint: Option<&str>,
        #[case] expected: &str,
    ) {
        let app = test::init_service(theme_app()).await;
        let mut request = test::TestRequest::post().uri("/api/v1/theme/toggle");
        if let Some(value) = cookie {
            request = request.cookie(Cookie::new(THEME_COOKIE, value.to_owned()));
        }
        if let Some(value) = hint {
            request = request.insert_header((COLOR_SCHEME_HINT, value));
        }

        let res = test::call_service(&app, request.to_request()).await;
        assert_eq!(res.status(), StatusCode::OK);
        let stored = res
            .response()
            .cookies()
            .find(|c| c.name() == THEME_COOKIE)
            .expect("theme cookie set")
            .into_owned();
        assert_eq!(stored.value(), expected);
        assert_eq!(stored.same_site(), Some(SameSite::Lax));
        assert_eq!(stored.max_age(), Some(Duration::days(THEME_COOKIE_DAYS)));

        let body: ThemeResponse = test::read_body_json(res).await;
        assert_eq!(body.theme, expected);
    }

    #[actix_web::test]
    async fn put_stores_an_explicit_choice() {
        let app = test::init_service(theme_app()).await;
        let res = test::call_service(
            &app,
            test::TestRequest::put()
                .uri("/api/v1/theme")
                .set_json(ThemeRequest {
                    theme: "dark".into(),
                })
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::OK);
        let body: ThemeResponse = test::read_body_json(res).await;
        assert_eq!(body.theme, "dark");
    }

    #[actix_web::test]
    async fn put_rejects_unknown_themes() {
        let app = test::init_service(theme_app()).await;
        let res = test::call_service(
            &app,
            test::TestRequest::put()
                .uri("/api/v1/theme")
                .set_json(ThemeRequest {
                    theme: "sepia".into(),
                })
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        let body: Error = test::read_body_json(res).await;
        assert_eq!(
            body.details()
                .and_then(|details| details.get("code"))
                .and_then(|code| code.as_str()),
            Some("unknown_theme")
        );
    }
}

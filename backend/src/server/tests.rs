//! Tests for server bootstrap: readiness signalling and route wiring.

use super::*;
use std::net::SocketAddr;

use actix_web::cookie::{Key, SameSite};
use actix_web::http::{StatusCode, header};
use actix_web::test;
use grievance_backend::domain::AdminRoster;
use grievance_backend::inbound::http::session_config::SessionSettings;
use rstest::{fixture, rstest};

#[fixture]
fn health_state() -> web::Data<HealthState> {
    web::Data::new(HealthState::new())
}

#[fixture]
fn session_settings() -> SessionSettings {
    SessionSettings {
        key: Key::generate(),
        cookie_secure: false,
        same_site: SameSite::Lax,
    }
}

#[fixture]
fn server_config(session_settings: SessionSettings) -> ServerConfig {
    ServerConfig::new(
        session_settings,
        AdminRoster::default(),
        SocketAddr::from(([127, 0, 0, 1], 0)),
    )
}

#[rstest]
#[actix_rt::test]
async fn create_server_marks_ready(
    health_state: web::Data<HealthState>,
    server_config: ServerConfig,
) {
    assert!(!health_state.is_ready(), "state should start unready");
    assert_eq!(server_config.bind_addr().port(), 0);

    let _server = create_server(health_state.clone(), server_config).expect("server should build");

    assert!(health_state.is_ready(), "server creation should mark readiness");
}

#[rstest]
#[actix_rt::test]
async fn unusable_seed_file_stops_startup(
    health_state: web::Data<HealthState>,
    server_config: ServerConfig,
) {
    let config = server_config.with_seed_file(Some("/nonexistent/seed.json".into()));

    let result = create_server(health_state.clone(), config);

    assert!(result.is_err());
    assert!(!health_state.is_ready());
}

#[rstest]
#[case("/", StatusCode::SEE_OTHER)]
#[case("/login", StatusCode::OK)]
#[case("/register", StatusCode::OK)]
#[case("/dashboard", StatusCode::SEE_OTHER)]
#[case("/admin", StatusCode::SEE_OTHER)]
#[case("/health/live", StatusCode::OK)]
#[actix_web::test]
async fn app_wires_views_and_probes(
    server_config: ServerConfig,
    #[case] path: &str,
    #[case] expected: StatusCode,
) {
    let http_state = build_http_state(&server_config).expect("in-memory state");
    let app = test::init_service(build_app(AppDependencies {
        health_state: web::Data::new(HealthState::new()),
        http_state,
        session: server_config.session.middleware(),
    }))
    .await;

    let res = test::call_service(&app, test::TestRequest::get().uri(path).to_request()).await;

    assert_eq!(res.status(), expected);
    if expected == StatusCode::SEE_OTHER {
        assert_eq!(
            res.headers().get(header::LOCATION).and_then(|v| v.to_str().ok()),
            Some("/login")
        );
    }
}

#[rstest]
#[actix_web::test]
async fn api_scope_is_mounted_under_v1(server_config: ServerConfig) {
    let http_state = build_http_state(&server_config).expect("in-memory state");
    let app = test::init_service(build_app(AppDependencies {
        health_state: web::Data::new(HealthState::new()),
        http_state,
        session: server_config.session.middleware(),
    }))
    .await;

    let req = test::TestRequest::post()
        .uri("/api/v1/complaints")
        .set_json(serde_json::json!({"title": "Pothole", "description": "Main St"}))
        .to_request();
    let res = test::call_service(&app, req).await;

    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
}

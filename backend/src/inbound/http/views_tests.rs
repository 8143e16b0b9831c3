//! Tests for the role-gated view endpoints.

use super::*;
use crate::domain::{
    AdminBoard, ComplaintRecord, Email, ErrorCode, RecordTimestamp, RecordedStatus, UserDashboard,
};
use crate::inbound::http::test_utils::{
    MockPorts, SIGN_IN_FIXTURE_PATH, sign_in_as, sign_in_fixture, test_session_middleware,
};
use crate::inbound::http::theme::THEME_COOKIE;
use actix_web::cookie::Cookie;
use actix_web::http::StatusCode;
use actix_web::{App, test};
use rstest::rstest;

const CITIZEN: &str = "citizen@example.com";
const ADMIN: &str = "admin@example.com";

fn email(raw: &str) -> Email {
    Email::new(raw).expect("valid email")
}

fn record(
    id: &str,
    owner: &str,
    category: Category,
    status: &str,
    seconds: i64,
) -> ComplaintRecord {
    ComplaintRecord {
        id: ComplaintId::new(id).expect("valid id"),
        title: format!("complaint {id}"),
        description: "details".into(),
        category,
        owner: email(owner),
        status: RecordedStatus::from_raw(status),
        created_at: Some(RecordTimestamp::Structured {
            seconds,
            nanoseconds: None,
        }),
    }
}

fn all_records() -> Vec<ComplaintRecord> {
    vec![
        record("c-3", CITIZEN, Category::Healthcare, "resolved", 1_700_200_000),
        record("c-2", "other@example.com", Category::Infrastructure, "pending", 1_700_100_000),
        record("c-1", CITIZEN, Category::Infrastructure, "in progress", 1_700_000_000),
    ]
}

fn views_app(
    ports: MockPorts,
) -> App<
    impl actix_web::dev::ServiceFactory<
        actix_web::dev::ServiceRequest,
        Config = (),
        Response = actix_web::dev::ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new()
        .app_data(web::Data::new(ports.into_state()))
        .wrap(test_session_middleware())
        .route(SIGN_IN_FIXTURE_PATH, web::post().to(sign_in_fixture))
        .service(root)
        .service(login_view)
        .service(register_view)
        .service(dashboard_view)
        .service(complaint_detail_view)
        .service(admin_view)
        .service(admin_complaint_detail_view)
}

fn location(res: &actix_web::dev::ServiceResponse) -> Option<&str> {
    res.headers()
        .get(header::LOCATION)
        .and_then(|value| value.to_str().ok())
}

fn expect_owner_dashboard(ports: &mut MockPorts) {
    ports
        .complaints_query
        .expect_user_dashboard()
        .returning(|owner: &Email| {
            Ok(UserDashboard::from_owner_records(owner, all_records()))
        });
}

fn expect_admin_board(ports: &mut MockPorts) {
    ports
        .complaints_query
        .expect_admin_board()
        .returning(|filter: ComplaintFilter| {
            let mut board = AdminBoard::new(all_records());
            board.set_filter(filter);
            Ok(board)
        });
}

#[rstest]
#[case(None, "/", "/login")]
#[case(Some(CITIZEN), "/", "/dashboard")]
#[case(Some(ADMIN), "/", "/admin")]
#[case(Some(CITIZEN), "/login", "/dashboard")]
#[case(Some(ADMIN), "/register", "/admin")]
#[case(None, "/dashboard", "/login")]
#[case(Some(ADMIN), "/dashboard", "/admin")]
#[case(None, "/admin", "/login")]
#[case(Some(CITIZEN), "/admin", "/dashboard")]
#[case(Some(CITIZEN), "/admin/complaints/c-1", "/dashboard")]
#[case(None, "/dashboard/complaints/c-1", "/login")]
#[actix_web::test]
async fn refused_views_redirect_home(
    #[case] who: Option<&str>,
    #[case] path: &str,
    #[case] expected: &str,
) {
    let mut ports = MockPorts::default();
    ports.complaints_query.expect_user_dashboard().never();
    ports.complaints_query.expect_admin_board().never();
    let app = test::init_service(views_app(ports)).await;
    let mut request = test::TestRequest::get().uri(path);
    if let Some(who) = who {
        request = request.cookie(sign_in_as(&app, who).await);
    }

    let res = test::call_service(&app, request.to_request()).await;
    assert_eq!(res.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&res), Some(expected));
}

#[rstest]
#[case("/login", ViewName::Login)]
#[case("/register", ViewName::Register)]
#[actix_web::test]
async fn visitors_see_auth_forms_with_theme(#[case] path: &str, #[case] view: ViewName) {
    let app = test::init_service(views_app(MockPorts::default())).await;
    let res = test::call_service(
        &app,
        test::TestRequest::get()
            .uri(path)
            .cookie(Cookie::new(THEME_COOKIE, "dark"))
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::OK);
    let body: AuthFormView = test::read_body_json(res).await;
    assert_eq!(body.view, view);
    assert_eq!(body.theme, "dark");
}

#[actix_web::test]
async fn dashboard_lists_only_own_complaints_newest_first() {
    let mut ports = MockPorts::default();
    expect_owner_dashboard(&mut ports);
    let app = test::init_service(views_app(ports)).await;
    let cookie = sign_in_as(&app, CITIZEN).await;

    let res = test::call_service(
        &app,
        test::TestRequest::get()
            .uri("/dashboard")
            .cookie(cookie)
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(
        res.headers()
            .get(header::CACHE_CONTROL)
            .and_then(|value| value.to_str().ok()),
        Some("private, no-cache, must-revalidate")
    );
    let body: DashboardView = test::read_body_json(res).await;
    assert_eq!(body.view, ViewName::Dashboard);
    assert_eq!(body.theme, "light");
    assert_eq!(body.email, CITIZEN);
    let ids: Vec<_> = body.complaints.iter().map(|c| c.id.as_str()).collect();
    assert_eq!(ids, ["c-3", "c-1"]);
    assert_eq!(body.counts.total, 2);
    assert_eq!(body.counts.in_progress, 1);
    assert_eq!(body.counts.resolved, 1);
    assert_eq!(body.categories.len(), Category::ALL.len());
}

#[actix_web::test]
async fn dashboards_issue_a_fresh_form_id_per_render() {
    let mut ports = MockPorts::default();
    expect_owner_dashboard(&mut ports);
    let app = test::init_service(views_app(ports)).await;
    let cookie = sign_in_as(&app, CITIZEN).await;

    let mut form_ids = Vec::new();
    for _ in 0..2 {
        let res = test::call_service(
            &app,
            test::TestRequest::get()
                .uri("/dashboard")
                .cookie(cookie.clone())
                .to_request(),
        )
        .await;
        let body: DashboardView = test::read_body_json(res).await;
        form_ids.push(body.form_id);
    }
    assert_ne!(form_ids[0], form_ids[1]);
}

#[rstest]
#[case("c-1", StatusCode::OK)]
#[case("c-2", StatusCode::NOT_FOUND)]
#[case("missing", StatusCode::NOT_FOUND)]
#[actix_web::test]
async fn user_detail_hides_other_owners(#[case] id: &str, #[case] expected: StatusCode) {
    let mut ports = MockPorts::default();
    expect_owner_dashboard(&mut ports);
    let app = test::init_service(views_app(ports)).await;
    let cookie = sign_in_as(&app, CITIZEN).await;

    let res = test::call_service(
        &app,
        test::TestRequest::get()
            .uri(&format!("/dashboard/complaints/{id}"))
            .cookie(cookie)
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), expected);
    if expected == StatusCode::OK {
        let body: ComplaintDetailView = test::read_body_json(res).await;
        assert_eq!(body.complaint.status, "in progress");
        assert_eq!(body.complaint.badge, "info");
        assert_eq!(body.complaint.created_at, "2023-11-14");
    }
}

#[rstest]
#[case("", "all", "all", 3)]
#[case("?status=PENDING", "pending", "all", 1)]
#[case("?category=Infrastructure", "all", "infrastructure", 2)]
#[case("?status=in-progress&category=infrastructure", "in progress", "infrastructure", 1)]
#[case("?status=resolved&category=infrastructure", "resolved", "infrastructure", 0)]
#[actix_web::test]
async fn admin_filters_compose_and_counts_ignore_them(
    #[case] query: &str,
    #[case] status: &str,
    #[case] category: &str,
    #[case] visible: usize,
) {
    let mut ports = MockPorts::default();
    expect_admin_board(&mut ports);
    let app = test::init_service(views_app(ports)).await;
    let cookie = sign_in_as(&app, ADMIN).await;

    let res = test::call_service(
        &app,
        test::TestRequest::get()
            .uri(&format!("/admin{query}"))
            .cookie(cookie)
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::OK);
    let body: AdminView = test::read_body_json(res).await;
    assert_eq!(body.view, ViewName::Admin);
    assert_eq!(
        body.filter,
        FilterView {
            status: status.to_owned(),
            category: category.to_owned(),
        }
    );
    assert_eq!(body.complaints.len(), visible);
    assert_eq!(body.counts.total, 3);
    assert_eq!(body.status_options.first().map(String::as_str), Some("all"));
    assert_eq!(body.category_options.len(), Category::ALL.len() + 1);
}

#[rstest]
#[case("?status=escalated", "unknown_status")]
#[case("?category=parks", "unknown_category")]
#[actix_web::test]
async fn unknown_admin_filters_are_rejected(#[case] query: &str, #[case] code: &str) {
    let mut ports = MockPorts::default();
    ports.complaints_query.expect_admin_board().never();
    let app = test::init_service(views_app(ports)).await;
    let cookie = sign_in_as(&app, ADMIN).await;

    let res = test::call_service(
        &app,
        test::TestRequest::get()
            .uri(&format!("/admin{query}"))
            .cookie(cookie)
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: Error = test::read_body_json(res).await;
    assert_eq!(body.code(), ErrorCode::InvalidRequest);
    assert_eq!(
        body.details()
            .and_then(|details| details.get("code"))
            .and_then(|value| value.as_str()),
        Some(code)
    );
}

#[actix_web::test]
async fn admin_detail_marks_the_current_action() {
    let mut ports = MockPorts::default();
    expect_admin_board(&mut ports);
    let app = test::init_service(views_app(ports)).await;
    let cookie = sign_in_as(&app, ADMIN).await;

    let res = test::call_service(
        &app,
        test::TestRequest::get()
            .uri("/admin/complaints/c-3")
            .cookie(cookie)
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::OK);
    let body: AdminComplaintDetailView = test::read_body_json(res).await;
    assert_eq!(body.view, ViewName::AdminComplaintDetail);
    assert_eq!(body.complaint.id, "c-3");
    assert_eq!(
        body.actions,
        vec![
            StatusAction {
                status: "in progress".into(),
                current: false,
            },
            StatusAction {
                status: "resolved".into(),
                current: true,
            },
            StatusAction {
                status: "rejected".into(),
                current: false,
            },
        ]
    );
}

#[actix_web::test]
async fn admin_detail_of_unknown_id_is_not_found() {
    let mut ports = MockPorts::default();
    expect_admin_board(&mut ports);
    let app = test::init_service(views_app(ports)).await;
    let cookie = sign_in_as(&app, ADMIN).await;

    let res = test::call_service(
        &app,
        test::TestRequest::get()
            .uri("/admin/complaints/c-404")
            .cookie(cookie)
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    let body: Error = test::read_body_json(res).await;
    assert_eq!(body.message(), "complaint c-404 not found");
}

#[actix_web::test]
async fn store_failures_surface_on_the_dashboard() {
    let mut ports = MockPorts::default();
    ports
        .complaints_query
        .expect_user_dashboard()
        .return_once(|_| {
            Err(Error::service_unavailable(
                "Failed to fetch complaints: connection refused",
            ))
        });
    let app = test::init_service(views_app(ports)).await;
    let cookie = sign_in_as(&app, CITIZEN).await;

    let res = test::call_service(
        &app,
        test::TestRequest::get()
            .uri("/dashboard")
            .cookie(cookie)
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::SERVICE_UNAVAILABLE);
    let body: Error = test::read_body_json(res).await;
    assert_eq!(
        body.message(),
        "Failed to fetch complaints: connection refused"
    );
}

#[rstest]
#[case(Access::Allow, None)]
#[case(Access::Redirect(Route::Login), Some(StatusCode::SEE_OTHER))]
#[std::prelude::v1::test]
fn divert_follows_access(#[case] access: Access, #[case] expected: Option<StatusCode>) {
    let diverted = divert(access).expect("resolved access");
    assert_eq!(diverted.map(|res| res.status()), expected);
}

#[rstest]
#[std::prelude::v1::test]
fn pending_access_is_unavailable() {
    let error = divert(Access::Pending).expect_err("pending session");
    assert_eq!(error.code(), ErrorCode::ServiceUnavailable);
}

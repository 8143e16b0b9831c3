//! Complaint API handlers.
//!
//! ```text
//! POST /api/v1/complaints {"title":"Pothole","category":"infrastructure","description":"Main St"}
//! POST /api/v1/complaints/{id}/status {"status":"resolved"}
//! ```

use actix_web::{HttpResponse, post, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::ports::{SubmissionOutcome, TransitionOutcome};
use crate::domain::{ApiResult, ComplaintDraft, ComplaintId, Error, Role};
use crate::inbound::http::cache_control::private_no_cache_header;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::complaint_dto::{ComplaintView, CountsView, complaint_views};
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::parse_transition;

/// Complaint form fields. Missing fields are validated as empty.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SubmitComplaintRequest {
    /// Also accepted as `subject`.
    #[serde(default, alias = "subject")]
    #[schema(example = "Pothole on Main St")]
    pub title: String,
    /// Defaults to `general`.
    #[serde(default)]
    #[schema(example = "infrastructure")]
    pub category: Option<String>,
    #[serde(default)]
    #[schema(example = "Deep pothole outside number 12")]
    pub description: String,
    /// Identifies the rendered form instance; duplicate submits of the same
    /// instance are refused while the first is in flight.
    #[serde(default)]
    pub form_id: Option<Uuid>,
}

impl From<SubmitComplaintRequest> for ComplaintDraft {
    fn from(value: SubmitComplaintRequest) -> Self {
        Self {
            title: value.title,
            category: value.category,
            description: value.description,
            form_id: value.form_id,
        }
    }
}

/// Stored complaint plus the submitter's refreshed list.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionResponse {
    pub complaint: ComplaintView,
    pub complaints: Vec<ComplaintView>,
    pub counts: CountsView,
}

impl From<&SubmissionOutcome> for SubmissionResponse {
    fn from(outcome: &SubmissionOutcome) -> Self {
        Self {
            complaint: ComplaintView::from(&outcome.complaint),
            complaints: complaint_views(outcome.dashboard.complaints()),
            counts: outcome.dashboard.counts().into(),
        }
    }
}

/// Requested transition target.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct TransitionRequest {
    /// `in progress`, `resolved`, or `rejected`.
    #[schema(example = "resolved")]
    pub status: String,
}

/// Updated complaint and counts over every complaint.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TransitionResponse {
    pub complaint: ComplaintView,
    pub counts: CountsView,
}

impl From<&TransitionOutcome> for TransitionResponse {
    fn from(outcome: &TransitionOutcome) -> Self {
        Self {
            complaint: ComplaintView::from(&outcome.complaint),
            counts: outcome.counts.into(),
        }
    }
}

/// File a complaint as the signed-in user.
#[utoipa::path(
    post,
    path = "/api/v1/complaints",
    request_body = SubmitComplaintRequest,
    responses(
        (status = 201, description = "Complaint stored", body = SubmissionResponse),
        (status = 400, description = "Invalid form; details echo the draft", body = ErrorSchema),
        (status = 401, description = "Login required", body = ErrorSchema),
        (status = 403, description = "Only users may file complaints", body = ErrorSchema),
        (status = 409, description = "Same form already being submitted", body = ErrorSchema),
        (status = 503, description = "Store unavailable; details echo the draft", body = ErrorSchema)
    ),
    tags = ["complaints"],
    operation_id = "submitComplaint"
)]
#[post("/complaints")]
pub async fn submit_complaint(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<SubmitComplaintRequest>,
) -> ApiResult<HttpResponse> {
    let controller = session.controller(&state.roster);
    let owner = controller.require(Role::User)?;
    let outcome = state
        .complaints
        .submit(owner, payload.into_inner().into())
        .await?;
    Ok(HttpResponse::Created()
        .insert_header(private_no_cache_header())
        .json(SubmissionResponse::from(&outcome)))
}

/// Move a complaint to a new status.
#[utoipa::path(
    post,
    path = "/api/v1/complaints/{id}/status",
    params(("id" = String, Path, description = "Complaint identifier")),
    request_body = TransitionRequest,
    responses(
        (status = 200, description = "Status changed", body = TransitionResponse),
        (status = 400, description = "Unknown status or pending target", body = ErrorSchema),
        (status = 401, description = "Login required", body = ErrorSchema),
        (status = 403, description = "Administrator role required", body = ErrorSchema),
        (status = 404, description = "No such complaint", body = ErrorSchema),
        (status = 503, description = "Store unavailable", body = ErrorSchema)
    ),
    tags = ["complaints"],
    operation_id = "transitionComplaint"
)]
#[post("/complaints/{id}/status")]
pub async fn transition_complaint(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
    payload: web::Json<TransitionRequest>,
) -> ApiResult<HttpResponse> {
    let controller = session.controller(&state.roster);
    controller.require(Role::Administrator)?;
    let transition = parse_transition(&payload.status)?;
    let raw_id = path.into_inner();
    let id = ComplaintId::new(raw_id.as_str())
        .map_err(|_| Error::not_found(format!("complaint {raw_id} not found")))?;
    let outcome = state.complaints.transition(&id, transition).await?;
    Ok(HttpResponse::Ok()
        .insert_header(private_no_cache_header())
        .json(TransitionResponse::from(&outcome)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{
        Category, ComplaintCounts, ComplaintRecord, Email, ErrorCode, RecordedStatus,
        SessionIdentity, StatusTransition, UserDashboard,
    };
    use crate::inbound::http::test_utils::{
        MockPorts, SIGN_IN_FIXTURE_PATH, sign_in_as, sign_in_fixture, test_session_middleware,
    };
    use actix_web::http::StatusCode;
    use actix_web::{App, test};
    use rstest::rstest;
    use serde_json::json;

    const CITIZEN: &str = "citizen@example.com";
    const ADMIN: &str = "admin@example.com";

    fn email(raw: &str) -> Email {
        Email::new(raw).expect("valid email")
    }

    fn record(id: &str, status: &str) -> ComplaintRecord {
        ComplaintRecord {
            id: ComplaintId::new(id).expect("valid id"),
            title: "Pothole".into(),
            description: "Main St".into(),
            category: Category::Infrastructure,
            owner: email(CITIZEN),
            status: RecordedStatus::from_raw(status),
            created_at: None,
        }
    }

    fn complaints_app(
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
            .service(
                web::scope("/api/v1")
                    .service(submit_complaint)
                    .service(transition_complaint),
            )
    }

    #[actix_web::test]
    async fn user_submission_returns_created_complaint_and_list() {
        let mut ports = MockPorts::default();
        ports
            .complaints
            .expect_submit()
            .withf(|owner: &SessionIdentity, draft: &ComplaintDraft| {
                owner.email().as_ref() == CITIZEN && draft.title == "Pothole"
            })
            .times(1)
            .return_once(|_, _| {
                let stored = record("c-1", "pending");
                Ok(SubmissionOutcome {
                    complaint: stored.clone(),
                    dashboard: UserDashboard::from_owner_records(&email(CITIZEN), vec![stored]),
                })
            });
        let app = test::init_service(complaints_app(ports)).await;
        let cookie = sign_in_as(&app, CITIZEN).await;

        let res = test::call_service(
            &app,
            test::TestRequest::post()
                .uri("/api/v1/complaints")
                .cookie(cookie)
                .set_json(json!({ "subject": "Pothole", "description": "Main St" }))
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::CREATED);
        let body: SubmissionResponse = test::read_body_json(res).await;
        assert_eq!(body.complaint.status, "pending");
        assert_eq!(body.complaint.badge, "warning");
        assert_eq!(body.complaints.len(), 1);
        assert_eq!(body.counts.pending, 1);
    }

    #[rstest]
    #[case(None, StatusCode::UNAUTHORIZED)]
    #[case(Some(ADMIN), StatusCode::FORBIDDEN)]
    #[actix_web::test]
    async fn only_users_may_submit(#[case] who: Option<&str>, #[case] expected: StatusCode) {
        let mut ports = MockPorts::default();
        ports.complaints.expect_submit().never();
        let app = test::init_service(complaints_app(ports)).await;
        let mut request = test::TestRequest::post()
            .uri("/api/v1/complaints")
            .set_json(json!({ "title": "Pothole", "description": "Main St" }));
        if let Some(who) = who {
            request = request.cookie(sign_in_as(&app, who).await);
        }

        let res = test::call_service(&app, request.to_request()).await;
        assert_eq!(res.status(), expected);
    }

    #[actix_web::test]
    async fn in_flight_conflict_is_reported_as_409() {
        let mut ports = MockPorts::default();
        ports.complaints.expect_submit().return_once(|_, _| {
            Err(Error::conflict("complaint submission already in progress")
                .with_details(json!({ "code": "submission_in_flight" })))
        });
        let app = test::init_service(complaints_app(ports)).await;
        let cookie = sign_in_as(&app, CITIZEN).await;

        let res = test::call_service(
            &app,
            test::TestRequest::post()
                .uri("/api/v1/complaints")
                .cookie(cookie)
                .set_json(json!({
                    "title": "Pothole",
                    "description": "Main St",
                    "formId": "9b2d3c8e-6f0a-4a57-9a43-1c5f2f0e7d11",
                }))
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::CONFLICT);
    }

    #[actix_web::test]
    async fn administrator_transition_returns_counts() {
        let mut ports = MockPorts::default();
        ports
            .complaints
            .expect_transition()
            .withf(|id: &ComplaintId, transition: &StatusTransition| {
                id.as_ref() == "c-1" && *transition == StatusTransition::Resolved
            })
            .times(1)
            .return_once(|_, _| {
                Ok(TransitionOutcome {
                    complaint: record("c-1", "resolved"),
                    counts: ComplaintCounts {
                        total: 1,
                        resolved: 1,
                        ..ComplaintCounts::default()
                    },
                })
            });
        let app = test::init_service(complaints_app(ports)).await;
        let cookie = sign_in_as(&app, ADMIN).await;

        let res = test::call_service(
            &app,
            test::TestRequest::post()
                .uri("/api/v1/complaints/c-1/status")
                .cookie(cookie)
                .set_json(json!({ "status": "Resolved" }))
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::OK);
        let body: TransitionResponse = test::read_body_json(res).await;
        assert_eq!(body.complaint.status, "resolved");
        assert_eq!(body.complaint.badge, "success");
        assert_eq!(body.counts.resolved, 1);
        assert_eq!(body.counts.pending, 0);
    }

    #[rstest]
    #[case("pending", "invalid_transition")]
    #[case("escalated", "unknown_status")]
    #[actix_web::test]
    async fn bad_transition_targets_are_400(#[case] status: &str, #[case] code: &str) {
        let mut ports = MockPorts::default();
        ports.complaints.expect_transition().never();
        let app = test::init_service(complaints_app(ports)).await;
        let cookie = sign_in_as(&app, ADMIN).await;

        let res = test::call_service(
            &app,
            test::TestRequest::post()
                .uri("/api/v1/complaints/c-1/status")
                .cookie(cookie)
                .set_json(json!({ "status": status }))
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
    async fn users_cannot_change_status() {
        let mut ports = MockPorts::default();
        ports.complaints.expect_transition().never();
        let app = test::init_service(complaints_app(ports)).await;
        let cookie = sign_in_as(&app, CITIZEN).await;

        let res = test::call_service(
            &app,
            test::TestRequest::post()
                .uri("/api/v1/complaints/c-1/status")
                .cookie(cookie)
                .set_json(json!({ "status": "resolved" }))
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::FORBIDDEN);
    }
}

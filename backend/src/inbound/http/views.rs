//! Role-gated view endpoints.
//!
//! Each view answers with a JSON payload naming the view, the resolved theme,
//! and the data the page shows. Requests the routing guard refuses are sent
//! to the caller's landing view with `303 See Other`; while the session is
//! unresolved the view answers `503`.
//!
//! ```text
//! GET /                      -> 303 to the caller's home
//! GET /login, /register      -> visitors only
//! GET /dashboard             -> signed-in users
//! GET /admin?status=&category=
//! ```

use actix_web::http::header;
use actix_web::{HttpResponse, get, web};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

use crate::domain::{
    Access, ApiResult, Category, CategoryFilter, ComplaintFilter, ComplaintId, ComplaintStatus,
    Error, Role, Route, SessionController, StatusFilter, StatusTransition,
};
use crate::inbound::http::cache_control::private_no_cache_header;
use crate::inbound::http::complaint_dto::{ComplaintView, CountsView, complaint_views};
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::theme::ActiveTheme;
use crate::inbound::http::validation::{parse_category_filter, parse_status_filter};

/// Which page a payload describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum ViewName {
    Login,
    Register,
    Dashboard,
    ComplaintDetail,
    Admin,
    AdminComplaintDetail,
}

/// Login and registration pages.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct AuthFormView {
    pub view: ViewName,
    #[schema(example = "light")]
    pub theme: String,
}

/// The signed-in user's complaints and an empty complaint form.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DashboardView {
    pub view: ViewName,
    pub theme: String,
    pub email: String,
    pub complaints: Vec<ComplaintView>,
    pub counts: CountsView,
    /// Category choices for the form.
    pub categories: Vec<String>,
    /// Fresh form instance id; send it back with the submission.
    pub form_id: Uuid,
}

/// One complaint owned by the signed-in user.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ComplaintDetailView {
    pub view: ViewName,
    pub theme: String,
    pub complaint: ComplaintView,
}

/// Active administrator filters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct FilterView {
    #[schema(example = "all")]
    pub status: String,
    #[schema(example = "all")]
    pub category: String,
}

impl From<ComplaintFilter> for FilterView {
    fn from(filter: ComplaintFilter) -> Self {
        Self {
            status: filter.status.to_string(),
            category: filter.category.to_string(),
        }
    }
}

/// Every complaint passing the filters, with counts over all of them.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AdminView {
    pub view: ViewName,
    pub theme: String,
    pub email: String,
    pub filter: FilterView,
    pub status_options: Vec<String>,
    pub category_options: Vec<String>,
    pub complaints: Vec<ComplaintView>,
    pub counts: CountsView,
}

/// A status change the administrator can apply.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct StatusAction {
    #[schema(example = "resolved")]
    pub status: String,
    /// Whether the complaint already holds this status.
    pub current: bool,
}

/// One complaint with the administrator's actions.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct AdminComplaintDetailView {
    pub view: ViewName,
    pub theme: String,
    pub complaint: ComplaintView,
    pub actions: Vec<StatusAction>,
}

/// Administrator list filters; blank or missing means `all`.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct AdminQuery {
    /// `all` or a status, case-insensitive.
    pub status: Option<String>,
    /// `all` or a category, case-insensitive.
    pub category: Option<String>,
}

fn see_other(route: Route) -> HttpResponse {
    HttpResponse::SeeOther()
        .insert_header((header::LOCATION, route.path()))
        .insert_header(private_no_cache_header())
        .finish()
}

/// Response for a request the guard refused, or `None` to render the view.
fn divert(access: Access) -> ApiResult<Option<HttpResponse>> {
    match access {
        Access::Allow => Ok(None),
        Access::Redirect(route) => Ok(Some(see_other(route))),
        Access::Pending => Err(Error::service_unavailable("session is still loading")),
    }
}

fn render<T: Serialize>(payload: &T) -> HttpResponse {
    HttpResponse::Ok()
        .insert_header(private_no_cache_header())
        .json(payload)
}

fn category_names() -> Vec<String> {
    Category::ALL
        .iter()
        .map(|category| category.as_str().to_owned())
        .collect()
}

fn status_options() -> Vec<String> {
    std::iter::once(StatusFilter::All.to_string())
        .chain(
            ComplaintStatus::ALL
                .iter()
                .map(|status| status.as_str().to_owned()),
        )
        .collect()
}

fn category_options() -> Vec<String> {
    std::iter::once(CategoryFilter::All.to_string())
        .chain(category_names())
        .collect()
}

fn parse_complaint_id(raw: String) -> ApiResult<ComplaintId> {
    ComplaintId::new(raw.as_str())
        .map_err(|_| Error::not_found(format!("complaint {raw} not found")))
}

fn auth_form(
    controller: &SessionController,
    route: Route,
    view: ViewName,
    theme: ActiveTheme,
) -> ApiResult<HttpResponse> {
    if let Some(diverted) = divert(controller.authorize(route))? {
        return Ok(diverted);
    }
    Ok(render(&AuthFormView {
        view,
        theme: theme.0.as_str().to_owned(),
    }))
}

/// Send the caller to their landing view.
#[utoipa::path(
    get,
    path = "/",
    responses(
        (status = 303, description = "Redirect to the caller's home view",
            headers(("Location" = String, description = "Landing view"))),
        (status = 503, description = "Session still loading", body = ErrorSchema)
    ),
    tags = ["views"],
    operation_id = "rootView",
    security([])
)]
#[get("/")]
pub async fn root(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<HttpResponse> {
    let controller = session.controller(&state.roster);
    let home = see_other(Route::home_of(controller.role()));
    Ok(divert(controller.authorize(Route::Root))?.unwrap_or(home))
}

#[utoipa::path(
    get,
    path = "/login",
    responses(
        (status = 200, description = "Login page", body = AuthFormView),
        (status = 303, description = "Already signed in"),
        (status = 503, description = "Session still loading", body = ErrorSchema)
    ),
    tags = ["views"],
    operation_id = "loginView",
    security([])
)]
#[get("/login")]
pub async fn login_view(
    state: web::Data<HttpState>,
    session: SessionContext,
    theme: ActiveTheme,
) -> ApiResult<HttpResponse> {
    let controller = session.controller(&state.roster);
    auth_form(&controller, Route::Login, ViewName::Login, theme)
}

#[utoipa::path(
    get,
    path = "/register",
    responses(
        (status = 200, description = "Registration page", body = AuthFormView),
        (status = 303, description = "Already signed in"),
        (status = 503, description = "Session still loading", body = ErrorSchema)
    ),
    tags = ["views"],
    operation_id = "registerView",
    security([])
)]
#[get("/register")]
pub async fn register_view(
    state: web::Data<HttpState>,
    session: SessionContext,
    theme: ActiveTheme,
) -> ApiResult<HttpResponse> {
    let controller = session.controller(&state.roster);
    auth_form(&controller, Route::Register, ViewName::Register, theme)
}

/// The signed-in user's complaints, newest first.
#[utoipa::path(
    get,
    path = "/dashboard",
    responses(
        (status = 200, description = "User dashboard", body = DashboardView),
        (status = 303, description = "Not a user session"),
        (status = 503, description = "Session loading or store unavailable", body = ErrorSchema)
    ),
    tags = ["views"],
    operation_id = "dashboardView"
)]
#[get("/dashboard")]
pub async fn dashboard_view(
    state: web::Data<HttpState>,
    session: SessionContext,
    theme: ActiveTheme,
) -> ApiResult<HttpResponse> {
    let controller = session.controller(&state.roster);
    if let Some(diverted) = divert(controller.authorize(Route::Dashboard))? {
        return Ok(diverted);
    }
    let owner = controller.require(Role::User)?;
    let dashboard = state.complaints_query.user_dashboard(owner.email()).await?;
    Ok(render(&DashboardView {
        view: ViewName::Dashboard,
        theme: theme.0.as_str().to_owned(),
        email: owner.email().to_string(),
        complaints: complaint_views(dashboard.complaints()),
        counts: dashboard.counts().into(),
        categories: category_names(),
        form_id: Uuid::new_v4(),
    }))
}

/// One of the signed-in user's complaints.
#[utoipa::path(
    get,
    path = "/dashboard/complaints/{id}",
    params(("id" = String, Path, description = "Complaint identifier")),
    responses(
        (status = 200, description = "Complaint detail", body = ComplaintDetailView),
        (status = 303, description = "Not a user session"),
        (status = 404, description = "No such complaint owned by the caller", body = ErrorSchema),
        (status = 503, description = "Session loading or store unavailable", body = ErrorSchema)
    ),
    tags = ["views"],
    operation_id = "complaintDetailView"
)]
#[get("/dashboard/complaints/{id}")]
pub async fn complaint_detail_view(
    state: web::Data<HttpState>,
    session: SessionContext,
    theme: ActiveTheme,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let controller = session.controller(&state.roster);
    if let Some(diverted) = divert(controller.authorize(Route::Dashboard))? {
        return Ok(diverted);
    }
    let owner = controller.require(Role::User)?;
    let id = parse_complaint_id(path.into_inner())?;
    let dashboard = state.complaints_query.user_dashboard(owner.email()).await?;
    let record = dashboard
        .find(&id)
        .ok_or_else(|| Error::not_found(format!("complaint {id} not found")))?;
    Ok(render(&ComplaintDetailView {
        view: ViewName::ComplaintDetail,
        theme: theme.0.as_str().to_owned(),
        complaint: ComplaintView::from(record),
    }))
}

/// Every complaint, filtered, with counts over the unfiltered set.
#[utoipa::path(
    get,
    path = "/admin",
    params(AdminQuery),
    responses(
        (status = 200, description = "Administrator dashboard", body = AdminView),
        (status = 303, description = "Not an administrator session"),
        (status = 400, description = "Unknown filter value", body = ErrorSchema),
        (status = 503, description = "Session loading or store unavailable", body = ErrorSchema)
    ),
    tags = ["views"],
    operation_id = "adminView"
)]
#[get("/admin")]
pub async fn admin_view(
    state: web::Data<HttpState>,
    session: SessionContext,
    theme: ActiveTheme,
    query: web::Query<AdminQuery>,
) -> ApiResult<HttpResponse> {
    let controller = session.controller(&state.roster);
    if let Some(diverted) = divert(controller.authorize(Route::Admin))? {
        return Ok(diverted);
    }
    let admin = controller.require(Role::Administrator)?;
    let filter = ComplaintFilter {
        status: parse_status_filter(query.status.as_deref())?,
        category: parse_category_filter(query.category.as_deref())?,
    };
    let board = state.complaints_query.admin_board(filter).await?;
    Ok(render(&AdminView {
        view: ViewName::Admin,
        theme: theme.0.as_str().to_owned(),
        email: admin.email().to_string(),
        filter: board.filter().into(),
        status_options: status_options(),
        category_options: category_options(),
        complaints: complaint_views(board.visible()),
        counts: board.counts().into(),
    }))
}

/// One complaint with the three status actions.
#[utoipa::path(
    get,
    path = "/admin/complaints/{id}",
    params(("id" = String, Path, description = "Complaint identifier")),
    responses(
        (status = 200, description = "Complaint detail with actions", body = AdminComplaintDetailView),
        (status = 303, description = "Not an administrator session"),
        (status = 404, description = "No such complaint", body = ErrorSchema),
        (status = 503, description = "Session loading or store unavailable", body = ErrorSchema)
    ),
    tags = ["views"],
    operation_id = "adminComplaintDetailView"
)]
#[get("/admin/complaints/{id}")]
pub async fn admin_complaint_detail_view(
    state: web::Data<HttpState>,
    session: SessionContext,
    theme: ActiveTheme,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let controller = session.controller(&state.roster);
    if let Some(diverted) = divert(controller.authorize(Route::Admin))? {
        return Ok(diverted);
    }
    controller.require(Role::Administrator)?;
    let id = parse_complaint_id(path.into_inner())?;
    let board = state
        .complaints_query
        .admin_board(ComplaintFilter::default())
        .await?;
    let record = board
        .find(&id)
        .ok_or_else(|| Error::not_found(format!("complaint {id} not found")))?;
    let held = record.status.known();
    let actions = StatusTransition::ALL
        .iter()
        .map(|transition| StatusAction {
            status: transition.to_string(),
            current: held == Some(transition.target()),
        })
        .collect();
    Ok(render(&AdminComplaintDetailView {
        view: ViewName::AdminComplaintDetail,
        theme: theme.0.as_str().to_owned(),
        complaint: ComplaintView::from(record),
        actions,
    }))
}

#[cfg(test)]
#[path = "views_tests.rs"]
mod tests;

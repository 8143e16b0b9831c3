//! Domain primitives, view models, and services.
//!
//! Purpose: model complaints, their status lifecycle, and the routing rules of
//! the portal without depending on any transport or storage technology.
//!
//! Public surface:
//! - `Error`/`ErrorCode`: transport-agnostic failure payload.
//! - `SessionController`/`authorize`: role derivation and routing guard.
//! - `ComplaintRecord` and its value types: the complaint data model.
//! - `UserDashboard`/`AdminBoard`: the two complaint list views.
//! - `ComplaintService`/`AccountsService`: implementations of the driving
//!   ports in [`ports`].

pub mod account_service;
pub mod admin_board;
pub mod auth;
pub mod complaint;
pub mod complaint_form;
pub mod complaint_service;
pub mod error;
pub mod identity;
pub mod ports;
pub mod session;
pub mod theme;
pub mod trace_id;
pub mod user_dashboard;

pub use self::account_service::AccountsService;
pub use self::admin_board::{AdminBoard, AdminBoardSnapshot};
pub use self::auth::{Credentials, CredentialsValidationError, PASSWORD_MIN_LENGTH};
pub use self::complaint::{
    Badge, Category, CategoryFilter, ComplaintCounts, ComplaintDescription, ComplaintFilter,
    ComplaintId, ComplaintRecord, ComplaintStatus, ComplaintTitle, ComplaintValidationError,
    DESCRIPTION_MAX, INVALID_DATE, MISSING_DATE, NewComplaint, ParseCategoryError,
    ParseStatusError, RecordTimestamp, RecordedStatus, StatusFilter, StatusTransition, TITLE_MAX,
    TransitionError, format_date, newest_first, oldest_first, sort_newest_first,
};
pub use self::complaint_form::{ComplaintDraft, SubmissionGuard, SubmissionPermit};
pub use self::complaint_service::ComplaintService;
pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::identity::{
    AdminRoster, DEFAULT_ADMIN_EMAIL, Email, EmailValidationError, Role, SessionIdentity,
};
pub use self::session::{Access, Route, SessionController, authorize};
pub use self::theme::{ParseThemeError, Theme};
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};
pub use self::user_dashboard::UserDashboard;

/// Convenient API result alias.
///
/// # Examples
/// ```
/// use grievance_backend::domain::{ApiResult, Error};
///
/// fn guarded() -> ApiResult<()> {
///     Err(Error::forbidden("administrator role required"))
/// }
/// assert!(guarded().is_err());
/// ```
pub type ApiResult<T> = Result<T, Error>;

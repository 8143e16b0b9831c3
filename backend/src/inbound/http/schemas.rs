//! OpenAPI schema definitions for domain types.
//!
//! Domain types stay free of utoipa derives. The wrappers here mirror their
//! serialised shape and register under the domain type's name.

use utoipa::ToSchema;

/// OpenAPI schema for [`crate::domain::ErrorCode`].
#[derive(ToSchema)]
#[schema(as = crate::domain::ErrorCode)]
pub enum ErrorCodeSchema {
    /// The request is malformed or fails validation.
    #[schema(rename = "invalid_request")]
    InvalidRequest,
    /// Authentication failed or is missing.
    #[schema(rename = "unauthorized")]
    Unauthorized,
    /// Signed in with the wrong role.
    #[schema(rename = "forbidden")]
    Forbidden,
    #[schema(rename = "not_found")]
    NotFound,
    /// The same complaint form is already being submitted.
    #[schema(rename = "conflict")]
    Conflict,
    /// The session is still loading or a backing store failed.
    #[schema(rename = "service_unavailable")]
    ServiceUnavailable,
    /// Redacted unexpected failure.
    #[schema(rename = "internal_error")]
    InternalError,
}

/// OpenAPI schema for [`crate::domain::Error`].
#[derive(ToSchema)]
#[schema(as = crate::domain::Error, rename_all = "camelCase")]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct ErrorSchema {
    #[schema(example = "invalid_request")]
    code: ErrorCodeSchema,
    #[schema(example = "title must not be empty")]
    message: String,
    /// Correlates the error with server logs; matches the `trace-id` header.
    #[schema(example = "6f1c2f0e-7d11-4a57-9a43-9b2d3c8e1c5f")]
    trace_id: Option<String>,
    /// Validation context such as `{ "field": "title", "code": "empty_title" }`,
    /// or the echoed `draft` after a failed submission.
    details: Option<serde_json::Value>,
}

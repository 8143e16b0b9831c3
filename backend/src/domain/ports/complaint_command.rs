//! Driving port for complaint mutations.
//!
//! Inbound adapters call [`ComplaintCommand`] to file a complaint for the
//! signed-in user or to move an existing complaint through its lifecycle.

use async_trait::async_trait;
use serde::Serialize;

use crate::domain::{
    ComplaintCounts, ComplaintDraft, ComplaintId, ComplaintRecord, Error, SessionIdentity,
    StatusTransition, UserDashboard,
};

/// Result of a successful submission.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionOutcome {
    /// The stored complaint.
    pub complaint: ComplaintRecord,
    /// The owner's list, refetched after the insert.
    pub dashboard: UserDashboard,
}

/// Result of a successful status transition.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TransitionOutcome {
    pub complaint: ComplaintRecord,
    /// Counts over every complaint after the change.
    pub counts: ComplaintCounts,
}

/// Use-case port for complaint writes.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ComplaintCommand: Send + Sync {
    /// File `draft` on behalf of `owner`.
    ///
    /// # Errors
    ///
    /// - `invalid_request` when the draft fails validation.
    /// - `conflict` while the same form instance is already being submitted.
    /// - `service_unavailable`/`internal_error` when the store fails; the
    ///   error details echo the draft.
    async fn submit(
        &self,
        owner: &SessionIdentity,
        draft: ComplaintDraft,
    ) -> Result<SubmissionOutcome, Error>;

    /// Apply an administrator transition.
    async fn transition(
        &self,
        id: &ComplaintId,
        transition: StatusTransition,
    ) -> Result<TransitionOutcome, Error>;
}

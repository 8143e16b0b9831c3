//! Complaint domain service.
//!
//! Implements the complaint driving ports on top of a [`ComplaintStore`]:
//! submission with the single-flight form guard, the two list views, and
//! administrator transitions.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use serde_json::json;
use tracing::{debug, info};

use crate::domain::ports::{
    ComplaintCommand, ComplaintQuery, ComplaintStore, SortDirection, StoreError,
    SubmissionOutcome, TransitionOutcome,
};
use crate::domain::{
    AdminBoard, ComplaintDraft, ComplaintFilter, ComplaintId, ComplaintRecord,
    ComplaintValidationError, Email, Error, SessionIdentity, StatusTransition, SubmissionGuard,
    UserDashboard,
};

const SUBMIT_FAILED: &str = "Failed to submit complaint";
const FETCH_FAILED: &str = "Failed to fetch complaints";
const UPDATE_FAILED: &str = "Failed to update status";

/// Complaint service implementing [`ComplaintCommand`] and [`ComplaintQuery`].
#[derive(Clone)]
pub struct ComplaintService<S> {
    store: Arc<S>,
    clock: Arc<dyn Clock>,
    guard: SubmissionGuard,
}

impl<S> ComplaintService<S> {
    pub fn new(store: Arc<S>, clock: Arc<dyn Clock>) -> Self {
        Self {
            store,
            clock,
            guard: SubmissionGuard::new(),
        }
    }
}

/// Map a store failure raised while performing `context`.
pub(crate) fn map_store_error(context: &str, error: StoreError) -> Error {
    debug!(%error, context, "complaint store call failed");
    let message = format!("{context}: {error}");
    match error {
        StoreError::Connection { .. } => Error::service_unavailable(message),
        StoreError::Query { .. } => Error::internal(message),
        StoreError::NotFound { .. } => Error::not_found(message),
        StoreError::Rejected { .. } => Error::forbidden(message),
    }
}

fn validation_error(error: &ComplaintValidationError, draft: &ComplaintDraft) -> Error {
    Error::invalid_request(error.to_string()).with_details(json!({
        "field": error.field(),
        "code": error.code(),
        "draft": draft,
    }))
}

/// Submission failures keep the draft so the form can be refilled.
///
/// Query failures are reported as unavailable rather than internal so the
/// message and draft survive response redaction.
fn submission_error(error: StoreError, draft: &ComplaintDraft) -> Error {
    let mapped = match error {
        StoreError::Query { .. } => {
            debug!(%error, "complaint insert failed");
            Error::service_unavailable(format!("{SUBMIT_FAILED}: {error}"))
        }
        other => map_store_error(SUBMIT_FAILED, other),
    };
    mapped.with_details(json!({ "code": "submission_failed", "draft": draft }))
}

impl<S> ComplaintService<S>
where
    S: ComplaintStore,
{
    async fn owner_dashboard(&self, owner: &Email) -> Result<UserDashboard, Error> {
        let records = self
            .store
            .query_by_owner(owner)
            .await
            .map_err(|err| map_store_error(FETCH_FAILED, err))?;
        Ok(UserDashboard::from_owner_records(owner, records))
    }
}

#[async_trait]
impl<S> ComplaintCommand for ComplaintService<S>
where
    S: ComplaintStore,
{
    async fn submit(
        &self,
        owner: &SessionIdentity,
        draft: ComplaintDraft,
    ) -> Result<SubmissionOutcome, Error> {
        let _permit = match draft.form_id {
            Some(form_id) => Some(self.guard.try_acquire(form_id).ok_or_else(|| {
                Error::conflict("complaint submission already in progress").with_details(json!({
                    "code": "submission_in_flight",
                    "formId": form_id,
                }))
            })?),
            None => None,
        };

        let new = draft
            .into_new_complaint(owner.email().clone(), self.clock.utc())
            .map_err(|err| validation_error(&err, &draft))?;
        let id = self
            .store
            .insert(new.clone())
            .await
            .map_err(|err| submission_error(err, &draft))?;
        info!(complaint_id = %id, owner = %owner.email(), "complaint submitted");

        let dashboard = self.owner_dashboard(owner.email()).await?;
        let complaint = dashboard
            .find(&id)
            .cloned()
            .unwrap_or_else(|| ComplaintRecord::from_new(id, new));
        Ok(SubmissionOutcome {
            complaint,
            dashboard,
        })
    }

    /// Loads the full board first so the response carries fresh admin counts.
    async fn transition(
        &self,
        id: &ComplaintId,
        transition: StatusTransition,
    ) -> Result<TransitionOutcome, Error> {
        let mut board = AdminBoard::load(&*self.store)
            .await
            .map_err(|err| map_store_error(FETCH_FAILED, err))?;
        if board.find(id).is_none() {
            return Err(Error::not_found(format!("complaint {id} not found")));
        }
        let complaint = board
            .transition(&*self.store, id, transition)
            .await
            .map_err(|err| map_store_error(UPDATE_FAILED, err))?
            .clone();
        info!(complaint_id = %id, status = %transition, "complaint status changed");
        Ok(TransitionOutcome {
            complaint,
            counts: board.counts(),
        })
    }
}

#[async_trait]
impl<S> ComplaintQuery for ComplaintService<S>
where
    S: ComplaintStore,
{
    async fn user_dashboard(&self, owner: &Email) -> Result<UserDashboard, Error> {
        self.owner_dashboard(owner).await
    }

    async fn admin_board(&self, filter: ComplaintFilter) -> Result<AdminBoard, Error> {
        let records = self
            .store
            .query_all(SortDirection::Descending)
            .await
            .map_err(|err| map_store_error(FETCH_FAILED, err))?;
        let mut board = AdminBoard::new(records);
        board.set_filter(filter);
        Ok(board)
    }
}

#[cfg(test)]
#[path = "complaint_service_tests.rs"]
mod tests;

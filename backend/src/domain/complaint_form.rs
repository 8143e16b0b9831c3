//! Complaint submission form.
//!
//! A [`ComplaintDraft`] holds exactly what the user typed so it can be echoed
//! back after a failure. [`SubmissionGuard`] refuses a second submit of the
//! same form instance while the first is still being stored.

use std::collections::HashSet;
use std::sync::{Arc, Mutex, PoisonError};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::complaint::{
    Category, ComplaintDescription, ComplaintStatus, ComplaintTitle, ComplaintValidationError,
    NewComplaint,
};
use super::Email;

/// Raw form fields as submitted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComplaintDraft {
    #[serde(alias = "subject")]
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    pub description: String,
    /// Identifies one rendered instance of the form.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub form_id: Option<Uuid>,
}

impl ComplaintDraft {
    /// Validate the draft and stamp it with its owner and creation time.
    ///
    /// The status always starts as `pending` and an omitted or blank
    /// category falls back to `general`.
    pub fn into_new_complaint(
        &self,
        owner: Email,
        created_at: DateTime<Utc>,
    ) -> Result<NewComplaint, ComplaintValidationError> {
        let title = ComplaintTitle::new(&self.title)?;
        let description = ComplaintDescription::new(&self.description)?;
        let category = match self.category.as_deref().map(str::trim) {
            None | Some("") => Category::default(),
            Some(raw) => raw
                .parse()
                .map_err(ComplaintValidationError::UnknownCategory)?,
        };
        Ok(NewComplaint {
            title,
            description,
            category,
            owner,
            status: ComplaintStatus::Pending,
            created_at,
        })
    }
}

/// Tracks form instances whose submission is in flight.
#[derive(Debug, Clone, Default)]
pub struct SubmissionGuard {
    in_flight: Arc<Mutex<HashSet<Uuid>>>,
}

impl SubmissionGuard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Claim `form_id`; `None` while another submit holds it.
    ///
    /// The claim is released when the returned permit is dropped.
    ///
    /// # Examples
    /// ```
    /// use grievance_backend::domain::SubmissionGuard;
    /// use uuid::Uuid;
    ///
    /// let guard = SubmissionGuard::new();
    /// let form = Uuid::new_v4();
    /// let permit = guard.try_acquire(form).expect("first claim");
    /// assert!(guard.try_acquire(form).is_none());
    /// drop(permit);
    /// assert!(guard.try_acquire(form).is_some());
    /// ```
    pub fn try_acquire(&self, form_id: Uuid) -> Option<SubmissionPermit> {
        let mut in_flight = self.in_flight.lock().unwrap_or_else(PoisonError::into_inner);
        if !in_flight.insert(form_id) {
            return None;
        }
        Some(SubmissionPermit {
            in_flight: Arc::clone(&self.in_flight),
            form_id,
        })
    }

    pub fn is_in_flight(&self, form_id: Uuid) -> bool {
        self.in_flight
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .contains(&form_id)
    }
}

/// Exclusive claim on one form instance.
#[derive(Debug)]
pub struct SubmissionPermit {
    in_flight: Arc<Mutex<HashSet<Uuid>>>,
    form_id: Uuid,
}

impl Drop for SubmissionPermit {
    fn drop(&mut self) {
        self.in_flight
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(&self.form_id);
    }
}

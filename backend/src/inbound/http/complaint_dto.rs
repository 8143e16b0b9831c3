//! JSON shapes for complaints as rendered to clients.
//!
//! Stored records keep their raw status and timestamp; these DTOs carry the
//! display forms (badge, `YYYY-MM-DD` date) next to the raw status text.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{ComplaintCounts, ComplaintRecord, format_date};

/// A complaint as shown in lists and detail views.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ComplaintView {
    #[schema(example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    pub id: String,
    #[schema(example = "Pothole on Main St")]
    pub title: String,
    pub description: String,
    #[schema(example = "infrastructure")]
    pub category: String,
    /// Status text exactly as stored.
    #[schema(example = "in progress")]
    pub status: String,
    /// One of `warning`, `info`, `success`, `error`, `neutral`.
    #[schema(example = "info")]
    pub badge: String,
    /// `YYYY-MM-DD`, `N/A`, or `Invalid Date`.
    #[schema(example = "2024-06-01")]
    pub created_at: String,
    #[schema(example = "citizen@example.com")]
    pub owner_email: String,
}

impl From<&ComplaintRecord> for ComplaintView {
    fn from(record: &ComplaintRecord) -> Self {
        Self {
            id: record.id.to_string(),
            title: record.title.clone(),
            description: record.description.clone(),
            category: record.category.as_str().to_owned(),
            status: record.status.as_str().to_owned(),
            badge: record.status.badge().as_str().to_owned(),
            created_at: format_date(record.created_at.as_ref()),
            owner_email: record.owner.to_string(),
        }
    }
}

/// Per-status tallies.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CountsView {
    pub total: usize,
    pub pending: usize,
    pub in_progress: usize,
    pub resolved: usize,
    pub rejected: usize,
}

impl From<ComplaintCounts> for CountsView {
    fn from(counts: ComplaintCounts) -> Self {
        let ComplaintCounts {
            total,
            pending,
            in_progress,
            resolved,
            rejected,
        } = counts;
        Self {
            total,
            pending,
            in_progress,
            resolved,
            rejected,
        }
    }
}

pub(crate) fn complaint_views<'a>(
    records: impl IntoIterator<Item = &'a ComplaintRecord>,
) -> Vec<ComplaintView> {
    records.into_iter().map(ComplaintView::from).collect()
}

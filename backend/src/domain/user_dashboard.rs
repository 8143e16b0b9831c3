//! Complaint list scoped to one owner.

use serde::Serialize;

use super::complaint::{ComplaintCounts, ComplaintId, ComplaintRecord, sort_newest_first};
use super::Email;

/// The signed-in user's complaints, newest first, with aggregate counts.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserDashboard {
    complaints: Vec<ComplaintRecord>,
    counts: ComplaintCounts,
}

impl UserDashboard {
    /// Build the list from an owner-filtered, unordered fetch.
    ///
    /// Records belonging to anyone other than `owner` are dropped so a
    /// misbehaving store cannot leak another user's complaints.
    pub fn from_owner_records(owner: &Email, mut records: Vec<ComplaintRecord>) -> Self {
        records.retain(|record| &record.owner == owner);
        sort_newest_first(&mut records);
        let counts = ComplaintCounts::tally(&records);
        Self {
            complaints: records,
            counts,
        }
    }

    pub fn complaints(&self) -> &[ComplaintRecord] {
        &self.complaints
    }

    pub fn counts(&self) -> ComplaintCounts {
        self.counts
    }

    /// Detail lookup; `None` for ids the owner does not hold.
    pub fn find(&self, id: &ComplaintId) -> Option<&ComplaintRecord> {
        self.complaints.iter().find(|record| &record.id == id)
    }
}

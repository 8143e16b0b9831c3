//! Aggregate counts shown above complaint lists.

use serde::Serialize;

use super::{ComplaintRecord, ComplaintStatus};

/// Per-status tallies for a set of complaints.
///
/// Records with an unrecognised status contribute to `total` only.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ComplaintCounts {
    pub total: usize,
    pub pending: usize,
    pub in_progress: usize,
    pub resolved: usize,
    pub rejected: usize,
}

impl ComplaintCounts {
    /// Tally a set of records.
    pub fn tally<'a>(records: impl IntoIterator<Item = &'a ComplaintRecord>) -> Self {
        records.into_iter().fold(Self::default(), |mut acc, record| {
            acc.total += 1;
            match record.status.known() {
                Some(ComplaintStatus::Pending) => acc.pending += 1,
                Some(ComplaintStatus::InProgress) => acc.in_progress += 1,
                Some(ComplaintStatus::Resolved) => acc.resolved += 1,
                Some(ComplaintStatus::Rejected) => acc.rejected += 1,
                None => {}
            }
            acc
        })
    }
}

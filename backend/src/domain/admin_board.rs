//! Administrator view over every complaint.
//!
//! The board keeps the full fetched set, derives the visible subset from the
//! active filters, and mirrors status changes locally once the store has
//! accepted them.

use serde::Serialize;

use super::complaint::{
    CategoryFilter, ComplaintCounts, ComplaintFilter, ComplaintId, ComplaintRecord,
    StatusFilter, StatusTransition,
};
use super::ports::{ComplaintStore, StoreError};

/// Filtered administrator list.
#[derive(Debug, Clone, PartialEq)]
pub struct AdminBoard {
    records: Vec<ComplaintRecord>,
    filter: ComplaintFilter,
    visible: Vec<usize>,
}

/// Serialisable snapshot of the board.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminBoardSnapshot<'a> {
    pub complaints: Vec<&'a ComplaintRecord>,
    pub counts: ComplaintCounts,
}

impl AdminBoard {
    /// Board over an already ordered set of records, unfiltered.
    pub fn new(records: Vec<ComplaintRecord>) -> Self {
        let mut board = Self {
            records,
            filter: ComplaintFilter::default(),
            visible: Vec::new(),
        };
        board.refilter();
        board
    }

    /// Fetch every complaint newest first and build a board over them.
    pub async fn load(store: &dyn ComplaintStore) -> Result<Self, StoreError> {
        let records = store.query_all(Default::default()).await?;
        Ok(Self::new(records))
    }

    pub fn filter(&self) -> ComplaintFilter {
        self.filter
    }

    pub fn set_filter(&mut self, filter: ComplaintFilter) {
        self.filter = filter;
        self.refilter();
    }

    pub fn set_status_filter(&mut self, status: StatusFilter) {
        self.filter.status = status;
        self.refilter();
    }

    pub fn set_category_filter(&mut self, category: CategoryFilter) {
        self.filter.category = category;
        self.refilter();
    }

    /// Records passing the active filters, in fetch order.
    pub fn visible(&self) -> impl Iterator<Item = &ComplaintRecord> {
        self.visible.iter().filter_map(|&index| self.records.get(index))
    }

    /// Counts over the unfiltered set.
    pub fn counts(&self) -> ComplaintCounts {
        ComplaintCounts::tally(&self.records)
    }

    pub fn find(&self, id: &ComplaintId) -> Option<&ComplaintRecord> {
        self.records.iter().find(|record| &record.id == id)
    }

    pub fn snapshot(&self) -> AdminBoardSnapshot<'_> {
        AdminBoardSnapshot {
            complaints: self.visible().collect(),
            counts: self.counts(),
        }
    }

    /// Persist a transition, then mirror it into the local set.
    ///
    /// The local copy is untouched when the store refuses the write.
    pub async fn transition(
        &mut self,
        store: &dyn ComplaintStore,
        id: &ComplaintId,
        transition: StatusTransition,
    ) -> Result<&ComplaintRecord, StoreError> {
        store.update_status(id, transition.target()).await?;
        self.mirror(id, transition)
            .ok_or_else(|| StoreError::not_found(id.to_string()))
    }

    fn mirror(&mut self, id: &ComplaintId, transition: StatusTransition) -> Option<&ComplaintRecord> {
        let index = self.records.iter().position(|record| &record.id == id)?;
        self.records.get_mut(index)?.status = transition.target().into();
        self.refilter();
        self.records.get(index)
    }

    fn refilter(&mut self) {
        let filter = self.filter;
        self.visible = self
            .records
            .iter()
            .enumerate()
            .filter(|(_, record)| filter.matches(record))
            .map(|(index, _)| index)
            .collect();
    }
}

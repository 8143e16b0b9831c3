//! Driven port for complaint persistence.
//!
//! The store is document shaped: reads return whatever the backing store
//! holds (see [`ComplaintRecord`]), while writes are limited to inserting a
//! validated [`NewComplaint`] and changing a single status field.

use async_trait::async_trait;

use crate::domain::{ComplaintId, ComplaintRecord, ComplaintStatus, Email, NewComplaint};

use super::define_port_error;

define_port_error! {
    /// Errors raised by complaint store adapters.
    pub enum StoreError {
        /// The store could not be reached.
        Connection { message: String } => "complaint store connection failed: {message}",
        /// A read or write failed while executing.
        Query { message: String } => "complaint store query failed: {message}",
        /// No complaint has the requested identifier.
        NotFound { message: String } => "complaint not found: {message}",
        /// The store refused the write.
        Rejected { message: String } => "complaint store rejected the write: {message}",
    }
}

/// Ordering applied by [`ComplaintStore::query_all`] on `createdAt`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    Ascending,
    #[default]
    Descending,
}

/// Port for complaint storage.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ComplaintStore: Send + Sync {
    /// Insert a complaint and return its store-assigned identifier.
    async fn insert(&self, complaint: NewComplaint) -> Result<ComplaintId, StoreError>;

    /// Every complaint ordered by creation time.
    ///
    /// Complaints without a usable timestamp come last regardless of
    /// direction.
    async fn query_all(&self, direction: SortDirection)
    -> Result<Vec<ComplaintRecord>, StoreError>;

    /// Complaints owned by `owner`, in no particular order.
    async fn query_by_owner(&self, owner: &Email) -> Result<Vec<ComplaintRecord>, StoreError>;

    /// Overwrite the status of one complaint.
    ///
    /// Fails with [`StoreError::NotFound`] when `id` is unknown.
    async fn update_status(
        &self,
        id: &ComplaintId,
        status: ComplaintStatus,
    ) -> Result<(), StoreError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(StoreError::connection("refused"), "complaint store connection failed: refused")]
    #[case(StoreError::not_found("abc"), "complaint not found: abc")]
    fn messages_are_human_readable(#[case] err: StoreError, #[case] expected: &str) {
        assert_eq!(err.to_string(), expected);
    }

    #[rstest]
    fn newest_first_is_the_default_direction() {
        assert_eq!(SortDirection::default(), SortDirection::Descending);
    }
}

//! Driving port for complaint reads.

use async_trait::async_trait;

use crate::domain::{AdminBoard, ComplaintFilter, Email, Error, UserDashboard};

/// Use-case port for the two complaint lists.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ComplaintQuery: Send + Sync {
    /// Complaints owned by `owner`, newest first.
    async fn user_dashboard(&self, owner: &Email) -> Result<UserDashboard, Error>;

    /// Every complaint with `filter` applied.
    async fn admin_board(&self, filter: ComplaintFilter) -> Result<AdminBoard, Error>;
}

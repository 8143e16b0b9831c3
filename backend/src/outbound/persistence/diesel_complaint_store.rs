//! PostgreSQL-backed `ComplaintStore` implementation using Diesel ORM.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use tracing::warn;
use uuid::Uuid;

use crate::domain::ports::{ComplaintStore, SortDirection, StoreError};
use crate::domain::{
    Category, ComplaintId, ComplaintRecord, ComplaintStatus, Email, NewComplaint,
    RecordTimestamp, RecordedStatus, newest_first, oldest_first,
};

use super::error_mapping::{map_diesel_error, map_pool_error};
use super::models::{ComplaintRow, NewComplaintRow};
use super::pool::{DbPool, PoolError};
use super::schema::complaints;

/// Diesel-backed implementation of the [`ComplaintStore`] port.
#[derive(Clone)]
pub struct DieselComplaintStore {
    pool: DbPool,
}

impl DieselComplaintStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn pool_error(error: PoolError) -> StoreError {
    map_pool_error(error, |message| StoreError::connection(message))
}

fn diesel_error(error: diesel::result::Error) -> StoreError {
    map_diesel_error(
        error,
        |message| StoreError::query(message),
        |message| StoreError::connection(message),
    )
}

/// Convert a row into a record, skipping rows whose owner is unusable.
fn row_to_record(row: ComplaintRow) -> Option<ComplaintRecord> {
    let owner = match Email::new(&row.owner_email) {
        Ok(owner) => owner,
        Err(error) => {
            warn!(complaint_id = %row.id, %error, "skipping complaint with unusable owner");
            return None;
        }
    };
    let category = row.category.parse().unwrap_or_else(|_| {
        warn!(
            value = row.category.as_str(),
            complaint_id = %row.id,
            "unrecognised category value, defaulting to General"
        );
        Category::General
    });
    let id = ComplaintId::new(row.id.to_string()).ok()?;
    Some(ComplaintRecord {
        id,
        title: row.title,
        description: row.description,
        category,
        owner,
        status: RecordedStatus::from_raw(&row.status),
        created_at: row.created_at.map(RecordTimestamp::Native),
    })
}

#[async_trait]
impl ComplaintStore for DieselComplaintStore {
    async fn insert(&self, complaint: NewComplaint) -> Result<ComplaintId, StoreError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        let row = NewComplaintRow {
            title: complaint.title.as_ref(),
            description: complaint.description.as_ref(),
            category: complaint.category.as_str(),
            owner_email: complaint.owner.as_ref(),
            status: complaint.status.as_str(),
            created_at: Some(complaint.created_at),
        };
        let id: Uuid = diesel::insert_into(complaints::table)
            .values(&row)
            .returning(complaints::id)
            .get_result(&mut conn)
            .await
            .map_err(diesel_error)?;
        ComplaintId::new(id.to_string()).map_err(|err| StoreError::query(err.to_string()))
    }

    async fn query_all(
        &self,
        direction: SortDirection,
    ) -> Result<Vec<ComplaintRecord>, StoreError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        let query = complaints::table.select(ComplaintRow::as_select());
        let rows: Vec<ComplaintRow> = match direction {
            SortDirection::Descending => {
                query
                    .order(complaints::created_at.desc())
                    .load(&mut conn)
                    .await
            }
            SortDirection::Ascending => {
                query
                    .order(complaints::created_at.asc())
                    .load(&mut conn)
                    .await
            }
        }
        .map_err(diesel_error)?;

        // PostgreSQL places NULLs first when descending; undated rows go last either way.
        let order = match direction {
            SortDirection::Descending => newest_first,
            SortDirection::Ascending => oldest_first,
        };
        let mut records: Vec<ComplaintRecord> =
            rows.into_iter().filter_map(row_to_record).collect();
        records.sort_by(|a, b| order(a.created_at.as_ref(), b.created_at.as_ref()));
        Ok(records)
    }

    async fn query_by_owner(&self, owner: &Email) -> Result<Vec<ComplaintRecord>, StoreError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        let rows: Vec<ComplaintRow> = complaints::table
            .filter(complaints::owner_email.eq(owner.as_ref()))
            .select(ComplaintRow::as_select())
            .load(&mut conn)
            .await
            .map_err(diesel_error)?;
        Ok(rows.into_iter().filter_map(row_to_record).collect())
    }

    async fn update_status(
        &self,
        id: &ComplaintId,
        status: ComplaintStatus,
    ) -> Result<(), StoreError> {
        let key =
            Uuid::parse_str(id.as_ref()).map_err(|_| StoreError::not_found(id.to_string()))?;
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        let updated = diesel::update(complaints::table.find(key))
            .set(complaints::status.eq(status.as_str()))
            .execute(&mut conn)
            .await
            .map_err(diesel_error)?;
        if updated == 0 {
            return Err(StoreError::not_found(id.to_string()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use rstest::{fixture, rstest};

    #[fixture]
    fn row() -> ComplaintRow {
        ComplaintRow {
            id: Uuid::nil(),
            title: "Broken streetlight".into(),
            description: "Dark for a week".into(),
            category: "infrastructure".into(),
            owner_email: "citizen@example.com".into(),
            status: "in progress".into(),
            created_at: Utc.with_ymd_and_hms(2024, 3, 1, 8, 0, 0).single(),
        }
    }

    #[rstest]
    fn canonical_row_converts(row: ComplaintRow) {
        let record = row_to_record(row).expect("row converts");
        assert_eq!(record.id.as_ref(), Uuid::nil().to_string());
        assert_eq!(record.category, Category::Infrastructure);
        assert_eq!(record.status.known(), Some(ComplaintStatus::InProgress));
        assert!(matches!(record.created_at, Some(RecordTimestamp::Native(_))));
    }

    #[rstest]
    fn unknown_category_defaults_and_unknown_status_is_kept(mut row: ComplaintRow) {
        row.category = "parks".into();
        row.status = "escalated".into();
        let record = row_to_record(row).expect("row converts");
        assert_eq!(record.category, Category::General);
        assert_eq!(record.status.known(), None);
        assert_eq!(record.status.as_str(), "escalated");
    }

    #[rstest]
    fn row_with_unusable_owner_is_skipped(mut row: ComplaintRow) {
        row.owner_email = "not-an-email".into();
        assert!(row_to_record(row).is_none());
    }
}

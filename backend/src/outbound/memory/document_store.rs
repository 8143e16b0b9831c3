//! Document-shaped complaint store held in memory.
//!
//! Complaints are kept as raw JSON objects, exactly as a document database
//! would hand them back, and decoded into [`ComplaintRecord`] on every read.
//! Seeded documents may therefore carry legacy shapes: structured or textual
//! `createdAt` values, missing categories, or statuses outside the canonical
//! set.

use async_trait::async_trait;
use serde_json::{Map, Value};
use tokio::sync::RwLock;
use tracing::warn;
use uuid::Uuid;

use crate::domain::ports::{ComplaintStore, SortDirection, StoreError};
use crate::domain::{
    Category, ComplaintId, ComplaintRecord, ComplaintStatus, Email, NewComplaint, newest_first,
    oldest_first,
};

type Document = Map<String, Value>;

/// Errors raised while loading seed documents.
#[derive(Debug, thiserror::Error)]
pub enum SeedError {
    #[error("seed data is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("seed data must be a JSON array of objects (entry {index} is not an object)")]
    NotAnObject { index: usize },
}

/// In-memory [`ComplaintStore`] over JSON documents.
#[derive(Debug, Default)]
pub struct MemoryComplaintStore {
    documents: RwLock<Vec<Document>>,
}

impl MemoryComplaintStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store from a JSON array of complaint documents.
    ///
    /// Documents without a string `id` are given a fresh one.
    ///
    /// # Examples
    /// ```
    /// use grievance_backend::outbound::memory::MemoryComplaintStore;
    ///
    /// let store = MemoryComplaintStore::from_json(r#"[{"title": "Pothole"}]"#)
    ///     .expect("valid seed data");
    /// # let _ = store;
    /// ```
    pub fn from_json(raw: &str) -> Result<Self, SeedError> {
        let values: Vec<Value> = serde_json::from_str(raw)?;
        let documents = values
            .into_iter()
            .enumerate()
            .map(|(index, value)| match value {
                Value::Object(mut doc) => {
                    if !doc.get("id").is_some_and(Value::is_string) {
                        doc.insert("id".into(), Value::String(Uuid::new_v4().to_string()));
                    }
                    Ok(doc)
                }
                _ => Err(SeedError::NotAnObject { index }),
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self {
            documents: RwLock::new(documents),
        })
    }

    async fn decoded(&self) -> Vec<ComplaintRecord> {
        let documents = self.documents.read().await;
        documents.iter().filter_map(decode).collect()
    }
}

fn document_id(doc: &Document) -> Option<&str> {
    doc.get("id").and_then(Value::as_str)
}

/// Replace legacy `category` and `status` values with decodable ones.
///
/// Unknown categories fall back to `General`; a missing status becomes an
/// empty, unrecognised value.
fn normalise_legacy_fields(doc: &mut Document) {
    let category_known = match doc.get("category") {
        None => true,
        Some(Value::String(raw)) => raw.parse::<Category>().is_ok(),
        Some(_) => false,
    };
    if !category_known {
        warn!(
            complaint_id = document_id(doc).unwrap_or("<missing>"),
            value = %doc.get("category").unwrap_or(&serde_json::Value::Null),
            "unrecognised category value, defaulting to General"
        );
        doc.insert(
            "category".into(),
            Value::String(Category::General.as_str().to_owned()),
        );
    }

    let status = match doc.get("status") {
        Some(Value::String(_)) => None,
        None | Some(Value::Null) => Some(String::new()),
        Some(other) => Some(other.to_string()),
    };
    if let Some(status) = status {
        doc.insert("status".into(), Value::String(status));
    }
}

fn decode(doc: &Document) -> Option<ComplaintRecord> {
    let mut normalised = doc.clone();
    normalise_legacy_fields(&mut normalised);
    match serde_json::from_value(Value::Object(normalised)) {
        Ok(record) => Some(record),
        Err(error) => {
            warn!(
                complaint_id = document_id(doc).unwrap_or("<missing>"),
                %error,
                "skipping undecodable complaint document"
            );
            None
        }
    }
}

#[async_trait]
impl ComplaintStore for MemoryComplaintStore {
    async fn insert(&self, complaint: NewComplaint) -> Result<ComplaintId, StoreError> {
        let id = ComplaintId::new(Uuid::new_v4().to_string())
            .map_err(|err| StoreError::query(err.to_string()))?;
        let record = ComplaintRecord::from_new(id.clone(), complaint);
        let Value::Object(doc) =
            serde_json::to_value(&record).map_err(|err| StoreError::query(err.to_string()))?
        else {
            return Err(StoreError::query("complaint did not serialise to an object"));
        };
        self.documents.write().await.push(doc);
        Ok(id)
    }

    async fn query_all(
        &self,
        direction: SortDirection,
    ) -> Result<Vec<ComplaintRecord>, StoreError> {
        let mut records = self.decoded().await;
        let order = match direction {
            SortDirection::Descending => newest_first,
            SortDirection::Ascending => oldest_first,
        };
        records.sort_by(|a, b| order(a.created_at.as_ref(), b.created_at.as_ref()));
        Ok(records)
    }

    async fn query_by_owner(&self, owner: &Email) -> Result<Vec<ComplaintRecord>, StoreError> {
        let mut records = self.decoded().await;
        records.retain(|record| &record.owner == owner);
        Ok(records)
    }

    async fn update_status(
        &self,
        id: &ComplaintId,
        status: ComplaintStatus,
    ) -> Result<(), StoreError> {
        let mut documents = self.documents.write().await;
        let doc = documents
            .iter_mut()
            .find(|doc| document_id(doc) == Some(id.as_ref()))
            .ok_or_else(|| StoreError::not_found(id.to_string()))?;
        doc.insert("status".into(), Value::String(status.as_str().to_owned()));
        Ok(())
    }
}

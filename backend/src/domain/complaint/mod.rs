//! Complaint records and their value types.
//!
//! A complaint is created once by its owner and afterwards only its status
//! changes. [`NewComplaint`] is the write shape; [`ComplaintRecord`] is what
//! the store hands back, tolerant of legacy data.

mod category;
mod counts;
mod filter;
mod status;
mod timestamp;

use std::fmt;

use serde::{Deserialize, Serialize};

use super::Email;

pub use category::{Category, ParseCategoryError};
pub use counts::ComplaintCounts;
pub use filter::{CategoryFilter, ComplaintFilter, StatusFilter};
pub use status::{
    Badge, ComplaintStatus, ParseStatusError, RecordedStatus, StatusTransition, TransitionError,
};
pub use timestamp::{
    INVALID_DATE, MISSING_DATE, RecordTimestamp, format_date, newest_first, oldest_first,
};

/// Longest accepted title, in characters.
pub const TITLE_MAX: usize = 200;
/// Longest accepted description, in characters.
pub const DESCRIPTION_MAX: usize = 5000;

/// Validation failures for complaint fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ComplaintValidationError {
    EmptyId,
    EmptyTitle,
    TitleTooLong { max: usize },
    EmptyDescription,
    DescriptionTooLong { max: usize },
    UnknownCategory(ParseCategoryError),
}

impl ComplaintValidationError {
    /// Request field the failure refers to.
    pub fn field(&self) -> &'static str {
        match self {
            Self::EmptyId => "id",
            Self::EmptyTitle | Self::TitleTooLong { .. } => "title",
            Self::EmptyDescription | Self::DescriptionTooLong { .. } => "description",
            Self::UnknownCategory(_) => "category",
        }
    }

    /// Machine-readable code for error details.
    pub fn code(&self) -> &'static str {
        match self {
            Self::EmptyId => "empty_id",
            Self::EmptyTitle => "empty_title",
            Self::TitleTooLong { .. } => "title_too_long",
            Self::EmptyDescription => "empty_description",
            Self::DescriptionTooLong { .. } => "description_too_long",
            Self::UnknownCategory(_) => "unknown_category",
        }
    }
}

impl fmt::Display for ComplaintValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyId => write!(f, "complaint id must not be empty"),
            Self::EmptyTitle => write!(f, "title must not be empty"),
            Self::TitleTooLong { max } => write!(f, "title must be at most {max} characters"),
            Self::EmptyDescription => write!(f, "description must not be empty"),
            Self::DescriptionTooLong { max } => {
                write!(f, "description must be at most {max} characters")
            }
            Self::UnknownCategory(inner) => inner.fmt(f),
        }
    }
}

impl std::error::Error for ComplaintValidationError {}

/// Store-assigned complaint identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ComplaintId(String);

impl ComplaintId {
    pub fn new(raw: impl Into<String>) -> Result<Self, ComplaintValidationError> {
        let raw = raw.into();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(ComplaintValidationError::EmptyId);
        }
        Ok(Self(trimmed.to_owned()))
    }
}

impl AsRef<str> for ComplaintId {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for ComplaintId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<ComplaintId> for String {
    fn from(value: ComplaintId) -> Self {
        value.0
    }
}

impl TryFrom<String> for ComplaintId {
    type Error = ComplaintValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

fn bounded_text(
    raw: &str,
    max: usize,
    empty: ComplaintValidationError,
    too_long: ComplaintValidationError,
) -> Result<String, ComplaintValidationError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(empty);
    }
    if trimmed.chars().count() > max {
        return Err(too_long);
    }
    Ok(trimmed.to_owned())
}

/// Complaint subject line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComplaintTitle(String);

impl ComplaintTitle {
    pub fn new(raw: &str) -> Result<Self, ComplaintValidationError> {
        bounded_text(
            raw,
            TITLE_MAX,
            ComplaintValidationError::EmptyTitle,
            ComplaintValidationError::TitleTooLong { max: TITLE_MAX },
        )
        .map(Self)
    }
}

impl AsRef<str> for ComplaintTitle {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

/// Complaint body text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComplaintDescription(String);

impl ComplaintDescription {
    pub fn new(raw: &str) -> Result<Self, ComplaintValidationError> {
        bounded_text(
            raw,
            DESCRIPTION_MAX,
            ComplaintValidationError::EmptyDescription,
            ComplaintValidationError::DescriptionTooLong {
                max: DESCRIPTION_MAX,
            },
        )
        .map(Self)
    }
}

impl AsRef<str> for ComplaintDescription {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

/// Complaint about to be inserted.
#[derive(Debug, Clone, PartialEq)]
pub struct NewComplaint {
    pub title: ComplaintTitle,
    pub description: ComplaintDescription,
    pub category: Category,
    pub owner: Email,
    pub status: ComplaintStatus,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

/// Complaint as stored, in document form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComplaintRecord {
    pub id: ComplaintId,
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub category: Category,
    #[serde(rename = "userEmail")]
    pub owner: Email,
    pub status: RecordedStatus,
    #[serde(default)]
    pub created_at: Option<RecordTimestamp>,
}

impl ComplaintRecord {
    /// Record produced by inserting `new` under `id`.
    pub fn from_new(id: ComplaintId, new: NewComplaint) -> Self {
        Self {
            id,
            title: new.title.0,
            description: new.description.0,
            category: new.category,
            owner: new.owner,
            status: new.status.into(),
            created_at: Some(RecordTimestamp::Native(new.created_at)),
        }
    }
}

/// Stable newest-first sort; undated records keep their relative order at the end.
pub fn sort_newest_first(records: &mut [ComplaintRecord]) {
    records.sort_by(|a, b| newest_first(a.created_at.as_ref(), b.created_at.as_ref()));
}

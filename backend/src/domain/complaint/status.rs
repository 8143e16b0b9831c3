//! Complaint status lifecycle.
//!
//! Writes only ever carry a [`ComplaintStatus`]. Reads go through
//! [`RecordedStatus`] so rows holding an unexpected string still render.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Lifecycle state of a complaint.
///
/// # Examples
///
/// ```
/// # use grievance_backend::domain::ComplaintStatus;
/// assert_eq!("In-Progress".parse(), Ok(ComplaintStatus::InProgress));
/// assert_eq!(ComplaintStatus::InProgress.as_str(), "in progress");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "&'static str")]
pub enum ComplaintStatus {
    Pending,
    InProgress,
    Resolved,
    Rejected,
}

impl ComplaintStatus {
    pub const ALL: [Self; 4] = [
        Self::Pending,
        Self::InProgress,
        Self::Resolved,
        Self::Rejected,
    ];

    /// Canonical persisted spelling.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::InProgress => "in progress",
            Self::Resolved => "resolved",
            Self::Rejected => "rejected",
        }
    }

    pub const fn badge(self) -> Badge {
        match self {
            Self::Pending => Badge::Warning,
            Self::InProgress => Badge::Info,
            Self::Resolved => Badge::Success,
            Self::Rejected => Badge::Error,
        }
    }
}

impl fmt::Display for ComplaintStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<ComplaintStatus> for &'static str {
    fn from(value: ComplaintStatus) -> Self {
        value.as_str()
    }
}

/// Error returned when a string names no known status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseStatusError {
    pub input: String,
}

impl fmt::Display for ParseStatusError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown status: {}", self.input)
    }
}

impl std::error::Error for ParseStatusError {}

impl std::str::FromStr for ComplaintStatus {
    type Err = ParseStatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let folded = s.trim().to_lowercase().replace(['-', '_'], " ");
        match folded.as_str() {
            "pending" => Ok(Self::Pending),
            "in progress" | "inprogress" => Ok(Self::InProgress),
            "resolved" => Ok(Self::Resolved),
            "rejected" => Ok(Self::Rejected),
            _ => Err(ParseStatusError {
                input: s.to_owned(),
            }),
        }
    }
}

impl TryFrom<String> for ComplaintStatus {
    type Error = ParseStatusError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// Visual severity attached to a status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Badge {
    Warning,
    Info,
    Success,
    Error,
    Neutral,
}

impl Badge {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Warning => "warning",
            Self::Info => "info",
            Self::Success => "success",
            Self::Error => "error",
            Self::Neutral => "neutral",
        }
    }
}

/// Status as read back from the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum RecordedStatus {
    Known(ComplaintStatus),
    /// Raw value kept verbatim.
    Unrecognised(String),
}

impl RecordedStatus {
    /// Classify a stored string, never failing.
    pub fn from_raw(raw: impl Into<String>) -> Self {
        let raw = raw.into();
        match raw.parse() {
            Ok(status) => Self::Known(status),
            Err(_) => Self::Unrecognised(raw),
        }
    }

    pub fn known(&self) -> Option<ComplaintStatus> {
        match self {
            Self::Known(status) => Some(*status),
            Self::Unrecognised(_) => None,
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Known(status) => status.as_str(),
            Self::Unrecognised(raw) => raw.as_str(),
        }
    }

    pub fn badge(&self) -> Badge {
        self.known().map_or(Badge::Neutral, ComplaintStatus::badge)
    }
}

impl From<ComplaintStatus> for RecordedStatus {
    fn from(value: ComplaintStatus) -> Self {
        Self::Known(value)
    }
}

impl From<String> for RecordedStatus {
    fn from(value: String) -> Self {
        Self::from_raw(value)
    }
}

impl From<RecordedStatus> for String {
    fn from(value: RecordedStatus) -> Self {
        match value {
            RecordedStatus::Known(status) => status.as_str().to_owned(),
            RecordedStatus::Unrecognised(raw) => raw,
        }
    }
}

impl fmt::Display for RecordedStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Administrator action moving a complaint out of `pending`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(into = "&'static str")]
pub enum StatusTransition {
    InProgress,
    Resolved,
    Rejected,
}

impl StatusTransition {
    pub const ALL: [Self; 3] = [Self::InProgress, Self::Resolved, Self::Rejected];

    /// Status written by the transition.
    pub const fn target(self) -> ComplaintStatus {
        match self {
            Self::InProgress => ComplaintStatus::InProgress,
            Self::Resolved => ComplaintStatus::Resolved,
            Self::Rejected => ComplaintStatus::Rejected,
        }
    }
}

impl From<StatusTransition> for &'static str {
    fn from(value: StatusTransition) -> Self {
        value.target().as_str()
    }
}

impl fmt::Display for StatusTransition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.target().as_str())
    }
}

/// Error returned when a request names something other than the three
/// transition targets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransitionError {
    UnknownStatus(ParseStatusError),
    /// `pending` is the initial state only.
    NotATarget(ComplaintStatus),
}

impl fmt::Display for TransitionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownStatus(inner) => inner.fmt(f),
            Self::NotATarget(status) => write!(f, "cannot transition a complaint to {status}"),
        }
    }
}

impl std::error::Error for TransitionError {}

impl TryFrom<ComplaintStatus> for StatusTransition {
    type Error = TransitionError;

    fn try_from(value: ComplaintStatus) -> Result<Self, Self::Error> {
        match value {
            ComplaintStatus::InProgress => Ok(Self::InProgress),
            ComplaintStatus::Resolved => Ok(Self::Resolved),
            ComplaintStatus::Rejected => Ok(Self::Rejected),
            ComplaintStatus::Pending => Err(TransitionError::NotATarget(value)),
        }
    }
}

impl std::str::FromStr for StatusTransition {
    type Err = TransitionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let status: ComplaintStatus = s.parse().map_err(TransitionError::UnknownStatus)?;
        status.try_into()
    }
}

//! Administrator list filters.

use std::fmt;

use super::{Category, ComplaintRecord, ComplaintStatus, ParseCategoryError, ParseStatusError};

const ALL: &str = "all";

/// Status filter: everything, or one lifecycle state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatusFilter {
    #[default]
    All,
    Only(ComplaintStatus),
}

/// Category filter: everything, or one category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CategoryFilter {
    #[default]
    All,
    Only(Category),
}

impl std::str::FromStr for StatusFilter {
    type Err = ParseStatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case(ALL) {
            return Ok(Self::All);
        }
        s.parse().map(Self::Only)
    }
}

impl std::str::FromStr for CategoryFilter {
    type Err = ParseCategoryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case(ALL) {
            return Ok(Self::All);
        }
        s.parse().map(Self::Only)
    }
}

impl fmt::Display for StatusFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => f.write_str(ALL),
            Self::Only(status) => status.fmt(f),
        }
    }
}

impl fmt::Display for CategoryFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => f.write_str(ALL),
            Self::Only(category) => category.fmt(f),
        }
    }
}

/// Conjunction of a status and a category filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ComplaintFilter {
    pub status: StatusFilter,
    pub category: CategoryFilter,
}

impl ComplaintFilter {
    pub fn matches(&self, record: &ComplaintRecord) -> bool {
        let status_ok = match self.status {
            StatusFilter::All => true,
            StatusFilter::Only(wanted) => record.status.known() == Some(wanted),
        };
        let category_ok = match self.category {
            CategoryFilter::All => true,
            CategoryFilter::Only(wanted) => record.category == wanted,
        };
        status_ok && category_ok
    }
}

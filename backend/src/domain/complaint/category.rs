//! Complaint topic categories.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Topic a complaint is filed under.
///
/// # Examples
///
/// ```
/// # use grievance_backend::domain::Category;
/// assert_eq!(Category::default(), Category::General);
/// assert_eq!("Healthcare".parse::<Category>(), Ok(Category::Healthcare));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(try_from = "String", into = "&'static str")]
pub enum Category {
    #[default]
    General,
    Infrastructure,
    Healthcare,
    Education,
    Security,
    Transportation,
}

impl Category {
    /// Every category in display order.
    pub const ALL: [Self; 6] = [
        Self::General,
        Self::Infrastructure,
        Self::Healthcare,
        Self::Education,
        Self::Security,
        Self::Transportation,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::General => "general",
            Self::Infrastructure => "infrastructure",
            Self::Healthcare => "healthcare",
            Self::Education => "education",
            Self::Security => "security",
            Self::Transportation => "transportation",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<Category> for &'static str {
    fn from(value: Category) -> Self {
        value.as_str()
    }
}

/// Error returned when parsing an unknown category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseCategoryError {
    pub input: String,
}

impl fmt::Display for ParseCategoryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown category: {}", self.input)
    }
}

impl std::error::Error for ParseCategoryError {}

impl std::str::FromStr for Category {
    type Err = ParseCategoryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim();
        Self::ALL
            .into_iter()
            .find(|category| category.as_str().eq_ignore_ascii_case(needle))
            .ok_or_else(|| ParseCategoryError {
                input: s.to_owned(),
            })
    }
}

impl TryFrom<String> for Category {
    type Error = ParseCategoryError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

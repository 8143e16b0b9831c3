//! Display theme preference.
//!
//! The preference lives client-side; the server only resolves it from what
//! the client sends and echoes it in every view.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Light or dark display theme.
///
/// # Examples
///
/// ```
/// # use grievance_backend::domain::Theme;
/// assert_eq!(Theme::default(), Theme::Light);
/// assert_eq!(Theme::Light.toggled(), Theme::Dark);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }

    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }

    /// Resolve the active theme.
    ///
    /// A stored preference wins. Otherwise the client's colour-scheme hint
    /// selects dark when it says so, and anything else is light.
    pub fn resolve(stored: Option<&str>, scheme_hint: Option<&str>) -> Self {
        if let Some(theme) = stored.and_then(|raw| raw.parse().ok()) {
            return theme;
        }
        match scheme_hint.map(|hint| hint.trim().trim_matches('"')) {
            Some(hint) if hint.eq_ignore_ascii_case("dark") => Self::Dark,
            _ => Self::Light,
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown theme name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseThemeError {
    pub input: String,
}

impl fmt::Display for ParseThemeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown theme: {}", self.input)
    }
}

impl std::error::Error for ParseThemeError {}

impl std::str::FromStr for Theme {
    type Err = ParseThemeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "light" => Ok(Self::Light),
            "dark" => Ok(Self::Dark),
            _ => Err(ParseThemeError {
                input: s.to_owned(),
            }),
        }
    }
}

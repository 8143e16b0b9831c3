//! Signed-in identities and the roles derived from them.

use std::collections::BTreeSet;
use std::fmt;
use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

/// Validation errors raised while parsing an [`Email`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EmailValidationError {
    Empty,
    Malformed,
}

impl fmt::Display for EmailValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "email must not be empty"),
            Self::Malformed => write!(f, "email must look like name@domain"),
        }
    }
}

impl std::error::Error for EmailValidationError {}

static EMAIL_RE: OnceLock<Regex> = OnceLock::new();

fn email_regex() -> &'static Regex {
    EMAIL_RE.get_or_init(|| {
        Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$")
            .unwrap_or_else(|error| panic!("email regex failed to compile: {error}"))
    })
}

/// Account email, trimmed and lower-cased.
///
/// Owner matching and the administrator roster both compare the normalised
/// form, so `Ada@Example.com` and `ada@example.com` are the same account.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Email(String);

impl Email {
    /// Validate and normalise an email address.
    ///
    /// # Examples
    /// ```
    /// use grievance_backend::domain::Email;
    ///
    /// let email = Email::new("  Ada@Example.com ").expect("valid email");
    /// assert_eq!(email.as_ref(), "ada@example.com");
    /// ```
    pub fn new(raw: impl AsRef<str>) -> Result<Self, EmailValidationError> {
        let trimmed = raw.as_ref().trim();
        if trimmed.is_empty() {
            return Err(EmailValidationError::Empty);
        }
        if !email_regex().is_match(trimmed) {
            return Err(EmailValidationError::Malformed);
        }
        Ok(Self(trimmed.to_lowercase()))
    }
}

impl AsRef<str> for Email {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for Email {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<Email> for String {
    fn from(value: Email) -> Self {
        value.0
    }
}

impl TryFrom<String> for Email {
    type Error = EmailValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Identity reported by the identity gateway after a successful sign-in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionIdentity {
    email: Email,
}

impl SessionIdentity {
    pub fn new(email: Email) -> Self {
        Self { email }
    }

    pub fn email(&self) -> &Email {
        &self.email
    }
}

/// Role derived from the current identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// No identity.
    Visitor,
    User,
    Administrator,
}

impl Role {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Visitor => "visitor",
            Self::User => "user",
            Self::Administrator => "administrator",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Email address granted the administrator role when none is configured.
pub const DEFAULT_ADMIN_EMAIL: &str = "admin@example.com";

/// Allow-list of administrator emails.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdminRoster {
    members: BTreeSet<Email>,
}

impl AdminRoster {
    pub fn new(members: impl IntoIterator<Item = Email>) -> Self {
        Self {
            members: members.into_iter().collect(),
        }
    }

    /// Build a roster from raw strings, rejecting the first invalid entry.
    pub fn try_from_strings<I, S>(raw: I) -> Result<Self, EmailValidationError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        raw.into_iter()
            .map(Email::new)
            .collect::<Result<BTreeSet<_>, _>>()
            .map(|members| Self { members })
    }

    pub fn contains(&self, email: &Email) -> bool {
        self.members.contains(email)
    }

    /// Role for an optional identity.
    pub fn role_of(&self, identity: Option<&SessionIdentity>) -> Role {
        match identity {
            None => Role::Visitor,
            Some(id) if self.contains(id.email()) => Role::Administrator,
            Some(_) => Role::User,
        }
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}

impl Default for AdminRoster {
    fn default() -> Self {
        Self::new([Email(DEFAULT_ADMIN_EMAIL.to_owned())])
    }
}

//! Account credentials handed to the identity gateway.
//!
//! Handlers parse raw JSON strings through these constructors so the gateway
//! only ever sees a normalised email and a non-empty password.

use std::fmt;

use zeroize::Zeroizing;

use super::identity::{Email, EmailValidationError};

/// Shortest password the registration flow accepts.
pub const PASSWORD_MIN_LENGTH: usize = 6;

/// Reasons a credentials payload is refused before reaching the gateway.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CredentialsValidationError {
    /// Email was blank or malformed.
    Email(EmailValidationError),
    /// Password was blank.
    EmptyPassword,
    /// Registration password shorter than [`PASSWORD_MIN_LENGTH`].
    PasswordTooShort { min: usize },
}

impl CredentialsValidationError {
    /// Name of the offending request field.
    pub fn field(&self) -> &'static str {
        match self {
            Self::Email(_) => "email",
            Self::EmptyPassword | Self::PasswordTooShort { .. } => "password",
        }
    }

    /// Stable machine-readable code for error details.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Email(EmailValidationError::Empty) => "empty_email",
            Self::Email(EmailValidationError::Malformed) => "invalid_email",
            Self::EmptyPassword => "empty_password",
            Self::PasswordTooShort { .. } => "password_too_short",
        }
    }
}

impl fmt::Display for CredentialsValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Email(inner) => inner.fmt(f),
            Self::EmptyPassword => write!(f, "password must not be empty"),
            Self::PasswordTooShort { min } => {
                write!(f, "password must be at least {min} characters")
            }
        }
    }
}

impl std::error::Error for CredentialsValidationError {}

impl From<EmailValidationError> for CredentialsValidationError {
    fn from(value: EmailValidationError) -> Self {
        Self::Email(value)
    }
}

/// Validated email/password pair.
///
/// ## Invariants
/// - `email` is normalised by [`Email::new`].
/// - `password` is non-empty and kept verbatim; it is wiped on drop.
///
/// # Examples
/// ```
/// use grievance_backend::domain::Credentials;
///
/// let creds = Credentials::for_sign_in("Ada@Example.com", "hunter2").expect("valid");
/// assert_eq!(creds.email().as_ref(), "ada@example.com");
/// assert!(Credentials::for_registration("ada@example.com", "abc").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    email: Email,
    password: Zeroizing<String>,
}

impl Credentials {
    /// Credentials for signing in to an existing account.
    pub fn for_sign_in(email: &str, password: &str) -> Result<Self, CredentialsValidationError> {
        let email = Email::new(email)?;
        if password.is_empty() {
            return Err(CredentialsValidationError::EmptyPassword);
        }
        Ok(Self {
            email,
            password: Zeroizing::new(password.to_owned()),
        })
    }

    /// Credentials for a new account; the password must meet the minimum length.
    pub fn for_registration(
        email: &str,
        password: &str,
    ) -> Result<Self, CredentialsValidationError> {
        let creds = Self::for_sign_in(email, password)?;
        if creds.password.chars().count() < PASSWORD_MIN_LENGTH {
            return Err(CredentialsValidationError::PasswordTooShort {
                min: PASSWORD_MIN_LENGTH,
            });
        }
        Ok(creds)
    }

    pub fn email(&self) -> &Email {
        &self.email
    }

    pub fn password(&self) -> &str {
        self.password.as_str()
    }
}

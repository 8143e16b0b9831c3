//! Session cookie settings read from the environment.
//!
//! | Variable | Values | Debug default | Release |
//! |---|---|---|---|
//! | `SESSION_KEY_FILE` | path | generated key if unreadable | required, >= 64 bytes |
//! | `SESSION_COOKIE_SECURE` | `1`/`0`/`true`/`false`/`yes`/`no` | secure | required |
//! | `SESSION_SAMESITE` | `Strict`/`Lax`/`None` | `Lax` | required |
//! | `SESSION_ALLOW_EPHEMERAL` | boolean | off | must be `0` |
//!
//! Debug builds log a warning and fall back; release builds refuse to start.

pub mod fingerprint;
mod parsing;

use std::path::{Path, PathBuf};

use actix_session::config::{CookieContentSecurity, PersistentSession};
use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::cookie::time::Duration;
use actix_web::cookie::{Key, SameSite};
use mockable::Env;
use tracing::warn;
use zeroize::Zeroize;

use parsing::{BOOL_EXPECTED, SAMESITE_EXPECTED, flag, lenient, parse_bool, parse_same_site};

pub use fingerprint::key_fingerprint;

const SESSION_KEY_DEFAULT_PATH: &str = "/var/run/secrets/grievance_session_key";
/// Release builds insist on a full 64-byte master key.
const SESSION_KEY_MIN_LEN: usize = 64;
/// `Key::derive_from` cannot work with less.
const SESSION_KEY_DERIVE_MIN_LEN: usize = 32;
const SESSION_COOKIE_NAME: &str = "session";
const SESSION_TTL_HOURS: i64 = 8;

pub(crate) const COOKIE_SECURE_ENV: &str = "SESSION_COOKIE_SECURE";
pub(crate) const SAMESITE_ENV: &str = "SESSION_SAMESITE";
pub(crate) const ALLOW_EPHEMERAL_ENV: &str = "SESSION_ALLOW_EPHEMERAL";
pub(crate) const KEY_FILE_ENV: &str = "SESSION_KEY_FILE";

/// How strictly the session variables are validated.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum BuildMode {
    /// Missing or malformed values fall back with a warning.
    Debug,
    /// Missing or malformed values are fatal.
    Release,
}

impl BuildMode {
    /// Mode matching `cfg!(debug_assertions)`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use grievance_backend::inbound::http::session_config::BuildMode;
    ///
    /// let mode = BuildMode::from_debug_assertions();
    /// assert_eq!(mode == BuildMode::Debug, cfg!(debug_assertions));
    /// ```
    #[must_use]
    pub const fn from_debug_assertions() -> Self {
        if cfg!(debug_assertions) {
            Self::Debug
        } else {
            Self::Release
        }
    }

    const fn is_debug(self) -> bool {
        matches!(self, Self::Debug)
    }
}

/// Validated session cookie settings.
#[derive(Clone)]
pub struct SessionSettings {
    /// Master key for signing and encrypting the cookie.
    pub key: Key,
    pub cookie_secure: bool,
    pub same_site: SameSite,
}

impl SessionSettings {
    /// Fingerprint of the signing key, safe to log.
    #[must_use]
    pub fn fingerprint(&self) -> String {
        key_fingerprint(&self.key)
    }

    /// Cookie session middleware holding the signed-in email.
    ///
    /// The cookie is `HttpOnly`, encrypted, scoped to `/`, and expires
    /// after eight hours.
    #[must_use]
    pub fn middleware(&self) -> SessionMiddleware<CookieSessionStore> {
        SessionMiddleware::builder(CookieSessionStore::default(), self.key.clone())
            .cookie_name(SESSION_COOKIE_NAME.to_owned())
            .cookie_path("/".to_owned())
            .cookie_secure(self.cookie_secure)
            .cookie_http_only(true)
            .cookie_content_security(CookieContentSecurity::Private)
            .cookie_same_site(self.same_site)
            .session_lifecycle(
                PersistentSession::default().session_ttl(Duration::hours(SESSION_TTL_HOURS)),
            )
            .build()
    }
}

/// Errors raised while validating session configuration.
#[derive(thiserror::Error, Debug)]
pub enum SessionConfigError {
    /// Release builds require every toggle.
    #[error("missing required environment variable: {name}")]
    MissingEnv { name: &'static str },
    /// The variable is set but unparseable.
    #[error("invalid value for {name}='{value}'; expected {expected}")]
    InvalidEnv {
        name: &'static str,
        value: String,
        expected: &'static str,
    },
    /// The key file could not be read and no ephemeral key is allowed.
    #[error("failed to read session key at {path}: {source}")]
    KeyRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("session key at {path} too short: need >= {min_len} bytes, got {length}")]
    KeyTooShort {
        path: PathBuf,
        length: usize,
        min_len: usize,
    },
    /// `SameSite=None` on a cookie that is not `Secure`.
    #[error("SESSION_SAMESITE=None requires SESSION_COOKIE_SECURE=1")]
    InsecureSameSiteNone,
    /// `SESSION_ALLOW_EPHEMERAL` enabled in a release build.
    #[error("SESSION_ALLOW_EPHEMERAL must be 0 in release builds")]
    EphemeralNotAllowed,
}

/// Read and validate the session settings.
///
/// # Errors
///
/// Any missing, malformed, or unsafe value in [`BuildMode::Release`]. Debug
/// builds log the problem and fall back instead.
///
/// # Examples
///
/// ```rust
/// use grievance_backend::inbound::http::session_config::{
///     BuildMode, session_settings_from_env,
/// };
/// use mockable::MockEnv;
///
/// let mut env = MockEnv::new();
/// env.expect_string().returning(|_| None);
///
/// let settings = session_settings_from_env(&env, BuildMode::Debug).expect("debug defaults");
/// assert!(settings.cookie_secure);
/// ```
pub fn session_settings_from_env<E: Env>(
    env: &E,
    mode: BuildMode,
) -> Result<SessionSettings, SessionConfigError> {
    let cookie_secure = flag(env, mode, COOKIE_SECURE_ENV, true)?;
    let same_site = same_site_from_env(env, mode, cookie_secure)?;
    let allow_ephemeral = allow_ephemeral_from_env(env, mode)?;
    let key_path = env
        .string(KEY_FILE_ENV)
        .map_or_else(|| PathBuf::from(SESSION_KEY_DEFAULT_PATH), PathBuf::from);
    let key = load_key(&key_path, mode, allow_ephemeral)?;
    Ok(SessionSettings {
        key,
        cookie_secure,
        same_site,
    })
}

fn same_site_from_env<E: Env>(
    env: &E,
    mode: BuildMode,
    cookie_secure: bool,
) -> Result<SameSite, SessionConfigError> {
    let fallback = if mode.is_debug() {
        SameSite::Lax
    } else {
        SameSite::Strict
    };
    let Some(value) = env.string(SAMESITE_ENV) else {
        return lenient(mode, fallback, SessionConfigError::MissingEnv { name: SAMESITE_ENV });
    };
    let same_site = match parse_same_site(&value) {
        Some(same_site) => same_site,
        None => lenient(
            mode,
            fallback,
            SessionConfigError::InvalidEnv {
                name: SAMESITE_ENV,
                value,
                expected: SAMESITE_EXPECTED,
            },
        )?,
    };
    if same_site == SameSite::None && !cookie_secure {
        lenient(mode, (), SessionConfigError::InsecureSameSiteNone)?;
    }
    Ok(same_site)
}

fn allow_ephemeral_from_env<E: Env>(env: &E, mode: BuildMode) -> Result<bool, SessionConfigError> {
    let Some(value) = env.string(ALLOW_EPHEMERAL_ENV) else {
        return lenient(
            mode,
            false,
            SessionConfigError::MissingEnv {
                name: ALLOW_EPHEMERAL_ENV,
            },
        );
    };
    match parse_bool(&value) {
        Some(true) if !mode.is_debug() => Err(SessionConfigError::EphemeralNotAllowed),
        Some(allowed) => Ok(allowed),
        None => lenient(
            mode,
            false,
            SessionConfigError::InvalidEnv {
                name: ALLOW_EPHEMERAL_ENV,
                value,
                expected: BOOL_EXPECTED,
            },
        ),
    }
}

fn load_key(
    path: &Path,
    mode: BuildMode,
    allow_ephemeral: bool,
) -> Result<Key, SessionConfigError> {
    let mut bytes = match std::fs::read(path) {
        Ok(bytes) => bytes,
        Err(source) if mode.is_debug() || allow_ephemeral => {
            warn!(
                path = %path.display(),
                error = %source,
                "using temporary session key (dev only)"
            );
            return Ok(Key::generate());
        }
        Err(source) => {
            return Err(SessionConfigError::KeyRead {
                path: path.to_path_buf(),
                source,
            });
        }
    };
    let length = bytes.len();
    let min_len = match mode {
        BuildMode::Release => SESSION_KEY_MIN_LEN,
        BuildMode::Debug => SESSION_KEY_DERIVE_MIN_LEN,
    };
    let key = if length < min_len {
        lenient(
            mode,
            None,
            SessionConfigError::KeyTooShort {
                path: path.to_path_buf(),
                length,
                min_len,
            },
        )
    } else {
        Ok(Some(Key::derive_from(&bytes)))
    };
    bytes.zeroize();
    Ok(key?.unwrap_or_else(Key::generate))
}

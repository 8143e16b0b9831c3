//! Portal settings loaded via OrthoConfig.
//!
//! Values come from `GRIEVANCE_*` environment variables, command-line flags,
//! or a configuration file; every field is optional and falls back to the
//! defaults below.

use std::net::SocketAddr;
use std::path::PathBuf;

use ortho_config::OrthoConfig;
use serde::Deserialize;

use crate::domain::{AdminRoster, DEFAULT_ADMIN_EMAIL, EmailValidationError};

const DEFAULT_BIND_ADDRESS: &str = "0.0.0.0:8080";

/// Errors raised while interpreting loaded settings.
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("invalid bind address '{value}': {source}")]
    BindAddress {
        value: String,
        #[source]
        source: std::net::AddrParseError,
    },
    #[error("invalid administrator email: {0}")]
    AdminEmail(#[from] EmailValidationError),
}

/// Runtime configuration for the portal server.
#[derive(Debug, Clone, Default, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "GRIEVANCE")]
pub struct PortalSettings {
    /// Socket address the HTTP server binds to.
    pub bind_address: Option<String>,
    /// PostgreSQL URL; when absent the in-memory adapters are used.
    pub database_url: Option<String>,
    /// Comma-separated administrator emails.
    pub admin_emails: Option<String>,
    /// JSON array of complaint documents preloaded into the in-memory store.
    pub seed_file: Option<PathBuf>,
}

impl PortalSettings {
    /// Parsed bind address, defaulting to `0.0.0.0:8080`.
    pub fn bind_address(&self) -> Result<SocketAddr, SettingsError> {
        let raw = self
            .bind_address
            .as_deref()
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .unwrap_or(DEFAULT_BIND_ADDRESS);
        raw.parse().map_err(|source| SettingsError::BindAddress {
            value: raw.to_owned(),
            source,
        })
    }

    /// Administrator roster; blank entries are ignored.
    ///
    /// # Examples
    /// ```
    /// use grievance_backend::config::PortalSettings;
    ///
    /// let settings = PortalSettings {
    ///     admin_emails: Some("Chief@Example.com, deputy@example.com,".into()),
    ///     ..PortalSettings::default()
    /// };
    /// assert_eq!(settings.admin_roster().expect("valid emails").len(), 2);
    /// ```
    pub fn admin_roster(&self) -> Result<AdminRoster, SettingsError> {
        let raw = self.admin_emails.as_deref().unwrap_or(DEFAULT_ADMIN_EMAIL);
        let entries: Vec<&str> = raw
            .split(',')
            .map(str::trim)
            .filter(|entry| !entry.is_empty())
            .collect();
        if entries.is_empty() {
            return Ok(AdminRoster::default());
        }
        Ok(AdminRoster::try_from_strings(entries)?)
    }

    /// Database URL, ignoring blank values.
    pub fn database_url(&self) -> Option<&str> {
        self.database_url
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::ffi::OsString;

    use env_lock::lock_env;
    use rstest::rstest;

    use crate::domain::{Email, Role, SessionIdentity};

    const VARS: [&str; 4] = [
        "GRIEVANCE_BIND_ADDRESS",
        "GRIEVANCE_DATABASE_URL",
        "GRIEVANCE_ADMIN_EMAILS",
        "GRIEVANCE_SEED_FILE",
    ];

    fn load_from_empty_args() -> PortalSettings {
        PortalSettings::load_from_iter([OsString::from("grievance-backend")])
            .expect("config should load")
    }

    fn identity(email: &str) -> SessionIdentity {
        SessionIdentity::new(Email::new(email).expect("valid email"))
    }

    #[rstest]
    fn defaults_apply_when_nothing_is_set() {
        let _guard = lock_env(VARS.map(|name| (name, None::<String>)));

        let settings = load_from_empty_args();
        assert_eq!(
            settings.bind_address().expect("default parses"),
            "0.0.0.0:8080".parse::<SocketAddr>().expect("valid address")
        );
        assert!(settings.database_url().is_none());
        assert!(settings.seed_file.is_none());
        let roster = settings.admin_roster().expect("default roster");
        assert_eq!(
            roster.role_of(Some(&identity(DEFAULT_ADMIN_EMAIL))),
            Role::Administrator
        );
    }

    #[rstest]
    fn environment_overrides_are_respected() {
        let _guard = lock_env([
            ("GRIEVANCE_BIND_ADDRESS", Some("127.0.0.1:9000".to_owned())),
            (
                "GRIEVANCE_DATABASE_URL",
                Some("postgres://portal@localhost/grievances".to_owned()),
            ),
            (
                "GRIEVANCE_ADMIN_EMAILS",
                Some("chief@example.com".to_owned()),
            ),
            ("GRIEVANCE_SEED_FILE", Some("/tmp/complaints.json".to_owned())),
        ]);

        let settings = load_from_empty_args();
        assert_eq!(
            settings.bind_address().expect("parses"),
            "127.0.0.1:9000".parse::<SocketAddr>().expect("valid address")
        );
        assert_eq!(
            settings.database_url(),
            Some("postgres://portal@localhost/grievances")
        );
        assert_eq!(
            settings.seed_file,
            Some(PathBuf::from("/tmp/complaints.json"))
        );
        let roster = settings.admin_roster().expect("roster");
        assert_eq!(
            roster.role_of(Some(&identity("chief@example.com"))),
            Role::Administrator
        );
        assert_eq!(
            roster.role_of(Some(&identity(DEFAULT_ADMIN_EMAIL))),
            Role::User
        );
    }

    #[rstest]
    #[case(Some("not an address"))]
    #[case(Some("localhost"))]
    fn malformed_bind_address_is_reported(#[case] raw: Option<&str>) {
        let settings = PortalSettings {
            bind_address: raw.map(str::to_owned),
            ..PortalSettings::default()
        };
        assert!(matches!(
            settings.bind_address(),
            Err(SettingsError::BindAddress { .. })
        ));
    }

    #[rstest]
    fn malformed_admin_email_is_reported() {
        let settings = PortalSettings {
            admin_emails: Some("chief@example.com, nobody".into()),
            ..PortalSettings::default()
        };
        assert!(matches!(
            settings.admin_roster(),
            Err(SettingsError::AdminEmail(_))
        ));
    }
}

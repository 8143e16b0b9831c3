//! HTTP server configuration object and helpers.

use std::net::SocketAddr;
use std::path::PathBuf;

use grievance_backend::domain::AdminRoster;
use grievance_backend::inbound::http::session_config::SessionSettings;
use grievance_backend::outbound::persistence::DbPool;

#[cfg(feature = "metrics")]
use actix_web_prom::PrometheusMetrics;

/// Builder-style configuration for creating the HTTP server.
pub struct ServerConfig {
    pub(crate) session: SessionSettings,
    pub(crate) roster: AdminRoster,
    pub(crate) bind_addr: SocketAddr,
    pub(crate) db_pool: Option<DbPool>,
    pub(crate) seed_file: Option<PathBuf>,
    #[cfg(feature = "metrics")]
    pub(crate) prometheus: Option<PrometheusMetrics>,
}

impl ServerConfig {
    /// Construct a server configuration backed by the in-memory adapters.
    #[must_use]
    pub fn new(session: SessionSettings, roster: AdminRoster, bind_addr: SocketAddr) -> Self {
        Self {
            session,
            roster,
            bind_addr,
            db_pool: None,
            seed_file: None,
            #[cfg(feature = "metrics")]
            prometheus: None,
        }
    }

    /// Attach a database connection pool.
    ///
    /// With a pool the complaint store and identity gateway are the Diesel
    /// adapters and any seed file is ignored.
    #[must_use]
    pub fn with_db_pool(mut self, pool: DbPool) -> Self {
        self.db_pool = Some(pool);
        self
    }

    /// Preload the in-memory store from a JSON array of complaint documents.
    #[must_use]
    pub fn with_seed_file(mut self, path: Option<PathBuf>) -> Self {
        self.seed_file = path;
        self
    }

    /// Return the socket address the server will bind to.
    #[cfg_attr(
        not(any(test, doctest)),
        expect(dead_code, reason = "Exercised by integration tests")
    )]
    #[must_use]
    pub fn bind_addr(&self) -> SocketAddr {
        self.bind_addr
    }

    #[cfg(feature = "metrics")]
    /// Attach Prometheus middleware to the configuration.
    #[must_use]
    pub fn with_metrics(mut self, prometheus: Option<PrometheusMetrics>) -> Self {
        self.prometheus = prometheus;
        self
    }
}

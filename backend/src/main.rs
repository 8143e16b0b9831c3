//! Portal entry-point: loads settings, wires adapters, and starts the server.

mod server;

use std::io;

use actix_web::web;
use mockable::DefaultEnv;
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use grievance_backend::config::PortalSettings;
use grievance_backend::inbound::http::health::HealthState;
use grievance_backend::inbound::http::session_config::{BuildMode, session_settings_from_env};
use grievance_backend::outbound::persistence::{DbPool, PoolConfig, run_migrations};
use server::{ServerConfig, create_server};

/// Application bootstrap.
#[actix_web::main]
async fn main() -> io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = PortalSettings::load().map_err(|err| io::Error::other(err.to_string()))?;
    let bind_addr = settings.bind_address().map_err(io::Error::other)?;
    let roster = settings.admin_roster().map_err(io::Error::other)?;

    let session = session_settings_from_env(&DefaultEnv::new(), BuildMode::from_debug_assertions())
        .map_err(io::Error::other)?;
    info!(
        fingerprint = %session.fingerprint(),
        admins = roster.len(),
        "session key loaded"
    );

    let mut config = ServerConfig::new(session, roster, bind_addr);
    if let Some(database_url) = settings.database_url() {
        run_migrations(database_url).await.map_err(io::Error::other)?;
        let pool = DbPool::new(PoolConfig::new(database_url))
            .await
            .map_err(io::Error::other)?;
        config = config.with_db_pool(pool);
    } else {
        config = config.with_seed_file(settings.seed_file.clone());
    }

    #[cfg(feature = "metrics")]
    let config = config.with_metrics(server::portal_metrics());

    let health_state = web::Data::new(HealthState::new());
    let server = create_server(health_state.clone(), config)?;
    info!(%bind_addr, "grievance portal listening");
    let outcome = server.await;
    health_state.mark_unhealthy();
    outcome
}

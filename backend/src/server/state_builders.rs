//! Builders for the HTTP state: Diesel adapters when a pool is configured,
//! the in-memory document store otherwise.

use std::path::Path;
use std::sync::Arc;

use actix_web::web;
use tracing::info;

use grievance_backend::domain::ports::{
    AccountService, ComplaintCommand, ComplaintQuery, ComplaintStore, IdentityGateway,
};
use grievance_backend::domain::{AccountsService, ComplaintService};
use grievance_backend::inbound::http::state::{HttpState, HttpStatePorts};
use grievance_backend::outbound::memory::{
    MemoryComplaintStore, MemoryIdentityGateway, SeedError,
};
use grievance_backend::outbound::persistence::{DieselComplaintStore, DieselIdentityGateway};

use super::ServerConfig;

/// Errors raised while preparing adapters.
#[derive(Debug, thiserror::Error)]
pub enum StateBuildError {
    #[error("failed to read seed file {path}: {source}")]
    SeedRead {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid seed file {path}: {source}")]
    SeedParse {
        path: String,
        #[source]
        source: SeedError,
    },
}

impl From<StateBuildError> for std::io::Error {
    fn from(value: StateBuildError) -> Self {
        std::io::Error::other(value)
    }
}

type ComplaintPorts = (Arc<dyn ComplaintCommand>, Arc<dyn ComplaintQuery>);

/// Wrap a store in one [`ComplaintService`] shared by both complaint ports,
/// so the submission guard sees every request.
fn complaint_ports<S>(store: S) -> ComplaintPorts
where
    S: ComplaintStore + 'static,
{
    let service = Arc::new(ComplaintService::new(
        Arc::new(store),
        Arc::new(mockable::DefaultClock),
    ));
    (
        service.clone() as Arc<dyn ComplaintCommand>,
        service as Arc<dyn ComplaintQuery>,
    )
}

fn account_port<G>(gateway: G) -> Arc<dyn AccountService>
where
    G: IdentityGateway + 'static,
{
    Arc::new(AccountsService::new(Arc::new(gateway)))
}

fn seeded_store(path: Option<&Path>) -> Result<MemoryComplaintStore, StateBuildError> {
    let Some(path) = path else {
        return Ok(MemoryComplaintStore::new());
    };
    let path_display = path.display().to_string();
    let raw = std::fs::read_to_string(path).map_err(|source| StateBuildError::SeedRead {
        path: path_display.clone(),
        source,
    })?;
    let store = MemoryComplaintStore::from_json(&raw).map_err(|source| {
        StateBuildError::SeedParse {
            path: path_display.clone(),
            source,
        }
    })?;
    info!(path = %path_display, "in-memory complaint store seeded");
    Ok(store)
}

/// Build the shared HTTP state from the configured adapters.
///
/// # Errors
///
/// Returns [`StateBuildError`] when the seed file cannot be read or parsed.
pub(super) fn build_http_state(
    config: &ServerConfig,
) -> Result<web::Data<HttpState>, StateBuildError> {
    let ((complaints, complaints_query), accounts) = match &config.db_pool {
        Some(pool) => {
            info!("using PostgreSQL adapters");
            (
                complaint_ports(DieselComplaintStore::new(pool.clone())),
                account_port(DieselIdentityGateway::new(pool.clone())),
            )
        }
        None => {
            info!("using in-memory adapters");
            (
                complaint_ports(seeded_store(config.seed_file.as_deref())?),
                account_port(MemoryIdentityGateway::new()),
            )
        }
    };

    Ok(web::Data::new(HttpState::new(
        HttpStatePorts {
            accounts,
            complaints,
            complaints_query,
        },
        config.roster.clone(),
    )))
}

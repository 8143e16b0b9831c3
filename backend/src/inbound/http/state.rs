//! Shared HTTP adapter state.
//!
//! Handlers receive this through `web::Data` and only ever see the driving
//! ports, so they can be exercised with mocks and no I/O.

use std::sync::Arc;

use crate::domain::AdminRoster;
use crate::domain::ports::{AccountService, ComplaintCommand, ComplaintQuery};

/// Parameter object bundling the port implementations used by handlers.
#[derive(Clone)]
pub struct HttpStatePorts {
    pub accounts: Arc<dyn AccountService>,
    pub complaints: Arc<dyn ComplaintCommand>,
    pub complaints_query: Arc<dyn ComplaintQuery>,
}

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub accounts: Arc<dyn AccountService>,
    pub complaints: Arc<dyn ComplaintCommand>,
    pub complaints_query: Arc<dyn ComplaintQuery>,
    /// Emails holding the administrator role.
    pub roster: AdminRoster,
}

impl HttpState {
    pub fn new(ports: HttpStatePorts, roster: AdminRoster) -> Self {
        let HttpStatePorts {
            accounts,
            complaints,
            complaints_query,
        } = ports;
        Self {
            accounts,
            complaints,
            complaints_query,
            roster,
        }
    }
}

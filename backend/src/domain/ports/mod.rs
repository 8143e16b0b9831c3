//! Domain ports and supporting types for the hexagonal boundary.
//!
//! Driven ports ([`ComplaintStore`], [`IdentityGateway`]) are implemented by
//! outbound adapters. Driving ports ([`AccountService`], [`ComplaintCommand`],
//! [`ComplaintQuery`]) are implemented by domain services and called by
//! inbound adapters.

mod macros;
pub(crate) use macros::define_port_error;

mod account_service;
mod complaint_command;
mod complaint_query;
mod complaint_store;
mod identity_gateway;

#[cfg(test)]
pub use account_service::MockAccountService;
pub use account_service::AccountService;
#[cfg(test)]
pub use complaint_command::MockComplaintCommand;
pub use complaint_command::{ComplaintCommand, SubmissionOutcome, TransitionOutcome};
#[cfg(test)]
pub use complaint_query::MockComplaintQuery;
pub use complaint_query::ComplaintQuery;
#[cfg(test)]
pub use complaint_store::MockComplaintStore;
pub use complaint_store::{ComplaintStore, SortDirection, StoreError};
#[cfg(test)]
pub use identity_gateway::MockIdentityGateway;
pub use identity_gateway::{AuthError, INVALID_CREDENTIALS_MESSAGE, IdentityGateway};

//! In-process adapters for local runs and HTTP-level tests.
//!
//! Both adapters keep their state behind a `tokio` lock and are safe to share
//! across actix workers through `Arc`.

mod document_store;
mod identity_gateway;

pub use document_store::{MemoryComplaintStore, SeedError};
pub use identity_gateway::MemoryIdentityGateway;

//! Grievance portal backend library.
//!
//! Hexagonal layout: `domain` holds the complaint model, lifecycle, and
//! ports; `inbound` adapts HTTP onto the driving ports; `outbound` provides
//! the in-memory and PostgreSQL adapters for the driven ports.

pub mod config;
pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
pub use domain::TraceId;
pub use middleware::Trace;

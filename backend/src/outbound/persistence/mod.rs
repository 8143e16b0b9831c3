//! PostgreSQL persistence adapters using Diesel ORM.
//!
//! Adapters translate between Diesel rows and domain types only. Row structs
//! (`models.rs`) and table definitions (`schema.rs`) stay private to this
//! module; every database failure is mapped to the owning port's error type.
//!
//! # Example
//!
//! ```ignore
//! use grievance_backend::outbound::persistence::{DbPool, DieselComplaintStore, PoolConfig};
//!
//! let pool = DbPool::new(PoolConfig::new("postgres://localhost/grievances")).await?;
//! let store = DieselComplaintStore::new(pool);
//! ```

mod diesel_complaint_store;
mod diesel_identity_gateway;
mod error_mapping;
mod migrations;
mod models;
mod pool;
mod schema;

pub use diesel_complaint_store::DieselComplaintStore;
pub use diesel_identity_gateway::DieselIdentityGateway;
pub use migrations::{MigrationError, run_migrations};
pub use pool::{DbPool, PoolConfig, PoolError};

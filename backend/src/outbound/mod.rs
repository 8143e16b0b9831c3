//! Outbound adapters implementing the driven ports.
//!
//! - **memory**: document-shaped complaint store and account registry held
//!   in process, for development and HTTP-level tests.
//! - **persistence**: PostgreSQL adapters using Diesel ORM.
//! - **password**: Argon2id hashing shared by both identity gateways.
//!
//! Adapters translate between domain types and infrastructure
//! representations. They contain no business logic.

pub mod memory;
pub mod password;
pub mod persistence;

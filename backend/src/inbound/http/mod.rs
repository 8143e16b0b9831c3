//! HTTP inbound adapter: role-gated views and the JSON API.
//!
//! Handlers translate requests into calls on the driving ports held in
//! [`state::HttpState`] and map domain errors onto HTTP responses in
//! [`error`].

pub mod accounts;
pub mod cache_control;
pub mod complaint_dto;
pub mod complaints;
pub mod error;
pub mod health;
pub mod schemas;
pub mod session;
pub mod session_config;
pub mod state;
#[cfg(test)]
pub mod test_utils;
pub mod theme;
pub mod validation;
pub mod views;

pub use crate::domain::ApiResult;

//! Internal Diesel row structs for database operations.
//!
//! These types are implementation details of the persistence layer and must
//! never be exposed to the domain.

use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use super::schema::{accounts, complaints};

/// Row struct for reading from the accounts table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = accounts)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct AccountRow {
    pub email: String,
    pub password_hash: String,
}

/// Insertable struct for registering an account; `created_at` defaults to `now()`.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = accounts)]
pub(crate) struct NewAccountRow<'a> {
    pub email: &'a str,
    pub password_hash: &'a str,
}

/// Row struct for reading from the complaints table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = complaints)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct ComplaintRow {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub category: String,
    pub owner_email: String,
    pub status: String,
    pub created_at: Option<DateTime<Utc>>,
}

/// Insertable struct for filing a complaint; the id comes from the database.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = complaints)]
pub(crate) struct NewComplaintRow<'a> {
    pub title: &'a str,
    pub description: &'a str,
    pub category: &'a str,
    pub owner_email: &'a str,
    pub status: &'a str,
    pub created_at: Option<DateTime<Utc>>,
}

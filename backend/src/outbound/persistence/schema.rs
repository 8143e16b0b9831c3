//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match `backend/migrations` exactly. Regenerate with
//! `diesel print-schema` after changing a migration.

diesel::table! {
    /// Registered portal accounts.
    accounts (email) {
        /// Lower-cased sign-in email; primary key.
        email -> Varchar,
        /// Argon2id PHC string.
        password_hash -> Text,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Filed complaints.
    ///
    /// `status` is constrained to the four canonical spellings.
    complaints (id) {
        /// Primary key: UUID generated by the database.
        id -> Uuid,
        /// Subject line (max 200 characters).
        title -> Varchar,
        description -> Text,
        category -> Varchar,
        /// Email of the citizen who filed the complaint.
        owner_email -> Varchar,
        status -> Varchar,
        /// Null for imported rows without a creation time.
        created_at -> Nullable<Timestamptz>,
    }
}

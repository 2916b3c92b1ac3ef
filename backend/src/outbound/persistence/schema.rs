//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match `backend/migrations` exactly. Regenerate with
//! `diesel print-schema` after changing a migration.

diesel::table! {
    /// User rows.
    ///
    /// `id` is an identity column; rows inserted without an explicit id take
    /// the next sequence value.
    users (id) {
        /// Primary key assigned by the identity sequence.
        id -> Int8,
        /// Name recorded for the user.
        name -> Text,
    }
}

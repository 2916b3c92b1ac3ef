//! Row shapes for the `users` table. Repositories convert them to and from
//! domain types; nothing outside `persistence` sees them.

use diesel::prelude::*;

use super::schema::users;

/// A stored user as read back from PostgreSQL.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct UserRow {
    pub id: i64,
    pub name: String,
}

/// Insertable struct for rows whose id comes from the identity sequence.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = users)]
pub(crate) struct NewUserRow<'a> {
    pub name: &'a str,
}

/// Insertable struct for rows written under a caller-chosen id.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = users)]
pub(crate) struct UserRecord<'a> {
    pub id: i64,
    pub name: &'a str,
}

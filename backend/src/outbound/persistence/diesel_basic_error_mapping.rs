//! Shared Diesel error mapping for repositories with basic query semantics.

use tracing::debug;

use super::pool::PoolError;

/// Map pool errors into a repository-specific connection error constructor.
pub(crate) fn map_basic_pool_error<E, C>(error: PoolError, connection: C) -> E
where
    C: FnOnce(String) -> E,
{
    let message = match error {
        PoolError::Checkout { message } | PoolError::Build { message } => message,
    };
    debug!(%message, "connection pool checkout failed");
    connection(message)
}

/// Map Diesel errors into query/connection constructors.
///
/// Closed connections become connection errors; everything else is a query
/// error with a generic message. Driver details are logged, not returned.
pub(crate) fn map_basic_diesel_error<E, Q, C>(
    error: diesel::result::Error,
    query: Q,
    connection: C,
) -> E
where
    Q: FnOnce(&'static str) -> E,
    C: FnOnce(&'static str) -> E,
{
    use diesel::result::{DatabaseErrorKind, Error as DieselError};

    match &error {
        DieselError::DatabaseError(kind, info) => {
            debug!(?kind, message = info.message(), "diesel operation failed");
        }
        other => debug!(error = %other, "diesel operation failed"),
    }

    match error {
        DieselError::NotFound => query("record not found"),
        DieselError::QueryBuilderError(_) => query("database query error"),
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
            connection("database connection error")
        }
        _ => query("database error"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::UserPersistenceError;
    use diesel::result::{DatabaseErrorKind, Error as DieselError};

    fn map(error: DieselError) -> UserPersistenceError {
        map_basic_diesel_error(
            error,
            UserPersistenceError::query,
            UserPersistenceError::connection,
        )
    }

    #[test]
    fn closed_connection_maps_to_connection_error() {
        let error = DieselError::DatabaseError(
            DatabaseErrorKind::ClosedConnection,
            Box::new(String::from("server closed the connection")),
        );
        assert_eq!(
            map(error),
            UserPersistenceError::connection("database connection error")
        );
    }

    #[test]
    fn not_found_maps_to_query_error() {
        assert_eq!(
            map(DieselError::NotFound),
            UserPersistenceError::query("record not found")
        );
    }

    #[test]
    fn pool_errors_keep_their_message() {
        let error: UserPersistenceError =
            map_basic_pool_error(PoolError::checkout("timed out"), |message| {
                UserPersistenceError::connection(message)
            });
        assert_eq!(error, UserPersistenceError::connection("timed out"));
    }
}

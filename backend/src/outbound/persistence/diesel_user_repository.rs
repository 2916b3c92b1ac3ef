//! PostgreSQL-backed `UserRepository` implementation using Diesel ORM.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel::upsert::excluded;
use diesel_async::AsyncConnection as _;
use diesel_async::RunQueryDsl;
use diesel_async::scoped_futures::ScopedFutureExt as _;

use crate::domain::ports::{UserPersistenceError, UserRepository};
use crate::domain::{User, UserDraft, UserId};

use super::diesel_basic_error_mapping::{map_basic_diesel_error, map_basic_pool_error};
use super::models::{NewUserRow, UserRecord, UserRow};
use super::pool::{DbPool, PoolError};
use super::schema::users;

/// Moves the identity sequence past a caller-chosen id so later generated ids
/// never collide with it. The sequence only ever moves forward: ids handed
/// out before, including those of deleted rows, are never issued again.
const RESYNC_ID_SEQUENCE: &str = "SELECT setval(\
     pg_get_serial_sequence('users', 'id'), \
     GREATEST(\
         COALESCE((SELECT MAX(id) FROM users), 1), \
         COALESCE(pg_sequence_last_value(pg_get_serial_sequence('users', 'id')::regclass), 1)\
     ))";

/// Diesel-backed implementation of the user repository port.
#[derive(Clone)]
pub struct DieselUserRepository {
    pool: DbPool,
}

impl DieselUserRepository {
    /// Create a new repository with the given connection pool.
    ///
    /// # Examples
    ///
    /// ```rust,ignore
    /// let config = PoolConfig::new("postgres://localhost/users");
    /// let pool = DbPool::new(config).await?;
    /// let repo = DieselUserRepository::new(pool);
    /// ```
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> UserPersistenceError {
    map_basic_pool_error(error, |message| UserPersistenceError::connection(message))
}

fn map_diesel_error(error: diesel::result::Error) -> UserPersistenceError {
    map_basic_diesel_error(
        error,
        UserPersistenceError::query,
        UserPersistenceError::connection,
    )
}

fn row_to_user(row: UserRow) -> Result<User, UserPersistenceError> {
    let id = UserId::new(row.id).map_err(|err| {
        UserPersistenceError::query(format!("stored user id {} is invalid: {err}", row.id))
    })?;
    Ok(User::new(id, row.name))
}

#[async_trait]
impl UserRepository for DieselUserRepository {
    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: Option<UserRow> = users::table
            .find(id.get())
            .select(UserRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        row.map(row_to_user).transpose()
    }

    async fn save(&self, draft: &UserDraft) -> Result<User, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: UserRow = match draft.id() {
            None => diesel::insert_into(users::table)
                .values(NewUserRow { name: draft.name() })
                .returning(UserRow::as_returning())
                .get_result(&mut conn)
                .await
                .map_err(map_diesel_error)?,
            Some(id) => {
                let record = UserRecord {
                    id: id.get(),
                    name: draft.name(),
                };
                conn.transaction(|conn| {
                    async move {
                        let row = diesel::insert_into(users::table)
                            .values(&record)
                            .on_conflict(users::id)
                            .do_update()
                            .set(users::name.eq(excluded(users::name)))
                            .returning(UserRow::as_returning())
                            .get_result(conn)
                            .await?;
                        diesel::sql_query(RESYNC_ID_SEQUENCE).execute(conn).await?;
                        Ok::<_, diesel::result::Error>(row)
                    }
                    .scope_boxed()
                })
                .await
                .map_err(map_diesel_error)?
            }
        };

        row_to_user(row)
    }

    async fn delete_by_id(&self, id: UserId) -> Result<(), UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        diesel::delete(users::table.find(id.get()))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(())
    }
}

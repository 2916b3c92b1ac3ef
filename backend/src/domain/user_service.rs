//! User domain service.
//!
//! Orchestrates repository calls behind the [`UsersQuery`] and
//! [`UsersCommand`] driving ports. The service keeps no state between calls:
//! reads apply the not-found policy, saves pass through the validation hook,
//! and deletes notify the deletion listener unconditionally.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

use crate::domain::ports::{
    AcceptAllUsers, NoOpUserDeletionListener, UserDeletionListener, UserPersistenceError,
    UserRepository, UserValidator, UsersCommand, UsersQuery,
};
use crate::domain::{Error, User, UserDraft, UserId};

/// User service implementing the driving ports.
#[derive(Clone)]
pub struct UserService<R, V = AcceptAllUsers, L = NoOpUserDeletionListener> {
    repository: Arc<R>,
    validator: Arc<V>,
    deletion_listener: Arc<L>,
}

impl<R> UserService<R> {
    /// Create a service with the default no-op hooks.
    pub fn new(repository: Arc<R>) -> Self {
        Self::with_hooks(
            repository,
            Arc::new(AcceptAllUsers),
            Arc::new(NoOpUserDeletionListener),
        )
    }
}

impl<R, V, L> UserService<R, V, L> {
    /// Create a service with explicit validation and deletion hooks.
    pub fn with_hooks(repository: Arc<R>, validator: Arc<V>, deletion_listener: Arc<L>) -> Self {
        Self {
            repository,
            validator,
            deletion_listener,
        }
    }
}

fn map_persistence_error(error: UserPersistenceError) -> Error {
    match error {
        UserPersistenceError::Connection { message } => {
            Error::service_unavailable(format!("user repository unavailable: {message}"))
        }
        UserPersistenceError::Query { message } => {
            Error::internal(format!("user repository error: {message}"))
        }
    }
}

#[async_trait]
impl<R, V, L> UsersQuery for UserService<R, V, L>
where
    R: UserRepository,
    V: UserValidator,
    L: UserDeletionListener,
{
    async fn find_by_id(&self, id: UserId) -> Result<User, Error> {
        let user = self
            .repository
            .find_by_id(id)
            .await
            .map_err(map_persistence_error)?;

        user.ok_or_else(|| {
            debug!(user_id = %id, "user lookup found no row");
            Error::not_found(format!("user {id} not found"))
        })
    }
}

#[async_trait]
impl<R, V, L> UsersCommand for UserService<R, V, L>
where
    R: UserRepository,
    V: UserValidator,
    L: UserDeletionListener,
{
    async fn save(&self, draft: UserDraft) -> Result<User, Error> {
        self.validator.validate(&draft)?;
        self.repository
            .save(&draft)
            .await
            .map_err(map_persistence_error)
    }

    async fn delete_by_id(&self, id: UserId) -> Result<(), Error> {
        self.repository
            .delete_by_id(id)
            .await
            .map_err(map_persistence_error)?;
        self.deletion_listener.user_deleted(id);
        Ok(())
    }
}

#[cfg(test)]
#[path = "user_service_tests.rs"]
mod tests;

//! Driving port for user mutations.

use async_trait::async_trait;

use crate::domain::{Error, User, UserDraft, UserId};

/// Domain use-case port for creating, overwriting and deleting users.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UsersCommand: Send + Sync {
    /// Persist `draft` and return the stored user.
    async fn save(&self, draft: UserDraft) -> Result<User, Error>;

    /// Delete the user stored under `id`. Unknown identifiers succeed.
    async fn delete_by_id(&self, id: UserId) -> Result<(), Error>;
}

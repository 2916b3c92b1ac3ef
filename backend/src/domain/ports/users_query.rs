//! Driving port for user reads.
//!
//! Inbound adapters (HTTP handlers) use this port to fetch users without
//! importing outbound persistence concerns.

use async_trait::async_trait;

use crate::domain::{Error, User, UserId};

/// Domain use-case port for looking users up.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UsersQuery: Send + Sync {
    /// Return the user stored under `id`.
    ///
    /// Fails with [`crate::domain::ErrorCode::NotFound`] when no such user
    /// exists.
    async fn find_by_id(&self, id: UserId) -> Result<User, Error>;
}

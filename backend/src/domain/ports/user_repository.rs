//! Port abstraction for user persistence adapters and their errors.
//!
//! The repository is a thin typed accessor over the data store. It performs
//! no validation and applies no not-found policy; both belong to the user
//! service.

use async_trait::async_trait;

use crate::domain::{User, UserDraft, UserId};

/// Failures reported by [`UserRepository`] adapters.
///
/// The user service maps `Connection` to `service_unavailable` and `Query` to
/// `internal_error`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UserPersistenceError {
    /// The store could not be reached, or a pooled connection was lost.
    #[error("user repository connection failed: {message}")]
    Connection { message: String },
    /// The store was reached but the statement failed.
    #[error("user repository query failed: {message}")]
    Query { message: String },
}

impl UserPersistenceError {
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection {
            message: message.into(),
        }
    }

    pub fn query(message: impl Into<String>) -> Self {
        Self::Query {
            message: message.into(),
        }
    }
}

/// Storage capability for user rows.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Fetch a user by identifier, returning `None` when no row matches.
    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, UserPersistenceError>;

    /// Insert or overwrite a user row.
    ///
    /// Drafts without an identifier are inserted under a fresh identifier.
    /// Drafts with one replace the stored row, or create it under that
    /// identifier when absent. Returns the persisted representation.
    async fn save(&self, draft: &UserDraft) -> Result<User, UserPersistenceError>;

    /// Remove the row stored under `id`.
    ///
    /// Missing rows are not an error.
    async fn delete_by_id(&self, id: UserId) -> Result<(), UserPersistenceError>;
}

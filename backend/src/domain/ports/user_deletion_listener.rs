//! Extension point notified after a delete request completes.

use crate::domain::UserId;

/// Observer invoked after every delete, whether or not a row existed.
#[cfg_attr(test, mockall::automock)]
pub trait UserDeletionListener: Send + Sync {
    /// Record that a delete for `id` completed.
    fn user_deleted(&self, id: UserId);
}

/// Listener that ignores deletions.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoOpUserDeletionListener;

impl UserDeletionListener for NoOpUserDeletionListener {
    fn user_deleted(&self, _id: UserId) {}
}

//! Deletion listener that records completed deletes in the tracing stream.

use tracing::info;

use crate::domain::UserId;
use crate::domain::ports::UserDeletionListener;

/// Emits one `info` event per completed delete request.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingUserDeletionListener;

impl UserDeletionListener for TracingUserDeletionListener {
    fn user_deleted(&self, id: UserId) {
        info!(user_id = %id, "user delete completed");
    }
}

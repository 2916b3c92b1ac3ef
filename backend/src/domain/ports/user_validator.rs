//! Extension point consulted before a user is saved.

use crate::domain::{Error, UserDraft};

/// Pre-save check applied to every draft.
///
/// A rejection is returned to the caller unchanged and the draft is not
/// persisted.
#[cfg_attr(test, mockall::automock)]
pub trait UserValidator: Send + Sync {
    /// Accept or reject `draft`.
    fn validate(&self, draft: &UserDraft) -> Result<(), Error>;
}

/// Validator that accepts every draft.
#[derive(Debug, Default, Clone, Copy)]
pub struct AcceptAllUsers;

impl UserValidator for AcceptAllUsers {
    fn validate(&self, _draft: &UserDraft) -> Result<(), Error> {
        Ok(())
    }
}

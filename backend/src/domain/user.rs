//! User data model.

use std::fmt;

/// Validation errors returned by the user constructors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UserValidationError {
    /// Identifiers are assigned from 1 upwards by the data store.
    #[error("user id must be a positive integer, got {value}")]
    NonPositiveId { value: i64 },
}

/// Store-assigned user identifier.
///
/// ## Invariants
/// - Always strictly positive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct UserId(i64);

impl UserId {
    /// Validate and construct a [`UserId`].
    ///
    /// # Examples
    /// ```
    /// use users_api::domain::UserId;
    ///
    /// assert_eq!(UserId::new(1).map(UserId::get), Ok(1));
    /// assert!(UserId::new(0).is_err());
    /// ```
    pub fn new(value: i64) -> Result<Self, UserValidationError> {
        if value <= 0 {
            return Err(UserValidationError::NonPositiveId { value });
        }
        Ok(Self(value))
    }

    /// Raw integer value.
    pub fn get(self) -> i64 {
        self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<i64> for UserId {
    type Error = UserValidationError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<UserId> for i64 {
    fn from(value: UserId) -> Self {
        value.0
    }
}

/// Persisted application user.
///
/// A `User` always carries the identifier the data store assigned to it; use
/// [`UserDraft`] for records that have not been saved yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    id: UserId,
    name: String,
}

impl User {
    /// Build a user from a stored identifier and its attributes.
    pub fn new(id: UserId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }

    /// Stable user identifier.
    pub fn id(&self) -> UserId {
        self.id
    }

    /// Name recorded for the user.
    pub fn name(&self) -> &str {
        self.name.as_str()
    }
}

/// Write model accepted by save operations.
///
/// Without an identifier the draft describes a new row; with one it replaces
/// whatever is stored under that identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserDraft {
    id: Option<UserId>,
    name: String,
}

impl UserDraft {
    /// Draft for a user that does not exist yet.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: None,
            name: name.into(),
        }
    }

    /// Target an existing identifier, turning the save into an overwrite.
    pub fn with_id(mut self, id: UserId) -> Self {
        self.id = Some(id);
        self
    }

    /// Identifier to overwrite, if any.
    pub fn id(&self) -> Option<UserId> {
        self.id
    }

    /// Name to persist.
    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    /// Materialise the draft under the identifier chosen by the store.
    pub fn into_user(self, id: UserId) -> User {
        User::new(id, self.name)
    }
}

impl From<User> for UserDraft {
    fn from(value: User) -> Self {
        let User { id, name } = value;
        Self { id: Some(id), name }
    }
}

//! In-process `UserRepository` adapter.
//!
//! Rows live in an ordered map keyed by identifier. Identifiers are handed out
//! from a counter that starts at 1; explicit identifiers written through an
//! overwrite advance the counter so later inserts never reuse them. The
//! server falls back to this adapter when no database is configured, and
//! tests use it as a deterministic data store.

use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;

use crate::domain::ports::{UserPersistenceError, UserRepository};
use crate::domain::{User, UserDraft, UserId};

#[derive(Debug)]
struct Rows {
    users: BTreeMap<UserId, User>,
    next_id: i64,
}

impl Default for Rows {
    fn default() -> Self {
        Self {
            users: BTreeMap::new(),
            next_id: 1,
        }
    }
}

impl Rows {
    fn allocate_id(&mut self) -> Result<UserId, UserPersistenceError> {
        let id = UserId::new(self.next_id)
            .map_err(|err| UserPersistenceError::query(format!("id allocation failed: {err}")))?;
        self.next_id = self
            .next_id
            .checked_add(1)
            .ok_or_else(|| UserPersistenceError::query("user id space exhausted"))?;
        Ok(id)
    }

    fn reserve(&mut self, id: UserId) {
        if id.get() >= self.next_id {
            self.next_id = id.get().saturating_add(1);
        }
    }
}

/// Thread-safe in-memory user store.
#[derive(Debug, Default)]
pub struct InMemoryUserRepository {
    rows: Mutex<Rows>,
}

impl InMemoryUserRepository {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored users.
    ///
    /// # Errors
    ///
    /// Fails with a query error once a panic has poisoned the store, the same
    /// as every repository operation.
    pub fn len(&self) -> Result<usize, UserPersistenceError> {
        Ok(self.rows()?.users.len())
    }

    /// Whether the store holds no users. Errors as [`Self::len`].
    pub fn is_empty(&self) -> Result<bool, UserPersistenceError> {
        self.len().map(|count| count == 0)
    }

    fn rows(&self) -> Result<MutexGuard<'_, Rows>, UserPersistenceError> {
        self.rows
            .lock()
            .map_err(|_| UserPersistenceError::query("user store lock poisoned"))
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, UserPersistenceError> {
        Ok(self.rows()?.users.get(&id).cloned())
    }

    async fn save(&self, draft: &UserDraft) -> Result<User, UserPersistenceError> {
        let mut rows = self.rows()?;
        let id = match draft.id() {
            Some(id) => {
                rows.reserve(id);
                id
            }
            None => rows.allocate_id()?,
        };
        let user = draft.clone().into_user(id);
        rows.users.insert(id, user.clone());
        Ok(user)
    }

    async fn delete_by_id(&self, id: UserId) -> Result<(), UserPersistenceError> {
        self.rows()?.users.remove(&id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    //! Storage semantics of the in-memory adapter.
    use super::*;
    use rstest::{fixture, rstest};

    fn user_id(value: i64) -> UserId {
        UserId::new(value).expect("valid user id")
    }

    #[fixture]
    fn repository() -> InMemoryUserRepository {
        InMemoryUserRepository::new()
    }

    #[rstest]
    #[tokio::test]
    async fn inserts_assign_sequential_ids(repository: InMemoryUserRepository) {
        let alice = repository
            .save(&UserDraft::new("Alice"))
            .await
            .expect("insert alice");
        let bob = repository
            .save(&UserDraft::new("Bob"))
            .await
            .expect("insert bob");

        assert_eq!(alice, User::new(user_id(1), "Alice"));
        assert_eq!(bob, User::new(user_id(2), "Bob"));
        assert_eq!(repository.len(), Ok(2));
    }

    #[rstest]
    #[tokio::test]
    async fn saved_rows_are_retrievable(repository: InMemoryUserRepository) {
        let saved = repository
            .save(&UserDraft::new("Alice"))
            .await
            .expect("insert");
        let found = repository.find_by_id(saved.id()).await.expect("lookup");
        assert_eq!(found, Some(saved));
    }

    #[rstest]
    #[tokio::test]
    async fn save_with_existing_id_overwrites(repository: InMemoryUserRepository) {
        let saved = repository
            .save(&UserDraft::new("Alice"))
            .await
            .expect("insert");
        let updated = repository
            .save(&UserDraft::new("Alicia").with_id(saved.id()))
            .await
            .expect("overwrite");

        assert_eq!(updated.id(), saved.id());
        let found = repository.find_by_id(saved.id()).await.expect("lookup");
        assert_eq!(found.map(|user| user.name().to_owned()), Some("Alicia".to_owned()));
        assert_eq!(repository.len(), Ok(1));
    }

    #[rstest]
    #[tokio::test]
    async fn explicit_ids_are_never_reallocated(repository: InMemoryUserRepository) {
        repository
            .save(&UserDraft::new("Zed").with_id(user_id(10)))
            .await
            .expect("insert with explicit id");
        let next = repository
            .save(&UserDraft::new("Amy"))
            .await
            .expect("insert");
        assert_eq!(next.id(), user_id(11));
    }

    #[rstest]
    #[tokio::test]
    async fn delete_removes_row(repository: InMemoryUserRepository) {
        let saved = repository
            .save(&UserDraft::new("Alice"))
            .await
            .expect("insert");
        repository.delete_by_id(saved.id()).await.expect("delete");
        assert_eq!(repository.find_by_id(saved.id()).await.expect("lookup"), None);
        assert_eq!(repository.is_empty(), Ok(true));
    }

    #[rstest]
    #[tokio::test]
    async fn delete_of_missing_row_is_a_no_op(repository: InMemoryUserRepository) {
        repository
            .delete_by_id(user_id(99))
            .await
            .expect("missing rows are ignored");
        assert_eq!(repository.is_empty(), Ok(true));
    }

    #[rstest]
    #[tokio::test]
    async fn deleted_ids_are_not_reused(repository: InMemoryUserRepository) {
        let first = repository
            .save(&UserDraft::new("Alice"))
            .await
            .expect("insert");
        repository.delete_by_id(first.id()).await.expect("delete");
        let second = repository
            .save(&UserDraft::new("Bob"))
            .await
            .expect("insert");
        assert_ne!(first.id(), second.id());
    }

    #[rstest]
    fn poisoned_store_reports_an_error_rather_than_zero(repository: InMemoryUserRepository) {
        std::thread::scope(|scope| {
            let holder = scope.spawn(|| {
                let _rows = repository.rows.lock();
                panic!("panic while holding the store lock");
            });
            assert!(holder.join().is_err());
        });

        assert!(matches!(
            repository.len(),
            Err(UserPersistenceError::Query { .. })
        ));
        assert!(repository.is_empty().is_err());
    }
}

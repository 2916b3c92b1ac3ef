//! Domain ports and supporting types for the hexagonal boundary.

mod user_deletion_listener;
mod user_repository;
mod user_validator;
mod users_command;
mod users_query;

#[cfg(test)]
pub use user_deletion_listener::MockUserDeletionListener;
pub use user_deletion_listener::{NoOpUserDeletionListener, UserDeletionListener};
#[cfg(test)]
pub use user_repository::MockUserRepository;
pub use user_repository::{UserPersistenceError, UserRepository};
#[cfg(test)]
pub use user_validator::MockUserValidator;
pub use user_validator::{AcceptAllUsers, UserValidator};
#[cfg(test)]
pub use users_command::MockUsersCommand;
pub use users_command::UsersCommand;
#[cfg(test)]
pub use users_query::MockUsersQuery;
pub use users_query::UsersQuery;

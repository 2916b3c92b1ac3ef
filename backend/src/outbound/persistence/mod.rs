//! PostgreSQL persistence adapters using Diesel ORM.
//!
//! Repositories translate between domain types and Diesel rows and map
//! driver failures onto [`UserPersistenceError`]. Row structs and the schema
//! stay private to this module.
//!
//! [`UserPersistenceError`]: crate::domain::ports::UserPersistenceError

mod diesel_basic_error_mapping;
mod diesel_user_repository;
mod migrations;
mod models;
mod pool;
mod schema;

pub use diesel_user_repository::DieselUserRepository;
pub use migrations::{MigrationError, run_pending_migrations};
pub use pool::{DbPool, PoolConfig, PoolError};

//! Outbound adapters implementing domain ports for external infrastructure.
//!
//! - **persistence**: PostgreSQL-backed repository using Diesel ORM
//! - **memory**: process-local repository used when no database is configured
//! - **audit**: deletion listener that writes to the tracing stream
//!
//! Adapters translate between domain types and infrastructure representations.
//! They contain no business logic.

pub mod audit;
pub mod memory;
pub mod persistence;

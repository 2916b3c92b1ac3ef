//! User records REST service.
//!
//! Hexagonal layout: [`domain`] holds the user model, the ports and the user
//! service; [`inbound`] adapts HTTP requests onto the driving ports;
//! [`outbound`] provides the PostgreSQL and in-memory repositories;
//! [`server`] wires them together.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;
pub mod server;
pub mod settings;

pub use doc::ApiDoc;
pub use middleware::Trace;

//! Domain primitives, ports and services.
//!
//! Purpose: define the user entity, the transport-agnostic error type and the
//! service that applies the read/save/delete policies on top of the
//! repository port. Nothing in this module depends on HTTP or database
//! frameworks.
//!
//! Public surface:
//! - Error / ErrorCode: failure payload and its stable code.
//! - TraceId: request correlation identifier.
//! - User / UserDraft / UserId: the user entity and its write model.
//! - UserService: implementation of the user driving ports.

pub mod error;
pub mod ports;
pub mod trace_id;
pub mod user;
pub mod user_service;

pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};
pub use self::user::{User, UserDraft, UserId, UserValidationError};
pub use self::user_service::UserService;

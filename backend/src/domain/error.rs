//! Failure payload shared by every port and adapter.
//!
//! The domain decides the category of a failure; adapters decide how that
//! category is rendered for their protocol.

#![deny(missing_docs)]

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::TraceId;

/// Failure category. Adapters key their status mapping off this value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[non_exhaustive]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    /// Malformed identifier or body.
    InvalidRequest,
    /// No user is stored under the requested id.
    NotFound,
    /// The user store could not be reached.
    ServiceUnavailable,
    /// Any other failure. Its message is never shown to clients.
    InternalError,
}

impl ErrorCode {
    /// Message used when a caller supplies a blank one.
    pub fn default_message(self) -> &'static str {
        match self {
            Self::InvalidRequest => "invalid request",
            Self::NotFound => "resource not found",
            Self::ServiceUnavailable => "service unavailable",
            Self::InternalError => "internal server error",
        }
    }
}

/// Rejection raised by [`Error::try_new`] and by deserialisation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ErrorValidationError {
    /// The message was blank once trimmed.
    #[error("error message must not be empty")]
    EmptyMessage,
}

/// A categorised failure with a non-blank message.
///
/// Errors built while a request is in flight record that request's
/// [`TraceId`], so the JSON body and the `trace-id` header agree.
///
/// ```
/// use users_api::domain::{Error, ErrorCode};
///
/// let err = Error::not_found("user 7 not found");
/// assert_eq!(err.code(), ErrorCode::NotFound);
/// assert_eq!(err.message(), "user 7 not found");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "RawError")]
pub struct Error {
    code: ErrorCode,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    trace_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<Value>,
}

impl Error {
    /// Build an error of `code`. A blank `message` is replaced by
    /// [`ErrorCode::default_message`].
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        let message = message.into();
        let message = if message.trim().is_empty() {
            code.default_message().to_owned()
        } else {
            message
        };
        Self::stamped(code, message)
    }

    /// Like [`Error::new`] but refuses a blank message.
    ///
    /// # Errors
    ///
    /// [`ErrorValidationError::EmptyMessage`] when `message` is blank.
    pub fn try_new(
        code: ErrorCode,
        message: impl Into<String>,
    ) -> Result<Self, ErrorValidationError> {
        let message = message.into();
        if message.trim().is_empty() {
            return Err(ErrorValidationError::EmptyMessage);
        }
        Ok(Self::stamped(code, message))
    }

    fn stamped(code: ErrorCode, message: String) -> Self {
        Self {
            code,
            message,
            trace_id: TraceId::current().map(|id| id.to_string()),
            details: None,
        }
    }

    /// Shorthand for [`ErrorCode::InvalidRequest`].
    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidRequest, message)
    }

    /// Shorthand for [`ErrorCode::NotFound`].
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::NotFound, message)
    }

    /// Shorthand for [`ErrorCode::ServiceUnavailable`].
    pub fn service_unavailable(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ServiceUnavailable, message)
    }

    /// Shorthand for [`ErrorCode::InternalError`].
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InternalError, message)
    }

    /// Failure category.
    pub fn code(&self) -> ErrorCode {
        self.code
    }

    /// Client-facing description.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Trace id of the request that raised this error, if any.
    pub fn trace_id(&self) -> Option<&str> {
        self.trace_id.as_deref()
    }

    /// Structured context attached with [`Error::with_details`].
    pub fn details(&self) -> Option<&Value> {
        self.details.as_ref()
    }

    /// Replace the recorded trace id.
    pub fn with_trace_id(self, id: impl Into<String>) -> Self {
        Self {
            trace_id: Some(id.into()),
            ..self
        }
    }

    /// Attach machine-readable context, for example the offending field.
    ///
    /// ```
    /// use serde_json::json;
    /// use users_api::domain::Error;
    ///
    /// let err = Error::invalid_request("bad id").with_details(json!({ "field": "id" }));
    /// assert_eq!(err.details(), Some(&json!({ "field": "id" })));
    /// ```
    pub fn with_details(self, details: Value) -> Self {
        Self {
            details: Some(details),
            ..self
        }
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for Error {}

/// Incoming payload, validated before it becomes an [`Error`]. The payload's
/// own trace id is kept as-is; the ambient one is never adopted.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
struct RawError {
    code: ErrorCode,
    message: String,
    #[serde(default)]
    trace_id: Option<String>,
    #[serde(default)]
    details: Option<Value>,
}

impl TryFrom<RawError> for Error {
    type Error = ErrorValidationError;

    fn try_from(raw: RawError) -> Result<Self, Self::Error> {
        if raw.message.trim().is_empty() {
            return Err(ErrorValidationError::EmptyMessage);
        }
        Ok(Self {
            code: raw.code,
            message: raw.message,
            trace_id: raw.trace_id,
            details: raw.details,
        })
    }
}

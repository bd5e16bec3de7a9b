//! Domain error taxonomy.
//!
//! Every failure that leaves the service layer carries exactly one
//! [`ErrorContext`]. Validation and business rules raise context-only errors;
//! storage wraps the driver error it received so the cause stays available
//! for logging.

use std::error::Error as StdError;
use std::fmt;

use thiserror::Error;

/// Boxed lower-layer error kept alongside a classification.
pub type BoxedCause = Box<dyn StdError + Send + Sync + 'static>;

/// Closed set of failure contexts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorContext {
    NotFound,
    MethodNotSupported,
    Internal,
    Conflict,
    BadRequest,
}

impl ErrorContext {
    /// Stable machine-readable tag.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::NotFound => "resource_not_found",
            Self::MethodNotSupported => "method_not_supported",
            Self::Internal => "internal_server_error",
            Self::Conflict => "value_conflict",
            Self::BadRequest => "bad_request",
        }
    }
}

impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classified failure: a context tag, a reason, and an optional cause.
#[derive(Debug, Error)]
#[error("{context}: {reason}")]
pub struct DomainError {
    context: ErrorContext,
    reason: String,
    #[source]
    cause: Option<BoxedCause>,
}

impl DomainError {
    /// Error with no underlying cause, e.g. a rejected business rule.
    pub fn new(context: ErrorContext, reason: impl Into<String>) -> Self {
        Self { context, reason: reason.into(), cause: None }
    }

    /// Error that preserves the lower-layer failure that triggered it.
    pub fn wrap<E>(cause: E, context: ErrorContext, reason: impl Into<String>) -> Self
    where
        E: Into<BoxedCause>,
    {
        Self { context, reason: reason.into(), cause: Some(cause.into()) }
    }

    pub fn bad_request(reason: impl Into<String>) -> Self {
        Self::new(ErrorContext::BadRequest, reason)
    }

    pub fn not_found(reason: impl Into<String>) -> Self {
        Self::new(ErrorContext::NotFound, reason)
    }

    pub fn conflict(reason: impl Into<String>) -> Self {
        Self::new(ErrorContext::Conflict, reason)
    }

    pub fn internal(reason: impl Into<String>) -> Self {
        Self::new(ErrorContext::Internal, reason)
    }

    pub fn method_not_supported(reason: impl Into<String>) -> Self {
        Self::new(ErrorContext::MethodNotSupported, reason)
    }

    #[must_use]
    pub const fn context(&self) -> ErrorContext {
        self.context
    }

    #[must_use]
    pub fn reason(&self) -> &str {
        &self.reason
    }

    /// Underlying error, present only for wrapped errors.
    #[must_use]
    pub fn cause(&self) -> Option<&(dyn StdError + Send + Sync + 'static)> {
        self.cause.as_deref()
    }

    #[must_use]
    pub const fn is_wrapped(&self) -> bool {
        self.cause.is_some()
    }
}

pub type Result<T> = std::result::Result<T, DomainError>;

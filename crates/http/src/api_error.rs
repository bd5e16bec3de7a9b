//! Boundary translator from classified errors to HTTP responses.
//!
//! Every failure leaves the server as a status code plus the standard error
//! envelope. `DomainError`s map by their context tag; anything else is an
//! unclassified defect and becomes a 500 carrying only its display text.

use std::error::Error as StdError;

use axum::Json;
use axum::http::{Method, StatusCode};
use axum::response::{IntoResponse, Response};
use userbase_core::{DomainError, ErrorContext};

use crate::response_types::ApiResponse;

/// Status code and client-facing description of a failed request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiError {
    pub status: StatusCode,
    pub description: String,
}

impl ApiError {
    pub fn new(status: StatusCode, description: impl Into<String>) -> Self {
        Self { status, description: description.into() }
    }

    #[must_use]
    pub fn from_domain(err: &DomainError) -> Self {
        if err.context() == ErrorContext::Internal {
            tracing::error!(error = ?err, "internal server error");
        }
        Self::new(status_for(err.context()), err.reason())
    }

    /// Find the first `DomainError` in `err`'s source chain and map it.
    /// Unclassified errors become 500 with their display text.
    #[must_use]
    pub fn translate(err: &(dyn StdError + 'static)) -> Self {
        std::iter::successors(Some(err), |&e| e.source())
            .find_map(|e| e.downcast_ref::<DomainError>())
            .map_or_else(|| Self::unclassified(err), Self::from_domain)
    }

    fn unclassified(err: impl std::fmt::Display) -> Self {
        tracing::error!(error = %err, "unclassified server error");
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, err.to_string())
    }

    #[must_use]
    pub fn method_not_allowed(method: &Method) -> Self {
        Self::new(
            StatusCode::METHOD_NOT_ALLOWED,
            format!("HTTP method {method} is not allowed for this endpoint"),
        )
    }
}

const fn status_for(context: ErrorContext) -> StatusCode {
    match context {
        ErrorContext::NotFound => StatusCode::NOT_FOUND,
        ErrorContext::MethodNotSupported => StatusCode::METHOD_NOT_ALLOWED,
        ErrorContext::Conflict => StatusCode::CONFLICT,
        ErrorContext::BadRequest => StatusCode::BAD_REQUEST,
        ErrorContext::Internal => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        Self::from_domain(&err)
    }
}

impl From<anyhow::Error> for ApiError {
    fn from(err: anyhow::Error) -> Self {
        err.chain()
            .find_map(|e| e.downcast_ref::<DomainError>())
            .map_or_else(|| Self::unclassified(&err), Self::from_domain)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        // Server errors were already logged with their cause chain.
        if !self.status.is_server_error() {
            tracing::warn!(status = %self.status, description = %self.description, "request rejected");
        }
        (self.status, Json(ApiResponse::<()>::failure(self.description))).into_response()
    }
}

#![allow(clippy::single_call_fn, reason = "HTTP handlers are called once from router")]

pub mod users;

use std::future::Future;
use std::time::Duration;

use axum::http::{Method, Uri};
use userbase_core::{DomainError, ErrorContext};

use crate::api_error::ApiError;

/// Run a service call under the request deadline.
///
/// On expiry the call's future is dropped, cancelling whatever store
/// operation it was awaiting.
pub(crate) async fn with_deadline<T, F>(deadline: Duration, call: F) -> Result<T, DomainError>
where
    F: Future<Output = Result<T, DomainError>>,
{
    tokio::time::timeout(deadline, call).await.map_err(|elapsed| {
        DomainError::wrap(elapsed, ErrorContext::Internal, "request deadline exceeded")
    })?
}

pub async fn method_not_allowed(method: Method) -> ApiError {
    ApiError::method_not_allowed(&method)
}

pub async fn route_not_found(uri: Uri) -> ApiError {
    ApiError::new(
        axum::http::StatusCode::NOT_FOUND,
        format!("no endpoint matches path '{}'", uri.path()),
    )
}

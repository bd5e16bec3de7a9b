//! HTTP API server for userbase.

#![allow(missing_docs, reason = "Internal crate with self-explanatory API")]
#![allow(unreachable_pub, reason = "pub items are re-exported")]
#![allow(missing_debug_implementations, reason = "Internal types")]
#![allow(clippy::missing_docs_in_private_items, reason = "Internal crate")]
#![allow(clippy::implicit_return, reason = "Implicit return is idiomatic Rust")]
#![allow(clippy::question_mark_used, reason = "? operator is idiomatic Rust")]
#![allow(clippy::exhaustive_structs, reason = "HTTP types are stable")]

pub mod api_error;
mod handlers;
pub mod response_types;

use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use axum::routing::{get, post};
use tower_http::trace::TraceLayer;
use userbase_service::UserService;

pub use api_error::ApiError;
pub use response_types::{ApiResponse, ErrorBody, SaveUserRequest, UserResponse};

/// Shared application state for all HTTP handlers.
pub struct AppState {
    pub user_service: Arc<UserService>,
    /// Deadline applied to each service call.
    pub request_timeout: Duration,
}

pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health).fallback(handlers::method_not_allowed))
        .route(
            "/save",
            post(handlers::users::save_user).fallback(handlers::method_not_allowed),
        )
        .route(
            "/{id}",
            get(handlers::users::get_user).fallback(handlers::method_not_allowed),
        )
        .fallback(handlers::route_not_found)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn health() -> &'static str {
    "ok"
}

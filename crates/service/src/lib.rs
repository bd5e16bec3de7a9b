//! Service layer for userbase
//!
//! Centralizes the registration rules between the HTTP handlers and storage.

#![allow(missing_docs, reason = "Internal crate with self-explanatory API")]
#![allow(clippy::missing_errors_doc, reason = "Errors are self-explanatory from Result types")]
#![allow(missing_debug_implementations, reason = "Internal types")]
#![allow(clippy::implicit_return, reason = "Implicit return is idiomatic Rust")]
#![allow(clippy::question_mark_used, reason = "? operator is idiomatic Rust")]

mod events;
mod user_service;

pub use events::{RecordingEventSink, TracingEventSink, UserEvent, UserEventSink};
pub use user_service::{UserService, age_in_years};

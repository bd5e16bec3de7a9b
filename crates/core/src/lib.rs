//! Core types for userbase
//!
//! Domain model, validation rules, error taxonomy, and configuration shared
//! by every other crate.

mod config;
mod constants;
mod error;
mod user;
pub mod validation;

pub use config::*;
pub use constants::*;
pub use error::*;
pub use user::*;

//! Storage layer for userbase
//!
//! `SQLite` (default) and PostgreSQL backends behind the [`UserStore`] trait.
//! Driver errors are classified into [`StorageError`] inside each backend and
//! surface to callers as tagged `DomainError`s.

mod backend;
mod error;
mod error_mapping;
#[cfg(feature = "sqlite")]
mod migrations;
#[cfg(feature = "postgres")]
mod pg_migrations;
#[cfg(feature = "postgres")]
pub mod pg_storage;
#[cfg(feature = "sqlite")]
mod sqlite;
#[cfg(feature = "sqlite")]
mod sqlite_async;
#[cfg(all(test, feature = "sqlite"))]
mod tests;
pub mod traits;

pub use backend::StorageBackend;
pub use error::{ConstraintTarget, StorageError, USERS_EMAIL_INDEX, USERS_PKEY_CONSTRAINT};
#[cfg(feature = "postgres")]
pub use pg_storage::PgStorage;
#[cfg(feature = "sqlite")]
pub use sqlite::Storage;
pub use traits::UserStore;

//! Storage capability trait.
//!
//! The service layer depends only on [`UserStore`]; SQLite, PostgreSQL, and
//! test doubles are interchangeable behind it.

use async_trait::async_trait;
use userbase_core::{DomainError, User};
use uuid::Uuid;

/// Persistence operations on user records.
///
/// Implementations classify their own failures: callers receive
/// [`DomainError`]s that already carry the right context tag.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Insert a new user. Unique violations are `Conflict`.
    async fn create_user(&self, user: &User) -> Result<(), DomainError>;

    /// Fetch a user by ID. A missing row is `NotFound`.
    async fn retrieve_user(&self, id: Uuid) -> Result<User, DomainError>;

    /// Release pooled connections.
    async fn close(&self) -> Result<(), DomainError>;
}

//! Async [`UserStore`] implementation for `SQLite` `Storage` via `spawn_blocking`.
//!
//! Each call is a single statement, so a request abandoned mid-flight leaves
//! either a committed row or nothing.

use async_trait::async_trait;
use userbase_core::{DomainError, User};
use uuid::Uuid;

use crate::Storage;
use crate::error::StorageError;
use crate::error_mapping::{map_close_error, map_create_error, map_retrieve_error};
use crate::traits::UserStore;

/// Helper: run a blocking closure on the tokio blocking pool.
async fn blocking<F, T>(f: F) -> Result<T, StorageError>
where
    F: FnOnce() -> Result<T, StorageError> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(f)
        .await
        .map_err(|e| StorageError::Join(format!("spawn_blocking join error: {e}")))?
}

#[async_trait]
impl UserStore for Storage {
    async fn create_user(&self, user: &User) -> Result<(), DomainError> {
        let s = self.clone();
        let owned = user.clone();
        blocking(move || s.create_user(&owned)).await.map_err(|e| map_create_error(e, user))
    }

    async fn retrieve_user(&self, id: Uuid) -> Result<User, DomainError> {
        let s = self.clone();
        blocking(move || s.retrieve_user(id)).await.map_err(|e| map_retrieve_error(e, id))
    }

    async fn close(&self) -> Result<(), DomainError> {
        let s = self.clone();
        blocking(move || s.checkpoint()).await.map_err(map_close_error)?;
        tracing::info!("SQLite storage closed");
        Ok(())
    }
}

//! Unified storage backend with enum dispatch.

#[cfg(feature = "sqlite")]
use std::path::PathBuf;

use async_trait::async_trait;
use userbase_core::{Config, DomainError, User};
use uuid::Uuid;

use crate::error::StorageError;
use crate::traits::UserStore;

macro_rules! dispatch {
    ($self:expr, $trait:path, $method:ident ( $($arg:expr),* $(,)? )) => {
        match $self {
            #[cfg(feature = "sqlite")]
            StorageBackend::Sqlite(s) => <crate::Storage as $trait>::$method(s, $($arg),*).await,
            #[cfg(feature = "postgres")]
            StorageBackend::Postgres(s) => <crate::pg_storage::PgStorage as $trait>::$method(s, $($arg),*).await,
        }
    };
}

#[derive(Clone, Debug)]
pub enum StorageBackend {
    #[cfg(feature = "sqlite")]
    Sqlite(crate::Storage),
    #[cfg(feature = "postgres")]
    Postgres(crate::pg_storage::PgStorage),
}

/// Where a `sqlite:` URL points.
#[cfg(feature = "sqlite")]
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum SqliteTarget {
    Memory,
    File(PathBuf),
}

/// Parse a database URL that names a SQLite database.
///
/// Accepts `sqlite::memory:`, `sqlite://path`, `sqlite:path` and bare
/// filesystem paths. Anything carrying another scheme is rejected.
#[cfg(feature = "sqlite")]
pub(crate) fn sqlite_target(url: &str) -> Option<SqliteTarget> {
    let url = url.trim();
    if url == "sqlite::memory:" || url == ":memory:" {
        return Some(SqliteTarget::Memory);
    }
    let path = url
        .strip_prefix("sqlite://")
        .or_else(|| url.strip_prefix("sqlite:"))
        .unwrap_or(url);
    if path.is_empty() || path.contains("://") {
        return None;
    }
    Some(SqliteTarget::File(PathBuf::from(path)))
}

fn is_postgres_url(url: &str) -> bool {
    let url = url.trim();
    url.starts_with("postgres://") || url.starts_with("postgresql://")
}

impl StorageBackend {
    /// Open the backend named by `config.database_url` and run its migrations.
    pub async fn connect(config: &Config) -> Result<Self, StorageError> {
        if is_postgres_url(&config.database_url) {
            return Self::open_postgres(config).await;
        }
        Self::open_sqlite(config).await
    }

    #[cfg(feature = "postgres")]
    async fn open_postgres(config: &Config) -> Result<Self, StorageError> {
        Ok(Self::Postgres(crate::pg_storage::PgStorage::new(config).await?))
    }

    #[cfg(not(feature = "postgres"))]
    async fn open_postgres(config: &Config) -> Result<Self, StorageError> {
        Err(StorageError::UnsupportedUrl(config.database_url.clone()))
    }

    #[cfg(feature = "sqlite")]
    async fn open_sqlite(config: &Config) -> Result<Self, StorageError> {
        let storage = match sqlite_target(&config.database_url) {
            Some(SqliteTarget::Memory) => crate::Storage::in_memory()?,
            Some(SqliteTarget::File(path)) => {
                let config = config.clone();
                tokio::task::spawn_blocking(move || crate::Storage::open(&path, &config))
                    .await
                    .map_err(|e| StorageError::Join(e.to_string()))??
            },
            None => return Err(StorageError::UnsupportedUrl(config.database_url.clone())),
        };
        Ok(Self::Sqlite(storage))
    }

    #[cfg(not(feature = "sqlite"))]
    async fn open_sqlite(config: &Config) -> Result<Self, StorageError> {
        Err(StorageError::UnsupportedUrl(config.database_url.clone()))
    }

    /// Short backend name for logs.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            #[cfg(feature = "sqlite")]
            Self::Sqlite(_) => "sqlite",
            #[cfg(feature = "postgres")]
            Self::Postgres(_) => "postgres",
        }
    }

    /// Remove every user record.
    pub async fn clear_users(&self) -> Result<(), StorageError> {
        match self {
            #[cfg(feature = "sqlite")]
            Self::Sqlite(s) => {
                let s = s.clone();
                let removed = tokio::task::spawn_blocking(move || s.clear_users())
                    .await
                    .map_err(|e| StorageError::Join(e.to_string()))??;
                tracing::debug!(removed, "cleared users");
                Ok(())
            },
            #[cfg(feature = "postgres")]
            Self::Postgres(s) => s.clear_users().await,
        }
    }
}

#[async_trait]
impl UserStore for StorageBackend {
    async fn create_user(&self, user: &User) -> Result<(), DomainError> {
        dispatch!(self, UserStore, create_user(user))
    }

    async fn retrieve_user(&self, id: Uuid) -> Result<User, DomainError> {
        dispatch!(self, UserStore, retrieve_user(id))
    }

    async fn close(&self) -> Result<(), DomainError> {
        dispatch!(self, UserStore, close())
    }
}

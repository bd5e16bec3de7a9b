//! PostgreSQL storage backend using sqlx.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::postgres::{PgPoolOptions, PgRow};
use sqlx::{PgPool, Row};
use userbase_core::{Config, DomainError, User};
use uuid::Uuid;

use crate::error::{ConstraintTarget, StorageError};
use crate::error_mapping::{map_create_error, map_retrieve_error};
use crate::pg_migrations::run_pg_migrations;
use crate::traits::UserStore;

/// PostgreSQL connection pool: acquire timeout in seconds.
const PG_POOL_ACQUIRE_TIMEOUT_SECS: u64 = 10;

/// SQLSTATE for `unique_violation`.
const PG_UNIQUE_VIOLATION: &str = "23505";

/// Classify sqlx errors by structured data, not by a blanket `#[from]`.
///
/// - `RowNotFound` → `NotFound`
/// - SQLSTATE 23505 → `UniqueViolation`, attributed by constraint name when
///   the server reports one, by message text otherwise
/// - Everything else → `Database`
impl From<sqlx::Error> for StorageError {
    fn from(err: sqlx::Error) -> Self {
        match &err {
            sqlx::Error::RowNotFound => Self::NotFound { source: Box::new(err) },
            sqlx::Error::Database(db_err)
                if db_err.code().is_some_and(|c| c == PG_UNIQUE_VIOLATION) =>
            {
                let target = match db_err.constraint() {
                    Some(name) => ConstraintTarget::from_constraint_name(name),
                    None => ConstraintTarget::from_message(db_err.message())
                        .unwrap_or(ConstraintTarget::Unknown),
                };
                Self::UniqueViolation { target, source: Box::new(err) }
            },
            _ => Self::database(err),
        }
    }
}

#[derive(Clone, Debug)]
pub struct PgStorage {
    pool: PgPool,
}

impl PgStorage {
    pub async fn new(config: &Config) -> Result<Self, StorageError> {
        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .min_connections(config.min_connections.min(config.max_connections))
            .max_lifetime(config.max_lifetime)
            .idle_timeout(config.idle_timeout)
            .acquire_timeout(std::time::Duration::from_secs(PG_POOL_ACQUIRE_TIMEOUT_SECS))
            .test_before_acquire(true)
            .connect(&config.database_url)
            .await?;
        run_pg_migrations(&pool).await.map_err(|e| StorageError::Migration(e.to_string()))?;
        tracing::info!(max_connections = config.max_connections, "PgStorage initialized");
        Ok(Self { pool })
    }

    /// Wrap an existing pool. The schema must already exist.
    #[must_use]
    pub fn from_pool(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn insert_user(&self, user: &User) -> Result<(), StorageError> {
        sqlx::query(
            "INSERT INTO users (id, name, email, date_of_birth)
             VALUES ($1, $2, $3, $4)",
        )
        .bind(user.id)
        .bind(&user.name)
        .bind(&user.email)
        .bind(user.date_of_birth)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    pub async fn fetch_user(&self, id: Uuid) -> Result<User, StorageError> {
        let row = sqlx::query("SELECT id, name, email, date_of_birth FROM users WHERE id = $1")
            .bind(id)
            .fetch_one(&self.pool)
            .await?;
        row_to_user(&row)
    }

    /// Remove every user row.
    pub async fn clear_users(&self) -> Result<(), StorageError> {
        sqlx::query("TRUNCATE TABLE users").execute(&self.pool).await?;
        Ok(())
    }
}

fn row_to_user(row: &PgRow) -> Result<User, StorageError> {
    let date_of_birth: DateTime<Utc> = row.try_get("date_of_birth")?;
    Ok(User {
        id: row.try_get("id")?,
        name: row.try_get("name")?,
        email: row.try_get("email")?,
        date_of_birth,
    })
}

#[async_trait]
impl UserStore for PgStorage {
    async fn create_user(&self, user: &User) -> Result<(), DomainError> {
        self.insert_user(user).await.map_err(|e| map_create_error(e, user))
    }

    async fn retrieve_user(&self, id: Uuid) -> Result<User, DomainError> {
        self.fetch_user(id).await.map_err(|e| map_retrieve_error(e, id))
    }

    async fn close(&self) -> Result<(), DomainError> {
        self.pool.close().await;
        tracing::info!("PgStorage closed");
        Ok(())
    }
}

//! `SQLite` storage implementation.
//!
//! All methods are synchronous; the async [`UserStore`](crate::UserStore)
//! impl in `sqlite_async` runs them on the blocking pool.

use std::path::Path;

use chrono::{DateTime, SecondsFormat, Utc};
use r2d2::{Pool, PooledConnection};
use r2d2_sqlite::SqliteConnectionManager;
use rusqlite::{Connection, ErrorCode, params};
use userbase_core::{Config, User};
use uuid::Uuid;

use crate::error::{ConstraintTarget, StorageError};
use crate::migrations;

/// Type alias for pooled connection
pub(crate) type PooledConn = PooledConnection<SqliteConnectionManager>;

/// Main storage struct wrapping `SQLite` connection pool
#[derive(Clone, Debug)]
pub struct Storage {
    pub(crate) pool: Pool<SqliteConnectionManager>,
}

impl From<rusqlite::Error> for StorageError {
    fn from(err: rusqlite::Error) -> Self {
        match &err {
            rusqlite::Error::QueryReturnedNoRows => Self::NotFound { source: Box::new(err) },
            rusqlite::Error::SqliteFailure(failure, message)
                if failure.code == ErrorCode::ConstraintViolation =>
            {
                match sqlite_unique_target(failure.extended_code, message.as_deref()) {
                    Some(target) => Self::UniqueViolation { target, source: Box::new(err) },
                    None => Self::database(err),
                }
            },
            _ => Self::database(err),
        }
    }
}

impl From<r2d2::Error> for StorageError {
    fn from(err: r2d2::Error) -> Self {
        Self::database(err)
    }
}

/// Attribute a SQLite constraint failure.
///
/// The extended result code says whether the primary key or a unique index
/// fired; SQLite exposes the offending column only in the message text.
fn sqlite_unique_target(extended_code: i32, message: Option<&str>) -> Option<ConstraintTarget> {
    match extended_code {
        rusqlite::ffi::SQLITE_CONSTRAINT_PRIMARYKEY => Some(ConstraintTarget::Identifier),
        rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE => {
            Some(message.map_or(ConstraintTarget::Unknown, ConstraintTarget::from_sqlite_columns))
        },
        _ => message.and_then(ConstraintTarget::from_message),
    }
}

/// Get a connection from the pool
pub(crate) fn get_conn(pool: &Pool<SqliteConnectionManager>) -> Result<PooledConn, StorageError> {
    Ok(pool.get()?)
}

pub(crate) fn format_timestamp(ts: DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Micros, true)
}

fn parse_timestamp(raw: &str, column: &str) -> Result<DateTime<Utc>, StorageError> {
    DateTime::parse_from_rfc3339(raw).map(|ts| ts.with_timezone(&Utc)).map_err(|e| {
        StorageError::DataCorruption { context: format!("invalid {column} timestamp {raw:?}: {e}") }
    })
}

/// Custom connection initializer for concurrency settings
fn init_connection(conn: &mut Connection) -> Result<(), rusqlite::Error> {
    conn.execute_batch(
        "PRAGMA busy_timeout = 30000;
         PRAGMA journal_mode = WAL;
         PRAGMA synchronous = NORMAL;",
    )?;
    Ok(())
}

impl Storage {
    /// Create new storage instance with default pool settings
    pub fn new(db_path: &Path) -> Result<Self, StorageError> {
        Self::open(db_path, &Config::new(db_path.display().to_string()))
    }

    /// Create new storage instance sized by `config`
    pub fn open(db_path: &Path, config: &Config) -> Result<Self, StorageError> {
        let manager = SqliteConnectionManager::file(db_path).with_init(init_connection);
        let pool = Pool::builder()
            .max_size(config.max_connections.max(1))
            .min_idle(Some(config.min_connections.min(config.max_connections)))
            .max_lifetime(Some(config.max_lifetime))
            .idle_timeout(Some(config.idle_timeout))
            .build(manager)?;
        Self::init(pool)
    }

    /// Private in-memory database.
    ///
    /// The pool holds exactly one connection for its whole lifetime, since
    /// each `SQLite` memory connection is its own database.
    pub fn in_memory() -> Result<Self, StorageError> {
        let manager = SqliteConnectionManager::memory();
        let pool = Pool::builder()
            .max_size(1)
            .min_idle(Some(1))
            .max_lifetime(None)
            .idle_timeout(None)
            .build(manager)?;
        Self::init(pool)
    }

    fn init(pool: Pool<SqliteConnectionManager>) -> Result<Self, StorageError> {
        let conn = get_conn(&pool)?;
        migrations::run_migrations(&conn).map_err(|e| StorageError::Migration(e.to_string()))?;
        drop(conn);

        tracing::info!(pool_size = pool.max_size(), "Storage initialized with connection pool");
        Ok(Self { pool })
    }

    pub fn create_user(&self, user: &User) -> Result<(), StorageError> {
        let conn = get_conn(&self.pool)?;
        conn.execute(
            "INSERT INTO users (id, name, email, date_of_birth, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                user.id.to_string(),
                &user.name,
                &user.email,
                format_timestamp(user.date_of_birth),
                format_timestamp(Utc::now()),
            ],
        )?;
        Ok(())
    }

    pub fn retrieve_user(&self, id: Uuid) -> Result<User, StorageError> {
        let conn = get_conn(&self.pool)?;
        let (raw_id, name, email, raw_dob): (String, String, String, String) = conn.query_row(
            "SELECT id, name, email, date_of_birth FROM users WHERE id = ?1",
            params![id.to_string()],
            |row| Ok((row.get(0)?, row.get(1)?, row.get(2)?, row.get(3)?)),
        )?;

        let id = Uuid::parse_str(&raw_id).map_err(|e| StorageError::DataCorruption {
            context: format!("invalid user id {raw_id:?}: {e}"),
        })?;
        Ok(User { id, name, email, date_of_birth: parse_timestamp(&raw_dob, "date_of_birth")? })
    }

    /// Delete every user row. Returns the number of rows removed.
    pub fn clear_users(&self) -> Result<usize, StorageError> {
        let conn = get_conn(&self.pool)?;
        Ok(conn.execute("DELETE FROM users", [])?)
    }

    /// Flush the write-ahead log back into the main database file.
    pub fn checkpoint(&self) -> Result<(), StorageError> {
        let conn = get_conn(&self.pool)?;
        conn.execute_batch("PRAGMA wal_checkpoint(TRUNCATE);")?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn primary_key_code_means_identifier() {
        assert_eq!(
            sqlite_unique_target(rusqlite::ffi::SQLITE_CONSTRAINT_PRIMARYKEY, None),
            Some(ConstraintTarget::Identifier)
        );
    }

    #[test]
    fn unique_code_uses_column_text() {
        assert_eq!(
            sqlite_unique_target(
                rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE,
                Some("UNIQUE constraint failed: users.email")
            ),
            Some(ConstraintTarget::Email)
        );
        assert_eq!(
            sqlite_unique_target(rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE, None),
            Some(ConstraintTarget::Unknown)
        );
    }

    #[test]
    fn other_constraints_are_not_unique_violations() {
        assert_eq!(
            sqlite_unique_target(
                rusqlite::ffi::SQLITE_CONSTRAINT_NOTNULL,
                Some("NOT NULL constraint failed: users.name")
            ),
            None
        );
    }

    #[test]
    fn timestamps_round_trip_at_microsecond_precision() {
        let ts = DateTime::parse_from_rfc3339("1999-12-31T23:59:59.123456Z")
            .unwrap()
            .with_timezone(&Utc);
        let formatted = format_timestamp(ts);
        assert_eq!(formatted, "1999-12-31T23:59:59.123456Z");
        assert_eq!(parse_timestamp(&formatted, "date_of_birth").unwrap(), ts);
    }

    #[test]
    fn corrupt_timestamp_is_reported() {
        let err = parse_timestamp("yesterday", "date_of_birth").unwrap_err();
        assert!(matches!(err, StorageError::DataCorruption { .. }));
    }
}

//! Typed error enum for the storage layer.
//!
//! Backends convert their driver errors into [`StorageError`] at the call
//! site, attributing unique-constraint violations to a column while the
//! driver's structured data is still at hand. The service-facing
//! classification lives in `error_mapping`.

use std::fmt;

use thiserror::Error;
use userbase_core::BoxedCause;

/// Column a unique-constraint violation was attributed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConstraintTarget {
    Identifier,
    Email,
    Unknown,
}

impl fmt::Display for ConstraintTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Identifier => "identifier",
            Self::Email => "email",
            Self::Unknown => "unknown column",
        })
    }
}

/// Name of the primary-key constraint on `users.id`.
pub const USERS_PKEY_CONSTRAINT: &str = "users_pkey";
/// Name of the unique index on `users.email`.
pub const USERS_EMAIL_INDEX: &str = "idx_users_email";

// Driver message fragments relied upon when no structured constraint data is
// available. Changing driver versions must keep these stable.
const PG_UNIQUE_VIOLATION_TEXT: &str = "duplicate key value violates unique constraint";
const SQLITE_UNIQUE_VIOLATION_TEXT: &str = "UNIQUE constraint failed";
const SQLITE_ID_COLUMN_TEXT: &str = "users.id";
const SQLITE_EMAIL_COLUMN_TEXT: &str = "users.email";

impl ConstraintTarget {
    /// Attribute a violation from a constraint or index name.
    #[must_use]
    pub fn from_constraint_name(name: &str) -> Self {
        match name {
            USERS_PKEY_CONSTRAINT => Self::Identifier,
            USERS_EMAIL_INDEX => Self::Email,
            _ => Self::Unknown,
        }
    }

    /// Last-resort attribution from driver error text.
    ///
    /// Returns `None` when the text does not describe a unique violation.
    #[must_use]
    pub fn from_message(message: &str) -> Option<Self> {
        if message.contains(PG_UNIQUE_VIOLATION_TEXT) {
            return Some(if message.contains(USERS_PKEY_CONSTRAINT) {
                Self::Identifier
            } else if message.contains(USERS_EMAIL_INDEX) {
                Self::Email
            } else {
                Self::Unknown
            });
        }
        if message.contains(SQLITE_UNIQUE_VIOLATION_TEXT) {
            return Some(Self::from_sqlite_columns(message));
        }
        None
    }

    /// Attribute a SQLite violation from the `table.column` list in its
    /// message.
    #[must_use]
    pub fn from_sqlite_columns(message: &str) -> Self {
        if message.contains(SQLITE_EMAIL_COLUMN_TEXT) {
            Self::Email
        } else if message.contains(SQLITE_ID_COLUMN_TEXT) {
            Self::Identifier
        } else {
            Self::Unknown
        }
    }
}

/// Storage-layer error with variants covering every expected failure mode.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Query expected exactly one row and found none.
    #[error("no matching row: {source}")]
    NotFound {
        #[source]
        source: BoxedCause,
    },

    /// Unique constraint violation.
    #[error("unique constraint violated on {target}: {source}")]
    UniqueViolation {
        target: ConstraintTarget,
        #[source]
        source: BoxedCause,
    },

    /// SQL / connection / pool failure.
    #[error("database error: {source}")]
    Database {
        #[source]
        source: BoxedCause,
    },

    /// Row data could not be decoded into the domain type.
    #[error("data corruption: {context}")]
    DataCorruption { context: String },

    /// Schema setup failure.
    #[error("migration error: {0}")]
    Migration(String),

    /// Blocking task panicked or was cancelled.
    #[error("blocking task failed: {0}")]
    Join(String),

    /// Connection string names a backend this build cannot open.
    #[error("unsupported database url: {0}")]
    UnsupportedUrl(String),
}

impl StorageError {
    pub fn database<E>(err: E) -> Self
    where
        E: Into<BoxedCause>,
    {
        Self::Database { source: err.into() }
    }

    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Target column when this is a unique-constraint violation.
    #[must_use]
    pub const fn unique_violation(&self) -> Option<ConstraintTarget> {
        match self {
            Self::UniqueViolation { target, .. } => Some(*target),
            _ => None,
        }
    }
}

//! Shared constants for userbase.
//!
//! Centralizes the business limits and pool defaults used across crates.

/// Minimum display name length in characters, after trimming.
pub const NAME_MIN_CHARS: usize = 2;

/// Maximum display name length in characters, after trimming.
pub const NAME_MAX_CHARS: usize = 100;

/// Minimum age in years required to register.
pub const MIN_REGISTRATION_AGE_YEARS: f64 = 13.0;

/// Average year length used when deriving age from a date of birth.
pub const AVERAGE_YEAR_DAYS: f64 = 365.25;

/// Connection pool: maximum connections.
pub const DEFAULT_DB_MAX_CONNECTIONS: u32 = 25;

/// Connection pool: minimum idle connections.
pub const DEFAULT_DB_MIN_CONNECTIONS: u32 = 5;

/// Connection pool: maximum connection lifetime in seconds.
pub const DEFAULT_DB_MAX_LIFETIME_SECS: u64 = 300;

/// Connection pool: idle timeout in seconds.
pub const DEFAULT_DB_IDLE_TIMEOUT_SECS: u64 = 60;

/// Deadline applied to every service call made on behalf of a request.
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// Reason attached to underage registration attempts.
pub const UNDERAGE_REASON: &str = "user must have at least 13 years to register";

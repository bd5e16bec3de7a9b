//! Test utilities and module declarations for storage tests.

mod user_tests;

use crate::Storage;
use chrono::{TimeZone, Utc};
use tempfile::TempDir;
use userbase_core::User;
use uuid::Uuid;

#[expect(clippy::unwrap_used, reason = "test code")]
pub fn create_test_storage() -> (Storage, TempDir) {
    let temp_dir = TempDir::new().unwrap();
    let db_path = temp_dir.path().join("test.db");
    let storage = Storage::new(&db_path).unwrap();
    (storage, temp_dir)
}

#[expect(clippy::unwrap_used, reason = "test code")]
pub fn create_test_user(email: &str) -> User {
    User::new(
        Uuid::new_v4(),
        "Ada Lovelace",
        email,
        Utc.with_ymd_and_hms(1990, 12, 10, 8, 30, 0).unwrap(),
    )
}

use super::{create_test_storage, create_test_user};
use crate::{Storage, StorageBackend, StorageError, UserStore};
use chrono::{TimeZone, Utc};
use userbase_core::{Config, ErrorContext, User};
use uuid::Uuid;

#[test]
fn test_create_and_retrieve_user() {
    let (storage, _temp_dir) = create_test_storage();
    let user = create_test_user("ada@example.com");

    storage.create_user(&user).unwrap();
    let found = storage.retrieve_user(user.id).unwrap();
    assert_eq!(found, user);
}

#[test]
fn test_retrieve_missing_user_is_not_found() {
    let (storage, _temp_dir) = create_test_storage();
    let err = storage.retrieve_user(Uuid::new_v4()).unwrap_err();
    assert!(err.is_not_found());
}

#[test]
fn test_duplicate_id_is_identifier_violation() {
    let (storage, _temp_dir) = create_test_storage();
    let user = create_test_user("first@example.com");
    storage.create_user(&user).unwrap();

    let mut again = create_test_user("second@example.com");
    again.id = user.id;
    let err = storage.create_user(&again).unwrap_err();
    assert_eq!(err.unique_violation(), Some(crate::ConstraintTarget::Identifier));
}

#[test]
fn test_duplicate_email_is_email_violation() {
    let (storage, _temp_dir) = create_test_storage();
    storage.create_user(&create_test_user("same@example.com")).unwrap();

    let err = storage.create_user(&create_test_user("same@example.com")).unwrap_err();
    assert_eq!(err.unique_violation(), Some(crate::ConstraintTarget::Email));
}

#[test]
fn test_subsecond_birth_date_round_trips() {
    let (storage, _temp_dir) = create_test_storage();
    let dob = Utc.timestamp_opt(631_152_000, 123_456_789).unwrap();
    let user = User::new(Uuid::new_v4(), "Grace Hopper", "grace@example.com", dob);

    storage.create_user(&user).unwrap();
    let found = storage.retrieve_user(user.id).unwrap();
    assert_eq!(found.date_of_birth, user.date_of_birth);
    assert_eq!(found.date_of_birth.timestamp_subsec_nanos(), 123_456_000);
}

#[test]
fn test_clear_users() {
    let (storage, _temp_dir) = create_test_storage();
    storage.create_user(&create_test_user("a@example.com")).unwrap();
    storage.create_user(&create_test_user("b@example.com")).unwrap();

    assert_eq!(storage.clear_users().unwrap(), 2);
    assert_eq!(storage.clear_users().unwrap(), 0);
}

#[test]
fn test_data_survives_reopen() {
    let (storage, temp_dir) = create_test_storage();
    let user = create_test_user("persist@example.com");
    storage.create_user(&user).unwrap();
    storage.checkpoint().unwrap();
    drop(storage);

    let reopened = Storage::new(&temp_dir.path().join("test.db")).unwrap();
    assert_eq!(reopened.retrieve_user(user.id).unwrap(), user);
}

#[test]
fn test_corrupt_row_is_reported() {
    let (storage, _temp_dir) = create_test_storage();
    let id = Uuid::new_v4();
    let conn = crate::sqlite::get_conn(&storage.pool).unwrap();
    conn.execute(
        "INSERT INTO users (id, name, email, date_of_birth, created_at)
         VALUES (?1, 'Broken', 'broken@example.com', 'not a date', 'now')",
        [id.to_string()],
    )
    .unwrap();
    drop(conn);

    let err = storage.retrieve_user(id).unwrap_err();
    assert!(matches!(err, StorageError::DataCorruption { .. }));
}

#[tokio::test]
async fn test_async_store_classifies_conflicts() {
    let (storage, _temp_dir) = create_test_storage();
    let user = create_test_user("ada@example.com");
    UserStore::create_user(&storage, &user).await.unwrap();

    let mut same_id = create_test_user("other@example.com");
    same_id.id = user.id;
    let err = UserStore::create_user(&storage, &same_id).await.unwrap_err();
    assert_eq!(err.context(), ErrorContext::Conflict);
    assert!(err.is_wrapped());
    assert_eq!(err.reason(), format!("user with ID '{}' already exists", user.id));

    let err =
        UserStore::create_user(&storage, &create_test_user("ada@example.com")).await.unwrap_err();
    assert_eq!(err.context(), ErrorContext::Conflict);
    assert_eq!(err.reason(), "email 'ada@example.com' is already in use");
}

#[tokio::test]
async fn test_async_store_not_found() {
    let (storage, _temp_dir) = create_test_storage();
    let id = Uuid::new_v4();
    let err = UserStore::retrieve_user(&storage, id).await.unwrap_err();
    assert_eq!(err.context(), ErrorContext::NotFound);
    assert_eq!(err.reason(), format!("user with '{id}' ID does not exist"));
}

#[tokio::test]
async fn test_backend_connect_in_memory() {
    let backend = StorageBackend::connect(&Config::new("sqlite::memory:")).await.unwrap();
    assert_eq!(backend.kind(), "sqlite");

    let user = create_test_user("mem@example.com");
    backend.create_user(&user).await.unwrap();
    assert_eq!(backend.retrieve_user(user.id).await.unwrap(), user);

    backend.clear_users().await.unwrap();
    let err = backend.retrieve_user(user.id).await.unwrap_err();
    assert_eq!(err.context(), ErrorContext::NotFound);
    backend.close().await.unwrap();
}

#[tokio::test]
async fn test_backend_connect_file_url() {
    let temp_dir = tempfile::TempDir::new().unwrap();
    let url = format!("sqlite://{}", temp_dir.path().join("users.db").display());
    let backend = StorageBackend::connect(&Config::new(url)).await.unwrap();

    let user = create_test_user("file@example.com");
    backend.create_user(&user).await.unwrap();
    assert_eq!(backend.retrieve_user(user.id).await.unwrap(), user);
    backend.close().await.unwrap();
}

#[tokio::test]
async fn test_backend_rejects_unknown_scheme() {
    let err = StorageBackend::connect(&Config::new("mysql://localhost/users")).await.unwrap_err();
    assert!(matches!(err, StorageError::UnsupportedUrl(_)));
}

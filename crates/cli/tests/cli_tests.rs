use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn userbase() -> Command {
    let mut cmd = Command::cargo_bin("userbase").unwrap();
    cmd.env_remove("DATABASE_URL").env("RUST_LOG", "warn");
    cmd
}

fn sqlite_url(dir: &TempDir) -> String {
    format!("sqlite://{}", dir.path().join("users.db").display())
}

#[test]
fn test_cli_help() {
    userbase()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("User registration and lookup service"));
}

#[test]
fn test_cli_serve_help() {
    userbase().arg("serve").arg("--help").assert().success().stdout(predicate::str::contains("port"));
}

#[test]
fn test_missing_database_url_fails() {
    let dir = TempDir::new().unwrap();
    userbase()
        .current_dir(dir.path())
        .arg("migrate")
        .assert()
        .failure()
        .stderr(predicate::str::contains("DATABASE_URL"));
}

#[test]
fn test_migrate_creates_sqlite_schema() {
    let dir = TempDir::new().unwrap();
    userbase()
        .current_dir(dir.path())
        .env("DATABASE_URL", sqlite_url(&dir))
        .arg("migrate")
        .assert()
        .success()
        .stdout(predicate::str::contains("Schema is up to date (sqlite)"));
    assert!(dir.path().join("users.db").exists());
}

#[test]
fn test_get_unknown_user_is_not_found() {
    let dir = TempDir::new().unwrap();
    let id = "0b5c8a4e-6a2f-4f0e-9d8c-2f1a7e3b4c5d";
    userbase()
        .current_dir(dir.path())
        .env("DATABASE_URL", sqlite_url(&dir))
        .args(["get", id])
        .assert()
        .failure()
        .stderr(predicate::str::contains(format!("user with '{id}' ID does not exist")));
}

#[test]
fn test_get_rejects_malformed_id() {
    let dir = TempDir::new().unwrap();
    userbase()
        .current_dir(dir.path())
        .env("DATABASE_URL", sqlite_url(&dir))
        .args(["get", "not-a-uuid"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid value"));
}

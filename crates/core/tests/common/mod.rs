use std::sync::Arc;

use solarfin_core::db::{self, DbPool};
use tempfile::TempDir;

/// Creates a fresh migrated database in a temp directory. The directory is
/// dropped (and the file deleted) when the returned guard goes out of scope.
pub fn setup_test_db() -> (TempDir, Arc<DbPool>) {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let db_path = dir
        .path()
        .join("app.db")
        .to_str()
        .expect("temp path is not valid UTF-8")
        .to_string();

    let db_path = db::init(&db_path).expect("Failed to initialize database");
    let pool = db::create_pool(&db_path).expect("Failed to create database pool");
    db::run_migrations(&pool).expect("Failed to run migrations");

    (dir, pool)
}

//! SQLite pool setup and table DDL.

use crate::config::Settings;
use crate::error::{AppError, ConfigError};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use std::str::FromStr;

pub const STUDENTS_TABLE: &str = "estudantes";

/// Open a pool on `settings.database_url`, creating the database file if it does not exist.
pub async fn connect(settings: &Settings) -> Result<SqlitePool, AppError> {
    let opts = SqliteConnectOptions::from_str(&settings.database_url)
        .map_err(|e| ConfigError::Invalid {
            var: "DATABASE_URL",
            reason: e.to_string(),
        })?
        .create_if_missing(true);
    let pool = SqlitePoolOptions::new()
        .max_connections(settings.max_connections)
        .connect_with(opts)
        .await?;
    Ok(pool)
}

/// Create the students table if missing. Safe to call on every start.
///
/// `name` is indexed but not unique: uniqueness is checked on create only, rename may collide.
pub async fn ensure_tables(pool: &SqlitePool) -> Result<(), AppError> {
    let ddl = format!(
        r#"
        CREATE TABLE IF NOT EXISTS {} (
            id TEXT NOT NULL PRIMARY KEY,
            name TEXT NOT NULL,
            active BOOLEAN NOT NULL DEFAULT 1
        )
        "#,
        STUDENTS_TABLE
    );
    sqlx::query(&ddl).execute(pool).await?;

    let index = format!(
        "CREATE INDEX IF NOT EXISTS ix_{0}_name ON {0} (name)",
        STUDENTS_TABLE
    );
    sqlx::query(&index).execute(pool).await?;
    Ok(())
}

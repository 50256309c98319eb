use std::path::PathBuf;
use std::str::FromStr;

use anyhow::{Context, Result};
use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous};

use crate::config::DatabaseConfig;

const REGISTRY_DB_FILENAME: &str = "registry.db";

/// Initialize the registry database, running migrations as needed.
///
/// `REGISTRY_DB_PATH` takes precedence over the configured path.
pub async fn init_pool(config: &DatabaseConfig) -> Result<(SqlitePool, PathBuf)> {
    let db_root = match std::env::var("REGISTRY_DB_PATH") {
        Ok(path) => PathBuf::from(path),
        Err(_) => config
            .path
            .clone()
            .context("database path must be set via REGISTRY_DB_PATH or the config file")?,
    };

    let db_root_path = normalize_path(db_root)?;
    std::fs::create_dir_all(&db_root_path)
        .with_context(|| format!("failed to create DB path: {}", db_root_path.display()))?;

    let registry_db_path = db_root_path.join(REGISTRY_DB_FILENAME);
    let db_uri = format!("sqlite://{}", registry_db_path.to_string_lossy());

    let connect_options = SqliteConnectOptions::from_str(&db_uri)?
        .create_if_missing(true)
        .journal_mode(SqliteJournalMode::Wal)
        .synchronous(SqliteSynchronous::Normal)
        .foreign_keys(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect_with(connect_options)
        .await?;

    sqlx::migrate!("./migrations").run(&pool).await?;

    Ok((pool, db_root_path))
}

pub fn normalize_path<P: Into<PathBuf>>(path: P) -> Result<PathBuf> {
    let path = path.into();
    if path.is_absolute() {
        return Ok(path);
    }

    let cwd = std::env::current_dir().context("failed to read current working directory")?;
    Ok(cwd.join(path))
}

/// True when the error is a unique-constraint violation. Slug uniqueness
/// races resolve here rather than in the pre-checks.
pub fn is_unique_violation(err: &sqlx::Error) -> bool {
    match err {
        sqlx::Error::Database(db_err) => {
            matches!(db_err.kind(), sqlx::error::ErrorKind::UniqueViolation)
        }
        _ => false,
    }
}

use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePool, SqlitePoolOptions};
use std::str::FromStr;
use std::time::Duration;
use thiserror::Error;
use tracing::info;

use crate::config::DatabaseConfig;

/// Errors from DatabaseManager and the stores built on it
#[derive(Debug, Error)]
pub enum DatabaseError {
    #[error("Invalid database URL: {0}")]
    InvalidDatabaseUrl(String),

    #[error(transparent)]
    Sqlx(#[from] sqlx::Error),
}

impl DatabaseError {
    /// True when the underlying error is a UNIQUE constraint violation.
    pub fn is_unique_violation(&self) -> bool {
        match self {
            DatabaseError::Sqlx(sqlx::Error::Database(db)) => db.is_unique_violation(),
            _ => false,
        }
    }
}

const GENERATOR_SCHEMA: &[&str] = &[
    r#"
    CREATE TABLE IF NOT EXISTS users (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        username TEXT NOT NULL UNIQUE,
        password_hash TEXT NOT NULL,
        created_at TEXT NOT NULL
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS password_history (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        user_id INTEGER NOT NULL REFERENCES users(id) ON DELETE CASCADE,
        username TEXT NOT NULL,
        password TEXT NOT NULL,
        created_at TEXT NOT NULL
    )
    "#,
];

const STUDIO_SCHEMA: &[&str] = &[
    r#"
    CREATE TABLE IF NOT EXISTS users (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        username TEXT NOT NULL UNIQUE,
        password_hash TEXT NOT NULL,
        created_at TEXT NOT NULL
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS drawings (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        title TEXT NOT NULL,
        image_data TEXT NOT NULL,
        created_at TEXT NOT NULL,
        updated_at TEXT,
        user_id INTEGER NOT NULL REFERENCES users(id) ON DELETE CASCADE
    )
    "#,
    "CREATE INDEX IF NOT EXISTS idx_drawings_owner ON drawings (user_id, created_at)",
];

/// Opens and prepares the SQLite pools backing each application
pub struct DatabaseManager;

impl DatabaseManager {
    /// Open a pool for the given SQLite URL.
    ///
    /// In-memory databases live and die with their connection, so they get a
    /// single connection that is never recycled.
    pub async fn connect(url: &str, config: &DatabaseConfig) -> Result<SqlitePool, DatabaseError> {
        let options = SqliteConnectOptions::from_str(url)
            .map_err(|_| DatabaseError::InvalidDatabaseUrl(url.to_string()))?
            .create_if_missing(true)
            .foreign_keys(true);

        let in_memory = url.contains(":memory:") || url.contains("mode=memory");
        let pool = if in_memory {
            SqlitePoolOptions::new()
                .max_connections(1)
                .min_connections(1)
                .idle_timeout(None)
                .max_lifetime(None)
                .acquire_timeout(Duration::from_secs(config.connection_timeout_secs))
                .connect_with(options)
                .await?
        } else {
            SqlitePoolOptions::new()
                .max_connections(config.max_connections)
                .acquire_timeout(Duration::from_secs(config.connection_timeout_secs))
                .connect_with(options.journal_mode(SqliteJournalMode::Wal))
                .await?
        };

        info!("Created database pool for: {}", url);
        Ok(pool)
    }

    /// Create the generator tables if they do not exist yet
    pub async fn migrate_generator(pool: &SqlitePool) -> Result<(), DatabaseError> {
        Self::apply(pool, GENERATOR_SCHEMA).await?;
        info!("Generator schema ready");
        Ok(())
    }

    /// Create the studio tables if they do not exist yet
    pub async fn migrate_studio(pool: &SqlitePool) -> Result<(), DatabaseError> {
        Self::apply(pool, STUDIO_SCHEMA).await?;
        info!("Studio schema ready");
        Ok(())
    }

    async fn apply(pool: &SqlitePool, statements: &[&str]) -> Result<(), DatabaseError> {
        let mut tx = pool.begin().await?;
        for statement in statements {
            sqlx::query(statement).execute(&mut *tx).await?;
        }
        tx.commit().await?;
        Ok(())
    }

    /// Pings the pool to ensure connectivity
    pub async fn health_check(pool: &SqlitePool) -> Result<(), DatabaseError> {
        sqlx::query("SELECT 1").execute(pool).await?;
        Ok(())
    }
}

#[cfg(test)]
pub(crate) async fn memory_pool() -> SqlitePool {
    let config = crate::config::AppConfig::development().database;
    DatabaseManager::connect("sqlite::memory:", &config)
        .await
        .expect("in-memory pool")
}

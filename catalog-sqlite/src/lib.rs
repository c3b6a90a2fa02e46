#![warn(missing_docs)]
#![doc = include_str!("../README.md")]

use sqlx::sqlite;
use std::{str::FromStr, time::Duration};

pub mod config;
mod r#impl;
mod types;

use config::SqliteConfig;

/// SQLite database implementation of the catalog repositories.
///
/// Reads and writes go through separate connection pools to the same
/// database. SQLite does not have parallel writes, so the writer is capped
/// at a single connection while readers may run concurrently in WAL mode.
///
/// # Example
///
/// ```no_run
/// # use catalog_sqlite::{Db, config::SqliteConfig};
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let db = Db::open(&SqliteConfig::default()).await?;
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct Db {
    /// Connection pool for read operations
    pub reader: sqlx::Pool<sqlx::Sqlite>,
    /// Connection pool for write operations (limited to 1 connection)
    pub writer: sqlx::Pool<sqlx::Sqlite>,
}

impl Db {
    /// Open the specified SQLite database and bring its schema up to date.
    ///
    /// Creates a new database if one doesn't exist (when `create_if_missing`
    /// is true) and applies all pending migrations.
    ///
    /// # Errors
    ///
    /// Returns `sqlx::Error` if the connection fails or a migration cannot
    /// be applied.
    pub async fn open(config: &SqliteConfig) -> Result<Self, sqlx::Error> {
        let db = Self::connect_lazy(config)?;
        db.migrate().await?;
        Ok(db)
    }

    /// Prepare the connection pools without touching the database.
    ///
    /// Nothing is opened until the first query, so an unreachable database
    /// only surfaces through [`catalog_core::ports::Repository::check_connection`]
    /// or the failing queries themselves.
    ///
    /// # Errors
    ///
    /// Returns `sqlx::Error` only if the connection options cannot be built.
    pub fn connect_lazy(config: &SqliteConfig) -> Result<Self, sqlx::Error> {
        let db_path = config
            .database_path
            .as_ref()
            .map(|p| p.to_string_lossy().into_owned());

        let options =
            sqlite::SqliteConnectOptions::from_str(db_path.as_deref().unwrap_or(":memory:"))?
                .busy_timeout(Duration::from_secs(5))
                .foreign_keys(true)
                .journal_mode(sqlite::SqliteJournalMode::Wal)
                .synchronous(sqlite::SqliteSynchronous::Normal)
                .pragma("temp_store", "memory")
                .create_if_missing(config.create_if_missing);

        // An in-memory database only lives as long as some connection to it,
        // so the writer keeps its connection for the lifetime of the pool.
        let reader = sqlite::SqlitePoolOptions::new().connect_lazy_with(options.clone());
        let writer = sqlite::SqlitePoolOptions::new()
            .max_connections(1)
            .min_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_lazy_with(options);

        tracing::debug!(
            path = db_path.as_deref().unwrap_or(":memory:"),
            "prepared product database pools"
        );

        Ok(Self { reader, writer })
    }

    /// Apply any pending migrations from `schema/`.
    pub async fn migrate(&self) -> Result<(), sqlx::Error> {
        sqlx::migrate!("./schema").run(&self.writer).await?;
        Ok(())
    }
}

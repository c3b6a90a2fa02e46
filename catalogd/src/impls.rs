//! The concrete application served by the binary.

use catalog_core::ports::Application;
use catalog_sqlite::{Db, config::SqliteConfig};

/// The product catalog backed by SQLite.
#[derive(Clone)]
pub struct CatalogApp {
    /// The database handle shared by every request
    pub db: Db,
}

impl CatalogApp {
    /// Build the application without touching the database, so it can serve
    /// (with `500`s) even if the database is unreachable at startup.
    pub fn connect(database: &SqliteConfig) -> Result<Self, sqlx::Error> {
        Ok(Self {
            db: Db::connect_lazy(database)?,
        })
    }
}

impl Application for CatalogApp {
    type Repository = Db;

    fn database(&self) -> &Self::Repository {
        &self.db
    }
}

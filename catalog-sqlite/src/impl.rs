//! Repository trait implementations for the SQLite database.

use crate::Db;
use catalog_core::ports::Repository;

mod product;

impl Repository for Db {
    type Error = sqlx::Error;

    /// Reaches the database through both pools, migrating it on the way if
    /// it was never opened before.
    async fn check_connection(&self) -> Result<(), Self::Error> {
        self.migrate().await?;
        sqlx::query("select 1").execute(&self.reader).await?;
        Ok(())
    }
}

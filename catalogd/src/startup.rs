use catalog_core::ports::Repository;
use tracing::{Level, event};

/// Diagnostic logged when the startup database check fails.
pub const DB_CONNECTION_ERROR: &str = "Hubo un error al conectar a la BD";

/// Check once that the database is reachable.
///
/// A failure is logged but is not fatal: the server still starts, and
/// requests that reach storage will answer with `500` until it recovers.
pub async fn connect_db<R: Repository>(db: &R) -> bool {
    match db.check_connection().await {
        Ok(()) => {
            event!(Level::INFO, "Conexion exitosa a la BD");
            true
        }
        Err(err) => {
            event!(Level::ERROR, "{DB_CONNECTION_ERROR}: {err}");
            false
        }
    }
}

use std::{
    io,
    sync::{Arc, Mutex},
};

use axum_test::TestServer;
use catalog_axum::{config::AxumConfig, router};
use catalog_core::ports::Repository;
use catalog_sqlite::{Db, config::SqliteConfig};
use catalogd::{DB_CONNECTION_ERROR, connect_db, impls::CatalogApp};
use serde_json::json;
use tracing_subscriber::fmt::MakeWriter;

/// Collects formatted log lines so assertions can inspect them.
#[derive(Clone, Default)]
struct Captured(Arc<Mutex<Vec<u8>>>);

impl Captured {
    fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
    }
}

impl io::Write for Captured {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl<'a> MakeWriter<'a> for Captured {
    type Writer = Self;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}

fn capture_logs() -> (Captured, tracing::subscriber::DefaultGuard) {
    let captured = Captured::default();
    let subscriber = tracing_subscriber::fmt()
        .with_writer(captured.clone())
        .with_ansi(false)
        .with_max_level(tracing::Level::INFO)
        .finish();
    let guard = tracing::subscriber::set_default(subscriber);
    (captured, guard)
}

/// A store that can never be reached.
struct Unreachable;

impl Repository for Unreachable {
    type Error = io::Error;

    async fn check_connection(&self) -> Result<(), Self::Error> {
        Err(io::Error::new(io::ErrorKind::ConnectionRefused, "refused"))
    }
}

#[tokio::test]
async fn reachable_database_logs_success() -> anyhow::Result<()> {
    let db = Db::open(&SqliteConfig::default()).await?;
    let (logs, _guard) = capture_logs();

    assert!(connect_db(&db).await);

    let logs = logs.contents();
    assert!(logs.contains("INFO"));
    assert!(logs.contains("Conexion exitosa a la BD"));
    Ok(())
}

#[tokio::test]
async fn unreachable_database_logs_error_without_failing() {
    let (logs, _guard) = capture_logs();

    assert!(!connect_db(&Unreachable).await);

    let logs = logs.contents();
    assert!(logs.contains("ERROR"));
    assert!(logs.contains(DB_CONNECTION_ERROR));
    assert!(logs.contains("refused"));
}

#[tokio::test]
async fn unopenable_database_is_reported_and_the_app_still_serves() -> anyhow::Result<()> {
    let app = CatalogApp::connect(&SqliteConfig {
        database_path: Some("/nonexistent/dir/productos.db".into()),
        create_if_missing: true,
    })?;

    let (logs, guard) = capture_logs();
    assert!(!connect_db(&app.db).await);
    drop(guard);

    let logs = logs.contents();
    assert!(logs.contains("ERROR"));
    assert!(logs.contains(DB_CONNECTION_ERROR));

    let (service, _) = router(app, AxumConfig::default());
    let server = TestServer::new(service)?;

    let response = server.get("/api/productos").await;
    assert_eq!(response.status_code().as_u16(), 500);
    response.assert_json(&json!({ "error": "Error interno del servidor" }));

    server.get("/health").await.assert_status_ok();
    Ok(())
}

#[tokio::test]
async fn fresh_database_is_migrated_by_the_startup_check() -> anyhow::Result<()> {
    let app = CatalogApp::connect(&SqliteConfig::default())?;
    assert!(connect_db(&app.db).await);

    let (service, _) = router(app, AxumConfig::default());
    let server = TestServer::new(service)?;
    server
        .get("/api/productos")
        .await
        .assert_json(&json!({ "data": [] }));
    Ok(())
}

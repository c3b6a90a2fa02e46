use std::fs::File;

use catalog_axum::{router, start_server};
use catalogd::{AppConfig, Cli, connect_db, impls::CatalogApp};
use tracing_subscriber::{layer::SubscriberExt as _, util::SubscriberInitExt as _};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // By convention, we leverage `tracing` to instrument and log various
    // operations throughout this project.
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::import()?;
    let AppConfig { server, database } = AppConfig::load(&cli)?;

    // An unreachable database is reported by `connect_db` below; the server
    // starts regardless.
    let app = CatalogApp::connect(&database)?;

    // If requested, dump the schema and exit.
    if let Some(path) = cli.schema {
        let (_, schema) = router(app, server);
        serde_json::to_writer_pretty(File::create(path)?, &schema)?;
        return Ok(());
    }

    connect_db(&app.db).await;

    start_server(server, app).await?;
    Ok(())
}

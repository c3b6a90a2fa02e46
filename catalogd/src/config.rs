//! Layered configuration: built-in defaults, then an optional TOML file, then
//! `APP_`-prefixed environment variables.

use crate::Cli;
use catalog_axum::config::AxumConfig;
use catalog_sqlite::config::SqliteConfig;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Everything the server needs to start.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct AppConfig {
    /// Listening address and CORS origin
    #[serde(default)]
    pub server: AxumConfig,

    /// Where the product table lives
    #[serde(default)]
    pub database: SqliteConfig,
}

impl AppConfig {
    /// Load the configuration named by the CLI, overridden by the process
    /// environment.
    ///
    /// Variables map as `APP_<SECTION>__<KEY>` to `<section>.<key>`:
    ///
    /// ```bash
    /// export APP_SERVER__BIND_ADDRESS="127.0.0.1:8080"
    /// export APP_DATABASE__DATABASE_PATH="productos.db"
    /// ```
    pub fn load(cli: &Cli) -> anyhow::Result<Self> {
        Self::layered(cli.config.as_deref(), None)
    }

    /// As [`AppConfig::load`], but reading variables from `env` instead of the
    /// process environment when it is given.
    pub fn layered(
        file: Option<&Path>,
        env: Option<config::Map<String, String>>,
    ) -> anyhow::Result<Self> {
        let mut builder =
            config::Config::builder().add_source(config::Config::try_from(&Self::default())?);

        if let Some(path) = file {
            anyhow::ensure!(
                path.exists(),
                "Config file {} does not exist",
                path.display()
            );
            builder = builder.add_source(config::File::from(path));
        }

        let environment = config::Environment::with_prefix("APP")
            .prefix_separator("_")
            .separator("__")
            .try_parsing(true)
            .source(env);

        Ok(builder
            .add_source(environment)
            .build()?
            .try_deserialize()?)
    }
}

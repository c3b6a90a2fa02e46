#![warn(missing_docs)]
#![doc = include_str!("../README.md")]

mod error;
mod product_routes;
pub mod validation;

use aide::{
    axum::{ApiRouter, routing::get},
    openapi::OpenApi,
};
use axum::{
    Extension, Json,
    http::{HeaderValue, header},
};
use catalog_core::ports::Application;
use schemars::JsonSchema;
use serde::Serialize;
use std::sync::Arc;
use tower_http::{cors, trace::TraceLayer};

pub use error::ApiError;

mod openapi;
use openapi::{api_docs, docs_routes};

pub mod config;
use config::AxumConfig;

/// Response for the health check endpoint
#[derive(Serialize, JsonSchema)]
#[schemars(inline)]
struct HealthResponse {
    status: String,
}

/// Simple health check endpoint
async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
    })
}

/// Construct the full API router with the given state and config, along with
/// the OpenAPI document describing it.
pub fn router<T: ApiApplication>(state: T, config: AxumConfig) -> (axum::Router, OpenApi) {
    let mut api = OpenApi::default();
    let router = ApiRouter::new()
        .api_route("/health", get(health_check))
        .nest("/api/productos", product_routes::router())
        .nest_api_service("/docs", docs_routes())
        .finish_api_with(&mut api, api_docs)
        .layer(Extension(Arc::new(api.clone()))) // Arc is very important here or you will face massive memory and performance issues
        .layer(cors_policy(&config))
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    (router, api)
}

/// Browsers may call the API from the configured origin, or from anywhere
/// when none is configured.
fn cors_policy(config: &AxumConfig) -> cors::CorsLayer {
    let policy = cors::CorsLayer::new()
        .allow_methods(cors::Any)
        .allow_headers([header::CONTENT_TYPE]);

    match config.cors_origin.as_deref() {
        Some(origin) => match origin.parse::<HeaderValue>() {
            Ok(origin) => policy.allow_origin(origin),
            Err(_) => {
                tracing::warn!(origin, "ignoring invalid CORS origin");
                policy.allow_origin(cors::Any)
            }
        },
        None => policy.allow_origin(cors::Any),
    }
}

/// Starts the HTTP server with the provided configuration
pub async fn start_server<T: ApiApplication>(
    config: AxumConfig,
    app: T,
) -> Result<(), std::io::Error> {
    let listener = tokio::net::TcpListener::bind(config.bind_address).await?;

    tracing::info!("Listening for requests on {}", listener.local_addr()?);

    let (service, _) = router(app, config);
    axum::serve(listener, service).await
}

/// Axum imposes all sorts of constraints on what can pass for state. This
/// trait, coupled with a blanket implementation, specifies it all upfront and
/// in one place. If a function takes a generic `T: ApiApplication`, then
/// everything one might reasonably want to do should work.
pub trait ApiApplication:
    Clone + Send + Sync + 'static + Application<Repository: Send + Sync + 'static>
{
}

// this is the blanket implementation
impl<T> ApiApplication for T where
    T: Clone + Send + Sync + 'static + Application<Repository: Send + Sync + 'static>
{
}

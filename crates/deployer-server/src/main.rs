//! Static Deployer Server
//!
//! Accepts static site bundles over HTTP, deploys them to Vercel and keeps a
//! bounded history of recent deployments.

mod api;
mod config;
mod error;
mod handlers;
mod services;
mod storage;
#[cfg(test)]
mod testing;

use anyhow::{Context, Result};
use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use deployer_core::{DeploymentClient, HistoryLedger, RequestValidator};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use crate::api::VercelClient;
use crate::config::{LogFormat, ServerConfig};
use crate::services::DeploymentService;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub deployments: Arc<DeploymentService>,
    pub ledger: HistoryLedger,
    pub request_timeout: Duration,
}

#[tokio::main]
async fn main() {
    // Set up panic hook to log crashes
    std::panic::set_hook(Box::new(|info| {
        let location = info
            .location()
            .map(|l| format!("{}:{}", l.file(), l.line()));
        let payload = if let Some(s) = info.payload().downcast_ref::<&str>() {
            s.to_string()
        } else if let Some(s) = info.payload().downcast_ref::<String>() {
            s.clone()
        } else {
            "Unknown panic".to_string()
        };
        eprintln!("[PANIC] at {:?}: {}", location, payload);
        tracing::error!("PANIC at {:?}: {}", location, payload);
    }));

    let config = match ServerConfig::load() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("[FATAL] Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    if let Err(e) = init_tracing(config.log_format) {
        eprintln!("[FATAL] Failed to initialize logging: {}", e);
        std::process::exit(1);
    }

    info!("Starting Static Deployer v{}", env!("CARGO_PKG_VERSION"));

    if let Err(e) = run_server(config).await {
        error!("Server failed: {:#}", e);
        std::process::exit(1);
    }
}

fn init_tracing(format: LogFormat) -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt().with_env_filter(filter);

    match format {
        LogFormat::Text => builder.try_init(),
        LogFormat::Json => builder.json().try_init(),
    }
    .map_err(|e| anyhow::anyhow!(e))
}

async fn run_server(config: ServerConfig) -> Result<()> {
    info!(
        "Config loaded: bind={}, history_key={}, timeout={}s",
        config.bind_address, config.history_key, config.request_timeout_secs
    );

    let store = storage::open_list_store(&config).context("Failed to open history store")?;
    let ledger = HistoryLedger::new(store, config.history_key.clone());

    let client: Option<Arc<dyn DeploymentClient>> = match config.vercel_token() {
        Some(token) => {
            let client = VercelClient::new(token.to_string())
                .with_base_url(config.vercel_api_url.clone())
                .with_team_id(config.vercel_team_id().map(str::to_string));
            let client: Arc<dyn DeploymentClient> = Arc::new(client);
            Some(client)
        }
        None => {
            warn!("VERCEL_TOKEN is not set, deployments will fail until it is configured");
            None
        }
    };

    let deployments = DeploymentService::new(
        RequestValidator::new(config.project_name_policy()),
        client,
        ledger.clone(),
    );

    let state = AppState {
        deployments: Arc::new(deployments),
        ledger,
        request_timeout: config.request_timeout(),
    };

    let app = build_router(state, config.max_body_bytes);

    let addr: SocketAddr = config
        .bind_address
        .parse()
        .context("Failed to parse bind address")?;
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .context("Failed to bind to address")?;

    info!("Server listening on {}", addr);
    axum::serve(listener, app).await.context("Server error")?;

    Ok(())
}

fn build_router(state: AppState, max_body_bytes: usize) -> Router {
    Router::new()
        .route("/health", get(handlers::health))
        .merge(deploy_routes())
        .nest("/api", deploy_routes())
        .layer(DefaultBodyLimit::max(max_body_bytes))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn deploy_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/deploy",
            post(handlers::deploy::deploy).fallback(handlers::post_only),
        )
        .route(
            "/history",
            get(handlers::history::list).fallback(handlers::get_only),
        )
}

//! HTTP front-end for the viamap routing core.

mod config;
mod error;
mod handlers;

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use axum::{
    Router,
    routing::{get, post},
};
use clap::Parser;
use tower_http::{cors::CorsLayer, timeout::TimeoutLayer, trace::TraceLayer};
use tracing_subscriber::EnvFilter;
use viamap_core::prelude::*;

use config::ServerConfig;

#[derive(Parser, Debug)]
#[command(
    name = "viamap-server",
    about = "Shortest-route map service over road networks"
)]
struct Cli {
    /// Path to the TOML configuration file
    #[arg(long, default_value = "viamap.toml")]
    config: PathBuf,
    /// Override the configured listen address
    #[arg(long)]
    listen: Option<SocketAddr>,
}

pub(crate) struct AppState {
    pub provider: CsvNetworkProvider,
    pub options: RoutingOptions,
}

fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/healthz", get(handlers::healthz))
        .route("/routes", post(handlers::routes))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::new(Duration::from_secs(30)))
        .layer(CorsLayer::permissive())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!("Failed to install shutdown handler: {e}");
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let config = ServerConfig::load(&cli.config)?;
    let listen = cli.listen.unwrap_or(config.listen);

    let state = Arc::new(AppState {
        provider: CsvNetworkProvider::new(&config.network.nodes, &config.network.edges)
            .keep_largest_component(config.network.keep_largest_component),
        options: config.routing.to_options(),
    });

    let listener = tokio::net::TcpListener::bind(listen).await?;
    tracing::info!("Listening on {listen}");
    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

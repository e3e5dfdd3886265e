//! Query server for routable point resolution.
//!
//! Exposes the resolver over HTTP for result-assembly stages that attach
//! routable points to geocoding results.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use axum::{
    extract::State,
    http::StatusCode,
    response::Json,
    routing::{get, post},
    Router,
};
use clap::Parser;
use serde::{Deserialize, Serialize};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::{debug, info, Level};
use tracing_subscriber::FmtSubscriber;

use routable::config::Config;
use routable::{resolve_batch, ResolverOptions, RoutablePoints, RoutableRequest};

#[derive(Parser, Debug)]
#[command(name = "query")]
#[command(about = "Routable point query server")]
struct Args {
    /// Listen address (overrides the config file)
    #[arg(short, long)]
    listen: Option<String>,

    /// TOML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

/// Application state shared across handlers
struct AppState {
    options: ResolverOptions,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging
    let subscriber = FmtSubscriber::builder()
        .with_max_level(if args.verbose { Level::DEBUG } else { Level::INFO })
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let config = Config::load_or_default(args.config.as_ref())?;
    let listen = args.listen.unwrap_or(config.server.listen);

    info!("Routable Query Server");
    info!(
        "Rounding projected points to {} decimal places",
        config.resolver.precision
    );

    let state = Arc::new(AppState {
        options: config.resolver,
    });

    // Build router
    let app = Router::new()
        .route("/health", get(health_handler))
        .route("/v1/routable_points", post(routable_handler))
        .route("/v1/routable_points/batch", post(batch_handler))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    info!("Starting server on {}", listen);

    let listener = tokio::net::TcpListener::bind(&listen).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Health check endpoint
async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse { status: "ok" })
}

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
}

/// Resolve a single request. A `null` body means the request lacked a
/// usable point or feature.
async fn routable_handler(
    State(state): State<Arc<AppState>>,
    Json(request): Json<RoutableRequest>,
) -> Json<Option<RoutablePoints>> {
    Json(request.resolve(&state.options))
}

/// Resolve many requests on the blocking pool
async fn batch_handler(
    State(state): State<Arc<AppState>>,
    Json(body): Json<BatchRequest>,
) -> Result<Json<BatchResponse>, (StatusCode, String)> {
    let options = state.options;
    let count = body.requests.len();

    let results = tokio::task::spawn_blocking(move || resolve_batch(&body.requests, &options))
        .await
        .map_err(|e| {
            tracing::error!("Batch resolution failed: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
        })?;

    debug!("Resolved batch of {} requests", count);

    Ok(Json(BatchResponse { results }))
}

#[derive(Deserialize)]
struct BatchRequest {
    requests: Vec<RoutableRequest>,
}

#[derive(Serialize)]
struct BatchResponse {
    results: Vec<Option<RoutablePoints>>,
}

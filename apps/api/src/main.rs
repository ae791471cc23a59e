mod accounts;
mod applications;
mod config;
mod db;
mod errors;
mod intake;
mod jobs;
mod models;
mod routes;
mod state;

use anyhow::Result;
use axum::http::{header, HeaderValue, Method};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::accounts::credentials::Argon2Credentials;
use crate::config::Config;
use crate::db::create_pool;
use crate::intake::FileIntake;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing DATABASE_URL)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting jobcloud API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize PostgreSQL
    let db = create_pool(&config.database_url).await?;

    // Ensure the upload directory exists before the first request
    let intake = Arc::new(FileIntake::create(&config.upload_dir).await?);
    info!("Upload directory ready at {}", config.upload_dir);

    // Build app state
    let state = AppState {
        db,
        config: config.clone(),
        intake,
        credentials: Arc::new(Argon2Credentials),
    };

    // Build router
    let cors = build_cors_layer(&config)?;
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(cors);

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Origin policy from configuration: `*` anywhere in the list means
/// permissive; otherwise only the listed origins may call the API.
fn build_cors_layer(config: &Config) -> Result<CorsLayer> {
    if config.allowed_origins.iter().any(|origin| origin == "*") {
        return Ok(CorsLayer::permissive());
    }

    let mut origins = Vec::new();
    for origin in &config.allowed_origins {
        origins.push(origin.parse::<HeaderValue>()?);
    }

    Ok(CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([header::CONTENT_TYPE]))
}

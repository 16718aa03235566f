//! CareNest API server.
//!
//! Opens the sled store, builds the axum router, and serves the REST API
//! alongside the static frontend.
//!
//! Usage:
//!   cargo run --bin seed_data      # optional: demo account + logs
//!   cargo run --bin carenest      # start server (PORT, default 5000)

use std::error::Error;

use tokio::net::TcpListener;
use tower_http::{cors::CorsLayer, services::ServeDir};
use tracing::info;
use tracing_subscriber::EnvFilter;

use carenest::config::Config;
use carenest::rest::create_router;
use carenest::storage::Storage;
use carenest::webhook::AiClient;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = Config::from_env();
    let storage = Storage::open(&config.db_path)?;
    let ai = AiClient::new(
        config.chat_webhook_url.clone(),
        config.summary_webhook_url.clone(),
    )?;

    // Development CORS posture; the frontend may also be opened from disk.
    let app = create_router(storage, ai)
        .nest_service("/app", ServeDir::new(&config.frontend_dir))
        .layer(CorsLayer::permissive());

    info!("CareNest API listening on {}", config.bind_addr);
    info!("database at {}", config.db_path);
    info!("frontend served from {} under /app", config.frontend_dir);

    let listener = TcpListener::bind(config.bind_addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

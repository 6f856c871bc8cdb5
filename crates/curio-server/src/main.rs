//! Curio Server — application entry point.

mod config;
mod dto;
mod error;
mod extract;
mod routes;
mod state;

use axum::Router;
use curio_db::DbManager;
use tracing_subscriber::EnvFilter;

use crate::config::ServerConfig;
use crate::state::AppState;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("curio=info".parse().unwrap()))
        .json()
        .init();

    if let Err(e) = run().await {
        tracing::error!("fatal: {e}");
        std::process::exit(1);
    }
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let config = ServerConfig::from_env()?;

    let manager = DbManager::connect(&config.db).await?;
    curio_db::run_migrations(&manager.db()).await?;

    let state = AppState::new(&manager, config.auth.clone());
    let app = Router::new()
        .nest("/api", routes::api_router())
        .with_state(state);

    tracing::info!(addr = %config.bind_addr, "Starting Curio server");
    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

mod config;
mod error;
mod render;
mod routes;
mod services;
mod state;

use std::sync::Arc;

use services::signup::{RegistrationError, UpstreamRegistrar};
use services::strategy::{BasicStrategy, StrategyError};

#[derive(Debug, thiserror::Error)]
enum StartupError {
    #[error(transparent)]
    Config(#[from] config::ConfigError),

    #[error(transparent)]
    Seed(#[from] render::SeedError),

    #[error("credential strategy: {0}")]
    Strategy(#[from] StrategyError),

    #[error("registrar: {0}")]
    Registrar(#[from] RegistrationError),

    #[error("server io: {0}")]
    Io(#[from] std::io::Error),
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt::init();
    dotenvy::dotenv().ok();

    if let Err(e) = run().await {
        tracing::error!(error = %e, "server failed");
        std::process::exit(1);
    }
}

async fn run() -> Result<(), StartupError> {
    let config = config::ServerConfig::from_env()?;
    let seed = render::load_seed(config.initial_state_path.as_deref())?;
    let assets = render::assets::AssetPaths::select(config.mode, &config.public_dir);

    let strategy = BasicStrategy::new(&config.api_url, &config.api_key_token)?;
    let registrar = UpstreamRegistrar::new(&config.api_url)?;

    let port = config.port;
    tracing::info!(mode = ?config.mode, api_url = %config.api_url, movies = seed.movie_lists().len(), "catalog configured");

    let state = state::AppState::new(config, Arc::new(strategy), Arc::new(registrar), assets, seed);
    let app = routes::app(state);
    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{port}")).await?;

    tracing::info!(%port, "movie catalog listening");
    axum::serve(listener, app).await?;
    Ok(())
}

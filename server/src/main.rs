mod config;
mod routes;
mod services;
mod state;

use std::net::SocketAddr;
use std::sync::Arc;

use pillarx::store::{JsonFileStore, MemoryStore, Store};

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt::init();

    let config = config::Config::from_env();
    if config.ephemeral_secret {
        tracing::warn!("TOKEN_SECRET not set; tokens will not survive a restart");
    }

    let store: Arc<dyn Store> = match &config.data_path {
        Some(path) => {
            tracing::info!(path = %path.display(), "workspace backed by json file");
            Arc::new(JsonFileStore::new(path))
        }
        None => {
            tracing::info!("workspace kept in memory");
            Arc::new(MemoryStore::new())
        }
    };

    let tokens = services::token::TokenSigner::new(&config.token_secret, config.token_ttl_secs)
        .expect("token signer init failed");
    let state = state::AppState::new(store, tokens);

    let app = routes::app(state);
    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", config.port))
        .await
        .expect("failed to bind");

    tracing::info!(port = config.port, "pillarx backend listening");
    axum::serve(listener, app.into_make_service_with_connect_info::<SocketAddr>())
        .await
        .expect("server failed");
}

mod payloads;
mod responses;
mod routes;

use anyhow::Result;
use grounding_service::{GeminiConfig, GeminiService, QueryDispatcher};
use routes::AppState;
use std::sync::Arc;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize environment variables and logging
    dotenv::dotenv().ok();
    env_logger::init();

    // A missing credential would fail every request the same way, so refuse to start.
    let config = match GeminiConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            log::error!("Failed to load Gemini configuration: {}", e);
            std::process::exit(1);
        }
    };

    let backend = Arc::new(GeminiService::new(config));
    let state = AppState {
        dispatcher: Arc::new(QueryDispatcher::new(backend)),
    };

    let app = routes::router(state);

    let bind_addr = std::env::var("BIND_ADDR").unwrap_or_else(|_| DEFAULT_BIND_ADDR.to_string());
    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    log::info!("Listening on {}", listener.local_addr()?);
    axum::serve(listener, app).await?;

    Ok(())
}

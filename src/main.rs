//! Quotation Engine HTTP server.
//!
//! Loads reference data from `QUOTATION_CONFIG_DIR` (default
//! `./config/guard_staffing`) and listens on `QUOTATION_BIND_ADDR`
//! (default `0.0.0.0:8080`).

use quotation_engine::api::{AppState, create_router};
use quotation_engine::config::ConfigLoader;

const DEFAULT_CONFIG_DIR: &str = "./config/guard_staffing";
const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let config_dir =
        std::env::var("QUOTATION_CONFIG_DIR").unwrap_or_else(|_| DEFAULT_CONFIG_DIR.to_string());
    let bind_addr =
        std::env::var("QUOTATION_BIND_ADDR").unwrap_or_else(|_| DEFAULT_BIND_ADDR.to_string());

    let config = ConfigLoader::load(&config_dir).map_err(|e| {
        tracing::error!(config_dir = %config_dir, "Failed to load configuration: {e}");
        e
    })?;

    let router = create_router(AppState::new(config));
    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    tracing::info!(addr = %bind_addr, config_dir = %config_dir, "Quotation engine listening");

    axum::serve(listener, router).await?;
    Ok(())
}

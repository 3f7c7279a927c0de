//! Host for the causal network chat UI.
//!
//! Loads `.env`, reads [`config::ServerConfig`], and serves the Leptos app.

#![recursion_limit = "256"]

mod config;
mod routes;

use std::process::ExitCode;

use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ExitCode {
    let _ = dotenvy::dotenv();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "server failed");
            ExitCode::FAILURE
        }
    }
}

async fn run() -> Result<(), String> {
    let config = config::ServerConfig::from_env().map_err(|e| e.to_string())?;
    tracing::info!(
        backend = %config.client.backend_url,
        socket = %config.client.socket_url,
        "analysis backend configured"
    );

    let app = routes::leptos_app(config.client)?;
    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", config.port))
        .await
        .map_err(|e| format!("failed to bind: {e}"))?;

    tracing::info!(port = config.port, "causal-ui listening");
    axum::serve(listener, app)
        .await
        .map_err(|e| format!("server failed: {e}"))
}

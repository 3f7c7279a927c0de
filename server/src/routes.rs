//! Router assembly.
//!
//! SYSTEM CONTEXT
//! ==============
//! Server-renders the Leptos app, serves the compiled WASM bundle and CSS
//! under `/pkg`, and exposes `/healthz`. The analysis backend is a separate
//! service; the browser calls it directly with the URLs in `ClientConfig`.

#[cfg(test)]
#[path = "routes_test.rs"]
mod routes_test;

use std::path::PathBuf;

use axum::Router;
use axum::http::StatusCode;
use axum::routing::get;
use client::util::config::ClientConfig;
use leptos::prelude::*;
use leptos_axum::{LeptosRoutes, generate_route_list};
use tower_http::compression::CompressionLayer;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

fn base_routes() -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new().route("/healthz", get(healthz)).layer(cors)
}

/// Leptos SSR frontend plus static assets.
///
/// # Errors
///
/// Returns an error if the Leptos configuration cannot be loaded (missing or
/// malformed `[[workspace.metadata.leptos]]` section).
pub fn leptos_app(client_config: ClientConfig) -> Result<Router, String> {
    let conf = get_configuration(None).map_err(|e| format!("leptos configuration: {e}"))?;
    let leptos_options = conf.leptos_options;
    let routes = generate_route_list(client::app::App);

    let leptos_router = Router::new()
        .leptos_routes_with_context(
            &leptos_options,
            routes,
            {
                let client_config = client_config.clone();
                move || provide_context(client_config.clone())
            },
            {
                let opts = leptos_options.clone();
                move || {
                    provide_context(client_config.clone());
                    client::app::shell(opts.clone())
                }
            },
        )
        .with_state(leptos_options.clone());

    let site_root_path = PathBuf::from(leptos_options.site_root.as_ref());

    Ok(base_routes()
        .merge(leptos_router)
        .nest_service("/pkg", ServeDir::new(site_root_path.join("pkg")))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http()))
}

async fn healthz() -> StatusCode {
    StatusCode::OK
}

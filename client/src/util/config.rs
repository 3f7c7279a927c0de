//! Backend endpoints the browser talks to.
//!
//! The host server decides these (see `server::config`) and passes them to
//! the SSR shell through context. The shell writes them into `<meta>` tags,
//! and the hydrated app reads them back with [`ClientConfig::from_document`].

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use serde::{Deserialize, Serialize};

pub const DEFAULT_BACKEND_URL: &str = "http://localhost:8000";
pub const BACKEND_URL_META: &str = "causal-backend-url";
pub const SOCKET_URL_META: &str = "causal-socket-url";

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Base URL of the REST API.
    pub backend_url: String,
    /// Base URL of the Socket.IO server (`ws`/`wss` or `http`/`https`).
    pub socket_url: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::for_backend(DEFAULT_BACKEND_URL)
    }
}

impl ClientConfig {
    /// Config whose socket URL is derived from the backend URL.
    #[must_use]
    pub fn for_backend(backend_url: &str) -> Self {
        Self {
            backend_url: backend_url.trim_end_matches('/').to_owned(),
            socket_url: default_socket_url(backend_url),
        }
    }

    /// Read the endpoints from the shell's `<meta>` tags, falling back to the
    /// defaults for anything missing.
    #[must_use]
    pub fn from_document() -> Self {
        let backend = read_meta(BACKEND_URL_META);
        let socket = read_meta(SOCKET_URL_META);
        resolve(backend, socket)
    }
}

/// `http` → `ws`, `https` → `wss`; anything unparsable is kept as is.
#[must_use]
pub fn default_socket_url(backend_url: &str) -> String {
    network::socket::websocket_base(backend_url).unwrap_or_else(|_| backend_url.to_owned())
}

fn resolve(backend: Option<String>, socket: Option<String>) -> ClientConfig {
    let backend = backend.filter(|url| !url.trim().is_empty());
    let mut config = backend.as_deref().map_or_else(ClientConfig::default, ClientConfig::for_backend);
    if let Some(socket) = socket.filter(|url| !url.trim().is_empty()) {
        config.socket_url = socket;
    }
    config
}

fn read_meta(name: &str) -> Option<String> {
    #[cfg(feature = "hydrate")]
    {
        let document = web_sys::window()?.document()?;
        let selector = format!("meta[name=\"{name}\"]");
        document.query_selector(&selector).ok()??.get_attribute("content")
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = name;
        None
    }
}

//! Host configuration from the environment.
//!
//! SYSTEM CONTEXT
//! ==============
//! The host only needs to know where to listen and where the analysis backend
//! lives. The backend URLs are not used by the host itself; they are handed
//! to the browser through the SSR shell.
//!
//! ERROR HANDLING
//! ==============
//! Unset variables fall back to defaults. Set but invalid values are errors,
//! so a typo does not silently point the UI at the wrong backend.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use client::util::config::{ClientConfig, DEFAULT_BACKEND_URL};

pub const DEFAULT_PORT: u16 = 3000;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid PORT {0:?}")]
    InvalidPort(String),
    #[error("invalid {key} {value:?}: {reason}")]
    InvalidUrl { key: &'static str, value: String, reason: String },
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ServerConfig {
    pub port: u16,
    pub client: ClientConfig,
}

impl ServerConfig {
    /// Read `PORT`, `CAUSAL_BACKEND_URL`, and `CAUSAL_SOCKET_URL`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when a variable is set to an unusable value.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub(crate) fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let read = |key: &str| lookup(key).map(|v| v.trim().to_owned()).filter(|v| !v.is_empty());

        let port = match read("PORT") {
            Some(raw) => raw.parse::<u16>().map_err(|_| ConfigError::InvalidPort(raw))?,
            None => DEFAULT_PORT,
        };

        let backend_url = read("CAUSAL_BACKEND_URL").unwrap_or_else(|| DEFAULT_BACKEND_URL.to_owned());
        check_url("CAUSAL_BACKEND_URL", &backend_url)?;
        let mut client = ClientConfig::for_backend(&backend_url);

        if let Some(socket_url) = read("CAUSAL_SOCKET_URL") {
            check_url("CAUSAL_SOCKET_URL", &socket_url)?;
            client.socket_url = socket_url;
        }

        Ok(Self { port, client })
    }
}

fn check_url(key: &'static str, value: &str) -> Result<(), ConfigError> {
    network::socket::websocket_base(value)
        .map(|_| ())
        .map_err(|e| ConfigError::InvalidUrl {
            key,
            value: value.to_owned(),
            reason: e.to_string(),
        })
}

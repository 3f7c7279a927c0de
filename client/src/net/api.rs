//! REST gateway to the analysis backend.
//!
//! Client-side (hydrate): real HTTP calls via `gloo-net`.
//! Server-side (SSR): stubs returning `None` since these endpoints are only
//! meaningful in the browser.
//!
//! ERROR HANDLING
//! ==============
//! Every call resolves to `Option`. Transport failures, non-success statuses,
//! and undecodable bodies are logged with `warn!` and collapse to `None`, so
//! callers treat "no data" and "request failed" the same way. There are no
//! retries or timeouts.

#![allow(clippy::unused_async)]

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

use network::ChangeSet;
use network::ElementSet;
use network::api::{
    CHAT_HISTORY_PATH, EffectEstimate, INDEPENDENCE_LOG_PATH, INDEPENDENCE_PATH, IndependenceLog, IndependenceTests,
    MarkovBlanket, NETWORK_PATH, NODE_VALUES_PATH, NodeValuePair, TRACK_ACTIONS_PATH, TrackActions, endpoint,
    estimate_effect_path, markov_blanket_path,
};
use serde::Serialize;
use serde::de::DeserializeOwned;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Put,
}

impl HttpMethod {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Put => "PUT",
        }
    }
}

#[cfg(any(test, feature = "hydrate"))]
fn request_failed_message(method: HttpMethod, url: &str, status: u16) -> String {
    format!("{} {url} failed: {status}", method.as_str())
}

#[cfg(any(test, feature = "hydrate"))]
fn transport_failed_message(method: HttpMethod, url: &str, error: &str) -> String {
    format!("{} {url} failed: {error}", method.as_str())
}

/// Send one JSON request and hand back the successful response.
#[cfg(feature = "hydrate")]
async fn send<B: Serialize>(method: HttpMethod, url: &str, body: Option<&B>) -> Option<gloo_net::http::Response> {
    use gloo_net::http::Request;

    let builder = match method {
        HttpMethod::Get => Request::get(url),
        HttpMethod::Put => Request::put(url),
    }
    .header("Content-Type", "application/json");
    let request = match body {
        Some(body) => builder.json(body),
        None => builder.build(),
    };
    let request = match request {
        Ok(request) => request,
        Err(e) => {
            leptos::logging::warn!("{}", transport_failed_message(method, url, &e.to_string()));
            return None;
        }
    };

    let resp = match request.send().await {
        Ok(resp) => resp,
        Err(e) => {
            leptos::logging::warn!("{}", transport_failed_message(method, url, &e.to_string()));
            return None;
        }
    };
    if !resp.ok() {
        leptos::logging::warn!("{}", request_failed_message(method, url, resp.status()));
        return None;
    }
    Some(resp)
}

/// Call the backend and decode a JSON response.
pub async fn handle_api_call<T: DeserializeOwned, B: Serialize>(
    method: HttpMethod,
    url: &str,
    body: Option<&B>,
) -> Option<T> {
    #[cfg(feature = "hydrate")]
    {
        let resp = send(method, url, body).await?;
        match resp.json::<T>().await {
            Ok(value) => Some(value),
            Err(e) => {
                leptos::logging::warn!("{}", transport_failed_message(method, url, &e.to_string()));
                None
            }
        }
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = (method, url, body);
        None
    }
}

/// Call the backend where only success matters; the body is ignored.
pub async fn handle_api_ack<B: Serialize>(method: HttpMethod, url: &str, body: Option<&B>) -> Option<()> {
    #[cfg(feature = "hydrate")]
    {
        send(method, url, body).await.map(|_| ())
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = (method, url, body);
        None
    }
}

/// `GET /network`.
pub async fn fetch_network(base: &str) -> Option<ElementSet> {
    handle_api_call::<_, ()>(HttpMethod::Get, &endpoint(base, NETWORK_PATH), None).await
}

/// `PUT /network` with the pending edge changes.
pub async fn update_network(base: &str, changes: &ChangeSet) -> Option<()> {
    handle_api_ack(HttpMethod::Put, &endpoint(base, NETWORK_PATH), Some(changes)).await
}

/// `GET /network/data?unique_values=True`.
pub async fn fetch_node_values(base: &str) -> Option<Vec<NodeValuePair>> {
    handle_api_call::<_, ()>(HttpMethod::Get, &endpoint(base, NODE_VALUES_PATH), None).await
}

/// `GET /network/estimate_effect`; `treatment` is in `variable~value` form.
pub async fn estimate_effect(base: &str, treatment: &str, outcome: &str) -> Option<EffectEstimate> {
    let url = endpoint(base, &estimate_effect_path(treatment, outcome));
    handle_api_call::<_, ()>(HttpMethod::Get, &url, None).await
}

/// `GET /network/markov_blanket`.
pub async fn fetch_markov_blanket(base: &str, target: &str) -> Option<MarkovBlanket> {
    let url = endpoint(base, &markov_blanket_path(target));
    handle_api_call::<_, ()>(HttpMethod::Get, &url, None).await
}

/// `GET /network/test_independence`.
pub async fn test_independence(base: &str) -> Option<IndependenceTests> {
    handle_api_call::<_, ()>(HttpMethod::Get, &endpoint(base, INDEPENDENCE_PATH), None).await
}

/// `PUT /network/test_independence/log`.
pub async fn log_independence_test(base: &str, body: &IndependenceLog) -> Option<()> {
    handle_api_ack(HttpMethod::Put, &endpoint(base, INDEPENDENCE_LOG_PATH), Some(body)).await
}

/// `PUT /track_actions`.
pub async fn track_actions(base: &str, is_tracking: bool) -> Option<()> {
    let body = TrackActions { is_tracking };
    handle_api_ack(HttpMethod::Put, &endpoint(base, TRACK_ACTIONS_PATH), Some(&body)).await
}

/// `GET /chat_history` as plain text.
pub async fn fetch_chat_history(base: &str) -> Option<String> {
    #[cfg(feature = "hydrate")]
    {
        let url = endpoint(base, CHAT_HISTORY_PATH);
        let resp = gloo_net::http::Request::get(&url)
            .header("Content-Type", "text/plain")
            .send()
            .await;
        let resp = match resp {
            Ok(resp) if resp.ok() => resp,
            Ok(resp) => {
                leptos::logging::warn!("{}", request_failed_message(HttpMethod::Get, &url, resp.status()));
                return None;
            }
            Err(e) => {
                leptos::logging::warn!("{}", transport_failed_message(HttpMethod::Get, &url, &e.to_string()));
                return None;
            }
        };
        resp.text().await.ok()
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = (base, CHAT_HISTORY_PATH);
        None
    }
}

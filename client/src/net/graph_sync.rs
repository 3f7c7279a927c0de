//! Load and flush the network through the REST gateway.
//!
//! Flushing follows `EditTracker`'s batch protocol: take the pending edits,
//! `PUT` them, then confirm or fail the batch. A confirmed flush re-reads
//! `GET /network` so the view matches the backend. Every `GET /network`
//! carries a ticket from `GraphState::fetch_gate`; only the newest lands.

use crate::net::api;
use crate::state::graph::GraphState;
use leptos::prelude::{RwSignal, Update};

/// Fetch elements and node values and store whatever arrives.
pub async fn load_graph(graph: RwSignal<GraphState>, backend: &str) {
    refetch_network(graph, backend).await;
    if let Some(values) = api::fetch_node_values(backend).await {
        let _ = graph.try_update(|g| g.node_values = values);
    }
}

/// Send pending edits to the backend. Returns `true` when a batch was
/// confirmed.
pub async fn flush_edits(graph: RwSignal<GraphState>, backend: &str) -> bool {
    let batch = graph.try_update(|g| g.tracker.begin_flush()).flatten();
    let Some(batch) = batch else {
        return false;
    };

    if api::update_network(backend, batch.changes()).await.is_none() {
        let _ = graph.try_update(|g| g.tracker.fail_flush(&batch));
        leptos::logging::warn!("network update failed; {} edit(s) kept", batch.len());
        return false;
    }

    let confirmed = graph.try_update(|g| g.tracker.confirm_flush(&batch)).unwrap_or(false);
    if confirmed {
        refetch_network(graph, backend).await;
    }
    confirmed
}

async fn refetch_network(graph: RwSignal<GraphState>, backend: &str) {
    let Some(ticket) = graph.try_update(GraphState::begin_fetch) else {
        return;
    };
    if let Some(elements) = api::fetch_network(backend).await {
        let applied = graph.try_update(|g| g.apply_fetched(ticket, elements));
        if applied == Some(false) {
            leptos::logging::log!("dropped a superseded network snapshot");
        }
    }
}

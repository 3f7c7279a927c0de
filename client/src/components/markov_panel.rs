//! Markov blanket lookup.
//!
//! Selecting a target clears the current highlight, asks the backend for the
//! target's blanket, then paints the target red and the blanket blue.
//! Choosing the blank option drops any outstanding lookup and clears the
//! highlight.

#[cfg(test)]
#[path = "markov_panel_test.rs"]
mod markov_panel_test;

use leptos::prelude::*;
use network::RequestGate;
use network::api::NodeValuePair;
use network::tools::markov_blanket_plan;

use crate::net::api;
use crate::state::graph::GraphState;
use crate::util::config::ClientConfig;

/// Targets are the nodes the backend reported values for.
fn target_options(values: &[NodeValuePair]) -> Vec<String> {
    values.iter().map(|pair| pair.node.clone()).collect()
}

#[component]
pub fn MarkovPanel() -> impl IntoView {
    let graph = expect_context::<RwSignal<GraphState>>();
    let config = expect_context::<ClientConfig>();

    let target = RwSignal::new(String::new());
    let gate = StoredValue::new(RequestGate::new());

    on_cleanup(move || {
        let _ = gate.try_update_value(RequestGate::invalidate);
    });

    let on_select = move |ev: leptos::ev::Event| {
        let selected = event_target_value(&ev);
        target.set(selected.clone());
        if selected.is_empty() {
            let _ = gate.try_update_value(RequestGate::invalidate);
            graph.update(|g| g.show(None));
            return;
        }
        graph.update(GraphState::reset_colors);
        let Some(ticket) = gate.try_update_value(RequestGate::issue) else {
            return;
        };
        let backend = config.backend_url.clone();
        leptos::task::spawn_local(async move {
            let Some(blanket) = api::fetch_markov_blanket(&backend, &selected).await else {
                return;
            };
            if gate.try_with_value(|g| g.is_current(ticket)) != Some(true) {
                return;
            }
            let members = blanket.members(&selected);
            let plan = markov_blanket_plan(&selected, members);
            let with_key = !members.is_empty();
            graph.update(|g| {
                if with_key {
                    g.highlight(&plan, false);
                } else {
                    g.paint(&plan, false);
                }
            });
        });
    };

    let node_options = move || {
        graph.with(|g| {
            target_options(&g.node_values)
                .into_iter()
                .map(|node| view! { <option value=node.clone()>{node.clone()}</option> })
                .collect::<Vec<_>>()
        })
    };

    view! {
        <div class="tool markov-panel">
            <select class="tool__select" on:change=on_select prop:value=move || target.get()>
                <option value="">"Markov Blanket \u{25be}"</option>
                {node_options}
            </select>
        </div>
    }
}

//! SVG rendering of the causal network with click-to-edit edges.
//!
//! SYSTEM CONTEXT
//! ==============
//! Positions come from `network::layout::layered`; colors come from the
//! graph's `Stylesheet`. In edit mode a node click is forwarded to the
//! `EditTracker`, which toggles the edge between the previously selected node
//! and the clicked one. Escape drops a half-selected edge.
//!
//! DESIGN
//! ======
//! The graph signal is passed in as a prop rather than looked up from
//! context so the view has exactly one owner of the element set. Leaving edit
//! mode flushes pending edits through `net::graph_sync`.

#[cfg(test)]
#[path = "graph_view_test.rs"]
mod graph_view_test;

use leptos::prelude::*;
use network::ClickOutcome;
use network::layout::{GraphLayout, NODE_RADIUS, layered};

use crate::net::graph_sync::flush_edits;
use crate::state::graph::GraphState;
use crate::util::config::ClientConfig;

/// A node ready to draw.
#[derive(Clone, Debug, PartialEq)]
struct NodeView {
    id: String,
    label: String,
    x: f64,
    y: f64,
    fill: String,
    selected: bool,
}

fn node_views(state: &GraphState, layout: &GraphLayout) -> Vec<NodeView> {
    let selected = state.tracker.selected();
    layout
        .nodes
        .iter()
        .map(|node| NodeView {
            id: node.id.clone(),
            label: node.label.clone(),
            x: node.x,
            y: node.y,
            fill: state.stylesheet.node_color(&node.id).to_owned(),
            selected: selected == Some(node.id.as_str()),
        })
        .collect()
}

fn toggle_label(edit_mode: bool) -> &'static str {
    if edit_mode { "Stop Editing" } else { "\u{270e}" }
}

fn describe_click(outcome: &ClickOutcome) -> Option<String> {
    match outcome {
        ClickOutcome::FirstSelected(id) => Some(format!("selected {id}")),
        ClickOutcome::Added(id) => Some(format!("added edge {id}")),
        ClickOutcome::Removed(id) => Some(format!("removed edge {id}")),
        ClickOutcome::Inactive | ClickOutcome::Ignored => None,
    }
}

/// The graph panel.
#[component]
pub fn GraphView(graph: RwSignal<GraphState>) -> impl IntoView {
    let config = expect_context::<ClientConfig>();

    #[cfg(feature = "hydrate")]
    {
        let handle = window_event_listener(leptos::ev::keydown, move |ev| {
            if ev.key() == "Escape" {
                graph.update(|g| g.tracker.clear_selection());
            }
        });
        on_cleanup(move || handle.remove());
    }

    let layout = Memo::new(move |_| graph.with(|g| layered(&g.elements)));
    let edit_mode = move || graph.with(|g| g.tracker.edit_mode());

    let on_toggle = move |_| {
        let editing = graph.try_update(|g| g.tracker.toggle_edit_mode()).unwrap_or(false);
        leptos::logging::log!("edit mode {}", if editing { "on" } else { "off" });
        let backend = config.backend_url.clone();
        leptos::task::spawn_local(async move {
            flush_edits(graph, &backend).await;
        });
    };

    let on_node_click = move |id: String| {
        let outcome = graph.try_update(|g| {
            let GraphState { elements, tracker, .. } = g;
            tracker.click_node(elements, &id)
        });
        if let Some(message) = outcome.as_ref().and_then(describe_click) {
            leptos::logging::log!("{message}");
        }
    };

    view! {
        <div class="graph-panel" class:graph-panel--editing=edit_mode>
            <div class="graph-panel__toolbar">
                <button class="btn graph-panel__edit" on:click=on_toggle>
                    {move || toggle_label(edit_mode())}
                </button>
                {move || graph.with(GraphState::edit_status).map(|status| {
                    view! { <span class="graph-panel__status">{status}</span> }
                })}
            </div>
            {move || {
                let layout = layout.get();
                if layout.nodes.is_empty() {
                    return view! { <div class="graph-panel__empty">"No Nodes"</div> }.into_any();
                }
                let nodes = graph.with(|g| node_views(g, &layout));
                let view_box = format!("0 0 {} {}", layout.width, layout.height);
                view! {
                    <svg class="graph-panel__svg" viewBox=view_box>
                        <defs>
                            <marker
                                id="arrow"
                                viewBox="0 0 10 10"
                                refX="10"
                                refY="5"
                                markerWidth="8"
                                markerHeight="8"
                                orient="auto-start-reverse"
                            >
                                <path d="M 0 0 L 10 5 L 0 10 z" class="graph-panel__arrow"></path>
                            </marker>
                        </defs>
                        {layout
                            .edges
                            .iter()
                            .map(|edge| {
                                view! {
                                    <line
                                        class="graph-panel__edge"
                                        x1=edge.x1
                                        y1=edge.y1
                                        x2=edge.x2
                                        y2=edge.y2
                                        marker-end="url(#arrow)"
                                    ></line>
                                }
                            })
                            .collect::<Vec<_>>()}
                        {nodes
                            .into_iter()
                            .map(|node| {
                                let id = node.id.clone();
                                view! {
                                    <g class="graph-panel__node" on:click=move |_| on_node_click(id.clone())>
                                        <circle
                                            cx=node.x
                                            cy=node.y
                                            r=NODE_RADIUS
                                            fill=node.fill
                                            class:graph-panel__node--selected=node.selected
                                        ></circle>
                                        <text x=node.x y=node.y text-anchor="middle" dominant-baseline="central">
                                            {node.label}
                                        </text>
                                    </g>
                                }
                            })
                            .collect::<Vec<_>>()}
                    </svg>
                }
                    .into_any()
            }}
        </div>
    }
}

//! Legend for the active highlight.

use leptos::prelude::*;

use crate::state::graph::GraphState;

/// Colored dots with labels; renders nothing while the legend is empty.
#[component]
pub fn ToolKey() -> impl IntoView {
    let graph = expect_context::<RwSignal<GraphState>>();

    move || {
        let key = graph.with(|g| g.key.clone());
        (!key.is_empty()).then(|| {
            view! {
                <div class="tool-key">
                    {key
                        .into_iter()
                        .map(|entry| {
                            let style = format!("background-color: {}", entry.color);
                            view! {
                                <div class="tool-key__entry">
                                    <span class="tool-key__dot" style=style></span>
                                    <span class="tool-key__label">{entry.label}</span>
                                </div>
                            }
                        })
                        .collect::<Vec<_>>()}
                </div>
            }
        })
    }
}

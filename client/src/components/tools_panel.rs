//! Container for the statistical tool panels.

use leptos::prelude::*;

use crate::components::effect_panel::EffectPanel;
use crate::components::independence_panel::IndependencePanel;
use crate::components::markov_panel::MarkovPanel;
use crate::components::tool_key::ToolKey;

#[component]
pub fn ToolsPanel() -> impl IntoView {
    view! {
        <section class="tools-panel">
            <h2 class="tools-panel__title">"Tools:"</h2>
            <ToolKey/>
            <EffectPanel/>
            <MarkovPanel/>
            <IndependencePanel/>
        </section>
    }
}

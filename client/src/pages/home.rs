//! Home page: graph, tool panels, and the pinned chat.
//!
//! ARCHITECTURE
//! ============
//! The page loads the network and node values once on mount. Everything else
//! is driven by the components through the shared state signals.

use leptos::prelude::*;

use crate::components::chat_panel::ChatPanel;
use crate::components::footer::Footer;
use crate::components::graph_view::GraphView;
use crate::components::navbar::Navbar;
use crate::components::tools_panel::ToolsPanel;
use crate::net::graph_sync::load_graph;
use crate::state::graph::GraphState;
use crate::util::config::ClientConfig;

#[component]
pub fn HomePage() -> impl IntoView {
    let graph = expect_context::<RwSignal<GraphState>>();
    let config = expect_context::<ClientConfig>();
    let backend = StoredValue::new(config.backend_url);

    Effect::new(move || {
        let backend = backend.get_value();
        leptos::task::spawn_local(async move {
            load_graph(graph, &backend).await;
        });
    });

    view! {
        <div class="home">
            <Navbar/>
            <main class="home__body">
                <GraphView graph=graph/>
                <ToolsPanel/>
            </main>
            <ChatPanel/>
            <Footer/>
        </div>
    }
}

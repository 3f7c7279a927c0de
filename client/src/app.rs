//! Root application component with routing and context providers.

use leptos::prelude::*;
use leptos_meta::{MetaTags, Stylesheet, Title, provide_meta_context};
use leptos_router::{
    StaticSegment,
    components::{Route, Router, Routes},
};

use crate::pages::home::HomePage;
use crate::state::{chat::ChatState, graph::GraphState, ui::UiState};
use crate::util::config::{BACKEND_URL_META, ClientConfig, SOCKET_URL_META};

/// HTML shell rendered on the server for SSR + hydration.
///
/// The backend endpoints chosen by the host are embedded as `<meta>` tags so
/// the hydrated app can read them back.
pub fn shell(options: LeptosOptions) -> impl IntoView {
    let config = use_context::<ClientConfig>().unwrap_or_default();
    view! {
        <!DOCTYPE html>
        <html lang="en">
            <head>
                <meta charset="utf-8"/>
                <meta name="viewport" content="width=device-width, initial-scale=1"/>
                <meta name=BACKEND_URL_META content=config.backend_url/>
                <meta name=SOCKET_URL_META content=config.socket_url/>
                <AutoReload options=options.clone()/>
                <HydrationScripts options/>
                <MetaTags/>
            </head>
            <body>
                <App/>
            </body>
        </html>
    }
}

/// Root application component.
///
/// Provides the shared state contexts and the backend configuration.
#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    let config = use_context::<ClientConfig>().unwrap_or_else(ClientConfig::from_document);
    provide_context(config);

    provide_context(RwSignal::new(GraphState::default()));
    provide_context(RwSignal::new(ChatState::default()));
    provide_context(RwSignal::new(UiState::default()));

    view! {
        <Stylesheet id="leptos" href="/pkg/causal-ui.css"/>
        <Title text="Causal Network Chat Tool"/>

        <Router>
            <Routes fallback=|| "Page not found.".into_view()>
                <Route path=StaticSegment("") view=HomePage/>
            </Routes>
        </Router>
    }
}

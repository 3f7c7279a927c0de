//! Download the backend's chat transcript.

use leptos::prelude::*;
use network::tools::chat_history_file_name;

use crate::net::api;
use crate::util::clock::now_local;
use crate::util::config::ClientConfig;
use crate::util::download::save_text;

#[component]
pub fn ChatHistoryButton() -> impl IntoView {
    let config = expect_context::<ClientConfig>();
    let backend = StoredValue::new(config.backend_url);

    let on_click = move |_| {
        let backend = backend.get_value();
        leptos::task::spawn_local(async move {
            let Some(history) = api::fetch_chat_history(&backend).await else {
                return;
            };
            let file_name = chat_history_file_name(now_local());
            if let Err(e) = save_text(&file_name, &history) {
                leptos::logging::warn!("chat history download failed: {e}");
            }
        });
    };

    view! {
        <button class="btn chat-history" on:click=on_click>
            "Download chat history"
        </button>
    }
}

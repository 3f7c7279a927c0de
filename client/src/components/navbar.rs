//! Top bar with the app title and session controls.

use leptos::prelude::*;

use crate::components::chat_history_button::ChatHistoryButton;
use crate::components::track_actions_button::TrackActionsButton;

#[component]
pub fn Navbar() -> impl IntoView {
    view! {
        <nav class="navbar">
            <span class="navbar__title">"Causal Network Chat Tool"</span>
            <div class="navbar__actions">
                <TrackActionsButton/>
                <ChatHistoryButton/>
            </div>
        </nav>
    }
}

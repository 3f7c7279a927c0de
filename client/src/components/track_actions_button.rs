//! Toggle for backend interaction tracking.
//!
//! The backend is told the current setting once on mount and again on every
//! toggle.

#[cfg(test)]
#[path = "track_actions_button_test.rs"]
mod track_actions_button_test;

use leptos::prelude::*;

use crate::net::api;
use crate::state::ui::UiState;
use crate::util::config::ClientConfig;

fn button_text(tracking: bool) -> &'static str {
    if tracking { "Tracking actions (click to stop)" } else { "Click to track actions" }
}

fn send_tracking(backend: String, is_tracking: bool) {
    leptos::task::spawn_local(async move {
        if api::track_actions(&backend, is_tracking).await.is_none() {
            leptos::logging::warn!("tracking state not sent");
        }
    });
}

#[component]
pub fn TrackActionsButton() -> impl IntoView {
    let ui = expect_context::<RwSignal<UiState>>();
    let config = expect_context::<ClientConfig>();
    let backend = StoredValue::new(config.backend_url);

    Effect::new(move || {
        send_tracking(backend.get_value(), ui.with_untracked(|u| u.tracking_actions));
    });

    let on_click = move |_| {
        let tracking = ui.try_update(|u| {
            u.tracking_actions = !u.tracking_actions;
            u.tracking_actions
        });
        if let Some(tracking) = tracking {
            send_tracking(backend.get_value(), tracking);
        }
    };

    view! {
        <button
            class="btn track-actions"
            class:track-actions--on=move || ui.with(|u| u.tracking_actions)
            on:click=on_click
        >
            {move || button_text(ui.with(|u| u.tracking_actions))}
        </button>
    }
}

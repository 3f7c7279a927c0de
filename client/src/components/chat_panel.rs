//! Pinned assistant chat window.
//!
//! SYSTEM CONTEXT
//! ==============
//! Mounting the panel opens the Socket.IO connection (`net::chat_socket`);
//! unmounting closes it. Each sent message carries the "include interaction
//! context" flag so the backend can attach the user's recent tool usage.
//! Assistant replies are Markdown, rendered with raw HTML stripped.

#[cfg(test)]
#[path = "chat_panel_test.rs"]
mod chat_panel_test;

use leptos::prelude::*;
use network::socket::UserMessage;

use crate::net::chat_socket::{ChatSocket, spawn_chat_socket};
use crate::state::chat::{ChatConnection, ChatRole, ChatState};
use crate::state::ui::UiState;
use crate::util::config::ClientConfig;
use crate::util::markdown::render_markdown_html;

/// Trimmed message to send, or `None` when there is nothing to send.
fn outgoing_message(input: &str, include_context: bool) -> Option<UserMessage> {
    let message = input.trim();
    (!message.is_empty()).then(|| UserMessage {
        message: message.to_owned(),
        send_user_actions: include_context,
    })
}

fn connection_label(connection: ChatConnection) -> &'static str {
    match connection {
        ChatConnection::Connecting => "connecting",
        ChatConnection::Connected => "online",
        ChatConnection::Disconnected => "offline",
    }
}

#[component]
pub fn ChatPanel() -> impl IntoView {
    let chat = expect_context::<RwSignal<ChatState>>();
    let ui = expect_context::<RwSignal<UiState>>();
    let config = expect_context::<ClientConfig>();

    let socket = StoredValue::new(None::<ChatSocket>);
    Effect::new(move || {
        if socket.with_value(Option::is_none) {
            socket.set_value(spawn_chat_socket(&config.socket_url, chat));
        }
    });
    on_cleanup(move || {
        let _ = socket.try_with_value(|s| {
            if let Some(s) = s {
                s.close();
            }
        });
    });

    let input = RwSignal::new(String::new());
    let messages_ref = NodeRef::<leptos::html::Div>::new();

    Effect::new(move || {
        let _ = chat.with(|c| c.messages.len());

        #[cfg(feature = "hydrate")]
        {
            if let Some(el) = messages_ref.get() {
                el.set_scroll_top(el.scroll_height());
            }
        }
    });

    let do_send = move || {
        let include_context = chat.with_untracked(|c| c.include_context);
        let Some(message) = input.with_untracked(|text| outgoing_message(text, include_context)) else {
            return;
        };
        let sent = socket.with_value(|s| s.as_ref().is_some_and(|s| s.send(&message)));
        if sent {
            chat.update(|c| c.push_user(message.message));
            input.set(String::new());
        } else {
            leptos::logging::warn!("chat message not sent: socket is closed");
        }
    };

    let on_keydown = move |ev: leptos::ev::KeyboardEvent| {
        if ev.key() == "Enter" && !ev.shift_key() {
            ev.prevent_default();
            do_send();
        }
    };

    let is_open = move || ui.with(|u| u.chat_open);

    view! {
        <aside class="chat-panel" class:chat-panel--closed=move || !is_open()>
            <header class="chat-panel__header" on:click=move |_| ui.update(|u| u.chat_open = !u.chat_open)>
                <span class="chat-panel__title">"Chat"</span>
                <span class="chat-panel__status">{move || connection_label(chat.with(|c| c.connection))}</span>
                <span class="chat-panel__toggle">{move || if is_open() { "\u{25be}" } else { "\u{25b4}" }}</span>
            </header>
            <Show when=is_open>
                <div class="chat-panel__messages" node_ref=messages_ref>
                    {move || {
                        chat.with(|c| {
                            c.messages
                                .iter()
                                .map(|msg| {
                                    let is_assistant = msg.role == ChatRole::Assistant;
                                    let body = if is_assistant {
                                        let rendered = render_markdown_html(&msg.content);
                                        view! { <div class="chat-panel__markdown" inner_html=rendered></div> }
                                            .into_any()
                                    } else {
                                        view! { <span>{msg.content.clone()}</span> }.into_any()
                                    };
                                    view! {
                                        <div
                                            class="chat-panel__message"
                                            class:chat-panel__message--assistant=is_assistant
                                        >
                                            {body}
                                        </div>
                                    }
                                })
                                .collect::<Vec<_>>()
                        })
                    }}
                    {move || {
                        chat.with(|c| c.awaiting_reply)
                            .then(|| view! { <div class="chat-panel__loading">"Thinking..."</div> })
                    }}
                </div>
                <label class="chat-panel__context">
                    <input
                        type="checkbox"
                        prop:checked=move || chat.with(|c| c.include_context)
                        on:change=move |ev| chat.update(|c| c.include_context = event_target_checked(&ev))
                    />
                    "Include interaction context"
                </label>
                <div class="chat-panel__input-row">
                    <input
                        class="chat-panel__input"
                        type="text"
                        placeholder="Ask about the network..."
                        prop:value=move || input.get()
                        on:input=move |ev| input.set(event_target_value(&ev))
                        on:keydown=on_keydown
                    />
                    <button
                        class="btn btn--primary"
                        on:click=move |_| do_send()
                        disabled=move || input.with(|t| t.trim().is_empty())
                    >
                        "Send"
                    </button>
                </div>
            </Show>
        </aside>
    }
}

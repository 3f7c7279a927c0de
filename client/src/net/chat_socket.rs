//! Socket.IO chat connection to the assistant.
//!
//! SYSTEM CONTEXT
//! ==============
//! The chat panel opens one WebSocket to the backend's Socket.IO endpoint
//! when it mounts and closes it on unmount. Outgoing user messages are queued
//! on an unbounded channel and held back until the namespace connect is
//! acknowledged; incoming frames are decoded with `network::socket` and
//! folded into `ChatState`.
//!
//! TRADE-OFFS
//! ==========
//! There is no reconnect loop. A dropped connection leaves the panel in the
//! disconnected state until it is remounted.

#[cfg(test)]
#[path = "chat_socket_test.rs"]
mod chat_socket_test;

#[cfg(any(test, feature = "hydrate"))]
use crate::state::chat::ChatConnection;
use crate::state::chat::ChatState;
#[cfg(any(test, feature = "hydrate"))]
use network::socket::{ChannelEvent, connect_packet, pong_packet};
use network::socket::UserMessage;

/// Sending half of a live chat connection.
#[derive(Clone)]
pub struct ChatSocket {
    #[cfg(feature = "hydrate")]
    tx: futures::channel::mpsc::UnboundedSender<String>,
}

impl ChatSocket {
    /// Queue `message` as a `user_message` event. Returns `false` once the
    /// connection is gone or the message cannot be encoded.
    pub fn send(&self, message: &UserMessage) -> bool {
        #[cfg(feature = "hydrate")]
        {
            match network::socket::user_message_packet(message) {
                Ok(packet) => self.tx.unbounded_send(packet).is_ok(),
                Err(e) => {
                    leptos::logging::warn!("chat encode failed: {e}");
                    false
                }
            }
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = message;
            false
        }
    }

    /// Stop the send loop, which tears down the socket.
    pub fn close(&self) {
        #[cfg(feature = "hydrate")]
        self.tx.close_channel();
    }
}

/// User packets waiting for the namespace to be joined.
///
/// Socket.IO drops events sent to a namespace before its `40` connect is
/// acknowledged, so packets pushed early are held and released in order by
/// [`OutboundQueue::join`].
#[cfg(any(test, feature = "hydrate"))]
#[derive(Debug, Default)]
struct OutboundQueue {
    joined: bool,
    held: Vec<String>,
}

#[cfg(any(test, feature = "hydrate"))]
impl OutboundQueue {
    /// Returns the packet when it can go out now.
    fn push(&mut self, packet: String) -> Option<String> {
        if self.joined {
            Some(packet)
        } else {
            self.held.push(packet);
            None
        }
    }

    fn join(&mut self) -> Vec<String> {
        self.joined = true;
        std::mem::take(&mut self.held)
    }
}

/// Apply one decoded frame to the chat state.
///
/// Returns the frame to write back, if the protocol requires an answer.
#[cfg(any(test, feature = "hydrate"))]
fn handle_channel_event(event: ChannelEvent, chat: &mut ChatState) -> Option<String> {
    match event {
        ChannelEvent::Open(_) => Some(connect_packet()),
        ChannelEvent::Ping(data) => Some(pong_packet(&data)),
        ChannelEvent::Connected => {
            chat.connection = ChatConnection::Connected;
            None
        }
        ChannelEvent::Response(response) => {
            chat.push_assistant(response.data);
            None
        }
        ChannelEvent::ConnectError(_) | ChannelEvent::Disconnected => {
            chat.connection = ChatConnection::Disconnected;
            chat.awaiting_reply = false;
            None
        }
        ChannelEvent::Event { .. } | ChannelEvent::Noop => None,
    }
}

/// Open the chat socket and start its I/O loop.
///
/// Returns `None` when the URL is invalid or the socket cannot be opened;
/// SSR builds always return `None`.
pub fn spawn_chat_socket(socket_url: &str, chat: leptos::prelude::RwSignal<ChatState>) -> Option<ChatSocket> {
    #[cfg(feature = "hydrate")]
    {
        use futures::StreamExt;
        use gloo_net::websocket::Message;
        use gloo_net::websocket::futures::WebSocket;
        use leptos::prelude::Update;

        let url = match network::socket::socket_endpoint(socket_url) {
            Ok(url) => url,
            Err(e) => {
                leptos::logging::warn!("chat socket url: {e}");
                return None;
            }
        };
        let ws = match WebSocket::open(&url) {
            Ok(ws) => ws,
            Err(e) => {
                leptos::logging::warn!("chat socket open failed: {e}");
                chat.update(|c| c.connection = ChatConnection::Disconnected);
                return None;
            }
        };
        chat.update(|c| c.connection = ChatConnection::Connecting);

        enum Step {
            User(String),
            Closed,
            Frame(Result<Message, gloo_net::websocket::WebSocketError>),
        }

        let (tx, rx) = futures::channel::mpsc::unbounded::<String>();
        let (mut ws_write, ws_read) = ws.split();
        let user = rx
            .map(Step::User)
            .chain(futures::stream::once(futures::future::ready(Step::Closed)));
        let mut steps = futures::stream::select(user, ws_read.map(Step::Frame));

        leptos::task::spawn_local(async move {
            use futures::SinkExt;

            let mut queue = OutboundQueue::default();
            'io: while let Some(step) = steps.next().await {
                let mut out = Vec::new();
                let mut closing = false;
                match step {
                    Step::User(packet) => out.extend(queue.push(packet)),
                    Step::Closed => break,
                    Step::Frame(Ok(Message::Text(text))) => {
                        let event = match network::socket::read_channel_event(&text) {
                            Ok(event) => event,
                            Err(e) => {
                                leptos::logging::warn!("chat frame dropped: {e}");
                                continue;
                            }
                        };
                        closing = event == ChannelEvent::Disconnected;
                        let joined = event == ChannelEvent::Connected;
                        let _ = chat.try_update(|c| out.extend(handle_channel_event(event, c)));
                        if joined {
                            out.extend(queue.join());
                        }
                    }
                    Step::Frame(Ok(Message::Bytes(_))) => {}
                    Step::Frame(Err(e)) => {
                        leptos::logging::warn!("chat socket recv error: {e}");
                        break;
                    }
                }
                for packet in out {
                    if ws_write.send(Message::Text(packet)).await.is_err() {
                        break 'io;
                    }
                }
                if closing {
                    break;
                }
            }

            let _ = ws_write.close().await;
            let _ = chat.try_update(|c| {
                c.connection = ChatConnection::Disconnected;
                c.awaiting_reply = false;
            });
            leptos::logging::log!("chat socket closed");
        });

        Some(ChatSocket { tx })
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = (socket_url, chat);
        None
    }
}

use super::*;
use crate::state::chat::ChatRole;
use network::socket::{Handshake, ResponseMessage};

fn handshake() -> Handshake {
    Handshake {
        sid: "abc".to_owned(),
        upgrades: Vec::new(),
        ping_interval: 25_000,
        ping_timeout: 20_000,
        max_payload: None,
    }
}

#[test]
fn open_answers_with_namespace_connect() {
    let mut chat = ChatState::default();
    assert_eq!(handle_channel_event(ChannelEvent::Open(handshake()), &mut chat), Some("40".to_owned()));
    assert_eq!(chat.connection, ChatConnection::Disconnected);
}

#[test]
fn ping_answers_with_pong() {
    let mut chat = ChatState::default();
    assert_eq!(handle_channel_event(ChannelEvent::Ping(String::new()), &mut chat), Some("3".to_owned()));
}

#[test]
fn connected_updates_status() {
    let mut chat = ChatState::default();
    assert!(handle_channel_event(ChannelEvent::Connected, &mut chat).is_none());
    assert_eq!(chat.connection, ChatConnection::Connected);
}

#[test]
fn response_appends_assistant_message() {
    let mut chat = ChatState::default();
    chat.push_user("what is X?");
    let event = ChannelEvent::Response(ResponseMessage { data: "X causes Y".to_owned() });
    assert!(handle_channel_event(event, &mut chat).is_none());

    let last = chat.messages.last().expect("message");
    assert_eq!(last.role, ChatRole::Assistant);
    assert_eq!(last.content, "X causes Y");
    assert!(!chat.awaiting_reply);
}

#[test]
fn disconnect_clears_waiting_flag() {
    let mut chat = ChatState { connection: ChatConnection::Connected, ..ChatState::default() };
    chat.push_user("hello");
    handle_channel_event(ChannelEvent::Disconnected, &mut chat);
    assert_eq!(chat.connection, ChatConnection::Disconnected);
    assert!(!chat.awaiting_reply);
}

#[test]
fn unrelated_events_are_ignored() {
    let mut chat = ChatState::default();
    let before = chat.messages.len();
    let event = ChannelEvent::Event { name: "status".to_owned(), args: Vec::new() };
    assert!(handle_channel_event(event, &mut chat).is_none());
    assert_eq!(chat.messages.len(), before);
}

#[test]
fn user_packets_wait_for_namespace_connect() {
    let mut queue = OutboundQueue::default();
    assert_eq!(queue.push("42[\"user_message\",\"first\"]".to_owned()), None);
    assert_eq!(queue.push("42[\"user_message\",\"second\"]".to_owned()), None);

    let mut chat = ChatState::default();
    assert!(handle_channel_event(ChannelEvent::Connected, &mut chat).is_none());
    assert_eq!(
        queue.join(),
        vec!["42[\"user_message\",\"first\"]".to_owned(), "42[\"user_message\",\"second\"]".to_owned()]
    );
    assert_eq!(queue.push("42[\"user_message\",\"third\"]".to_owned()).as_deref(), Some("42[\"user_message\",\"third\"]"));
    assert!(queue.join().is_empty());
}

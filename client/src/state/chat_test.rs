use super::*;

// =============================================================
// ChatState defaults
// =============================================================

#[test]
fn chat_state_starts_with_greeting() {
    let state = ChatState::default();
    assert_eq!(state.messages.len(), 1);
    assert_eq!(state.messages[0].role, ChatRole::Assistant);
    assert_eq!(state.messages[0].content, GREETING);
}

#[test]
fn chat_state_includes_context_by_default() {
    let state = ChatState::default();
    assert!(state.include_context);
    assert_eq!(state.connection, ChatConnection::Disconnected);
    assert!(!state.awaiting_reply);
}

// =============================================================
// Transcript ordering
// =============================================================

#[test]
fn replies_append_in_receive_order() {
    let mut state = ChatState::default();
    state.push_user("What is the effect of smoking?");
    assert!(state.awaiting_reply);
    state.push_assistant("first");
    state.push_assistant("second");
    assert!(!state.awaiting_reply);

    let contents: Vec<&str> = state.messages.iter().skip(1).map(|m| m.content.as_str()).collect();
    assert_eq!(contents, vec!["What is the effect of smoking?", "first", "second"]);
}

#[test]
fn message_ids_are_unique() {
    let a = ChatMessage::new(ChatRole::User, "x");
    let b = ChatMessage::new(ChatRole::User, "x");
    assert_ne!(a.id, b.id);
}

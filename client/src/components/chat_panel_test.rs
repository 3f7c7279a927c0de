use super::*;

#[test]
fn outgoing_message_trims_and_carries_context_flag() {
    let message = outgoing_message("  why is X red?  ", false).expect("message");
    assert_eq!(message.message, "why is X red?");
    assert!(!message.send_user_actions);
}

#[test]
fn blank_input_is_not_sent() {
    assert!(outgoing_message("   ", true).is_none());
    assert!(outgoing_message("", true).is_none());
}

#[test]
fn connection_labels() {
    assert_eq!(connection_label(ChatConnection::Connected), "online");
    assert_eq!(connection_label(ChatConnection::Disconnected), "offline");
}

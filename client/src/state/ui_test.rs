use super::*;

#[test]
fn ui_state_defaults() {
    let state = UiState::default();
    assert!(state.tracking_actions);
    assert!(state.chat_open);
}

use super::*;

#[test]
fn text_reflects_tracking_state() {
    assert_eq!(button_text(true), "Tracking actions (click to stop)");
    assert_eq!(button_text(false), "Click to track actions");
}

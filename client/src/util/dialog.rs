//! Blocking browser dialogs.

/// Show `message` in a `window.alert`. Logged instead outside the browser.
pub fn alert(message: &str) {
    #[cfg(feature = "hydrate")]
    {
        if let Some(window) = web_sys::window() {
            if window.alert_with_message(message).is_ok() {
                return;
            }
        }
    }
    leptos::logging::warn!("{message}");
}

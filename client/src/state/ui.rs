//! Local UI chrome state.
//!
//! DESIGN
//! ======
//! Keeps transient presentation toggles out of domain state (`graph`, `chat`)
//! so rendering controls can evolve independently of backend data.

#[cfg(test)]
#[path = "ui_test.rs"]
mod ui_test;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UiState {
    /// Whether the backend should record user interactions.
    pub tracking_actions: bool,
    /// Pinned chat window expanded.
    pub chat_open: bool,
}

impl Default for UiState {
    fn default() -> Self {
        Self {
            tracking_actions: true,
            chat_open: true,
        }
    }
}

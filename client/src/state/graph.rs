//! Graph view state: elements, edge edits, and node highlighting.
//!
//! SYSTEM CONTEXT
//! ==============
//! The graph view, the tool panels, and the sync helpers in `net::graph_sync`
//! all read and write this one signal. Elements are replaced wholesale from
//! the backend after a confirmed flush; in between, edits mutate them locally.

#[cfg(test)]
#[path = "graph_test.rs"]
mod graph_test;

use network::api::NodeValuePair;
use network::{EditPhase, EditTracker, ElementSet, HighlightPlan, KeyEntry, PendingEdit, RequestGate, Stylesheet, Ticket};

#[derive(Clone, Debug, Default)]
pub struct GraphState {
    pub elements: ElementSet,
    pub tracker: EditTracker,
    pub stylesheet: Stylesheet,
    /// Legend for the active highlight.
    pub key: Vec<KeyEntry>,
    /// Distinct values per node, used by the tool pickers.
    pub node_values: Vec<NodeValuePair>,
    /// `true` once the first `GET /network` has answered.
    pub loaded: bool,
    /// Orders `GET /network` responses so an older snapshot never lands last.
    pub fetch_gate: RequestGate,
}

impl GraphState {
    /// Swap in the backend's element set.
    ///
    /// Edits that are still unconfirmed are replayed on top so the view keeps
    /// showing them, and a half-drawn edge whose first endpoint no longer
    /// exists is dropped.
    pub fn replace_elements(&mut self, mut elements: ElementSet) {
        for edit in self.tracker.pending() {
            match edit {
                PendingEdit::Addition(edge) => {
                    elements.insert(edge.clone());
                }
                PendingEdit::Deletion(edge) => {
                    elements.remove(edge.id());
                }
            }
        }
        if let Some(selected) = self.tracker.selected() {
            if !elements.contains(selected) {
                self.tracker.clear_selection();
            }
        }
        self.elements = elements;
        self.loaded = true;
    }

    /// Ticket for a `GET /network` about to be sent.
    pub fn begin_fetch(&mut self) -> Ticket {
        self.fetch_gate.issue()
    }

    /// Apply a fetched snapshot unless a newer fetch has been issued since.
    /// Returns `false` when the snapshot was dropped.
    pub fn apply_fetched(&mut self, ticket: Ticket, elements: ElementSet) -> bool {
        if !self.fetch_gate.is_current(ticket) {
            return false;
        }
        self.replace_elements(elements);
        true
    }

    /// Paint `plan` and show its legend.
    pub fn highlight(&mut self, plan: &HighlightPlan, reset: bool) {
        self.stylesheet.apply(plan, reset);
        self.key = plan.key();
    }

    /// Paint `plan` without touching the legend.
    pub fn paint(&mut self, plan: &HighlightPlan, reset: bool) {
        self.stylesheet.apply(plan, reset);
    }

    /// Return every node to the default color. The legend is kept.
    pub fn reset_colors(&mut self) {
        self.stylesheet.reset();
    }

    /// Show `plan`, or clear colors and legend when there is nothing to show.
    pub fn show(&mut self, plan: Option<&HighlightPlan>) {
        match plan {
            Some(plan) => self.highlight(plan, true),
            None => {
                self.stylesheet.reset();
                self.key.clear();
            }
        }
    }

    /// Short status line for unsynced edits, if there are any.
    #[must_use]
    pub fn edit_status(&self) -> Option<String> {
        let (mut pending, mut sending, mut failed) = (0, 0, 0);
        for (_, phase) in self.tracker.pending_with_phase() {
            match phase {
                EditPhase::Pending => pending += 1,
                EditPhase::InFlight => sending += 1,
                EditPhase::Failed => failed += 1,
            }
        }
        if failed > 0 {
            Some(format!("{failed} {} failed to sync", plural(failed)))
        } else if sending > 0 {
            Some(format!("Saving {sending} {}...", plural(sending)))
        } else if pending > 0 {
            Some(format!("{pending} unsaved {}", plural(pending)))
        } else {
            None
        }
    }
}

fn plural(count: usize) -> &'static str {
    if count == 1 { "edit" } else { "edits" }
}

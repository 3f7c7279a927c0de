//! Edge-edit tracking for edit mode.
//!
//! SYSTEM CONTEXT
//! ==============
//! In edit mode two consecutive node clicks toggle the edge between them.
//! The change is applied to the local [`ElementSet`] immediately and queued
//! here until it is flushed to the backend as one `{changes: [...]}` body.
//!
//! DESIGN
//! ======
//! Each queued edit carries its own phase: `Pending` until a flush picks it
//! up, `InFlight` while that flush is outstanding, then either dropped
//! (confirmed) or marked `Failed`. Failed edits stay queued and ride along
//! with the next flush, so "never sent" and "sent but rejected" remain
//! distinguishable. Edits recorded while a flush is in flight are not part
//! of that flush and survive its confirmation.

#[cfg(test)]
#[path = "edits_test.rs"]
mod edits_test;

use serde::{Deserialize, Serialize};

use crate::element::{ElementSet, GraphElement};

/// A local edge change awaiting backend sync.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PendingEdit {
    Addition(GraphElement),
    Deletion(GraphElement),
}

impl PendingEdit {
    #[must_use]
    pub fn element(&self) -> &GraphElement {
        match self {
            Self::Addition(element) | Self::Deletion(element) => element,
        }
    }

    #[must_use]
    pub fn is_addition(&self) -> bool {
        matches!(self, Self::Addition(_))
    }
}

/// Request body of `PUT /network`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangeSet {
    pub changes: Vec<PendingEdit>,
}

/// Sync phase of a queued edit.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum EditPhase {
    #[default]
    Pending,
    InFlight,
    Failed,
}

#[derive(Clone, Debug, PartialEq, Eq)]
struct TrackedEdit {
    seq: u64,
    edit: PendingEdit,
    phase: EditPhase,
}

/// Result of feeding one node click into the tracker.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ClickOutcome {
    /// Edit mode is off; the click is ordinary selection.
    Inactive,
    /// The node became the first endpoint of a pending pair.
    FirstSelected(String),
    /// The same node was clicked twice; nothing changed.
    Ignored,
    /// The edge with this id was created locally.
    Added(String),
    /// The edge with this id was removed locally.
    Removed(String),
}

/// Snapshot of edits handed to one `PUT /network` call.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FlushBatch {
    id: u64,
    seqs: Vec<u64>,
    body: ChangeSet,
}

impl FlushBatch {
    /// Body to send to the backend.
    #[must_use]
    pub fn changes(&self) -> &ChangeSet {
        &self.body
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.seqs.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.seqs.is_empty()
    }
}

/// Edit-mode selection plus the queue of unsynced edits.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EditTracker {
    edit_mode: bool,
    selected: Option<String>,
    edits: Vec<TrackedEdit>,
    next_seq: u64,
    next_batch: u64,
    in_flight: Option<u64>,
}

impl EditTracker {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn edit_mode(&self) -> bool {
        self.edit_mode
    }

    /// Enter or leave edit mode. Leaving drops a half-selected pair.
    pub fn set_edit_mode(&mut self, enabled: bool) {
        self.edit_mode = enabled;
        if !enabled {
            self.selected = None;
        }
    }

    /// Flip edit mode and return the new value.
    pub fn toggle_edit_mode(&mut self) -> bool {
        self.set_edit_mode(!self.edit_mode);
        self.edit_mode
    }

    /// First endpoint of the pair being drawn, if any.
    #[must_use]
    pub fn selected(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    pub fn clear_selection(&mut self) {
        self.selected = None;
    }

    /// Interpret a click on `node_id`, mutating `elements` optimistically.
    pub fn click_node(&mut self, elements: &mut ElementSet, node_id: &str) -> ClickOutcome {
        if !self.edit_mode {
            return ClickOutcome::Inactive;
        }

        let Some(source) = self.selected.take() else {
            self.selected = Some(node_id.to_owned());
            return ClickOutcome::FirstSelected(node_id.to_owned());
        };

        if source == node_id {
            self.selected = Some(source);
            return ClickOutcome::Ignored;
        }

        let edge = GraphElement::edge(&source, node_id);
        let id = edge.id().to_owned();
        if elements.remove(&id).is_some() {
            self.record(PendingEdit::Deletion(edge));
            ClickOutcome::Removed(id)
        } else {
            elements.insert(edge.clone());
            self.record(PendingEdit::Addition(edge));
            ClickOutcome::Added(id)
        }
    }

    fn record(&mut self, edit: PendingEdit) {
        self.edits.push(TrackedEdit {
            seq: self.next_seq,
            edit,
            phase: EditPhase::Pending,
        });
        self.next_seq += 1;
    }

    /// Every unconfirmed edit in the order it was made.
    pub fn pending(&self) -> impl Iterator<Item = &PendingEdit> {
        self.edits.iter().map(|tracked| &tracked.edit)
    }

    /// Unconfirmed edits paired with their phase.
    pub fn pending_with_phase(&self) -> impl Iterator<Item = (&PendingEdit, EditPhase)> {
        self.edits.iter().map(|tracked| (&tracked.edit, tracked.phase))
    }

    #[must_use]
    pub fn pending_len(&self) -> usize {
        self.edits.len()
    }

    #[must_use]
    pub fn has_pending(&self) -> bool {
        !self.edits.is_empty()
    }

    #[must_use]
    pub fn count_in_phase(&self, phase: EditPhase) -> usize {
        self.edits.iter().filter(|tracked| tracked.phase == phase).count()
    }

    #[must_use]
    pub fn is_flushing(&self) -> bool {
        self.in_flight.is_some()
    }

    /// Snapshot every edit not already in flight and mark it `InFlight`.
    ///
    /// Returns `None` when there is nothing to send or another flush is
    /// still outstanding.
    pub fn begin_flush(&mut self) -> Option<FlushBatch> {
        if self.in_flight.is_some() {
            return None;
        }

        let mut seqs = Vec::new();
        let mut changes = Vec::new();
        for tracked in &mut self.edits {
            tracked.phase = EditPhase::InFlight;
            seqs.push(tracked.seq);
            changes.push(tracked.edit.clone());
        }
        if seqs.is_empty() {
            return None;
        }

        let id = self.next_batch;
        self.next_batch += 1;
        self.in_flight = Some(id);
        Some(FlushBatch {
            id,
            seqs,
            body: ChangeSet { changes },
        })
    }

    /// Drop the edits of an acknowledged batch. Returns `false` for a batch
    /// that is not the one in flight.
    pub fn confirm_flush(&mut self, batch: &FlushBatch) -> bool {
        if self.in_flight != Some(batch.id) {
            return false;
        }
        self.edits.retain(|tracked| !batch.seqs.contains(&tracked.seq));
        self.in_flight = None;
        true
    }

    /// Mark the edits of a rejected batch `Failed`, keeping them queued.
    /// Returns `false` for a batch that is not the one in flight.
    pub fn fail_flush(&mut self, batch: &FlushBatch) -> bool {
        if self.in_flight != Some(batch.id) {
            return false;
        }
        for tracked in &mut self.edits {
            if batch.seqs.contains(&tracked.seq) {
                tracked.phase = EditPhase::Failed;
            }
        }
        self.in_flight = None;
        true
    }
}

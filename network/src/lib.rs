//! Shared model for the causal network explorer.
//!
//! This crate owns everything `client`, `server`, and `cli` agree on: the
//! graph element wire shape, edge-edit bookkeeping, node highlighting, the
//! layered graph layout, REST payloads, and the Socket.IO text codec used by
//! the chat channel. It performs no I/O.
//!
//! DESIGN
//! ======
//! Browser and terminal front-ends both drive the same backend. Keeping the
//! state machines here (rather than inside Leptos components) lets them be
//! exercised with plain unit tests on the host target.

pub mod api;
pub mod edits;
pub mod element;
pub mod highlight;
pub mod layout;
pub mod sequence;
pub mod socket;
pub mod tools;

pub use edits::{ChangeSet, ClickOutcome, EditPhase, EditTracker, FlushBatch, PendingEdit};
pub use element::{ElementData, ElementError, ElementSet, GraphElement, edge_id};
pub use highlight::{HighlightError, HighlightGroup, HighlightPlan, KeyEntry, Selector, StyleRule, Stylesheet};
pub use sequence::{RequestGate, Ticket};

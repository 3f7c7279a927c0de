//! Shared reactive state, provided as `RwSignal`s through Leptos context.
//!
//! DESIGN
//! ======
//! Each struct is plain data with small mutation helpers so it can be unit
//! tested on the host; components wrap them in signals.

pub mod chat;
pub mod graph;
pub mod ui;

//! Utility helpers shared across client UI modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! Utility modules isolate browser/environment concerns (meta tags, blob
//! downloads, clock) and pure rendering helpers from page and component logic.

pub mod clock;
pub mod config;
pub mod dialog;
pub mod download;
pub mod markdown;

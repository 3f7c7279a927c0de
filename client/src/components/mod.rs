//! Reusable UI component modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! Components render the graph, the tool panels, and the chat window while
//! reading and writing shared state from Leptos context providers. Only
//! `GraphView` takes its state as an explicit prop.

pub mod chat_history_button;
pub mod chat_panel;
pub mod effect_panel;
pub mod footer;
pub mod graph_view;
pub mod independence_panel;
pub mod markov_panel;
pub mod navbar;
pub mod tool_key;
pub mod tools_panel;
pub mod track_actions_button;

//! Networking modules for the analysis backend.
//!
//! SYSTEM CONTEXT
//! ==============
//! `api` is the uniform HTTP gateway, `graph_sync` drives load/flush of the
//! network through it, and `chat_socket` owns the Socket.IO chat connection.

pub mod api;
pub mod chat_socket;
pub mod graph_sync;

//! # client
//!
//! Leptos + WASM front-end for the causal network chat tool.
//!
//! The crate renders the Bayesian network, the edge editor, the statistical
//! tool panels, and the pinned chat window. All graph bookkeeping lives in the
//! `network` crate; this crate wires it to signals, HTTP calls, and the chat
//! socket.

pub mod app;
pub mod components;
pub mod net;
pub mod pages;
pub mod state;
pub mod util;

/// WASM entry point: install browser logging and hydrate the SSR markup.
#[cfg(feature = "hydrate")]
#[wasm_bindgen::prelude::wasm_bindgen]
pub fn hydrate() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Debug);
    leptos::mount::hydrate_body(app::App);
}

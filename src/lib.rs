//! # classpulse-client
//!
//! Leptos + WASM frontend for ClassPulse classroom check-ins. Students open
//! a shared join link, walk a short step wizard (name, optional survey,
//! mood check), and get a personalized activity recommendation back;
//! teachers launch and close the session behind it.
//!
//! This crate contains pages, components, application state, the session
//! gateway client, and the local-storage continuity layer that keeps
//! check-ins idempotent per browser.

pub mod app;
pub mod components;
pub mod net;
pub mod pages;
pub mod state;
pub mod storage;
pub mod util;

/// WASM entry point: attach the client to server-rendered HTML.
#[cfg(feature = "hydrate")]
#[wasm_bindgen::prelude::wasm_bindgen]
pub fn hydrate() {
    use crate::app::App;

    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Debug);
    leptos::mount::hydrate_body(App);
}

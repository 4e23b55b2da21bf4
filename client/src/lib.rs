//! # client
//!
//! Leptos + WASM frontend for the Supabase auth starter.
//!
//! This crate contains the page, the session state machine, the backend
//! client factory, and the Supabase auth handle. It is compiled twice: with
//! `ssr` into the server binary and with `hydrate` into the browser bundle.

pub mod app;
pub mod net;
pub mod pages;
pub mod state;
pub mod util;

/// WASM entry point: hydrate the server-rendered page.
#[cfg(feature = "hydrate")]
#[wasm_bindgen::prelude::wasm_bindgen]
pub fn hydrate() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);
    leptos::mount::hydrate_body(app::App);
}

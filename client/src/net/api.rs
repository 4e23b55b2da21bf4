//! REST helpers for talking to our own server.
//!
//! Client-side (hydrate): real HTTP calls via `gloo-net`.
//! Server-side (SSR): stubs returning defaults, since these endpoints are
//! only meaningful in the browser.
//!
//! ERROR HANDLING
//! ==============
//! A failed config fetch degrades to an unconfigured backend (demo mode)
//! rather than an error, so the page always reaches a renderable state.

#![allow(clippy::unused_async)]

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

use super::config::SupabaseConfig;

pub const CONFIG_ENDPOINT: &str = "/api/config";

/// Fetch the public backend config from `/api/config`.
/// Returns the empty config on any failure or on the server.
pub async fn fetch_config() -> SupabaseConfig {
    #[cfg(feature = "hydrate")]
    {
        let Ok(resp) = gloo_net::http::Request::get(CONFIG_ENDPOINT).send().await else {
            return SupabaseConfig::default();
        };
        if !resp.ok() {
            leptos::logging::warn!("config request failed: {}", resp.status());
            return SupabaseConfig::default();
        }
        resp.json::<SupabaseConfig>().await.unwrap_or_default()
    }
    #[cfg(not(feature = "hydrate"))]
    {
        SupabaseConfig::default()
    }
}

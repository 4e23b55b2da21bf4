//! Public runtime configuration for the browser bundle.
//!
//! The WASM build cannot read server environment variables, so the page
//! fetches the project URL and anon key from here before building its
//! client. The service-role key is never serialized.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use axum::Json;
use axum::extract::State;
use client::net::config::SupabaseConfig;

use crate::state::AppState;

/// `GET /api/config`
pub async fn public_config(State(state): State<AppState>) -> Json<SupabaseConfig> {
    Json(SupabaseConfig { service_role_key: None, ..state.config.clone() })
}

//! Shared application state.
//!
//! DESIGN
//! ======
//! `AppState` is injected into Axum handlers via the `State` extractor. It
//! holds the configuration snapshot taken at start-up and, when the
//! service-role key is present, the privileged backend client.

use std::sync::Arc;

use client::net::config::SupabaseConfig;

use crate::services::admin::AdminClient;

#[derive(Clone)]
pub struct AppState {
    pub config: SupabaseConfig,
    pub admin: Option<Arc<AdminClient>>,
}

impl AppState {
    #[must_use]
    pub fn new(config: SupabaseConfig, admin: Option<Arc<AdminClient>>) -> Self {
        Self { config, admin }
    }
}

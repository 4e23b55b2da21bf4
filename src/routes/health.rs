//! Liveness and backend health.

#[cfg(test)]
#[path = "health_test.rs"]
mod health_test;

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use serde::{Deserialize, Serialize};

use crate::services::admin::AuthHealth;
use crate::state::AppState;

#[derive(Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BackendHealth {
    /// Public URL + anon key pass validation.
    pub configured: bool,
    /// A service-role client exists.
    pub privileged: bool,
    /// Auth service answer through the privileged client.
    pub auth: Option<AuthHealth>,
}

/// `GET /healthz`
pub async fn healthz() -> StatusCode {
    StatusCode::OK
}

/// `GET /api/health`
///
/// 502 only when a privileged client exists and the auth service did not
/// answer; an unconfigured project is healthy demo mode.
pub async fn backend_health(State(state): State<AppState>) -> (StatusCode, Json<BackendHealth>) {
    let configured = state.config.public_credentials().is_ok();
    let privileged = state.admin.is_some();

    let auth = match &state.admin {
        Some(admin) => match admin.health().await {
            Ok(health) => Some(health),
            Err(e) => {
                tracing::warn!(error = %e, "auth health check failed");
                None
            }
        },
        None => None,
    };

    let status = if privileged && auth.is_none() { StatusCode::BAD_GATEWAY } else { StatusCode::OK };
    (status, Json(BackendHealth { configured, privileged, auth }))
}

//! Privileged Supabase client for trusted server-side use.
//!
//! Bound to the service-role key, so it must never leave the server. Thin
//! HTTP wrapper over the auth API; response parsing lives in
//! `parse_health` for testability.

#[cfg(test)]
#[path = "admin_test.rs"]
mod admin_test;

use std::time::Duration;

use client::net::config::Credentials;
use serde::{Deserialize, Serialize};

const HEALTH_PATH: &str = "/auth/v1/health";
const REQUEST_TIMEOUT_SECS: u64 = 10;
const CONNECT_TIMEOUT_SECS: u64 = 5;

#[derive(Debug, thiserror::Error)]
pub enum AdminError {
    #[error("http client build failed: {0}")]
    HttpClientBuild(String),

    #[error("request failed: {0}")]
    Request(String),

    #[error("auth api returned status {status}")]
    Status { status: u16, body: String },

    #[error("response parse failed: {0}")]
    Parse(String),
}

/// Health answer of the auth service.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthHealth {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub version: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

pub struct AdminClient {
    http: reqwest::Client,
    credentials: Credentials,
}

impl AdminClient {
    /// # Errors
    ///
    /// Returns [`AdminError::HttpClientBuild`] if the TLS backend cannot start.
    pub fn new(credentials: Credentials) -> Result<Self, AdminError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .connect_timeout(Duration::from_secs(CONNECT_TIMEOUT_SECS))
            .build()
            .map_err(|e| AdminError::HttpClientBuild(e.to_string()))?;
        Ok(Self { http, credentials })
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.credentials.url
    }

    #[must_use]
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}{path}", self.credentials.url)
    }

    /// Ask the auth service whether it is up.
    ///
    /// # Errors
    ///
    /// Transport failures, non-200 answers and undecodable bodies.
    pub async fn health(&self) -> Result<AuthHealth, AdminError> {
        let response = self
            .http
            .get(self.endpoint(HEALTH_PATH))
            .header("apikey", &self.credentials.key)
            .bearer_auth(&self.credentials.key)
            .send()
            .await
            .map_err(|e| AdminError::Request(e.to_string()))?;

        let status = response.status().as_u16();
        let text = response
            .text()
            .await
            .map_err(|e| AdminError::Request(e.to_string()))?;

        if status != 200 {
            return Err(AdminError::Status { status, body: text });
        }

        parse_health(&text)
    }
}

fn parse_health(json: &str) -> Result<AuthHealth, AdminError> {
    serde_json::from_str(json).map_err(|e| AdminError::Parse(e.to_string()))
}

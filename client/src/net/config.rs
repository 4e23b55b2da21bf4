//! Backend configuration for the Supabase project.
//!
//! DESIGN
//! ======
//! Absence is a normal state here, not an error: every field is optional and
//! the factory decides what a missing or placeholder value means. The
//! service-role key never leaves the server because it is skipped by serde,
//! so the same struct is returned as-is from `/api/config`.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use serde::{Deserialize, Serialize};

pub const URL_VAR: &str = "SUPABASE_URL";
pub const ANON_KEY_VAR: &str = "SUPABASE_ANON_KEY";
pub const SERVICE_ROLE_KEY_VAR: &str = "SUPABASE_SERVICE_ROLE_KEY";

/// Substrings that mark a value copied verbatim from an env template.
pub const PLACEHOLDER_MARKERS: [&str; 2] = ["placeholder", "your_supabase"];

/// Supabase project settings, read once at start-up.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SupabaseConfig {
    /// Project endpoint, e.g. `https://abcd.supabase.co`.
    pub url: Option<String>,
    /// Public (anon) API key, safe to expose to browsers.
    pub anon_key: Option<String>,
    /// Elevated credential for trusted server-side use only.
    #[serde(skip)]
    pub service_role_key: Option<String>,
}

impl SupabaseConfig {
    /// Load from `SUPABASE_URL`, `SUPABASE_ANON_KEY` and
    /// `SUPABASE_SERVICE_ROLE_KEY`.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build from an arbitrary variable lookup. Empty values count as unset.
    #[must_use]
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());
        Self { url: read(URL_VAR), anon_key: read(ANON_KEY_VAR), service_role_key: read(SERVICE_ROLE_KEY_VAR) }
    }

    /// Validated endpoint + public key.
    ///
    /// # Errors
    ///
    /// Returns the first [`ConfigIssue`] found, URL before key.
    pub fn public_credentials(&self) -> Result<Credentials, ConfigIssue> {
        check_pair(self.url.as_deref(), self.anon_key.as_deref(), ANON_KEY_VAR)
    }
}

/// Why a configuration pair cannot back a live client.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ConfigIssue {
    #[error("{0} is not set")]
    Missing(&'static str),
    #[error("{0} still holds a placeholder value")]
    Placeholder(&'static str),
}

/// An endpoint/key pair a client handle is bound to.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Credentials {
    pub url: String,
    pub key: String,
}

impl Credentials {
    /// Pair without validation. Trailing slashes are stripped from the URL.
    #[must_use]
    pub fn new(url: &str, key: &str) -> Self {
        Self { url: url.trim().trim_end_matches('/').to_owned(), key: key.trim().to_owned() }
    }
}

/// True if `value` contains any of [`PLACEHOLDER_MARKERS`].
#[must_use]
pub fn is_placeholder(value: &str) -> bool {
    PLACEHOLDER_MARKERS.iter().any(|marker| value.contains(marker))
}

/// Check that both values are present and neither is a template placeholder.
///
/// # Errors
///
/// Returns [`ConfigIssue::Missing`] or [`ConfigIssue::Placeholder`] naming the
/// offending variable.
pub fn check_pair(url: Option<&str>, key: Option<&str>, key_var: &'static str) -> Result<Credentials, ConfigIssue> {
    let url = url.ok_or(ConfigIssue::Missing(URL_VAR))?;
    let key = key.ok_or(ConfigIssue::Missing(key_var))?;
    if is_placeholder(url) {
        return Err(ConfigIssue::Placeholder(URL_VAR));
    }
    if is_placeholder(key) {
        return Err(ConfigIssue::Placeholder(key_var));
    }
    Ok(Credentials::new(url, key))
}

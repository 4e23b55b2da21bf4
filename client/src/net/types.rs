//! Auth DTOs shared with the Supabase auth API.
//!
//! DESIGN
//! ======
//! Only the subset of the remote schema the UI reads is modeled. Unknown
//! fields are ignored so new server-side attributes never break decoding.

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;

use serde::{Deserialize, Serialize};

/// An authenticated user as returned by `GET /auth/v1/user`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct User {
    /// Stable user identifier (UUID string).
    pub id: String,
    /// Primary email, absent for some OAuth identities.
    #[serde(default)]
    pub email: Option<String>,
    /// Provider-supplied profile data (name, avatar, ...).
    #[serde(default)]
    pub user_metadata: serde_json::Value,
    /// Server-controlled metadata (provider list, roles).
    #[serde(default)]
    pub app_metadata: serde_json::Value,
    /// Account creation timestamp (RFC 3339).
    #[serde(default)]
    pub created_at: Option<String>,
}

impl User {
    /// Label shown in the UI: the email, falling back to the user id.
    #[must_use]
    pub fn display_identity(&self) -> &str {
        self.email.as_deref().unwrap_or(&self.id)
    }
}

/// An active login. Replaced wholesale on refresh; never merged.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub access_token: String,
    pub refresh_token: String,
    #[serde(default = "default_token_type")]
    pub token_type: String,
    /// Lifetime in seconds at issue time.
    #[serde(default)]
    pub expires_in: Option<i64>,
    /// Expiry as seconds since the Unix epoch.
    #[serde(default)]
    pub expires_at: Option<i64>,
    pub user: User,
}

fn default_token_type() -> String {
    "bearer".to_owned()
}

/// Kinds of session change delivered to listeners.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AuthChangeEvent {
    InitialSession,
    SignedIn,
    SignedOut,
    TokenRefreshed,
    UserUpdated,
    PasswordRecovery,
}

/// OAuth identity providers accepted by `/auth/v1/authorize`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Provider {
    GitHub,
    GitLab,
    Google,
}

impl Provider {
    /// Identifier used in the `provider` query parameter.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::GitHub => "github",
            Self::GitLab => "gitlab",
            Self::Google => "google",
        }
    }
}

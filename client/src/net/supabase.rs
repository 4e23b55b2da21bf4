//! Live Supabase auth handle for the browser.
//!
//! Client-side (hydrate): REST calls to `/auth/v1` via `gloo-net`, session
//! slot in `localStorage`, OAuth via full-page redirect (implicit flow).
//! Server-side (SSR): inert fallbacks. The factory never hands out a handle
//! on the server, so they exist only to keep both builds compiling.
//!
//! ERROR HANDLING
//! ==============
//! Every remote failure becomes an [`AuthError`]; nothing here logs. The
//! session controller decides what is logged and what the user sees.

#[cfg(test)]
#[path = "supabase_test.rs"]
mod supabase_test;

use std::collections::HashMap;

use super::auth::{AuthApi, AuthError};
use super::config::Credentials;
use super::events::{AuthCallback, AuthEventBus, Subscription};
use super::factory::{ClientFactory, ExecutionContext};
use super::types::{Provider, Session, User};
#[cfg(feature = "hydrate")]
use super::types::AuthChangeEvent;

/// Handle bound to one project URL and key.
pub struct SupabaseClient {
    credentials: Credentials,
    storage_key: String,
    events: AuthEventBus,
}

impl SupabaseClient {
    #[must_use]
    pub fn new(credentials: Credentials) -> Self {
        let storage_key = storage_key_for(&credentials.url);
        let events = AuthEventBus::shared(&storage_key);
        Self { credentials, storage_key, events }
    }

    #[must_use]
    pub fn url(&self) -> &str {
        &self.credentials.url
    }

    /// `localStorage` key holding this project's session.
    #[must_use]
    pub fn storage_key(&self) -> &str {
        &self.storage_key
    }

    /// Absolute URL of an auth endpoint, e.g. `auth_endpoint("user")`.
    #[must_use]
    pub fn auth_endpoint(&self, path: &str) -> String {
        format!("{}/auth/v1/{}", self.credentials.url, path.trim_start_matches('/'))
    }

    /// Where the browser is sent to start an OAuth sign-in.
    #[must_use]
    pub fn authorize_url(&self, provider: Provider, redirect_to: &str) -> String {
        let query = url::form_urlencoded::Serializer::new(String::new())
            .append_pair("provider", provider.as_str())
            .append_pair("redirect_to", redirect_to)
            .finish();
        format!("{}?{query}", self.auth_endpoint("authorize"))
    }

    #[cfg(feature = "hydrate")]
    async fn fetch_user(&self, access_token: &str) -> Result<User, AuthError> {
        let resp = gloo_net::http::Request::get(&self.auth_endpoint("user"))
            .header("apikey", &self.credentials.key)
            .header("Authorization", &format!("Bearer {access_token}"))
            .send()
            .await
            .map_err(|e| AuthError::Network(e.to_string()))?;
        if !resp.ok() {
            let body = resp.text().await.unwrap_or_default();
            return Err(api_error(resp.status(), &body));
        }
        resp.json::<User>().await.map_err(|e| AuthError::Decode(e.to_string()))
    }
}

#[async_trait::async_trait(?Send)]
impl AuthApi for SupabaseClient {
    async fn get_user(&self) -> Result<Option<User>, AuthError> {
        #[cfg(feature = "hydrate")]
        {
            use crate::util::storage;

            // Returning from an OAuth redirect: adopt the tokens in the URL.
            if let Some(tokens) = take_url_tokens()? {
                let user = self.fetch_user(&tokens.access_token).await?;
                let session = tokens.into_session(user.clone());
                storage::save_json(&self.storage_key, &session);
                self.events.emit(AuthChangeEvent::SignedIn, Some(&session));
                return Ok(Some(user));
            }

            let Some(mut session) = storage::load_json::<Session>(&self.storage_key) else {
                return Ok(None);
            };
            let user = self.fetch_user(&session.access_token).await?;
            if session.user != user {
                session.user = user.clone();
                storage::save_json(&self.storage_key, &session);
            }
            Ok(Some(user))
        }
        #[cfg(not(feature = "hydrate"))]
        {
            Ok(None)
        }
    }

    fn on_auth_state_change(&self, callback: AuthCallback) -> Subscription {
        self.events.subscribe(callback)
    }

    async fn sign_in_with_oauth(&self, provider: Provider) -> Result<(), AuthError> {
        #[cfg(feature = "hydrate")]
        {
            let window = web_sys::window().ok_or(AuthError::Unavailable)?;
            let location = window.location();
            let redirect_to = format!(
                "{}{}",
                location.origin().unwrap_or_default(),
                location.pathname().unwrap_or_default()
            );
            location
                .set_href(&self.authorize_url(provider, &redirect_to))
                .map_err(|_| AuthError::Unavailable)
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = provider;
            Err(AuthError::Unavailable)
        }
    }

    async fn sign_out(&self) -> Result<(), AuthError> {
        #[cfg(feature = "hydrate")]
        {
            use crate::util::storage;

            if let Some(session) = storage::load_json::<Session>(&self.storage_key) {
                let resp = gloo_net::http::Request::post(&self.auth_endpoint("logout"))
                    .header("apikey", &self.credentials.key)
                    .header("Authorization", &format!("Bearer {}", session.access_token))
                    .send()
                    .await
                    .map_err(|e| AuthError::Network(e.to_string()))?;
                if !resp.ok() && !logout_status_means_signed_out(resp.status()) {
                    let body = resp.text().await.unwrap_or_default();
                    return Err(api_error(resp.status(), &body));
                }
            }
            storage::remove(&self.storage_key);
            self.events.emit(AuthChangeEvent::SignedOut, None);
            Ok(())
        }
        #[cfg(not(feature = "hydrate"))]
        {
            Err(AuthError::Unavailable)
        }
    }
}

/// Fetch the public config and run the factory for the current context.
///
/// A fresh handle per call; nothing is cached.
pub async fn acquire_browser_client() -> Option<SupabaseClient> {
    let config = super::api::fetch_config().await;
    ClientFactory::new(config, ExecutionContext::detect()).browser_client(SupabaseClient::new)
}

/// `sb-<project ref>-auth-token`, the project ref being the first host label.
#[must_use]
pub fn storage_key_for(project_url: &str) -> String {
    let project_ref = url::Url::parse(project_url)
        .ok()
        .and_then(|u| u.host_str().and_then(|host| host.split('.').next()).map(str::to_owned))
        .unwrap_or_else(|| "local".to_owned());
    format!("sb-{project_ref}-auth-token")
}

/// Tokens delivered in the URL fragment after an implicit-flow redirect.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UrlTokens {
    pub access_token: String,
    pub refresh_token: String,
    pub token_type: String,
    pub expires_in: Option<i64>,
    pub expires_at: Option<i64>,
}

impl UrlTokens {
    #[must_use]
    pub fn into_session(self, user: User) -> Session {
        Session {
            access_token: self.access_token,
            refresh_token: self.refresh_token,
            token_type: self.token_type,
            expires_in: self.expires_in,
            expires_at: self.expires_at,
            user,
        }
    }
}

/// Parse a redirect fragment (`#access_token=...&refresh_token=...`).
///
/// # Errors
///
/// Returns [`AuthError::OAuth`] when the provider redirected back with an
/// `error` / `error_description`.
pub fn parse_url_tokens(fragment: &str) -> Result<Option<UrlTokens>, AuthError> {
    let fragment = fragment.strip_prefix('#').unwrap_or(fragment);
    let params: HashMap<String, String> = url::form_urlencoded::parse(fragment.as_bytes()).into_owned().collect();

    if let Some(description) = params.get("error_description").or_else(|| params.get("error")) {
        return Err(AuthError::OAuth(description.clone()));
    }
    let (Some(access_token), Some(refresh_token)) = (params.get("access_token"), params.get("refresh_token")) else {
        return Ok(None);
    };
    Ok(Some(UrlTokens {
        access_token: access_token.clone(),
        refresh_token: refresh_token.clone(),
        token_type: params.get("token_type").cloned().unwrap_or_else(|| "bearer".to_owned()),
        expires_in: params.get("expires_in").and_then(|v| v.parse().ok()),
        expires_at: params.get("expires_at").and_then(|v| v.parse().ok()),
    }))
}

/// Build an [`AuthError::Api`] from a GoTrue error body.
///
/// GoTrue reports the message under `msg`, `error_description` or
/// `message` depending on the endpoint; the raw body is the fallback.
#[must_use]
pub fn api_error(status: u16, body: &str) -> AuthError {
    let message = serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| {
            ["msg", "error_description", "message"]
                .iter()
                .find_map(|field| v.get(field).and_then(|m| m.as_str()).map(str::to_owned))
        })
        .unwrap_or_else(|| body.trim().to_owned());
    AuthError::Api { status, message }
}

/// Logout answers meaning the session is already gone server-side.
#[must_use]
pub fn logout_status_means_signed_out(status: u16) -> bool {
    matches!(status, 401 | 403 | 404)
}

#[cfg(feature = "hydrate")]
fn take_url_tokens() -> Result<Option<UrlTokens>, AuthError> {
    let Some(window) = web_sys::window() else {
        return Ok(None);
    };
    let hash = window.location().hash().unwrap_or_default();
    if hash.is_empty() {
        return Ok(None);
    }
    let parsed = parse_url_tokens(&hash);
    if !matches!(parsed, Ok(None)) {
        clear_url_fragment(&window);
    }
    parsed
}

#[cfg(feature = "hydrate")]
fn clear_url_fragment(window: &web_sys::Window) {
    let location = window.location();
    let path = format!("{}{}", location.pathname().unwrap_or_default(), location.search().unwrap_or_default());
    if let Ok(history) = window.history() {
        let _ = history.replace_state_with_url(&wasm_bindgen::JsValue::NULL, "", Some(&path));
    }
}

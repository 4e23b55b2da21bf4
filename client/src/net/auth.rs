//! Remote auth operations consumed by the session view.
//!
//! SYSTEM CONTEXT
//! ==============
//! [`AuthApi`] is the seam between the view's state machine and the backend.
//! The live implementation is `SupabaseClient`; tests substitute mocks.
//! Futures are `?Send` because the browser runs everything on one thread.

use super::events::{AuthCallback, Subscription};
use super::types::{Provider, User};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AuthError {
    #[error("network error: {0}")]
    Network(String),
    #[error("auth api error ({status}): {message}")]
    Api { status: u16, message: String },
    #[error("unexpected response: {0}")]
    Decode(String),
    #[error("oauth error: {0}")]
    OAuth(String),
    #[error("auth is only available in the browser")]
    Unavailable,
}

#[async_trait::async_trait(?Send)]
pub trait AuthApi {
    /// Resolve the user behind the current session, `None` when signed out.
    ///
    /// # Errors
    ///
    /// Returns an [`AuthError`] if the backend cannot be reached or rejects
    /// the stored session.
    async fn get_user(&self) -> Result<Option<User>, AuthError>;

    /// Register `callback` for every future session change.
    fn on_auth_state_change(&self, callback: AuthCallback) -> Subscription;

    /// Start the OAuth redirect flow for `provider`.
    ///
    /// # Errors
    ///
    /// Returns an [`AuthError`] if the redirect cannot be initiated.
    async fn sign_in_with_oauth(&self, provider: Provider) -> Result<(), AuthError>;

    /// End the current session.
    ///
    /// # Errors
    ///
    /// Returns an [`AuthError`] if the backend refuses the logout.
    async fn sign_out(&self) -> Result<(), AuthError>;
}

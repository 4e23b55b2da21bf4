//! Session view controller: drives [`AuthState`] from a backend handle.
//!
//! SYSTEM CONTEXT
//! ==============
//! The home page creates one controller per mount. `start` runs the whole
//! bootstrap: acquire a handle, check the current user, then subscribe to
//! session changes. `teardown` is wired to component cleanup and is the only
//! place the subscription is released.
//!
//! DESIGN
//! ======
//! State lives behind [`AuthStore`] so the same controller drives a Leptos
//! signal in the page and a plain mutex in tests. After teardown every
//! continuation becomes a no-op, including listener callbacks that were
//! already queued, and a subscription that arrives late is cancelled on the
//! spot.

#[cfg(test)]
#[path = "session_test.rs"]
mod session_test;

use std::future::Future;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use leptos::prelude::{GetUntracked, RwSignal, Update};

use super::auth::AuthState;
use crate::net::auth::AuthApi;
use crate::net::events::{Subscription, auth_callback};
use crate::net::types::Provider;

/// Provider used by the sign-in button.
pub const SIGN_IN_PROVIDER: Provider = Provider::GitHub;

/// Somewhere the view state can be read and mutated from async continuations.
pub trait AuthStore: Clone + Send + Sync + 'static {
    fn update_state(&self, f: impl FnOnce(&mut AuthState));
    fn snapshot(&self) -> AuthState;
}

impl AuthStore for RwSignal<AuthState> {
    fn update_state(&self, f: impl FnOnce(&mut AuthState)) {
        // A disposed signal (page already gone) simply drops the write.
        let _ = self.try_update(f);
    }

    fn snapshot(&self) -> AuthState {
        self.try_get_untracked().unwrap_or_default()
    }
}

impl AuthStore for Arc<Mutex<AuthState>> {
    fn update_state(&self, f: impl FnOnce(&mut AuthState)) {
        f(&mut self.lock().unwrap_or_else(PoisonError::into_inner));
    }

    fn snapshot(&self) -> AuthState {
        self.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }
}

#[derive(Default)]
struct Lifecycle {
    torn_down: AtomicBool,
    subscription: Mutex<Option<Subscription>>,
}

impl Lifecycle {
    fn slot(&self) -> MutexGuard<'_, Option<Subscription>> {
        self.subscription.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Owns the view's async bootstrap and its change subscription.
#[derive(Clone)]
pub struct SessionController<S> {
    store: S,
    lifecycle: Arc<Lifecycle>,
}

impl<S: AuthStore> SessionController<S> {
    #[must_use]
    pub fn new(store: S) -> Self {
        Self { store, lifecycle: Arc::default() }
    }

    #[must_use]
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Mark the view mounted (first client-side render happened).
    pub fn mount(&self) {
        self.apply(AuthState::mount);
    }

    /// Acquire a handle, check the session, then listen for changes.
    ///
    /// Session-check failures are logged and treated as "no user".
    pub async fn start<A, F, Fut>(&self, acquire: F)
    where
        A: AuthApi,
        F: FnOnce() -> Fut,
        Fut: Future<Output = Option<A>>,
    {
        let Some(client) = acquire().await else {
            self.apply(AuthState::client_unavailable);
            return;
        };
        if self.is_torn_down() {
            return;
        }
        self.apply(AuthState::client_ready);

        let user = match client.get_user().await {
            Ok(user) => user,
            Err(e) => {
                leptos::logging::error!("Auth error: {e}");
                None
            }
        };
        self.apply(|state| state.session_checked(user));
        if self.is_torn_down() {
            return;
        }

        let listener = self.clone();
        let subscription = client.on_auth_state_change(auth_callback(move |_event, session| {
            let user = session.map(|s| s.user.clone());
            listener.apply(|state| state.session_changed(user));
        }));
        self.adopt(subscription);
    }

    /// Cancel the subscription and freeze the state. Idempotent.
    pub fn teardown(&self) {
        self.lifecycle.torn_down.store(true, Ordering::SeqCst);
        let subscription = self.lifecycle.slot().take();
        if let Some(subscription) = subscription {
            subscription.unsubscribe();
        }
    }

    #[must_use]
    pub fn is_torn_down(&self) -> bool {
        self.lifecycle.torn_down.load(Ordering::SeqCst)
    }

    /// True while a change subscription is held.
    #[must_use]
    pub fn is_subscribed(&self) -> bool {
        self.lifecycle.slot().is_some()
    }

    fn adopt(&self, subscription: Subscription) {
        let mut slot = self.lifecycle.slot();
        if self.is_torn_down() {
            drop(slot);
            subscription.unsubscribe();
            return;
        }
        if let Some(previous) = slot.replace(subscription) {
            previous.unsubscribe();
        }
    }

    fn apply(&self, f: impl FnOnce(&mut AuthState)) {
        if self.is_torn_down() {
            return;
        }
        self.store.update_state(f);
    }
}

/// Start the OAuth redirect with a fresh handle. No-op without a backend.
pub async fn sign_in<A, F, Fut>(acquire: F)
where
    A: AuthApi,
    F: FnOnce() -> Fut,
    Fut: Future<Output = Option<A>>,
{
    let Some(client) = acquire().await else {
        return;
    };
    if let Err(e) = client.sign_in_with_oauth(SIGN_IN_PROVIDER).await {
        leptos::logging::error!("Error signing in: {e}");
    }
}

/// Sign out with a fresh handle. No-op without a backend.
pub async fn sign_out<A, F, Fut>(acquire: F)
where
    A: AuthApi,
    F: FnOnce() -> Fut,
    Fut: Future<Output = Option<A>>,
{
    let Some(client) = acquire().await else {
        return;
    };
    if let Err(e) = client.sign_out().await {
        leptos::logging::error!("Error signing out: {e}");
    }
}

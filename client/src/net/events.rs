//! Session change notifications.
//!
//! DESIGN
//! ======
//! A bus is a listener list behind a mutex. Subscribing returns a
//! [`Subscription`] that must be released explicitly with
//! [`Subscription::unsubscribe`]; dropping it leaves the listener in place.
//! Handles bound to the same project share one bus via
//! [`AuthEventBus::shared`], so a sign-out performed through a fresh handle
//! still reaches listeners registered through an earlier one.

#[cfg(test)]
#[path = "events_test.rs"]
mod events_test;

use std::collections::HashMap;
use std::sync::{Arc, LazyLock, Mutex, PoisonError, Weak};

use super::types::{AuthChangeEvent, Session};

/// Listener invoked with each change and the session after it (if any).
pub type AuthCallback = Arc<dyn Fn(AuthChangeEvent, Option<&Session>) + Send + Sync>;

#[derive(Default)]
struct Listeners {
    next_id: u64,
    entries: Vec<(u64, AuthCallback)>,
}

/// Box a closure as an [`AuthCallback`], fixing its argument types.
pub fn auth_callback<F>(f: F) -> AuthCallback
where
    F: Fn(AuthChangeEvent, Option<&Session>) + Send + Sync + 'static,
{
    Arc::new(f)
}

type SharedListeners = Arc<Mutex<Listeners>>;

static SHARED_BUSES: LazyLock<Mutex<HashMap<String, AuthEventBus>>> = LazyLock::new(|| Mutex::new(HashMap::new()));

/// Registry of session-change listeners.
#[derive(Clone, Default)]
pub struct AuthEventBus {
    listeners: SharedListeners,
}

impl AuthEventBus {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The process-wide bus for `key` (one per project storage key).
    #[must_use]
    pub fn shared(key: &str) -> Self {
        let mut buses = SHARED_BUSES.lock().unwrap_or_else(PoisonError::into_inner);
        buses.entry(key.to_owned()).or_default().clone()
    }

    /// Register `callback` until the returned subscription is cancelled.
    pub fn subscribe(&self, callback: AuthCallback) -> Subscription {
        let mut listeners = self.listeners.lock().unwrap_or_else(PoisonError::into_inner);
        let id = listeners.next_id;
        listeners.next_id += 1;
        listeners.entries.push((id, callback));
        Subscription { id, listeners: Arc::downgrade(&self.listeners) }
    }

    /// Deliver `event` to every listener registered at the time of the call.
    pub fn emit(&self, event: AuthChangeEvent, session: Option<&Session>) {
        // Snapshot first so callbacks can unsubscribe without deadlocking.
        let snapshot: Vec<AuthCallback> = {
            let listeners = self.listeners.lock().unwrap_or_else(PoisonError::into_inner);
            listeners.entries.iter().map(|(_, cb)| Arc::clone(cb)).collect()
        };
        for callback in snapshot {
            callback(event, session);
        }
    }

    #[must_use]
    pub fn listener_count(&self) -> usize {
        self.listeners.lock().unwrap_or_else(PoisonError::into_inner).entries.len()
    }
}

/// A live registration on an [`AuthEventBus`].
#[derive(Debug)]
pub struct Subscription {
    id: u64,
    listeners: Weak<Mutex<Listeners>>,
}

impl Subscription {
    /// Remove the listener. A no-op if the bus is already gone.
    pub fn unsubscribe(self) {
        if let Some(listeners) = self.listeners.upgrade() {
            let mut listeners = listeners.lock().unwrap_or_else(PoisonError::into_inner);
            listeners.entries.retain(|(id, _)| *id != self.id);
        }
    }
}

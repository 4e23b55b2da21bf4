//! Auth-session state for the current browser user.
//!
//! SYSTEM CONTEXT
//! ==============
//! Drives the home page's rendering: a loading screen until the first
//! session check resolves, then either the signed-in card, the sign-in card,
//! or the demo card when no backend is configured.
//!
//! DESIGN
//! ======
//! Each transition checks the current phase and ignores calls that do not
//! apply, so late or duplicated async continuations cannot move the machine
//! backwards. The `user` field is last-write-wins: the initial check and
//! change events both overwrite it, whichever lands last.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use crate::net::types::User;

/// Lifecycle of the session view.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SessionPhase {
    /// Rendered, not yet mounted (server pass or pre-hydration).
    #[default]
    Initializing,
    /// Mounted, waiting for the client factory.
    AwaitingClient,
    /// No backend handle. Terminal.
    Unconfigured,
    /// Handle present, initial user fetch in flight.
    CheckingSession,
    /// Initial check resolved; change listener active.
    Ready,
}

/// Authentication state tracking the current user and loading status.
#[derive(Clone, Debug, PartialEq)]
pub struct AuthState {
    pub user: Option<User>,
    /// True until the first session check resolves, successfully or not.
    pub loading: bool,
    /// Set once, after the first client-side render.
    pub mounted: bool,
    pub phase: SessionPhase,
}

impl Default for AuthState {
    fn default() -> Self {
        Self { user: None, loading: true, mounted: false, phase: SessionPhase::Initializing }
    }
}

impl AuthState {
    /// `Initializing -> AwaitingClient`. Idempotent.
    pub fn mount(&mut self) {
        if self.mounted {
            return;
        }
        self.mounted = true;
        self.phase = SessionPhase::AwaitingClient;
    }

    /// `AwaitingClient -> Unconfigured`, loading cleared.
    pub fn client_unavailable(&mut self) {
        if self.phase == SessionPhase::AwaitingClient {
            self.phase = SessionPhase::Unconfigured;
            self.loading = false;
        }
    }

    /// `AwaitingClient -> CheckingSession`.
    pub fn client_ready(&mut self) {
        if self.phase == SessionPhase::AwaitingClient {
            self.phase = SessionPhase::CheckingSession;
        }
    }

    /// `CheckingSession -> Ready` with the fetch result (`None` on failure).
    pub fn session_checked(&mut self, user: Option<User>) {
        if self.phase == SessionPhase::CheckingSession {
            self.phase = SessionPhase::Ready;
            self.user = user;
            self.loading = false;
        }
    }

    /// A change notification: replace the user wholesale.
    pub fn session_changed(&mut self, user: Option<User>) {
        if matches!(self.phase, SessionPhase::CheckingSession | SessionPhase::Ready) {
            self.user = user;
            self.loading = false;
        }
    }

    /// True once the factory reported no backend.
    #[must_use]
    pub fn is_demo(&self) -> bool {
        self.phase == SessionPhase::Unconfigured
    }
}

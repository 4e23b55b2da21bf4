//! Client factory: decides whether a live backend handle can exist.
//!
//! DESIGN
//! ======
//! The factory never constructs a client itself. Callers pass the
//! constructor in at call time, so nothing of the client is touched on the
//! server render pass or when the project is unconfigured. Both entry points
//! return `Option` and never panic; `None` means "no backend available".

#[cfg(test)]
#[path = "factory_test.rs"]
mod factory_test;

use super::config::{Credentials, SupabaseConfig};

/// Where the current code is executing.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ExecutionContext {
    /// A browser with a `window` global.
    Browser,
    /// Server-side rendering or any other non-browser host.
    Server,
}

impl ExecutionContext {
    /// Detect the current context. Only the hydrate build can see a `window`.
    #[must_use]
    pub fn detect() -> Self {
        #[cfg(feature = "hydrate")]
        {
            if web_sys::window().is_some() {
                return Self::Browser;
            }
            Self::Server
        }
        #[cfg(not(feature = "hydrate"))]
        {
            Self::Server
        }
    }

    #[must_use]
    pub fn is_browser(self) -> bool {
        matches!(self, Self::Browser)
    }
}

/// Default diagnostic sink: the Leptos console logger.
pub fn log_diagnostic(message: &str) {
    leptos::logging::log!("{message}");
}

/// Produces backend handles from a configuration snapshot.
pub struct ClientFactory<D = fn(&str)> {
    config: SupabaseConfig,
    context: ExecutionContext,
    diagnostics: D,
}

impl ClientFactory {
    #[must_use]
    pub fn new(config: SupabaseConfig, context: ExecutionContext) -> Self {
        Self { config, context, diagnostics: log_diagnostic }
    }
}

impl<D: Fn(&str)> ClientFactory<D> {
    /// Replace the sink that receives the unconfigured-fallback message.
    #[must_use]
    pub fn with_diagnostics<E: Fn(&str)>(self, diagnostics: E) -> ClientFactory<E> {
        ClientFactory { config: self.config, context: self.context, diagnostics }
    }

    /// Handle bound to the public key, for browser code.
    ///
    /// Returns `None` outside a browser (silently) or when either value is
    /// missing or a placeholder (with one diagnostic). `build` runs at most
    /// once, and only on the success path.
    pub fn browser_client<C, F>(&self, build: F) -> Option<C>
    where
        F: FnOnce(Credentials) -> C,
    {
        if !self.context.is_browser() {
            return None;
        }
        match self.config.public_credentials() {
            Ok(credentials) => Some(build(credentials)),
            Err(issue) => {
                (self.diagnostics)(&format!("Supabase not configured ({issue}) - using demo mode"));
                None
            }
        }
    }

    /// Handle bound to the service-role key, for trusted contexts.
    ///
    /// Runs in any context and never logs. Returns `None` when the URL or
    /// the service-role key is absent.
    pub fn privileged_client<C, F>(&self, build: F) -> Option<C>
    where
        F: FnOnce(Credentials) -> C,
    {
        let url = self.config.url.as_deref()?;
        let key = self.config.service_role_key.as_deref()?;
        Some(build(Credentials::new(url, key)))
    }
}

//! Client-side state modules.
//!
//! DESIGN
//! ======
//! `auth` is the pure view-state machine; `session` drives it from a
//! backend handle and owns the change subscription.

pub mod auth;
pub mod session;

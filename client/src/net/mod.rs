//! Networking and backend-handle modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! `config` + `factory` decide whether a backend handle may exist,
//! `supabase` is the live handle behind the `auth` trait, `events` carries
//! session-change notifications, `api` talks to our own server, and `types`
//! defines the auth wire schema.

pub mod api;
pub mod auth;
pub mod config;
pub mod events;
pub mod factory;
pub mod supabase;
pub mod types;

//! Page modules for route-level screens.
//!
//! ARCHITECTURE
//! ============
//! Each page owns route-scoped orchestration; shared state machines live in
//! `state` and backend access in `net`.

pub mod home;

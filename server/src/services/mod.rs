//! Domain services used by HTTP routes.
//!
//! ARCHITECTURE
//! ============
//! Service modules own credential handling and session bookkeeping so route
//! handlers can stay focused on protocol translation and auth plumbing.

pub mod auth;
pub mod session;
pub mod token;

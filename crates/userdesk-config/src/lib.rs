//! # Userdesk Config
//!
//! Configuration management for Userdesk.
//! Supports layered configuration from files and environment variables,
//! plus the persisted session token.

mod app_config;
mod loader;
mod session;
mod validation;

pub use app_config::*;
pub use loader::*;
pub use session::*;
pub use validation::*;

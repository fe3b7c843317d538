//! User service implementations.
//!
//! This module contains the concrete implementations of service traits.
//! Trait definitions live in the parent module (e.g. `user_service.rs`).

pub mod http_user_service;

pub use http_user_service::HttpUserService;

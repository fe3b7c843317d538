//! # Userdesk Service
//!
//! User operations against the directory API.
//! Contains the form DTOs with their validation and normalization rules,
//! picture upload encoding, the `UserService` trait with its HTTP
//! implementation, and the view-model the front end renders.

pub mod dto;
pub mod r#impl;
pub mod upload;
pub mod user_service;
pub mod view;

pub use dto::*;
pub use r#impl::HttpUserService;
pub use upload::*;
pub use user_service::*;
pub use view::*;

//! # Userdesk CLI
//!
//! Argument parsing, dispatch and output rendering for the `userdesk`
//! binary.

pub mod cli;
pub mod render;

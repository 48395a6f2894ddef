//! Foundation types for sandsh.
//!
//! Shared by every sandsh crate: the error type returned by commands and
//! collaborators, and the TOML-backed shell configuration.

pub mod config;
pub mod error;

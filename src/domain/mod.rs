//! Domain layer for the Zinema plugin.
//!
//! This module contains the core domain types for the plugin, independent
//! of Zellij-specific APIs or infrastructure concerns: the `Movie` model
//! shared by both remote APIs, and the error types used everywhere else.
//!
//! # Organization
//!
//! - [`error`]: Error types and result alias
//! - [`movie`]: Movie wire model and poster sentinel handling

pub mod error;
pub mod movie;

pub use error::{Result, ZinemaError};
pub use movie::{Movie, POSTER_UNAVAILABLE};

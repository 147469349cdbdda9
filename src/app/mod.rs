//! Application layer: state, event handling, and action emission.
//!
//! The app layer is pure with respect to Zellij: events come in, state
//! mutates, and a list of [`Action`]s comes back out for the plugin shim
//! to execute. No host calls happen here, which keeps the whole layer
//! unit-testable.
//!
//! # Organization
//!
//! - [`modes`]: view and input mode enums
//! - [`favourites`]: shared favourites store with the optimistic toggle protocol
//! - [`state`]: central [`AppState`] container and selection/scroll logic
//! - [`handler`]: the [`handle_event`](handler::handle_event) state machine
//! - [`actions`]: side effects returned to the shim

pub mod actions;
pub mod favourites;
pub mod handler;
pub mod modes;
pub mod state;

pub use actions::Action;
pub use favourites::{FavouritesStore, ToggleRequest};
pub use handler::{handle_event, Event};
pub use modes::{InputMode, ViewMode};
pub use state::AppState;

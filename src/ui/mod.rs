//! User interface rendering for the plugin.
//!
//! The UI layer is split into view model computation (pure, lives on
//! `AppState`) and painting (here). Rendering is stateless: every frame
//! is painted in full from the computed view model.
//!
//! # Organization
//!
//! - [`theme`]: color schemes and ANSI escape generation
//! - [`viewmodel`]: renderable snapshot types
//! - [`renderer`]: frame entry point
//! - [`components`]: individual component painters
//! - [`helpers`]: cursor positioning and text fitting

pub mod components;
pub mod helpers;
pub mod renderer;
pub mod theme;
pub mod viewmodel;

pub use renderer::render;
pub use theme::Theme;

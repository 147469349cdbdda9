//! Top-level rendering coordinator.
//!
//! Computes the view model from application state and hands it to the
//! component layout. Output goes to stdout with ANSI positioning, which
//! is how Zellij plugins paint their pane.

use crate::app::AppState;
use crate::ui::components;

/// Renders the plugin UI to stdout.
///
/// Uses the viewport dimensions stored in state, which the plugin shim
/// refreshes immediately before calling this.
pub fn render(state: &AppState) {
    let viewmodel = state.compute_viewmodel();
    components::render_frame(&viewmodel, &state.theme, state.cols, state.rows);
}

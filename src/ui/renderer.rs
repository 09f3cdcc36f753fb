//! Top-level rendering coordinator.
//!
//! Computes the view model from application state and hands it to the
//! component layout.

use crate::app::AppState;
use crate::ui::components;

/// Renders the plugin UI to stdout.
///
/// Prints ANSI-styled output with `print!`; does not clear the screen.
///
/// # Example
///
/// ```rust
/// use galleria::app::AppState;
/// use galleria::ui::{render, Theme};
///
/// let state = AppState::new(Theme::default(), Default::default());
/// render(&state, 24, 80);
/// ```
pub fn render(state: &AppState, rows: usize, cols: usize) {
    let viewmodel = state.compute_viewmodel(rows, cols);

    components::render_screen(&viewmodel, &state.theme, cols, rows);
}

//! Input mode state types for the application.
//!
//! The mode decides how keys are interpreted and which overlay is drawn:
//!
//! - **Browse**: Navigate results and pages, open pickers and the detail view
//! - **Editing**: Typing into the search field
//! - **Picker**: Choosing a period, medium or color from a preset list
//!
//! The detail view is not a mode of its own; it is shown whenever an artwork
//! is selected and takes precedence over the other modes.

use crate::domain::FilterKind;

/// Current input handling mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    /// Default navigation mode.
    ///
    /// Available keybindings: j/k (move), h/l (page), enter (details),
    /// / (edit query), p/m/c (pickers), r (retry search), q (quit).
    Browse,

    /// The user is typing into the search field.
    ///
    /// Characters are appended to the base query; Enter submits, Esc returns
    /// to browsing without submitting.
    Editing,

    /// A filter picker is open.
    Picker {
        /// Which filter group is being chosen.
        kind: FilterKind,
        /// Highlighted row within the picker options.
        index: usize,
    },
}

//! Actions representing side effects to be executed by the plugin runtime.
//!
//! This module defines the [`Action`] type, the commands produced by the event
//! handler after a state transition. Actions are the boundary between pure
//! state transformations and effectful operations such as issuing web
//! requests through the host or hiding the plugin pane.
//!
//! # Example
//!
//! ```rust
//! use galleria::app::{Action, AppState};
//! use galleria::ui::Theme;
//!
//! let mut state = AppState::new(Theme::default(), Default::default());
//! state.set_base_query("monet");
//! let actions = state.submit_search();
//! assert!(matches!(actions[0], Action::SendRequest(_)));
//! ```

use crate::client::HttpRequest;

/// Commands representing side effects to be executed by the plugin runtime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Hides the plugin pane.
    CloseFocus,

    /// Issues an HTTP request through the host.
    ///
    /// The response arrives later as a web request result event carrying the
    /// request's context map.
    SendRequest(HttpRequest),

    /// Scrolls the results view back to the first artwork.
    ScrollToTop,
}

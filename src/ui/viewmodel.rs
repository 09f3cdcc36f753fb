//! View model types representing renderable UI state.
//!
//! View models are computed from application state by
//! `AppState::compute_viewmodel()` and consumed by the renderer. They contain
//! no business logic, only display-ready data.
//!
//! # Example
//!
//! ```rust
//! use galleria::ui::viewmodel::{DisplayItem, FooterInfo, HeaderInfo, SearchBarInfo, UIViewModel};
//!
//! let vm = UIViewModel {
//!     header: HeaderInfo { title: " Galleria ".to_string(), status: None },
//!     search_bar: SearchBarInfo { query: "monet".to_string(), editing: false, disabled: false },
//!     filter_chips: vec![],
//!     display_items: vec![DisplayItem {
//!         title: "Water Lilies".to_string(),
//!         artist: "Claude Monet".to_string(),
//!         date: "1906".to_string(),
//!         is_selected: true,
//!         highlight_ranges: vec![],
//!     }],
//!     selected_index: 0,
//!     status_line: None,
//!     empty_state: None,
//!     picker: None,
//!     detail: None,
//!     footer: FooterInfo { keybindings: "q: quit".to_string() },
//! };
//! assert_eq!(vm.display_items.len(), 1);
//! ```

/// Complete UI view model for rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UIViewModel {
    pub header: HeaderInfo,

    pub search_bar: SearchBarInfo,

    /// One chip per filter group, in display order.
    pub filter_chips: Vec<FilterChip>,

    /// Visible window of result rows.
    pub display_items: Vec<DisplayItem>,

    /// Index of the cursor row within `display_items`.
    pub selected_index: usize,

    /// Error message or pagination summary shown under the results.
    pub status_line: Option<StatusLine>,

    /// Shown instead of the results table when there is nothing to list.
    pub empty_state: Option<EmptyState>,

    /// Open filter picker, drawn over the results area.
    pub picker: Option<PickerInfo>,

    /// Detail panel for the selected artwork, drawn over the results area.
    pub detail: Option<DetailInfo>,

    pub footer: FooterInfo,
}

/// One row of the results table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayItem {
    pub title: String,
    pub artist: String,
    pub date: String,
    pub is_selected: bool,

    /// Character ranges of `title` matching the query.
    ///
    /// Each tuple is `(start_index, end_index)` in character indices.
    pub highlight_ranges: Vec<(usize, usize)>,
}

/// Header title and activity indicator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderInfo {
    pub title: String,

    /// "Loading…" or "Enhancing…" while a request is in flight.
    pub status: Option<String>,
}

/// Footer keybinding hints.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FooterInfo {
    pub keybindings: String,
}

/// Empty state message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmptyState {
    pub message: String,
    pub subtitle: String,
}

/// Search field contents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchBarInfo {
    pub query: String,

    /// The user is typing into the field.
    pub editing: bool,

    /// Input is disabled while a request is in flight.
    pub disabled: bool,
}

/// Filter group label and its active value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterChip {
    pub label: String,
    pub value: Option<String>,
}

/// Line under the results table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatusLine {
    Error(String),
    Pagination(String),
}

/// Filter picker overlay.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PickerInfo {
    pub title: String,
    pub options: Vec<PickerOption>,
}

/// One row of a filter picker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PickerOption {
    pub label: String,

    /// The option is the filter's current value.
    pub is_active: bool,

    /// The picker cursor is on this option.
    pub is_selected: bool,
}

/// Detail panel for a single artwork.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailInfo {
    pub title: String,

    /// `(label, value)` pairs for the fields the artwork carries.
    pub fields: Vec<(String, String)>,

    pub image_url: Option<String>,
}

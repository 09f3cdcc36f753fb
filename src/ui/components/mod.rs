//! Composable UI component renderers.
//!
//! Each component prints one region of the screen at a given row and returns
//! the next free row.
//!
//! # Components
//!
//! - [`header`]: Title bar with the loading/enhancing indicator
//! - [`search`]: Query box and the period/medium/color filter bar
//! - [`table`]: Result list with TITLE, ARTIST and DATE columns
//! - [`status`]: Error banner or pagination summary
//! - [`picker`]: Filter preset chooser
//! - [`detail`]: Full record of the selected artwork
//! - [`empty`]: Message shown when there is nothing to list
//! - [`footer`]: Keybinding hints
//!
//! # Layout
//!
//! ```text
//! [blank line]
//! [Header]
//! [Border]
//! [Search Bar - 3 lines]
//! [Filter Bar]
//! [Body: table, picker, detail or empty state]
//! [Status Line]
//! [Border]
//! [Footer]
//! ```

mod detail;
mod empty;
mod footer;
mod header;
mod picker;
mod search;
mod status;
mod table;

use crate::ui::helpers::position_cursor;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::UIViewModel;

use detail::render_detail;
use empty::render_empty_state;
use footer::render_footer;
use header::render_header;
use picker::render_picker;
use search::{render_filter_bar, render_search_bar};
use status::render_status_line;
use table::{render_table_headers, render_table_rows};

/// Renders a horizontal border line at the specified row.
fn render_border(row: usize, color: &str, cols: usize) -> usize {
    position_cursor(row, 1);
    print!("{}", Theme::fg(color));
    print!("{}", "─".repeat(cols));
    print!("{}", Theme::reset());
    row + 1
}

/// Renders the full screen for a view model.
///
/// The body region shows, in order of precedence, the detail panel, the
/// picker, the empty state, or the result table.
pub fn render_screen(vm: &UIViewModel, theme: &Theme, cols: usize, rows: usize) {
    let mut current_row = 2; // Start at row 2 (skip blank line at row 1)

    current_row = render_header(current_row, &vm.header, theme, cols);
    current_row = render_border(current_row, &theme.colors.border, cols);
    current_row = render_search_bar(current_row, &vm.search_bar, theme, cols);
    current_row = render_filter_bar(current_row, &vm.filter_chips, theme, cols);

    let footer_row = rows;
    let border_row = footer_row.saturating_sub(1);
    let status_row = border_row.saturating_sub(1);
    let body_rows = status_row.saturating_sub(current_row);

    if let Some(detail) = &vm.detail {
        render_detail(current_row, detail, theme, cols, body_rows);
    } else if let Some(picker) = &vm.picker {
        render_picker(current_row, picker, theme, cols, body_rows);
    } else if let Some(empty) = &vm.empty_state {
        render_empty_state(current_row, empty, theme, cols);
    } else {
        current_row = render_table_headers(current_row, theme, cols);
        render_table_rows(current_row, &vm.display_items, theme, cols);
    }

    if let Some(status) = &vm.status_line {
        render_status_line(status_row, status, theme, cols);
    }
    render_border(border_row, &theme.colors.border, cols);
    render_footer(footer_row, &vm.footer, theme, cols);
}

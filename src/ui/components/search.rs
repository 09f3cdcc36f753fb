//! Search bar and filter bar renderers.

use crate::ui::helpers::{display_width, pad, position_cursor, truncate};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{FilterChip, SearchBarInfo};

/// Horizontal margin for the search box (spaces on left and right).
const SEARCH_BOX_MARGIN: usize = 5;

/// Caret drawn after the query while it is being edited.
const CARET: char = '▏';

/// Renders the 3-line query box at the specified row, returning the next row.
///
/// # Layout
///
/// ```text
/// [margin] ┌─────────────┐ [margin]
/// [margin] │ Search: ... │ [margin]
/// [margin] └─────────────┘ [margin]
/// ```
///
/// The frame uses `search_bar_border` while editing and `border` otherwise.
/// While a request is in flight the query is dimmed and marked busy.
pub fn render_search_bar(row: usize, search: &SearchBarInfo, theme: &Theme, cols: usize) -> usize {
    let box_width = cols.saturating_sub(SEARCH_BOX_MARGIN * 2);
    let inner_width = box_width.saturating_sub(2);
    let frame = if search.editing {
        &theme.colors.search_bar_border
    } else {
        &theme.colors.border
    };

    position_cursor(row, 1);
    pad(SEARCH_BOX_MARGIN);
    print!("{}", Theme::fg(frame));
    print!("┌{}┐", "─".repeat(inner_width));
    print!("{}", Theme::reset());

    let mut search_text = format!(" Search: {}", search.query);
    if search.editing {
        search_text.push(CARET);
    }
    if search.disabled {
        search_text.push_str("  (busy)");
    }
    let search_text = truncate(&search_text, inner_width);
    let padding = inner_width.saturating_sub(display_width(&search_text));
    let text_color = if search.disabled {
        &theme.colors.text_dim
    } else {
        &theme.colors.text_normal
    };

    position_cursor(row + 1, 1);
    pad(SEARCH_BOX_MARGIN);
    print!("{}", Theme::fg(frame));
    print!("│");
    print!("{}", Theme::fg(text_color));
    print!("{search_text}");
    pad(padding);
    print!("{}", Theme::fg(frame));
    print!("│");
    print!("{}", Theme::reset());

    position_cursor(row + 2, 1);
    pad(SEARCH_BOX_MARGIN);
    print!("{}", Theme::fg(frame));
    print!("└{}┘", "─".repeat(inner_width));
    print!("{}", Theme::reset());

    row + 3
}

/// Renders one line of filter chips, e.g. `Period: 1800s  Medium: Any`.
///
/// Applied filters use `filter_active_fg`; unset ones show `Any` dimmed.
pub fn render_filter_bar(row: usize, chips: &[FilterChip], theme: &Theme, cols: usize) -> usize {
    position_cursor(row, 1);
    pad(SEARCH_BOX_MARGIN + 1);
    let mut used = SEARCH_BOX_MARGIN + 1;

    for chip in chips {
        let label = format!("{}: ", chip.label);
        let value = chip.value.as_deref().unwrap_or("Any");
        let width = display_width(&label) + display_width(value) + 3;
        if used + width > cols {
            break;
        }

        print!("{}", Theme::fg(&theme.colors.text_dim));
        print!("{label}");
        if chip.value.is_some() {
            print!("{}", Theme::bold());
            print!("{}", Theme::fg(&theme.colors.filter_active_fg));
        }
        print!("{value}");
        print!("{}", Theme::reset());
        pad(3);
        used += width;
    }

    pad(cols.saturating_sub(used));
    row + 1
}

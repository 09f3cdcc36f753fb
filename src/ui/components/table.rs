//! Table component renderer.
//!
//! Renders the result list as TITLE, ARTIST and DATE columns with selection
//! and query match highlighting.

use crate::app::presenter::{ARTIST_COLUMN_WIDTH, TITLE_COLUMN_WIDTH};
use crate::ui::helpers::{self, display_width, pad, position_cursor};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::DisplayItem;

/// Renders the column headers at the specified row, returning the next row.
pub fn render_table_headers(row: usize, theme: &Theme, cols: usize) -> usize {
    position_cursor(row, 1);
    print!("{}", Theme::bold());
    print!("{}", Theme::fg(&theme.colors.header_fg));
    print!(
        "  {:<title$}{:<artist$}{}",
        "TITLE",
        "ARTIST",
        "DATE",
        title = TITLE_COLUMN_WIDTH - 2,
        artist = ARTIST_COLUMN_WIDTH
    );
    pad(cols.saturating_sub(TITLE_COLUMN_WIDTH + ARTIST_COLUMN_WIDTH + 4));
    print!("{}", Theme::reset());
    row + 1
}

/// Renders all rows starting at the specified row, returning the next row.
pub fn render_table_rows(row: usize, items: &[DisplayItem], theme: &Theme, cols: usize) -> usize {
    let mut current_row = row;
    for item in items {
        current_row = render_table_row(current_row, item, theme, cols);
    }
    current_row
}

/// Renders a single row padded to the full width so the selection
/// background spans the line.
///
/// # Styling Precedence
///
/// 1. Selection background (if `is_selected`)
/// 2. Query match highlights (unless selected)
/// 3. Normal text color
fn render_table_row(row: usize, item: &DisplayItem, theme: &Theme, cols: usize) -> usize {
    position_cursor(row, 1);

    if item.is_selected {
        print!("{}", Theme::fg(&theme.colors.selection_fg));
        print!("{}", Theme::bg(&theme.colors.selection_bg));
        print!("> ");
    } else {
        print!("{}", Theme::fg(&theme.colors.text_normal));
        print!("  ");
    }

    helpers::render_highlighted_text(&item.title, &item.highlight_ranges, theme, item.is_selected);
    pad((TITLE_COLUMN_WIDTH - 2).saturating_sub(display_width(&item.title)));

    if !item.is_selected {
        print!("{}", Theme::fg(&theme.colors.text_dim));
    }
    print!("{}", item.artist);
    pad(ARTIST_COLUMN_WIDTH.saturating_sub(display_width(&item.artist)));

    print!("{}", item.date);

    let line_len = TITLE_COLUMN_WIDTH + ARTIST_COLUMN_WIDTH + display_width(&item.date);
    pad(cols.saturating_sub(line_len));

    print!("{}", Theme::reset());
    row + 1
}

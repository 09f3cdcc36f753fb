//! Status line renderer.

use crate::ui::helpers::{display_width, pad, position_cursor, truncate};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::StatusLine;

/// Renders the error banner or the pagination summary on one line.
pub fn render_status_line(row: usize, status: &StatusLine, theme: &Theme, cols: usize) -> usize {
    let (text, color) = match status {
        StatusLine::Error(message) => (format!(" ✗ {message}"), &theme.colors.error_fg),
        StatusLine::Pagination(summary) => (format!(" {summary}"), &theme.colors.status_fg),
    };
    let text = truncate(&text, cols);

    position_cursor(row, 1);
    print!("{}", Theme::fg(color));
    if matches!(status, StatusLine::Error(_)) {
        print!("{}", Theme::bold());
    }
    print!("{text}");
    pad(cols.saturating_sub(display_width(&text)));
    print!("{}", Theme::reset());
    row + 1
}

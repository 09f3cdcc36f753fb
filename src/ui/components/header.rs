//! Header component renderer.

use crate::ui::helpers::{display_width, position_cursor};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::HeaderInfo;

/// Renders the title bar at the specified row, returning the next row.
///
/// The title is centered and bold. A busy indicator, when present, is drawn
/// right-aligned in the status color on the same line.
pub fn render_header(row: usize, header: &HeaderInfo, theme: &Theme, cols: usize) -> usize {
    let title_len = display_width(&header.title);
    let padding = (cols.saturating_sub(title_len)) / 2;
    let status_len = header.status.as_deref().map_or(0, |s| display_width(s) + 1);

    position_cursor(row, 1);
    print!("{}", Theme::bold());
    print!("{}", Theme::fg(&theme.colors.header_fg));
    if let Some(bg) = &theme.colors.header_bg {
        print!("{}", Theme::bg(bg));
    }

    print!("{}", " ".repeat(padding));
    print!("{}", header.title);
    print!(
        "{}",
        " ".repeat(cols.saturating_sub(padding + title_len + status_len))
    );

    if let Some(status) = &header.status {
        print!("{}", Theme::fg(&theme.colors.status_fg));
        print!("{status} ");
    }

    print!("{}", Theme::reset());
    row + 1
}

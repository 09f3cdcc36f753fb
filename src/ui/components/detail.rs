//! Artwork detail panel renderer.

use crate::ui::helpers::{display_width, pad, position_cursor, truncate};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::DetailInfo;

/// Left indent of the detail panel.
const DETAIL_INDENT: usize = 4;

/// Width reserved for field labels.
const LABEL_WIDTH: usize = 13;

/// Renders the selected artwork's title, labeled fields and image URL.
///
/// Field values are cut to one line each; rows past `max_rows` are dropped.
pub fn render_detail(row: usize, detail: &DetailInfo, theme: &Theme, cols: usize, max_rows: usize) -> usize {
    let value_width = cols.saturating_sub(DETAIL_INDENT + LABEL_WIDTH + 1);
    let last_row = row + max_rows;

    position_cursor(row, 1);
    pad(DETAIL_INDENT);
    let title = truncate(&detail.title, cols.saturating_sub(DETAIL_INDENT));
    print!("{}", Theme::bold());
    print!("{}", Theme::fg(&theme.colors.header_fg));
    print!("{title}");
    print!("{}", Theme::reset());
    pad(cols.saturating_sub(DETAIL_INDENT + display_width(&title)));

    let mut current_row = row + 2;
    let image = detail
        .image_url
        .as_ref()
        .map(|url| ("Image".to_string(), url.clone()));

    for (label, value) in detail.fields.iter().cloned().chain(image) {
        if current_row >= last_row {
            break;
        }

        let value = truncate(value.lines().next().unwrap_or_default(), value_width);
        position_cursor(current_row, 1);
        pad(DETAIL_INDENT);
        print!("{}", Theme::fg(&theme.colors.text_dim));
        print!("{label:<width$}", width = LABEL_WIDTH);
        print!("{}", Theme::fg(&theme.colors.text_normal));
        print!(" {value}");
        print!("{}", Theme::reset());
        pad(value_width.saturating_sub(display_width(&value)));

        current_row += 1;
    }

    current_row
}

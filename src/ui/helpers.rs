//! Shared rendering utilities and helpers.
//!
//! Low-level pieces used by several components: cursor positioning, query
//! match highlighting, and width handling that counts characters rather than
//! bytes so accented titles and artist names line up.
//!
//! # Example
//!
//! ```rust
//! use galleria::ui::helpers::{render_highlighted_text, truncate};
//! use galleria::ui::Theme;
//!
//! let theme = Theme::default();
//! let title = truncate("Nighthawks", 20);
//! render_highlighted_text(&title, &[(0, 5)], &theme, false);
//! ```

use crate::ui::theme::Theme;

const ELLIPSIS: char = '…';

/// Positions the cursor at a specific row and column.
///
/// Coordinates are 1-indexed (row 1 = first row, col 1 = first column).
pub fn position_cursor(row: usize, col: usize) {
    print!("\u{1b}[{row};{col}H");
}

/// Number of characters in `text`.
#[must_use]
pub fn display_width(text: &str) -> usize {
    text.chars().count()
}

/// Shortens `text` to at most `max_chars` characters, ending in an ellipsis
/// when anything was cut.
///
/// # Example
///
/// ```rust
/// use galleria::ui::helpers::truncate;
///
/// assert_eq!(truncate("The Bedroom", 20), "The Bedroom");
/// assert_eq!(truncate("A Sunday on La Grande Jatte", 10), "A Sunday …");
/// assert_eq!(truncate("Olympia", 0), "");
/// ```
#[must_use]
pub fn truncate(text: &str, max_chars: usize) -> String {
    if display_width(text) <= max_chars {
        return text.to_string();
    }
    if max_chars == 0 {
        return String::new();
    }

    let mut shortened: String = text.chars().take(max_chars - 1).collect();
    shortened.push(ELLIPSIS);
    shortened
}

/// Prints `count` spaces.
pub fn pad(count: usize) {
    print!("{}", " ".repeat(count));
}

/// Renders text with highlighted character ranges for query matches.
///
/// Ranges are `(start, end)` character indices, end exclusive. Highlighting is
/// skipped on the selected row so the selection background stays uniform.
pub fn render_highlighted_text(
    text: &str,
    ranges: &[(usize, usize)],
    theme: &Theme,
    is_selected: bool,
) {
    if ranges.is_empty() || is_selected {
        print!("{text}");
        return;
    }

    let chars: Vec<char> = text.chars().collect();
    let mut current_pos = 0;

    for &(start, end) in ranges {
        let start = start.min(chars.len());
        let end = end.min(chars.len());
        if start < current_pos || start >= end {
            continue;
        }

        if start > current_pos {
            let normal_section: String = chars[current_pos..start].iter().collect();
            print!("{normal_section}");
        }

        print!("{}", Theme::fg(&theme.colors.match_highlight_fg));
        print!("{}", Theme::bg(&theme.colors.match_highlight_bg));
        let highlighted_section: String = chars[start..end].iter().collect();
        print!("{highlighted_section}");
        print!("{}", Theme::reset());
        print!("{}", Theme::fg(&theme.colors.text_normal));

        current_pos = end;
    }

    if current_pos < chars.len() {
        let remaining: String = chars[current_pos..].iter().collect();
        print!("{remaining}");
    }
}

//! Filter picker renderer.

use crate::ui::helpers::{display_width, pad, position_cursor};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::PickerInfo;

/// Left indent of the picker list.
const PICKER_INDENT: usize = 8;

/// Renders the picker title and its options, scrolled so the highlighted
/// option stays within `max_rows`.
///
/// The applied option is marked with `●`, the highlighted one with the
/// selection colors.
pub fn render_picker(row: usize, picker: &PickerInfo, theme: &Theme, cols: usize, max_rows: usize) -> usize {
    position_cursor(row, 1);
    pad(PICKER_INDENT);
    print!("{}", Theme::bold());
    print!("{}", Theme::fg(&theme.colors.header_fg));
    print!("{}", picker.title);
    print!("{}", Theme::reset());
    pad(cols.saturating_sub(PICKER_INDENT + display_width(&picker.title)));

    let list_rows = max_rows.saturating_sub(1).max(1);
    let selected = picker.options.iter().position(|o| o.is_selected).unwrap_or(0);
    let start = (selected + 1).saturating_sub(list_rows);

    let mut current_row = row + 1;
    for option in picker.options.iter().skip(start).take(list_rows) {
        position_cursor(current_row, 1);
        pad(PICKER_INDENT);

        if option.is_selected {
            print!("{}", Theme::fg(&theme.colors.selection_fg));
            print!("{}", Theme::bg(&theme.colors.selection_bg));
        } else if option.is_active {
            print!("{}", Theme::fg(&theme.colors.filter_active_fg));
        } else {
            print!("{}", Theme::fg(&theme.colors.text_normal));
        }

        let marker = if option.is_active { '●' } else { ' ' };
        let line = format!(" {marker} {} ", option.label);
        print!("{line}");
        print!("{}", Theme::reset());
        pad(cols.saturating_sub(PICKER_INDENT + display_width(&line)));

        current_row += 1;
    }

    current_row
}

//! View model computation.
//!
//! Transforms an [`AppState`] snapshot into a [`UIViewModel`], handling result
//! windowing, query match highlighting, and the mode-dependent overlays.

use super::modes::InputMode;
use super::state::AppState;
use crate::domain::{Artwork, FilterKind};
use crate::ui::helpers::truncate;
use crate::ui::viewmodel::{
    DetailInfo, DisplayItem, EmptyState, FilterChip, FooterInfo, HeaderInfo, PickerInfo,
    PickerOption, SearchBarInfo, StatusLine, UIViewModel,
};
use fuzzy_matcher::skim::SkimMatcherV2;

/// Rows used by everything except the results table.
///
/// Blank line, header, border, search box (3), filter bar, table headers,
/// status line, border, footer.
pub const CHROME_ROWS: usize = 11;

/// Width of the title column, including its trailing gap.
pub const TITLE_COLUMN_WIDTH: usize = 46;

/// Width of the artist column, including its trailing gap.
pub const ARTIST_COLUMN_WIDTH: usize = 30;

impl AppState {
    /// Computes a renderable view model for the given terminal size.
    ///
    /// The visible window of results is centered on the cursor, shifted back
    /// near the end of the list so the table stays full.
    #[must_use]
    pub fn compute_viewmodel(&self, rows: usize, cols: usize) -> UIViewModel {
        let available_rows = rows.saturating_sub(CHROME_ROWS).max(1);

        let cursor = self.cursor.min(self.results.len().saturating_sub(1));
        let mut visible_start = cursor
            .saturating_sub(available_rows / 2)
            .min(self.results.len());
        let visible_end = (visible_start + available_rows).min(self.results.len());
        if visible_end.saturating_sub(visible_start) < available_rows
            && self.results.len() >= available_rows
        {
            visible_start = visible_end.saturating_sub(available_rows);
        }

        let matcher = if self.base_query.trim().is_empty() {
            None
        } else {
            Some(SkimMatcherV2::default())
        };

        let title_width = TITLE_COLUMN_WIDTH - 2;
        let display_items = self.results[visible_start..visible_end]
            .iter()
            .enumerate()
            .map(|(relative_idx, artwork)| {
                let absolute_idx = visible_start + relative_idx;
                let title = truncate(artwork.display_title(), title_width);
                let highlight_ranges = matcher.as_ref().map_or_else(Vec::new, |m| {
                    self.compute_highlight_ranges(&title, m)
                });
                DisplayItem {
                    title,
                    artist: truncate(artwork.artist_line(), ARTIST_COLUMN_WIDTH - 2),
                    date: truncate(
                        artwork.date_display.as_deref().unwrap_or("n.d."),
                        cols.saturating_sub(TITLE_COLUMN_WIDTH + ARTIST_COLUMN_WIDTH),
                    ),
                    is_selected: absolute_idx == cursor,
                    highlight_ranges,
                }
            })
            .collect();

        UIViewModel {
            header: self.compute_header(),
            search_bar: SearchBarInfo {
                query: self.base_query.clone(),
                editing: self.input_mode == InputMode::Editing,
                disabled: self.is_busy(),
            },
            filter_chips: self.compute_filter_chips(),
            display_items,
            selected_index: cursor.saturating_sub(visible_start),
            status_line: self.compute_status_line(),
            empty_state: self.compute_empty_state(),
            picker: self.compute_picker(),
            detail: self.compute_detail(),
            footer: self.compute_footer(),
        }
    }

    /// Character ranges of `text` matched by any query token.
    ///
    /// Each whitespace-separated token of the base query is fuzzy matched on
    /// its own; the matched positions are merged and coalesced into runs.
    fn compute_highlight_ranges(&self, text: &str, matcher: &SkimMatcherV2) -> Vec<(usize, usize)> {
        use fuzzy_matcher::FuzzyMatcher;

        let text_len = text.chars().count();
        let mut indices: Vec<usize> = self
            .base_query
            .split_whitespace()
            .filter_map(|token| matcher.fuzzy_indices(text, token))
            .flat_map(|(_score, indices)| indices)
            .filter(|&idx| idx < text_len)
            .collect();
        indices.sort_unstable();
        indices.dedup();

        let mut ranges: Vec<(usize, usize)> = Vec::new();
        for idx in indices {
            match ranges.last_mut() {
                Some((_, end)) if *end == idx => *end = idx + 1,
                _ => ranges.push((idx, idx + 1)),
            }
        }
        ranges
    }

    fn compute_header(&self) -> HeaderInfo {
        let status = if self.generating {
            Some("Enhancing…".to_string())
        } else if self.loading {
            Some("Loading…".to_string())
        } else {
            None
        };

        HeaderInfo {
            title: " Galleria ".to_string(),
            status,
        }
    }

    fn compute_filter_chips(&self) -> Vec<FilterChip> {
        [FilterKind::Period, FilterKind::Medium, FilterKind::Color]
            .into_iter()
            .map(|kind| FilterChip {
                label: kind.label().to_string(),
                value: self.filters.get(kind).map(str::to_string),
            })
            .collect()
    }

    fn compute_status_line(&self) -> Option<StatusLine> {
        if let Some(error) = &self.error {
            return Some(StatusLine::Error(error.clone()));
        }

        self.pagination.as_ref().map(|p| {
            StatusLine::Pagination(format!(
                "Page {} of {} | {} results",
                self.page,
                p.total_pages.max(1),
                p.total
            ))
        })
    }

    fn compute_empty_state(&self) -> Option<EmptyState> {
        if !self.results.is_empty() {
            return None;
        }

        let (message, subtitle) = if self.loading {
            ("Searching the collection…", "Results will appear here")
        } else if self.error.is_some() {
            ("Nothing to show", "Press r to retry the search")
        } else if self.effective_query().is_empty() {
            ("Search the collection", "Press / to type a query, p/m/c to filter")
        } else {
            ("No artworks found", "Try another query or different filters")
        };

        Some(EmptyState {
            message: message.to_string(),
            subtitle: subtitle.to_string(),
        })
    }

    fn compute_picker(&self) -> Option<PickerInfo> {
        let InputMode::Picker { kind, index } = self.input_mode else {
            return None;
        };

        let active = self.filters.get(kind);
        let mut options: Vec<PickerOption> = Vec::new();

        if kind != FilterKind::Color {
            options.push(PickerOption {
                label: "Any".to_string(),
                is_active: active.is_none(),
                is_selected: false,
            });
        }
        options.extend(kind.presets().iter().map(|preset| PickerOption {
            label: (*preset).to_string(),
            is_active: active == Some(*preset),
            is_selected: false,
        }));

        if let Some(option) = options.get_mut(index) {
            option.is_selected = true;
        }

        Some(PickerInfo {
            title: format!("Choose {}", kind.label().to_lowercase()),
            options,
        })
    }

    fn compute_detail(&self) -> Option<DetailInfo> {
        let artwork = self.selected.as_ref()?;

        Some(DetailInfo {
            title: artwork.display_title().to_string(),
            fields: detail_fields(artwork),
            image_url: self.selected_image_url(),
        })
    }

    fn compute_footer(&self) -> FooterInfo {
        let keybindings = if self.selected.is_some() {
            "Esc/Enter: close details"
        } else {
            match self.input_mode {
                InputMode::Editing => "Enter: search  Esc: stop editing  Type to edit the query",
                InputMode::Picker { .. } => "j/k: move  Enter: apply  Esc: cancel",
                InputMode::Browse => {
                    "j/k: move  h/l: page  Enter: details  /: search  p/m/c: period/medium/color  r: retry  q: quit"
                }
            }
        };

        FooterInfo {
            keybindings: keybindings.to_string(),
        }
    }
}

/// Labeled fields shown in the detail panel, skipping missing values.
fn detail_fields(artwork: &Artwork) -> Vec<(String, String)> {
    let artist = artwork
        .artist_display
        .as_deref()
        .map(|artist| artist.lines().map(str::trim).collect::<Vec<_>>().join(", "));
    let description = artwork
        .thumbnail
        .as_ref()
        .and_then(|thumbnail| thumbnail.alt_text.clone());

    [
        ("Artist", artist),
        ("Date", artwork.date_display.clone()),
        ("Origin", artwork.place_of_origin.clone()),
        ("Medium", artwork.medium_display.clone()),
        ("Dimensions", artwork.dimensions.clone()),
        ("Credit", artwork.credit_line.clone()),
        ("Description", description),
    ]
    .into_iter()
    .filter_map(|(label, value)| {
        value
            .filter(|v| !v.trim().is_empty())
            .map(|v| (label.to_string(), v))
    })
    .collect()
}

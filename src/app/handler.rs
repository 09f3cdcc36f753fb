//! Event handling and state transition logic.
//!
//! This module implements the event handler that processes user input and web
//! request results, translating them into state changes and action sequences.
//! It is the only place where [`AppState`] is mutated at runtime.
//!
//! # Architecture
//!
//! The handler follows a unidirectional data flow pattern:
//! 1. Events arrive from the plugin runtime (keys, web request results)
//! 2. [`handle_event`] pattern-matches the event type against the input mode
//! 3. State mutations occur via `AppState` controller methods
//! 4. Actions are collected and returned for execution
//!
//! # Busy Gating
//!
//! While a search or enhancement is in flight, events that would submit a
//! search, edit the query or change filters are ignored. Navigation, paging
//! and the detail view stay responsive.
//!
//! # Example
//!
//! ```rust
//! use galleria::app::{handle_event, AppState, Event};
//! use galleria::ui::Theme;
//!
//! let mut state = AppState::new(Theme::default(), Default::default());
//! handle_event(&mut state, &Event::EditQuery)?;
//! handle_event(&mut state, &Event::Char('m'))?;
//! let (_, actions) = handle_event(&mut state, &Event::Enter)?;
//! assert_eq!(actions.len(), 1);
//! # Ok::<(), galleria::GalleriaError>(())
//! ```

use super::modes::InputMode;
use crate::app::{Action, AppState};
use crate::client::RequestContext;
use crate::domain::error::Result;
use crate::domain::FilterKind;
use std::collections::BTreeMap;

/// Events triggered by user input or by the host completing a web request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// Moves the cursor (results or picker) down.
    KeyDown,
    /// Moves the cursor (results or picker) up.
    KeyUp,
    /// Goes to the next results page.
    NextPage,
    /// Goes to the previous results page.
    PreviousPage,
    /// Mode-dependent confirm: open details, submit query, apply picker choice.
    Enter,
    /// Mode-dependent cancel: close details, leave editing, close picker.
    Escape,
    /// Starts editing the search query.
    EditQuery,
    /// Appends a character to the query while editing.
    Char(char),
    /// Removes the last character of the query while editing.
    Backspace,
    /// Opens the picker for a filter group.
    OpenPicker(FilterKind),
    /// Resubmits the current query.
    Retry,
    /// Hides the plugin pane.
    CloseFocus,

    /// Replaces the free-text query without searching.
    SetBaseQuery(String),
    /// Submits the current query.
    SubmitSearch,
    /// Sets or clears the period filter.
    SetPeriod(Option<String>),
    /// Sets or clears the medium filter.
    SetMedium(Option<String>),
    /// Toggles a color enhancement.
    ToggleColor(String),
    /// Jumps to a results page.
    SetPage(u32),
    /// Opens the detail view for the artwork at an index of the results.
    SelectArtwork(usize),
    /// Closes the detail view.
    ClearSelection,

    /// The plugin's permissions were granted; runs the initial search.
    PermissionsGranted,

    /// A web request issued by the plugin completed.
    WebResponse {
        /// HTTP status code reported by the host.
        status: u16,
        /// Raw response body.
        body: Vec<u8>,
        /// Context map attached to the originating request.
        context: BTreeMap<String, String>,
    },
}

impl Event {
    /// Returns `true` for events that count as search or filter input.
    const fn is_search_input(&self) -> bool {
        matches!(
            self,
            Self::EditQuery
                | Self::Char(_)
                | Self::Backspace
                | Self::OpenPicker(_)
                | Self::Retry
                | Self::SetBaseQuery(_)
                | Self::SubmitSearch
                | Self::SetPeriod(_)
                | Self::SetMedium(_)
                | Self::ToggleColor(_)
        )
    }
}

/// Processes an event, mutates application state, and returns actions to execute.
///
/// Returns whether the UI should re-render and the actions to run in order.
///
/// # Errors
///
/// Currently infallible; the signature leaves room for handlers that reject
/// events outright.
#[allow(clippy::too_many_lines, clippy::unnecessary_wraps)]
pub fn handle_event(state: &mut AppState, event: &Event) -> Result<(bool, Vec<Action>)> {
    let _span = tracing::debug_span!("handle_event", event_type = event_name(event)).entered();

    if state.is_busy() && event.is_search_input() {
        tracing::debug!(loading = state.loading, generating = state.generating, "input ignored while busy");
        return Ok((false, vec![]));
    }

    if state.selected.is_some() {
        match event {
            Event::Escape | Event::Enter | Event::ClearSelection => {
                state.clear_selection();
                return Ok((true, vec![]));
            }
            Event::WebResponse { .. } | Event::CloseFocus | Event::PermissionsGranted => {}
            _ => return Ok((false, vec![])),
        }
    }

    match event {
        Event::KeyDown => {
            if let InputMode::Picker { kind, index } = state.input_mode {
                let len = picker_len(kind);
                state.input_mode = InputMode::Picker { kind, index: (index + 1) % len };
            } else {
                state.move_cursor_down();
            }
            Ok((true, vec![]))
        }
        Event::KeyUp => {
            if let InputMode::Picker { kind, index } = state.input_mode {
                let len = picker_len(kind);
                state.input_mode = InputMode::Picker { kind, index: (index + len - 1) % len };
            } else {
                state.move_cursor_up();
            }
            Ok((true, vec![]))
        }
        Event::NextPage => Ok((true, state.next_page())),
        Event::PreviousPage => Ok((true, state.previous_page())),
        Event::Enter => match state.input_mode {
            InputMode::Browse => {
                let Some(artwork) = state.highlighted_artwork().cloned() else {
                    tracing::debug!("no artwork under cursor");
                    return Ok((false, vec![]));
                };
                state.select_artwork(artwork);
                Ok((true, vec![]))
            }
            InputMode::Editing => {
                if state.is_busy() {
                    return Ok((false, vec![]));
                }
                state.input_mode = InputMode::Browse;
                Ok((true, state.submit_search()))
            }
            InputMode::Picker { kind, index } => {
                if state.is_busy() {
                    return Ok((false, vec![]));
                }
                state.input_mode = InputMode::Browse;
                Ok((true, apply_picker_choice(state, kind, index)))
            }
        },
        Event::Escape => {
            state.input_mode = InputMode::Browse;
            Ok((true, vec![]))
        }
        Event::EditQuery => {
            state.input_mode = InputMode::Editing;
            Ok((true, vec![]))
        }
        Event::Char(c) => {
            if state.input_mode != InputMode::Editing {
                return Ok((false, vec![]));
            }
            let mut query = state.base_query.clone();
            query.push(*c);
            state.set_base_query(query);
            Ok((true, vec![]))
        }
        Event::Backspace => {
            if state.input_mode != InputMode::Editing {
                return Ok((false, vec![]));
            }
            let mut query = state.base_query.clone();
            query.pop();
            state.set_base_query(query);
            Ok((true, vec![]))
        }
        Event::OpenPicker(kind) => {
            let index = state
                .filters
                .get(*kind)
                .and_then(|active| kind.presets().iter().position(|p| *p == active))
                .map_or(0, |position| position + usize::from(*kind != FilterKind::Color));
            state.input_mode = InputMode::Picker { kind: *kind, index };
            Ok((true, vec![]))
        }
        Event::Retry | Event::SubmitSearch => Ok((true, state.submit_search())),
        Event::CloseFocus => Ok((false, vec![Action::CloseFocus])),
        Event::SetBaseQuery(text) => {
            state.set_base_query(text.clone());
            Ok((true, vec![]))
        }
        Event::SetPeriod(period) => Ok((true, state.set_period(period.clone()))),
        Event::SetMedium(medium) => Ok((true, state.set_medium(medium.clone()))),
        Event::ToggleColor(color) => Ok((true, state.toggle_color(color))),
        Event::SetPage(page) => Ok((true, state.set_page(*page))),
        Event::SelectArtwork(index) => {
            let Some(artwork) = state.results.get(*index).cloned() else {
                tracing::debug!(index, "no artwork at index");
                return Ok((false, vec![]));
            };
            state.cursor = *index;
            state.select_artwork(artwork);
            Ok((true, vec![]))
        }
        Event::ClearSelection => {
            state.clear_selection();
            Ok((true, vec![]))
        }
        Event::PermissionsGranted => {
            if state.base_query.trim().is_empty() {
                tracing::debug!("no initial query configured");
                return Ok((false, vec![]));
            }
            tracing::debug!(query = %state.base_query, "running initial search");
            Ok((true, state.submit_search()))
        }
        Event::WebResponse { status, body, context } => {
            let Some(context) = RequestContext::from_map(context) else {
                tracing::debug!("ignoring web response with unknown context");
                return Ok((false, vec![]));
            };

            let _parent = context.trace_context.as_ref().and_then(|trace| trace.attach());
            let _response_span = tracing::debug_span!(
                "web_response",
                kind = ?context.kind,
                seq = context.seq,
                status = *status,
                body_len = body.len()
            )
            .entered();

            Ok(state.apply_response(&context, *status, body))
        }
    }
}

/// Number of rows in a picker. Period and medium pickers start with "Any".
fn picker_len(kind: FilterKind) -> usize {
    match kind {
        FilterKind::Color => kind.presets().len(),
        FilterKind::Period | FilterKind::Medium => kind.presets().len() + 1,
    }
}

/// Applies the highlighted picker row to its filter group.
fn apply_picker_choice(state: &mut AppState, kind: FilterKind, index: usize) -> Vec<Action> {
    let presets = kind.presets();
    match kind {
        FilterKind::Color => presets
            .get(index)
            .map_or_else(Vec::new, |color| state.toggle_color(color)),
        FilterKind::Period | FilterKind::Medium => {
            let value = index
                .checked_sub(1)
                .and_then(|i| presets.get(i))
                .map(|v| (*v).to_string());
            if kind == FilterKind::Period {
                state.set_period(value)
            } else {
                state.set_medium(value)
            }
        }
    }
}

/// Short event name for span fields, without payload bodies.
const fn event_name(event: &Event) -> &'static str {
    match event {
        Event::KeyDown => "KeyDown",
        Event::KeyUp => "KeyUp",
        Event::NextPage => "NextPage",
        Event::PreviousPage => "PreviousPage",
        Event::Enter => "Enter",
        Event::Escape => "Escape",
        Event::EditQuery => "EditQuery",
        Event::Char(_) => "Char",
        Event::Backspace => "Backspace",
        Event::OpenPicker(_) => "OpenPicker",
        Event::Retry => "Retry",
        Event::CloseFocus => "CloseFocus",
        Event::SetBaseQuery(_) => "SetBaseQuery",
        Event::SubmitSearch => "SubmitSearch",
        Event::SetPeriod(_) => "SetPeriod",
        Event::SetMedium(_) => "SetMedium",
        Event::ToggleColor(_) => "ToggleColor",
        Event::SetPage(_) => "SetPage",
        Event::SelectArtwork(_) => "SelectArtwork",
        Event::ClearSelection => "ClearSelection",
        Event::PermissionsGranted => "PermissionsGranted",
        Event::WebResponse { .. } => "WebResponse",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::ClientSettings;
    use crate::ui::Theme;

    fn state() -> AppState {
        AppState::new(Theme::default(), ClientSettings::default())
    }

    #[test]
    fn typing_only_edits_in_editing_mode() {
        let mut state = state();
        let (render, _) = handle_event(&mut state, &Event::Char('x')).unwrap();
        assert!(!render);
        assert!(state.base_query.is_empty());

        handle_event(&mut state, &Event::EditQuery).unwrap();
        handle_event(&mut state, &Event::Char('o')).unwrap();
        handle_event(&mut state, &Event::Char('x')).unwrap();
        handle_event(&mut state, &Event::Backspace).unwrap();
        assert_eq!(state.base_query, "o");
    }

    #[test]
    fn escape_leaves_editing_without_searching() {
        let mut state = state();
        handle_event(&mut state, &Event::EditQuery).unwrap();
        handle_event(&mut state, &Event::Char('a')).unwrap();
        let (_, actions) = handle_event(&mut state, &Event::Escape).unwrap();
        assert!(actions.is_empty());
        assert_eq!(state.input_mode, InputMode::Browse);
        assert_eq!(state.base_query, "a");
    }

    #[test]
    fn filter_input_is_ignored_while_loading() {
        let mut state = state();
        state.set_base_query("monet");
        handle_event(&mut state, &Event::SubmitSearch).unwrap();
        assert!(state.loading);

        let (render, actions) =
            handle_event(&mut state, &Event::SetPeriod(Some("1800s".into()))).unwrap();

        assert!(!render);
        assert!(actions.is_empty());
        assert_eq!(state.filters.period, None);
    }

    #[test]
    fn period_picker_applies_choice() {
        let mut state = state();
        state.set_base_query("portrait");

        handle_event(&mut state, &Event::OpenPicker(FilterKind::Period)).unwrap();
        assert_eq!(state.input_mode, InputMode::Picker { kind: FilterKind::Period, index: 0 });

        handle_event(&mut state, &Event::KeyDown).unwrap();
        let (_, actions) = handle_event(&mut state, &Event::Enter).unwrap();

        assert_eq!(state.filters.period.as_deref(), Some("Ancient"));
        assert_eq!(state.effective_query(), "portrait Ancient");
        assert_eq!(actions.len(), 1);
        assert_eq!(state.input_mode, InputMode::Browse);
    }

    #[test]
    fn picker_any_row_clears_filter() {
        let mut state = state();
        state.filters.medium = Some("Print".into());

        handle_event(&mut state, &Event::OpenPicker(FilterKind::Medium)).unwrap();
        assert_eq!(state.input_mode, InputMode::Picker { kind: FilterKind::Medium, index: 5 });

        state.input_mode = InputMode::Picker { kind: FilterKind::Medium, index: 0 };
        handle_event(&mut state, &Event::Enter).unwrap();
        assert_eq!(state.filters.medium, None);
    }

    #[test]
    fn picker_cursor_wraps() {
        let mut state = state();
        handle_event(&mut state, &Event::OpenPicker(FilterKind::Color)).unwrap();
        handle_event(&mut state, &Event::KeyUp).unwrap();
        assert_eq!(
            state.input_mode,
            InputMode::Picker { kind: FilterKind::Color, index: crate::domain::COLORS.len() - 1 }
        );
    }

    #[test]
    fn detail_view_swallows_navigation_until_closed() {
        let mut state = state();
        state.results = vec![
            crate::domain::Artwork { id: 1, ..Default::default() },
            crate::domain::Artwork { id: 2, ..Default::default() },
        ];

        handle_event(&mut state, &Event::Enter).unwrap();
        assert_eq!(state.selected.as_ref().map(|a| a.id), Some(1));

        let (render, _) = handle_event(&mut state, &Event::KeyDown).unwrap();
        assert!(!render);
        assert_eq!(state.cursor, 0);

        handle_event(&mut state, &Event::Escape).unwrap();
        assert!(state.selected.is_none());
    }

    #[test]
    fn unknown_web_responses_are_ignored() {
        let mut state = state();
        let (render, actions) = handle_event(
            &mut state,
            &Event::WebResponse { status: 200, body: vec![], context: BTreeMap::new() },
        )
        .unwrap();
        assert!(!render);
        assert!(actions.is_empty());
    }

    #[test]
    fn initial_search_runs_only_with_a_query() {
        let mut state = state();
        let (_, actions) = handle_event(&mut state, &Event::PermissionsGranted).unwrap();
        assert!(actions.is_empty());

        state.set_base_query("hokusai");
        let (_, actions) = handle_event(&mut state, &Event::PermissionsGranted).unwrap();
        assert_eq!(actions.len(), 1);
    }
}

//! Zellij plugin wrapper and entry point.
//!
//! Thin integration layer between the Galleria library and the Zellij plugin
//! system: translates Zellij events into library events and executes the
//! resulting actions through the plugin API.
//!
//! # Plugin Lifecycle
//!
//! 1. **Load**: Parse config, initialize tracing, create `AppState`
//! 2. **Subscribe**: Register for Key, `WebRequestResult`, `PermissionRequestResult`
//! 3. **Permissions granted**: Run the configured initial search
//! 4. **Update**: Map events, delegate to `handle_event`, run actions
//! 5. **Render**: Call library render function
//!
//! # Event Mapping
//!
//! - `Key` → navigation, editing and filter events depending on input mode
//! - `WebRequestResult(status, _, body, context)` → `Event::WebResponse`
//! - `PermissionRequestResult(Granted)` → `Event::PermissionsGranted`
//!
//! # Keybindings
//!
//! Global:
//! - `Ctrl+n` / `Ctrl+p`: Move down / up
//!
//! Browsing:
//! - `j`/`Down`, `k`/`Up`: Move
//! - `h`/`Left`, `l`/`Right`: Previous / next page
//! - `Enter`: Open details
//! - `/`: Edit the query
//! - `p`, `m`, `c`: Period, medium, color picker
//! - `r`: Resubmit the search
//! - `q`: Close plugin (closes details when they are open)
//!
//! Editing:
//! - Characters are typed into the query
//! - `Backspace`: Delete, `Enter`: Search, `Esc`: Stop editing
//!
//! Picker:
//! - `j`/`k`/arrows: Move, `Enter`: Apply, `Esc`: Cancel

#![allow(clippy::multiple_crate_versions)]

use std::collections::BTreeMap;
use zellij_tile::prelude::*;

use galleria::client::{HttpRequest, Verb};
use galleria::domain::FilterKind;
use galleria::{handle_event, Action, Config, Event, InputMode};

register_plugin!(State);

/// Plugin state wrapper around the library's `AppState`.
struct State {
    app: galleria::AppState,
}

impl Default for State {
    fn default() -> Self {
        Self {
            app: galleria::initialize(&Config::default()),
        }
    }
}

impl ZellijPlugin for State {
    /// Parses configuration, initializes state, requests permissions and
    /// subscribes to events.
    ///
    /// # Permissions
    ///
    /// - `WebAccess`: Query the collection and enhancement APIs
    /// - `ChangeApplicationState`: Hide the plugin pane
    fn load(&mut self, configuration: BTreeMap<String, String>) {
        let config = Config::from_zellij(&configuration);
        galleria::observability::init_tracing(&config);

        let span = tracing::debug_span!("plugin_load");
        let _guard = span.entered();

        tracing::debug!(
            api_base_url = %config.api_base_url,
            page_size = config.page_size,
            ai_enabled = config.ai_api_key.is_some(),
            "parsed configuration"
        );
        self.app = galleria::initialize(&config);

        request_permission(&[
            PermissionType::WebAccess,
            PermissionType::ChangeApplicationState,
        ]);

        subscribe(&[
            EventType::Key,
            EventType::WebRequestResult,
            EventType::PermissionRequestResult,
        ]);

        tracing::debug!("plugin load complete - waiting for permissions");
    }

    /// Handles incoming Zellij events. Returns `true` if the UI should
    /// re-render.
    fn update(&mut self, event: zellij_tile::prelude::Event) -> bool {
        let event_name = Self::get_event_name(&event);
        let span_name = format!("plugin_update::{event_name}");
        let span = tracing::debug_span!("plugin_update_event", otel.name = %span_name, event_type = %event_name);
        let _guard = span.entered();

        let our_event = match event {
            zellij_tile::prelude::Event::Key(ref key) => match self.map_key_event(key) {
                Some(event) => event,
                None => return false,
            },
            zellij_tile::prelude::Event::WebRequestResult(status, _headers, body, context) => {
                Event::WebResponse { status, body, context }
            }
            zellij_tile::prelude::Event::PermissionRequestResult(PermissionStatus::Granted) => {
                tracing::debug!("permissions granted");
                Event::PermissionsGranted
            }
            zellij_tile::prelude::Event::PermissionRequestResult(PermissionStatus::Denied) => {
                tracing::warn!("permissions denied - searches will fail");
                return false;
            }
            _ => return false,
        };

        match handle_event(&mut self.app, &our_event) {
            Ok((should_render, actions)) => {
                tracing::debug!(
                    action_count = actions.len(),
                    should_render = should_render,
                    "event handled successfully"
                );
                let rerender_for_actions = !actions.is_empty();
                for a in actions {
                    self.execute_action(a);
                }
                should_render || rerender_for_actions
            }
            Err(e) => {
                tracing::debug!(error = %e, "error handling event");
                false
            }
        }
    }

    fn render(&mut self, rows: usize, cols: usize) {
        galleria::ui::render(&self.app, rows, cols);
    }
}

impl State {
    fn get_event_name(event: &zellij_tile::prelude::Event) -> String {
        match event {
            zellij_tile::prelude::Event::Key(key) => format!("Key({:?})", key.bare_key),
            zellij_tile::prelude::Event::WebRequestResult(status, ..) => {
                format!("WebRequestResult({status})")
            }
            zellij_tile::prelude::Event::PermissionRequestResult(..) => {
                "PermissionRequestResult".to_string()
            }
            _ => "Other".to_string(),
        }
    }

    /// Maps keyboard events to application events for the current mode.
    fn map_key_event(&self, key: &KeyWithModifier) -> Option<Event> {
        tracing::debug!(bare_key = ?key.bare_key, mode = ?self.app.input_mode, "key event");

        if key.bare_key == BareKey::Char('n') && key.has_modifiers(&[KeyModifier::Ctrl]) {
            return Some(Event::KeyDown);
        }
        if key.bare_key == BareKey::Char('p') && key.has_modifiers(&[KeyModifier::Ctrl]) {
            return Some(Event::KeyUp);
        }

        match self.app.input_mode {
            InputMode::Editing => Self::map_editing_key(key),
            InputMode::Picker { .. } => Self::map_picker_key(key),
            InputMode::Browse => self.map_browse_key(key),
        }
    }

    fn map_editing_key(key: &KeyWithModifier) -> Option<Event> {
        Some(match key.bare_key {
            BareKey::Enter => Event::Enter,
            BareKey::Esc => Event::Escape,
            BareKey::Backspace => Event::Backspace,
            BareKey::Char(c) if key.key_modifiers.is_empty() || key.has_modifiers(&[KeyModifier::Shift]) => {
                Event::Char(c)
            }
            _ => return None,
        })
    }

    fn map_picker_key(key: &KeyWithModifier) -> Option<Event> {
        Some(match key.bare_key {
            BareKey::Down | BareKey::Char('j') => Event::KeyDown,
            BareKey::Up | BareKey::Char('k') => Event::KeyUp,
            BareKey::Enter => Event::Enter,
            BareKey::Esc | BareKey::Char('q') => Event::Escape,
            _ => return None,
        })
    }

    fn map_browse_key(&self, key: &KeyWithModifier) -> Option<Event> {
        Some(match key.bare_key {
            BareKey::Down | BareKey::Char('j') => Event::KeyDown,
            BareKey::Up | BareKey::Char('k') => Event::KeyUp,
            BareKey::Left | BareKey::Char('h') => Event::PreviousPage,
            BareKey::Right | BareKey::Char('l') => Event::NextPage,
            BareKey::Enter => Event::Enter,
            BareKey::Esc => Event::Escape,
            BareKey::Char('q') if self.app.selected.is_some() => Event::Escape,
            BareKey::Char('q') => Event::CloseFocus,
            BareKey::Char('/') => Event::EditQuery,
            BareKey::Char('p') => Event::OpenPicker(FilterKind::Period),
            BareKey::Char('m') => Event::OpenPicker(FilterKind::Medium),
            BareKey::Char('c') => Event::OpenPicker(FilterKind::Color),
            BareKey::Char('r') => Event::Retry,
            _ => return None,
        })
    }

    /// Translates library actions to Zellij API calls.
    #[tracing::instrument(level = "debug", skip(self))]
    fn execute_action(&mut self, action: Action) {
        match action {
            Action::CloseFocus => {
                tracing::debug!("closing plugin focus");
                hide_self();
            }
            Action::SendRequest(request) => Self::send_request(request),
            Action::ScrollToTop => self.app.scroll_to_top(),
        }
    }

    fn send_request(request: HttpRequest) {
        let HttpRequest { url, verb, headers, body, context } = request;
        tracing::debug!(kind = ?context.kind, seq = context.seq, "issuing web request");

        let verb = match verb {
            Verb::Get => HttpVerb::Get,
            Verb::Post => HttpVerb::Post,
        };
        web_request(url, verb, headers, body, context.to_map());
    }
}

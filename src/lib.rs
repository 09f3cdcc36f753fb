//! Galleria: a Zellij plugin for browsing a public museum collection.
//!
//! Galleria searches the Art Institute of Chicago public API and provides:
//! - Free-text search combined with period and medium presets
//! - Color presets that ask a Gemini model to rewrite the query toward a color
//! - Paginated results with a detail view and IIIF image links
//! - Stale response protection so only the newest request updates the screen
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │  Zellij Plugin Shim (main.rs)                       │  ← Entry point
//! │  - Key mapping, web_request execution               │
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Application Layer (app/)                           │  ← State machine
//! │  - Event handling, busy gating                      │
//! │  - Request sequencing and fetch triggering          │
//! │  - View model computation                           │
//! └─────────────────────────────────────────────────────┘
//!         │                                        │
//! ┌───────────────────────┐            ┌───────────────────────┐
//! │ UI Layer (ui/)        │            │ Client Layer (client/)│
//! │ - Rendering           │            │ - Search requests     │
//! │ - Theming             │            │ - Query enhancement   │
//! │ - Components          │            │ - Image URLs          │
//! └───────────────────────┘            └───────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Domain & Infrastructure                            │
//! │  - Artwork model, filter presets, errors (domain/)  │
//! │  - Sandbox paths (infrastructure/)                  │
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Observability (observability/)                     │  ← Optional
//! │  - OpenTelemetry tracing, file-based OTLP export    │
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! # Configuration
//!
//! ```kdl
//! pane {
//!     plugin location="file:/path/to/galleria.wasm" {
//!         initial_query "impressionism"
//!         page_size "12"
//!         ai_api_key "..."
//!         theme "catppuccin-latte"
//!         trace_level "info"
//!     }
//! }
//! ```
//!
//! # Request Flow
//!
//! 1. A key event becomes an [`Event`] and goes through [`handle_event`].
//! 2. State changes that alter the effective query or page emit
//!    [`Action::SendRequest`] with a context map carrying the request
//!    sequence number.
//! 3. The shim issues the request with `web_request`; the result comes back
//!    as `Event::WebResponse` with the same context.
//! 4. Responses whose sequence number is no longer current are dropped.
//!
//! # Example
//!
//! ```rust
//! use galleria::{handle_event, initialize, Action, Config, Event};
//!
//! let config = Config {
//!     initial_query: Some("monet".to_string()),
//!     ..Default::default()
//! };
//! let mut state = initialize(&config);
//!
//! let (_, actions) = handle_event(&mut state, &Event::PermissionsGranted)?;
//! assert!(matches!(actions[0], Action::SendRequest(_)));
//! # Ok::<(), galleria::GalleriaError>(())
//! ```

#![allow(clippy::multiple_crate_versions)]

pub mod app;
pub mod client;
pub mod domain;
pub mod infrastructure;
pub mod ui;

pub mod observability;

pub use app::{handle_event, Action, AppState, Event, InputMode};
pub use client::ClientSettings;
pub use domain::{Artwork, GalleriaError, Result};
pub use ui::Theme;

use client::request::{DEFAULT_AI_BASE_URL, DEFAULT_AI_MODEL, DEFAULT_API_BASE_URL, DEFAULT_PAGE_SIZE};
use std::collections::BTreeMap;

/// Largest page size the collection API accepts.
const MAX_PAGE_SIZE: u32 = 100;

/// Plugin configuration parsed from Zellij's configuration system.
///
/// # Example
///
/// ```kdl
/// plugin location="file:/path/to/galleria.wasm" {
///     api_base_url "https://api.artic.edu/api/v1"
///     page_size "24"
///     ai_base_url "https://generativelanguage.googleapis.com/v1beta"
///     ai_model "gemini-1.5-flash"
///     ai_api_key "..."
///     initial_query "water lilies"
///     theme "catppuccin-mocha"
///     theme_file "~/.config/galleria/theme.toml"
///     trace_level "debug"
/// }
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the collection API. Default: `https://api.artic.edu/api/v1`
    pub api_base_url: String,

    /// Results per page, clamped to 1..=100. Default: 12
    pub page_size: u32,

    /// Base URL of the generative language API.
    pub ai_base_url: String,

    /// Model used for color enhancement. Default: `gemini-1.5-flash`
    pub ai_model: String,

    /// API key for the generative language API.
    ///
    /// Without a key, color presets report an enhancement failure.
    pub ai_api_key: Option<String>,

    /// Query searched as soon as web access is granted.
    pub initial_query: Option<String>,

    /// Built-in theme name. Ignored if `theme_file` is set.
    pub theme_name: Option<String>,

    /// Path to a custom TOML theme file. Takes precedence over `theme_name`.
    pub theme_file: Option<String>,

    /// Tracing level for OpenTelemetry spans.
    ///
    /// Options: `trace`, `debug`, `info`, `warn`, `error`. Tracing is off
    /// when unset.
    pub trace_level: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            page_size: DEFAULT_PAGE_SIZE,
            ai_base_url: DEFAULT_AI_BASE_URL.to_string(),
            ai_model: DEFAULT_AI_MODEL.to_string(),
            ai_api_key: None,
            initial_query: None,
            theme_name: None,
            theme_file: None,
            trace_level: None,
        }
    }
}

impl Config {
    /// Parses configuration from Zellij's configuration map.
    ///
    /// Blank values count as unset. An unparsable `page_size` falls back to
    /// the default.
    ///
    /// # Example
    ///
    /// ```rust
    /// use std::collections::BTreeMap;
    /// use galleria::Config;
    ///
    /// let mut map = BTreeMap::new();
    /// map.insert("page_size".to_string(), "24".to_string());
    /// map.insert("ai_api_key".to_string(), "  ".to_string());
    ///
    /// let config = Config::from_zellij(&map);
    /// assert_eq!(config.page_size, 24);
    /// assert!(config.ai_api_key.is_none());
    /// ```
    #[must_use]
    pub fn from_zellij(config: &BTreeMap<String, String>) -> Self {
        let get = |key: &str| {
            config
                .get(key)
                .map(|value| value.trim())
                .filter(|value| !value.is_empty())
                .map(String::from)
        };
        let defaults = Self::default();

        let page_size = get("page_size")
            .and_then(|s| s.parse::<u32>().ok())
            .map_or(defaults.page_size, |size| size.clamp(1, MAX_PAGE_SIZE));

        Self {
            api_base_url: get("api_base_url").unwrap_or(defaults.api_base_url),
            page_size,
            ai_base_url: get("ai_base_url").unwrap_or(defaults.ai_base_url),
            ai_model: get("ai_model").unwrap_or(defaults.ai_model),
            ai_api_key: get("ai_api_key"),
            initial_query: get("initial_query"),
            theme_name: get("theme"),
            theme_file: get("theme_file"),
            trace_level: get("trace_level"),
        }
    }

    /// Client settings derived from this configuration.
    #[must_use]
    pub fn settings(&self) -> ClientSettings {
        ClientSettings {
            api_base_url: self.api_base_url.trim_end_matches('/').to_string(),
            page_size: self.page_size,
            ai_base_url: self.ai_base_url.trim_end_matches('/').to_string(),
            ai_model: self.ai_model.clone(),
            ai_api_key: self.ai_api_key.clone(),
        }
    }
}

/// Initializes the plugin state with configuration.
///
/// Loads the theme (from file, name, or default) and seeds the query with
/// `initial_query`. No request is issued here; the first search is sent once
/// web access has been granted.
pub fn initialize(config: &Config) -> AppState {
    tracing::debug!("initializing galleria plugin");

    let theme = config.theme_file.as_ref().map_or_else(
        || {
            config.theme_name.as_ref().map_or_else(
                Theme::default,
                |theme_name| {
                    Theme::from_name(theme_name).unwrap_or_else(|| {
                        tracing::debug!(theme_name = %theme_name, "unknown theme, using default");
                        Theme::default()
                    })
                },
            )
        },
        |theme_file| {
            let path = infrastructure::expand_tilde(theme_file);
            Theme::from_file(&path).unwrap_or_else(|e| {
                tracing::debug!(theme_file = %path, error = %e, "failed to load theme from file, using default");
                Theme::default()
            })
        },
    );

    let mut state = AppState::new(theme, config.settings());
    if let Some(query) = &config.initial_query {
        state.set_base_query(query.clone());
    }
    state
}

#[cfg(test)]
mod tests {
    use super::*;

    fn map(entries: &[(&str, &str)]) -> BTreeMap<String, String> {
        entries
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect()
    }

    #[test]
    fn empty_configuration_uses_defaults() {
        let config = Config::from_zellij(&BTreeMap::new());
        assert_eq!(config.api_base_url, "https://api.artic.edu/api/v1");
        assert_eq!(config.page_size, 12);
        assert_eq!(config.ai_model, "gemini-1.5-flash");
        assert!(config.ai_api_key.is_none());
        assert!(config.initial_query.is_none());
    }

    #[test]
    fn page_size_is_clamped_and_validated() {
        assert_eq!(Config::from_zellij(&map(&[("page_size", "500")])).page_size, 100);
        assert_eq!(Config::from_zellij(&map(&[("page_size", "0")])).page_size, 1);
        assert_eq!(Config::from_zellij(&map(&[("page_size", "lots")])).page_size, 12);
    }

    #[test]
    fn settings_strip_trailing_slashes() {
        let config = Config::from_zellij(&map(&[
            ("api_base_url", "https://example.org/api/"),
            ("ai_api_key", "secret"),
        ]));
        let settings = config.settings();
        assert_eq!(settings.api_base_url, "https://example.org/api");
        assert_eq!(settings.ai_api_key.as_deref(), Some("secret"));
    }

    #[test]
    fn initialize_seeds_query_and_falls_back_on_bad_theme() {
        let config = Config {
            initial_query: Some("hokusai".to_string()),
            theme_name: Some("does-not-exist".to_string()),
            ..Default::default()
        };
        let state = initialize(&config);
        assert_eq!(state.base_query, "hokusai");
        assert_eq!(state.theme.name, "catppuccin-mocha");
        assert!(!state.loading);
    }

    #[test]
    fn initialize_loads_builtin_theme_by_name() {
        let config = Config {
            theme_name: Some("catppuccin-latte".to_string()),
            ..Default::default()
        };
        assert_eq!(initialize(&config).theme.name, "catppuccin-latte");
    }
}

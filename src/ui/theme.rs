//! Theme management and ANSI escape sequence generation.
//!
//! Built-in Catppuccin palettes plus custom themes loaded from TOML files, and
//! the hex to ANSI conversions the components print with.
//!
//! # Built-in Themes
//!
//! - `catppuccin-mocha`: Dark theme with warm tones (default)
//! - `catppuccin-latte`: Light theme with soft pastels
//!
//! # TOML Format
//!
//! ```toml
//! name = "my-theme"
//!
//! [colors]
//! header_fg = "#cdd6f4"
//! selection_fg = "#1e1e2e"
//! selection_bg = "#f5c2e7"
//! text_normal = "#cdd6f4"
//! text_dim = "#6c7086"
//! border = "#45475a"
//! search_bar_border = "#f5c2e7"
//! match_highlight_fg = "#1e1e2e"
//! match_highlight_bg = "#f9e2af"
//! empty_state_fg = "#89b4fa"
//! error_fg = "#f38ba8"
//! filter_active_fg = "#a6e3a1"
//! status_fg = "#94e2d5"
//! ```
//!
//! # Example
//!
//! ```rust
//! use galleria::ui::Theme;
//!
//! let theme = Theme::from_name("catppuccin-latte").unwrap();
//! println!("{}", Theme::fg(&theme.colors.header_fg));
//! println!("{}Bold Text{}", Theme::bold(), Theme::reset());
//! ```

use crate::domain::{GalleriaError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Built-in themes, compiled into the plugin.
const BUILTIN_THEMES: &[(&str, &str)] = &[
    ("catppuccin-mocha", include_str!("../../themes/catppuccin-mocha.toml")),
    ("catppuccin-latte", include_str!("../../themes/catppuccin-latte.toml")),
];

/// Fallback used for malformed hex colors.
const WHITE: (u8, u8, u8) = (255, 255, 255);

/// A named palette, loaded from a built-in or a custom TOML file.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Theme {
    pub name: String,
    pub colors: ThemeColors,
}

/// Hex colors (`"#rrggbb"`) for every styled element.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ThemeColors {
    pub header_fg: String,
    /// Light themes usually leave the header unfilled.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub header_bg: Option<String>,

    pub selection_fg: String,
    pub selection_bg: String,

    pub text_normal: String,
    /// Secondary text: artist column, footer, field labels.
    pub text_dim: String,

    pub border: String,
    /// Frame of the query box while it is being edited.
    pub search_bar_border: String,

    pub match_highlight_fg: String,
    pub match_highlight_bg: String,

    pub empty_state_fg: String,
    pub error_fg: String,
    /// Applied filter values and the active picker entry.
    pub filter_active_fg: String,
    /// Busy indicator and pagination summary.
    pub status_fg: String,
}

impl Theme {
    /// Names accepted by [`Theme::from_name`].
    pub fn builtin_names() -> impl Iterator<Item = &'static str> {
        BUILTIN_THEMES.iter().map(|(name, _)| *name)
    }

    /// Looks up a built-in theme.
    ///
    /// ```rust
    /// use galleria::ui::Theme;
    ///
    /// assert_eq!(Theme::from_name("catppuccin-mocha").unwrap().name, "catppuccin-mocha");
    /// assert!(Theme::from_name("solarized").is_none());
    /// ```
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        BUILTIN_THEMES
            .iter()
            .find(|(builtin, _)| *builtin == name)
            .and_then(|(_, source)| toml::from_str(source).ok())
    }

    /// Loads a custom theme from a TOML file.
    ///
    /// # Errors
    ///
    /// [`GalleriaError::Io`] if the file cannot be read,
    /// [`GalleriaError::Theme`] if it is not a complete theme.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = fs::read_to_string(path)?;

        toml::from_str(&contents)
            .map_err(|e| GalleriaError::Theme(format!("Failed to parse theme TOML: {e}")))
    }

    fn rgb(hex: &str) -> (u8, u8, u8) {
        let digits = hex.trim().trim_start_matches('#');
        if digits.len() != 6 || !digits.is_ascii() {
            return WHITE;
        }

        let channel = |range: std::ops::Range<usize>| u8::from_str_radix(&digits[range], 16).ok();
        match (channel(0..2), channel(2..4), channel(4..6)) {
            (Some(r), Some(g), Some(b)) => (r, g, b),
            _ => WHITE,
        }
    }

    /// 24-bit foreground escape for a hex color.
    #[must_use]
    pub fn fg(hex: &str) -> String {
        let (r, g, b) = Self::rgb(hex);
        format!("\u{1b}[38;2;{r};{g};{b}m")
    }

    /// 24-bit background escape for a hex color.
    #[must_use]
    pub fn bg(hex: &str) -> String {
        let (r, g, b) = Self::rgb(hex);
        format!("\u{1b}[48;2;{r};{g};{b}m")
    }

    #[must_use]
    pub const fn bold() -> &'static str {
        "\u{1b}[1m"
    }

    #[must_use]
    pub const fn dim() -> &'static str {
        "\u{1b}[2m"
    }

    /// Clears all styling.
    #[must_use]
    pub const fn reset() -> &'static str {
        "\u{1b}[0m"
    }
}

impl Default for Theme {
    /// Catppuccin Mocha.
    ///
    /// # Panics
    ///
    /// Only if the bundled theme file is broken.
    fn default() -> Self {
        Self::from_name("catppuccin-mocha")
            .expect("Built-in catppuccin-mocha theme should always parse")
    }
}

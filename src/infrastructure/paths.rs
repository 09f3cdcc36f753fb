//! Path handling for the Zellij plugin sandbox.

use std::path::PathBuf;

/// Returns the directory holding Galleria's trace files.
///
/// `/host` points to the cwd of the last focused terminal (usually the home
/// directory), making this `~/.local/share/zellij/galleria` on the host.
///
/// # Examples
///
/// ```
/// use galleria::infrastructure::get_data_dir;
///
/// assert_eq!(get_data_dir().to_str(), Some("/host/.local/share/zellij/galleria"));
/// ```
#[must_use]
pub fn get_data_dir() -> PathBuf {
    PathBuf::from("/host/.local/share/zellij").join("galleria")
}

/// Maps a `~`-prefixed path to its location under `/host`.
///
/// Used for the `theme_file` option.
///
/// # Examples
///
/// ```
/// use galleria::infrastructure::expand_tilde;
///
/// assert_eq!(expand_tilde("~/.config/galleria/theme.toml"), "/host/.config/galleria/theme.toml");
/// assert_eq!(expand_tilde("~"), "/host");
/// assert_eq!(expand_tilde("/absolute/theme.toml"), "/absolute/theme.toml");
/// ```
#[must_use]
pub fn expand_tilde(path: &str) -> String {
    if path.starts_with("~/") {
        path.replacen('~', "/host", 1)
    } else if path == "~" {
        "/host".to_string()
    } else {
        path.to_string()
    }
}

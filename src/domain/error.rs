//! Error types for the Galleria plugin.
//!
//! This module defines the centralized error type [`GalleriaError`] and a type alias
//! [`Result`] for convenient error handling throughout the plugin. All errors are
//! implemented using the `thiserror` crate for automatic `Error` trait implementation.

use thiserror::Error;

/// Message shown to the user when an artwork search fails.
pub const FETCH_ERROR_MESSAGE: &str = "Failed to load artworks. Press r to retry.";

/// Message shown to the user when a color enhancement fails.
pub const GENERATION_ERROR_MESSAGE: &str =
    "Color enhancement failed. Pick the color again to retry.";

/// The main error type for Galleria plugin operations.
///
/// The two user-facing failure kinds are [`GalleriaError::Fetch`] and
/// [`GalleriaError::Generation`]; the remaining variants describe local
/// problems (configuration, themes, payload decoding, I/O).
///
/// # Examples
///
/// ```
/// use galleria::domain::GalleriaError;
///
/// let err = GalleriaError::Fetch("HTTP 503".to_string());
/// assert_eq!(err.to_string(), "Artwork search failed: HTTP 503");
/// ```
#[derive(Debug, Error)]
pub enum GalleriaError {
    /// Artwork search request failed.
    ///
    /// Covers transport failures, non-success HTTP statuses and malformed
    /// search payloads.
    #[error("Artwork search failed: {0}")]
    Fetch(String),

    /// AI query enhancement failed.
    ///
    /// Covers a missing API key, non-success HTTP statuses and responses
    /// that contain no usable query text.
    #[error("Query enhancement failed: {0}")]
    Generation(String),

    /// A JSON payload could not be decoded.
    #[error("Decode error: {0}")]
    Decode(#[from] serde_json::Error),

    /// Filesystem or I/O operation failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Theme parsing or loading failed.
    #[error("Theme error: {0}")]
    Theme(String),
}

impl GalleriaError {
    /// Returns the message surfaced in the UI for this error.
    ///
    /// Generation failures get the enhancement message; everything else is
    /// reported as a failed search since that is the only other remote call.
    #[must_use]
    pub const fn user_message(&self) -> &'static str {
        match self {
            Self::Generation(_) => GENERATION_ERROR_MESSAGE,
            _ => FETCH_ERROR_MESSAGE,
        }
    }
}

/// A specialized `Result` type for Galleria operations.
pub type Result<T> = std::result::Result<T, GalleriaError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_message_distinguishes_generation_failures() {
        assert_eq!(
            GalleriaError::Generation("no key".into()).user_message(),
            GENERATION_ERROR_MESSAGE
        );
        assert_eq!(
            GalleriaError::Fetch("HTTP 500".into()).user_message(),
            FETCH_ERROR_MESSAGE
        );
    }

    #[test]
    fn decode_errors_convert_from_serde() {
        let err: GalleriaError = serde_json::from_str::<u32>("nope").unwrap_err().into();
        assert!(matches!(err, GalleriaError::Decode(_)));
    }
}

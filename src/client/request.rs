//! Transport-neutral HTTP request description and client settings.

use super::context::RequestContext;
use std::collections::BTreeMap;

/// Default artwork search API base URL.
pub const DEFAULT_API_BASE_URL: &str = "https://api.artic.edu/api/v1";

/// Default generative text API base URL.
pub const DEFAULT_AI_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Default generative text model.
pub const DEFAULT_AI_MODEL: &str = "gemini-1.5-flash";

/// Default number of artworks requested per page.
pub const DEFAULT_PAGE_SIZE: u32 = 12;

/// HTTP verbs used by the plugin.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verb {
    Get,
    Post,
}

/// A request ready to be handed to the host for execution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    pub url: String,
    pub verb: Verb,
    pub headers: BTreeMap<String, String>,
    pub body: Vec<u8>,
    pub context: RequestContext,
}

/// Endpoints and credentials for both collaborators.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientSettings {
    /// Artwork search API base URL, without trailing slash.
    pub api_base_url: String,

    /// Artworks requested per page.
    pub page_size: u32,

    /// Generative text API base URL, without trailing slash.
    pub ai_base_url: String,

    /// Generative text model name.
    pub ai_model: String,

    /// API key for the generative text API. Enhancement fails without it.
    pub ai_api_key: Option<String>,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            page_size: DEFAULT_PAGE_SIZE,
            ai_base_url: DEFAULT_AI_BASE_URL.to_string(),
            ai_model: DEFAULT_AI_MODEL.to_string(),
            ai_api_key: None,
        }
    }
}

/// Returns `true` for 2xx statuses.
#[must_use]
pub const fn is_success(status: u16) -> bool {
    status >= 200 && status < 300
}

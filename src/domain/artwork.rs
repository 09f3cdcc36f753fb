//! Artwork domain model and search page types.
//!
//! These types deserialize directly from the artwork search API payload. An
//! [`Artwork`] is immutable once fetched and owned by the controller's current
//! result set; a [`SearchPage`] is replaced wholesale on every successful fetch.

use serde::{Deserialize, Deserializer, Serialize};

/// Low-resolution placeholder and sizing metadata for an artwork image.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Thumbnail {
    /// Base64 data URI of a tiny blurred placeholder image.
    #[serde(default)]
    pub lqip: Option<String>,
    #[serde(default)]
    pub width: Option<u32>,
    #[serde(default)]
    pub height: Option<u32>,
    #[serde(default)]
    pub alt_text: Option<String>,
}

/// A single artwork returned by the search API.
///
/// Display strings are optional because the collection data is sparse; the
/// UI substitutes placeholders for missing values.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Artwork {
    pub id: u64,
    /// Empty when the record has no title; the API sends `null` for those.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub title: String,
    /// IIIF image identifier. Artworks without one are never displayed.
    #[serde(default)]
    pub image_id: Option<String>,
    #[serde(default)]
    pub artist_display: Option<String>,
    #[serde(default)]
    pub date_display: Option<String>,
    #[serde(default)]
    pub place_of_origin: Option<String>,
    #[serde(default)]
    pub dimensions: Option<String>,
    #[serde(default)]
    pub medium_display: Option<String>,
    #[serde(default)]
    pub credit_line: Option<String>,
    #[serde(default)]
    pub thumbnail: Option<Thumbnail>,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

impl Artwork {
    /// Returns the title, or a placeholder for untitled works.
    #[must_use]
    pub fn display_title(&self) -> &str {
        if self.title.trim().is_empty() {
            "Untitled"
        } else {
            &self.title
        }
    }

    /// Returns the first line of the artist display string.
    ///
    /// The API packs nationality and life dates onto following lines, which
    /// do not fit a single table cell.
    #[must_use]
    pub fn artist_line(&self) -> &str {
        self.artist_display
            .as_deref()
            .and_then(|artist| artist.lines().next())
            .map_or("Unknown artist", str::trim)
    }
}

/// Pagination metadata from the last successful fetch.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PaginationInfo {
    #[serde(default)]
    pub total: u64,
    #[serde(default)]
    pub limit: u32,
    #[serde(default)]
    pub offset: u64,
    #[serde(default)]
    pub total_pages: u32,
    #[serde(default)]
    pub current_page: u32,
    #[serde(default)]
    pub next_url: Option<String>,
}

/// Image-serving configuration returned alongside search results.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ImageConfig {
    /// IIIF base URL used to build full image URLs.
    #[serde(default)]
    pub iiif_url: String,
}

/// One page of search results as returned by the artwork search API.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SearchPage {
    #[serde(rename = "data", default)]
    pub results: Vec<Artwork>,
    #[serde(default)]
    pub pagination: PaginationInfo,
    #[serde(default)]
    pub config: ImageConfig,
}

impl SearchPage {
    /// Drops artworks that carry no image reference.
    #[must_use]
    pub fn displayable(mut self) -> Self {
        self.results.retain(|artwork| artwork.image_id.is_some());
        self
    }
}

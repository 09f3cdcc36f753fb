//! IIIF image URL construction.

/// Builds the full-resolution IIIF image URL for an artwork image.
///
/// # Example
///
/// ```
/// use galleria::client::image_url;
///
/// assert_eq!(
///     image_url("abc", "https://www.artic.edu/iiif/2"),
///     "https://www.artic.edu/iiif/2/abc/full/843,/0/default.jpg"
/// );
/// ```
#[must_use]
pub fn image_url(image_id: &str, iiif_url: &str) -> String {
    format!("{}/{image_id}/full/843,/0/default.jpg", iiif_url.trim_end_matches('/'))
}

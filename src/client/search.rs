//! Artwork search request construction and response decoding.

use super::context::RequestContext;
use super::request::{is_success, ClientSettings, HttpRequest, Verb};
use crate::domain::{GalleriaError, Result, SearchPage};
use std::collections::BTreeMap;

/// Fields requested from the search endpoint.
const SEARCH_FIELDS: &str = "id,title,image_id,artist_display,date_display,place_of_origin,dimensions,medium_display,credit_line,thumbnail";

/// Builds the search request for a query and 1-based page number.
#[must_use]
pub fn build_search_request(
    settings: &ClientSettings,
    query: &str,
    page: u32,
    context: RequestContext,
) -> HttpRequest {
    let url = format!(
        "{}/artworks/search?q={}&page={}&limit={}&fields={}",
        settings.api_base_url.trim_end_matches('/'),
        urlencoding::encode(query),
        page.max(1),
        settings.page_size,
        SEARCH_FIELDS,
    );

    let mut headers = BTreeMap::new();
    headers.insert("Accept".to_string(), "application/json".to_string());

    HttpRequest {
        url,
        verb: Verb::Get,
        headers,
        body: Vec::new(),
        context,
    }
}

/// Decodes a search response.
///
/// The returned page is already filtered to artworks that carry an image.
///
/// # Errors
///
/// Returns [`GalleriaError::Fetch`] for non-success statuses and for bodies
/// that are not a valid search payload.
pub fn decode_search_response(status: u16, body: &[u8]) -> Result<SearchPage> {
    if !is_success(status) {
        return Err(GalleriaError::Fetch(format!("HTTP {status}")));
    }

    let page: SearchPage = serde_json::from_slice(body)
        .map_err(|e| GalleriaError::Fetch(format!("invalid search payload: {e}")))?;

    Ok(page.displayable())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_encodes_query_and_paging() {
        let settings = ClientSettings::default();
        let request = build_search_request(&settings, "impressionism 1800s", 3, RequestContext::search(1));

        assert_eq!(request.verb, Verb::Get);
        assert!(request.url.starts_with("https://api.artic.edu/api/v1/artworks/search?q=impressionism%201800s&page=3&limit=12"));
        assert!(request.url.contains("fields=id,title,image_id"));
        assert!(request.body.is_empty());
    }

    #[test]
    fn failed_status_is_a_fetch_error() {
        let err = decode_search_response(503, b"{}").unwrap_err();
        assert!(matches!(err, GalleriaError::Fetch(_)));
    }

    #[test]
    fn garbage_body_is_a_fetch_error() {
        let err = decode_search_response(200, b"<html>").unwrap_err();
        assert!(matches!(err, GalleriaError::Fetch(_)));
    }

    #[test]
    fn decoded_page_excludes_imageless_artworks() {
        let body = br#"{
            "pagination": {"total": 40, "limit": 12, "offset": 0, "total_pages": 4, "current_page": 1,
                           "next_url": "https://api.artic.edu/api/v1/artworks/search?page=2"},
            "data": [
                {"id": 1, "title": "Water Lilies", "image_id": "abc", "thumbnail": {"alt_text": "Pond"}},
                {"id": 2, "title": "Lost", "image_id": null, "thumbnail": null}
            ],
            "config": {"iiif_url": "https://www.artic.edu/iiif/2", "website_url": "https://www.artic.edu"}
        }"#;

        let page = decode_search_response(200, body).unwrap();

        assert_eq!(page.results.len(), 1);
        assert_eq!(page.results[0].title, "Water Lilies");
        assert_eq!(page.pagination.total_pages, 4);
        assert!(page.pagination.next_url.is_some());
    }
}

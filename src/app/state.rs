//! Application state and search orchestration.
//!
//! This module defines [`AppState`], the single owner of all mutable state in
//! the plugin. It holds the query, filters, page, current results and the
//! loading/generating flags, and it implements the search controller
//! operations that move that state forward.
//!
//! # Fetch Lifecycle
//!
//! Every operation that may change the effective query or the page ends by
//! calling `sync_fetch`. When the `(effective query, page)` pair differs from
//! the last one requested (or the caller forces it), a new search begins:
//!
//! ```text
//! Idle → Loading → { Success | Error } → Idle
//! ```
//!
//! An empty effective query skips the network entirely and clears results.
//!
//! # Stale Responses
//!
//! Searches and enhancements each carry a monotonic sequence number in their
//! request context. Only the response matching the latest issued sequence is
//! applied; anything older is discarded, so a slow response can never
//! overwrite newer state.
//!
//! # Example
//!
//! ```rust
//! use galleria::app::AppState;
//! use galleria::ui::Theme;
//!
//! let mut state = AppState::new(Theme::default(), Default::default());
//! state.set_base_query("impressionism");
//! state.submit_search();
//! state.set_period(Some("1800s".to_string()));
//! assert_eq!(state.effective_query(), "impressionism 1800s");
//! assert_eq!(state.page, 1);
//! ```

use super::actions::Action;
use super::modes::InputMode;
use crate::client::enhancer::{self, FALLBACK_QUERY};
use crate::client::{image_url, search, ClientSettings, RequestContext, RequestKind};
use crate::domain::error::GENERATION_ERROR_MESSAGE;
use crate::domain::{
    effective_query, ActiveFilters, Artwork, GalleriaError, ImageConfig, PaginationInfo,
};
use crate::ui::theme::Theme;

/// Central application state container.
///
/// Mutated only by [`crate::app::handle_event`] and the controller methods it
/// calls. Derived values such as the effective query and the selected image
/// URL are computed on demand and never stored.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Free-text part of the query. Replaced wholesale by color enhancement.
    pub base_query: String,

    pub filters: ActiveFilters,

    /// Current page, 1-based.
    pub page: u32,

    /// Displayable artworks from the last successful fetch.
    pub results: Vec<Artwork>,

    /// Pagination metadata from the last successful fetch.
    pub pagination: Option<PaginationInfo>,

    /// Image-serving configuration from the last successful fetch.
    pub image_config: Option<ImageConfig>,

    /// A search request is in flight.
    pub loading: bool,

    /// A color enhancement request is in flight.
    pub generating: bool,

    /// User-visible error message. A new error overwrites the previous one.
    pub error: Option<String>,

    /// Artwork opened in the detail view.
    pub selected: Option<Artwork>,

    /// Zero-based cursor within `results`.
    pub cursor: usize,

    pub input_mode: InputMode,

    pub theme: Theme,

    pub settings: ClientSettings,

    /// Sequence number of the most recently issued search.
    fetch_seq: u64,

    /// Sequence number of the most recently issued enhancement.
    enhance_seq: u64,

    /// `(effective query, page)` of the last fetch lifecycle run.
    last_requested: Option<(String, u32)>,
}

impl AppState {
    /// Creates an idle state with an empty query on page 1.
    #[must_use]
    pub fn new(theme: Theme, settings: ClientSettings) -> Self {
        Self {
            base_query: String::new(),
            filters: ActiveFilters::default(),
            page: 1,
            results: Vec::new(),
            pagination: None,
            image_config: None,
            loading: false,
            generating: false,
            error: None,
            selected: None,
            cursor: 0,
            input_mode: InputMode::Browse,
            theme,
            settings,
            fetch_seq: 0,
            enhance_seq: 0,
            last_requested: None,
        }
    }

    /// The query string sent to the search API.
    #[must_use]
    pub fn effective_query(&self) -> String {
        effective_query(&self.base_query, &self.filters)
    }

    /// Full image URL of the artwork in the detail view, if it has one.
    #[must_use]
    pub fn selected_image_url(&self) -> Option<String> {
        let artwork = self.selected.as_ref()?;
        let config = self.image_config.as_ref()?;
        let image_id = artwork.image_id.as_deref()?;
        Some(image_url(image_id, &config.iiif_url))
    }

    /// Returns `true` while either remote call is in flight.
    ///
    /// Search and filter inputs are disabled while busy.
    #[must_use]
    pub const fn is_busy(&self) -> bool {
        self.loading || self.generating
    }

    /// Artwork under the cursor.
    #[must_use]
    pub fn highlighted_artwork(&self) -> Option<&Artwork> {
        self.results.get(self.cursor)
    }

    /// Replaces the free-text query. Does not fetch; submitting does.
    ///
    /// Editing the text drops an active color, since the query is no longer
    /// the model's rewrite.
    pub fn set_base_query(&mut self, text: impl Into<String>) {
        let text = text.into();
        if text != self.base_query && self.filters.color.take().is_some() {
            tracing::debug!("base query edited, color cleared");
        }
        self.base_query = text;
        tracing::trace!(query = %self.base_query, "base query updated");
    }

    /// Submits the current query.
    ///
    /// Clears every filter, resets to page 1 and always runs a search, even
    /// when neither the query nor the page changed.
    pub fn submit_search(&mut self) -> Vec<Action> {
        let _span = tracing::debug_span!("submit_search", query = %self.base_query).entered();

        self.filters = ActiveFilters::default();
        self.page = 1;
        self.sync_fetch(true)
    }

    /// Sets or clears the period filter.
    ///
    /// Clears the color filter and resets to page 1.
    pub fn set_period(&mut self, period: Option<String>) -> Vec<Action> {
        tracing::debug!(period = ?period, "period filter set");
        self.filters.period = period;
        self.filters.color = None;
        self.page = 1;
        self.sync_fetch(false)
    }

    /// Sets or clears the medium filter.
    ///
    /// Clears the color filter and resets to page 1.
    pub fn set_medium(&mut self, medium: Option<String>) -> Vec<Action> {
        tracing::debug!(medium = ?medium, "medium filter set");
        self.filters.medium = medium;
        self.filters.color = None;
        self.page = 1;
        self.sync_fetch(false)
    }

    /// Toggles a color enhancement.
    ///
    /// Picking the active color again simply deselects it. Any other color
    /// starts an enhancement request; the query is only rewritten once the
    /// model answers.
    pub fn toggle_color(&mut self, color: &str) -> Vec<Action> {
        let _span = tracing::debug_span!("toggle_color", color = %color).entered();

        if self.filters.color.as_deref() == Some(color) {
            tracing::debug!("color already active, deselecting");
            self.filters.color = None;
            return vec![];
        }

        self.enhance_seq += 1;
        self.generating = true;
        self.filters.color = Some(color.to_string());

        let current = self.effective_query();
        let query = if current.is_empty() { FALLBACK_QUERY } else { current.as_str() };

        let context = RequestContext::enhance(self.enhance_seq, color);
        match enhancer::build_enhance_request(&self.settings, query, color, context) {
            Ok(request) => {
                tracing::debug!(seq = self.enhance_seq, query = %query, "enhancement requested");
                vec![Action::SendRequest(request)]
            }
            Err(e) => {
                tracing::debug!(error = %e, "enhancement could not be requested");
                self.fail_enhancement(&e);
                vec![]
            }
        }
    }

    /// Moves to a page and scrolls back to the top.
    ///
    /// Pages are clamped to `1..=total_pages` once pagination is known.
    pub fn set_page(&mut self, page: u32) -> Vec<Action> {
        let max_page = self
            .pagination
            .as_ref()
            .map_or(u32::MAX, |p| p.total_pages.max(1));
        self.page = page.clamp(1, max_page);

        tracing::debug!(page = self.page, "page set");

        let mut actions = vec![Action::ScrollToTop];
        actions.extend(self.sync_fetch(false));
        actions
    }

    /// Advances one page if there is a next page.
    pub fn next_page(&mut self) -> Vec<Action> {
        let has_next = self
            .pagination
            .as_ref()
            .is_some_and(|p| self.page < p.total_pages);
        if !has_next {
            return vec![];
        }
        self.set_page(self.page + 1)
    }

    /// Goes back one page if not on the first.
    pub fn previous_page(&mut self) -> Vec<Action> {
        if self.page <= 1 {
            return vec![];
        }
        self.set_page(self.page - 1)
    }

    /// Opens the detail view for an artwork.
    pub fn select_artwork(&mut self, artwork: Artwork) {
        tracing::debug!(artwork_id = artwork.id, "artwork selected");
        self.selected = Some(artwork);
    }

    /// Closes the detail view.
    pub fn clear_selection(&mut self) {
        self.selected = None;
    }

    /// Resets the results view to its first row.
    pub fn scroll_to_top(&mut self) {
        self.cursor = 0;
    }

    /// Moves the cursor down, wrapping to the top.
    pub fn move_cursor_down(&mut self) {
        if self.results.is_empty() {
            return;
        }
        self.cursor = (self.cursor + 1) % self.results.len();
    }

    /// Moves the cursor up, wrapping to the bottom.
    pub fn move_cursor_up(&mut self) {
        if self.results.is_empty() {
            return;
        }
        self.cursor = if self.cursor == 0 {
            self.results.len() - 1
        } else {
            self.cursor - 1
        };
    }

    /// Applies a web request result routed back by the host.
    ///
    /// Returns whether state changed, plus any follow-up actions.
    pub fn apply_response(
        &mut self,
        context: &RequestContext,
        status: u16,
        body: &[u8],
    ) -> (bool, Vec<Action>) {
        match context.kind {
            RequestKind::Search => (self.apply_search_response(context.seq, status, body), vec![]),
            RequestKind::Enhance => {
                let color = context.color.as_deref().unwrap_or_default();
                self.apply_enhance_response(context.seq, color, status, body)
            }
        }
    }

    /// Applies a search response if it belongs to the latest search.
    fn apply_search_response(&mut self, seq: u64, status: u16, body: &[u8]) -> bool {
        if seq != self.fetch_seq {
            tracing::debug!(seq, latest = self.fetch_seq, "discarding stale search response");
            return false;
        }

        match search::decode_search_response(status, body) {
            Ok(page) => {
                tracing::debug!(
                    result_count = page.results.len(),
                    total = page.pagination.total,
                    "search results applied"
                );
                self.results = page.results;
                self.pagination = Some(page.pagination);
                self.image_config = Some(page.config);
                self.cursor = 0;
            }
            Err(e) => {
                tracing::warn!(error = %e, "search failed");
                self.error = Some(e.user_message().to_string());
                self.results.clear();
                self.pagination = None;
                self.cursor = 0;
            }
        }

        self.loading = false;
        true
    }

    /// Applies an enhancement response if it belongs to the latest enhancement.
    fn apply_enhance_response(
        &mut self,
        seq: u64,
        color: &str,
        status: u16,
        body: &[u8],
    ) -> (bool, Vec<Action>) {
        if seq != self.enhance_seq {
            tracing::debug!(seq, latest = self.enhance_seq, "discarding stale enhancement response");
            return (false, vec![]);
        }

        self.generating = false;

        match enhancer::decode_enhance_response(status, body) {
            Ok(query) => {
                tracing::debug!(enhanced_query = %query, color = %color, "query enhanced");
                self.base_query = query;
                self.filters = ActiveFilters {
                    period: None,
                    medium: None,
                    color: Some(color.to_string()),
                };
                self.page = 1;
                (true, self.sync_fetch(false))
            }
            Err(e) => {
                tracing::warn!(error = %e, "enhancement failed");
                self.fail_enhancement(&e);
                (true, vec![])
            }
        }
    }

    /// Rolls back a failed enhancement: only the color is reverted.
    fn fail_enhancement(&mut self, error: &GalleriaError) {
        tracing::debug!(error = %error, color = ?self.filters.color, "rolling back color");
        self.generating = false;
        self.filters.color = None;
        self.error = Some(GENERATION_ERROR_MESSAGE.to_string());
    }

    /// Runs the fetch lifecycle when the effective query or page changed.
    fn sync_fetch(&mut self, force: bool) -> Vec<Action> {
        let key = (self.effective_query(), self.page);
        if !force && self.last_requested.as_ref() == Some(&key) {
            return vec![];
        }
        self.last_requested = Some(key.clone());
        let (query, page) = key;

        self.fetch_seq += 1;

        if query.is_empty() {
            tracing::debug!("empty query, clearing results without fetching");
            self.results.clear();
            self.pagination = None;
            self.cursor = 0;
            self.loading = false;
            return vec![];
        }

        self.loading = true;
        self.error = None;

        tracing::debug!(seq = self.fetch_seq, query = %query, page, "search requested");

        let context = RequestContext::search(self.fetch_seq);
        vec![Action::SendRequest(search::build_search_request(
            &self.settings,
            &query,
            page,
            context,
        ))]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::HttpRequest;

    const PAGE_BODY: &[u8] = br#"{
        "pagination": {"total": 30, "limit": 12, "offset": 0, "total_pages": 3, "current_page": 1},
        "data": [{"id": 1, "title": "Water Lilies", "image_id": "abc"}, {"id": 2, "image_id": null}],
        "config": {"iiif_url": "https://www.artic.edu/iiif/2"}
    }"#;

    fn state() -> AppState {
        AppState::new(
            Theme::default(),
            ClientSettings {
                ai_api_key: Some("key".to_string()),
                ..ClientSettings::default()
            },
        )
    }

    fn sent_request(actions: &[Action]) -> &HttpRequest {
        actions
            .iter()
            .find_map(|action| match action {
                Action::SendRequest(request) => Some(request),
                _ => None,
            })
            .expect("expected a request")
    }

    #[test]
    fn submit_always_fetches_even_when_unchanged() {
        let mut state = state();
        state.set_base_query("monet");

        let first = state.submit_search();
        let second = state.submit_search();

        assert_eq!(sent_request(&first).context.seq, 1);
        assert_eq!(sent_request(&second).context.seq, 2);
        assert!(state.loading);
    }

    #[test]
    fn submit_clears_filters_and_resets_page() {
        let mut state = state();
        state.set_base_query("monet");
        state.filters.period = Some("1800s".into());
        state.filters.medium = Some("Print".into());
        state.page = 4;

        state.submit_search();

        assert!(state.filters.is_empty());
        assert_eq!(state.page, 1);
    }

    #[test]
    fn period_and_medium_clear_color() {
        let mut state = state();
        state.filters.color = Some("blue".into());
        state.set_period(Some("Baroque".into()));
        assert_eq!(state.filters.color, None);

        state.filters.color = Some("red".into());
        state.set_medium(Some("Print".into()));
        assert_eq!(state.filters.color, None);
        assert_eq!(state.page, 1);
    }

    #[test]
    fn empty_query_clears_results_without_request() {
        let mut state = state();
        state.results = vec![Artwork::default()];
        state.pagination = Some(PaginationInfo::default());

        let actions = state.submit_search();

        assert!(actions.is_empty());
        assert!(state.results.is_empty());
        assert!(state.pagination.is_none());
        assert!(!state.loading);
    }

    #[test]
    fn search_success_keeps_only_artworks_with_images() {
        let mut state = state();
        state.set_base_query("lilies");
        let actions = state.submit_search();
        let context = sent_request(&actions).context.clone();

        let (changed, _) = state.apply_response(&context, 200, PAGE_BODY);

        assert!(changed);
        assert!(!state.loading);
        assert_eq!(state.results.len(), 1);
        assert_eq!(state.results[0].id, 1);
        assert_eq!(state.pagination.as_ref().map(|p| p.total_pages), Some(3));
    }

    #[test]
    fn search_failure_clears_results_and_sets_error() {
        let mut state = state();
        state.results = vec![Artwork::default()];
        state.set_base_query("lilies");
        let actions = state.submit_search();
        let context = sent_request(&actions).context.clone();

        state.apply_response(&context, 500, b"");

        assert!(state.results.is_empty());
        assert!(state.pagination.is_none());
        assert_eq!(state.error.as_deref(), Some(crate::domain::error::FETCH_ERROR_MESSAGE));
        assert!(!state.loading);
    }

    #[test]
    fn stale_search_response_is_discarded() {
        let mut state = state();
        state.set_base_query("lilies");
        let first = state.submit_search();
        let stale = sent_request(&first).context.clone();
        state.set_page(2);

        let (changed, _) = state.apply_response(&stale, 200, PAGE_BODY);

        assert!(!changed);
        assert!(state.results.is_empty());
        assert!(state.loading, "newer request is still pending");
    }

    #[test]
    fn toggling_active_color_deselects_without_request() {
        let mut state = state();
        state.filters.color = Some("blue".into());

        let actions = state.toggle_color("blue");

        assert!(actions.is_empty());
        assert_eq!(state.filters.color, None);
        assert!(!state.generating);
    }

    #[test]
    fn enhancement_success_rewrites_query() {
        let mut state = state();
        state.set_base_query("impressionism");
        state.submit_search();
        state.filters.period = Some("1800s".into());

        let actions = state.toggle_color("blue");
        assert!(state.generating);
        let context = sent_request(&actions).context.clone();

        let body = br#"{"candidates":[{"content":{"parts":[{"text":"impressionism blue skies"}]}}]}"#;
        let (changed, follow_up) = state.apply_response(&context, 200, body);

        assert!(changed);
        assert!(!state.generating);
        assert_eq!(state.base_query, "impressionism blue skies");
        assert_eq!(
            state.filters,
            ActiveFilters { period: None, medium: None, color: Some("blue".into()) }
        );
        assert_eq!(state.page, 1);
        assert!(sent_request(&follow_up).url.contains("q=impressionism%20blue%20skies"));
    }

    #[test]
    fn enhancement_failure_reverts_only_color() {
        let mut state = state();
        state.set_base_query("impressionism");
        state.filters.medium = Some("Print".into());

        let actions = state.toggle_color("red");
        let context = sent_request(&actions).context.clone();
        state.apply_response(&context, 500, b"");

        assert_eq!(state.base_query, "impressionism");
        assert_eq!(state.filters.medium.as_deref(), Some("Print"));
        assert_eq!(state.filters.color, None);
        assert!(!state.generating);
        assert_eq!(
            state.error.as_deref(),
            Some(crate::domain::error::GENERATION_ERROR_MESSAGE)
        );
    }

    #[test]
    fn missing_api_key_fails_enhancement_immediately() {
        let mut state = AppState::new(Theme::default(), ClientSettings::default());
        state.set_base_query("waves");

        let actions = state.toggle_color("green");

        assert!(actions.is_empty());
        assert!(!state.generating);
        assert_eq!(state.filters.color, None);
        assert!(state.error.is_some());
    }

    #[test]
    fn empty_query_enhances_fallback_literal() {
        let mut state = state();
        let actions = state.toggle_color("yellow");
        let body: serde_json::Value = serde_json::from_slice(&sent_request(&actions).body).unwrap();
        let prompt = body["contents"][0]["parts"][0]["text"].as_str().unwrap();
        assert!(prompt.contains("\"art\""));
    }

    #[test]
    fn set_page_scrolls_and_clamps() {
        let mut state = state();
        state.set_base_query("lilies");
        let actions = state.submit_search();
        let context = sent_request(&actions).context.clone();
        state.apply_response(&context, 200, PAGE_BODY);

        let actions = state.set_page(9);

        assert_eq!(actions[0], Action::ScrollToTop);
        assert_eq!(state.page, 3);
        assert!(sent_request(&actions).url.contains("page=3"));
        assert!(state.next_page().is_empty());
    }

    #[test]
    fn selected_image_url_is_derived() {
        let mut state = state();
        state.image_config = Some(ImageConfig { iiif_url: "https://iiif.example/2".into() });
        assert_eq!(state.selected_image_url(), None);

        state.select_artwork(Artwork { id: 5, image_id: Some("xyz".into()), ..Artwork::default() });
        assert_eq!(
            state.selected_image_url().as_deref(),
            Some("https://iiif.example/2/xyz/full/843,/0/default.jpg")
        );

        state.clear_selection();
        assert_eq!(state.selected_image_url(), None);
    }

    fn full_page_body(count: u64) -> Vec<u8> {
        let data: Vec<String> = (1..=count)
            .map(|id| format!(r#"{{"id": {id}, "title": "Study {id}", "image_id": "img-{id}"}}"#))
            .collect();
        format!(
            r#"{{"pagination": {{"total": {count}, "total_pages": 1}}, "data": [{}], "config": {{"iiif_url": "https://www.artic.edu/iiif/2"}}}}"#,
            data.join(",")
        )
        .into_bytes()
    }

    fn state_at_last_row() -> AppState {
        let mut state = state();
        state.set_base_query("lilies");
        let actions = state.submit_search();
        let context = sent_request(&actions).context.clone();
        state.apply_response(&context, 200, &full_page_body(12));
        for _ in 0..11 {
            state.move_cursor_down();
        }
        assert_eq!(state.cursor, 11);
        state
    }

    #[test]
    fn failed_search_resets_cursor_and_still_renders() {
        let mut state = state_at_last_row();

        let actions = state.submit_search();
        let context = sent_request(&actions).context.clone();
        state.apply_response(&context, 500, b"");

        assert_eq!(state.cursor, 0);
        let vm = state.compute_viewmodel(30, 120);
        assert!(vm.display_items.is_empty());
        assert!(vm.status_line.is_some());
    }

    #[test]
    fn clearing_the_query_resets_cursor_and_still_renders() {
        let mut state = state_at_last_row();

        state.set_base_query("");
        assert!(state.submit_search().is_empty());

        assert_eq!(state.cursor, 0);
        assert!(state.compute_viewmodel(30, 120).display_items.is_empty());
    }

    #[test]
    fn editing_the_query_drops_the_color() {
        let mut state = state();
        state.set_base_query("water lilies in blue");
        state.filters.color = Some("blue".into());

        state.set_base_query("water lilies in blue");
        assert_eq!(state.filters.color.as_deref(), Some("blue"));

        state.set_base_query("water lilies");
        assert_eq!(state.filters.color, None);
        assert_eq!(state.base_query, "water lilies");
    }

    #[test]
    fn stale_enhancement_response_is_discarded() {
        let mut state = state();
        state.set_base_query("portrait");

        let first = state.toggle_color("red");
        let stale = sent_request(&first).context.clone();
        let second = state.toggle_color("green");
        assert_eq!(sent_request(&second).context.seq, stale.seq + 1);

        let body = br#"{"candidates":[{"content":{"parts":[{"text":"portrait in crimson"}]}}]}"#;
        let (changed, actions) = state.apply_response(&stale, 200, body);

        assert!(!changed);
        assert!(actions.is_empty());
        assert_eq!(state.base_query, "portrait");
        assert_eq!(state.filters.color.as_deref(), Some("green"));
        assert!(state.generating, "newer enhancement is still pending");
    }
}

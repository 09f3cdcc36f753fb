//! End-to-end flows driven through `handle_event`, with the host's web
//! request round trip simulated by feeding responses back as events.

use galleria::client::{HttpRequest, RequestKind, Verb};
use galleria::domain::FilterKind;
use galleria::{handle_event, initialize, Action, AppState, Config, Event, InputMode};

fn state_with_key() -> AppState {
    initialize(&Config {
        ai_api_key: Some("test-key".to_string()),
        ..Default::default()
    })
}

fn send(state: &mut AppState, event: Event) -> Vec<Action> {
    handle_event(state, &event).unwrap().1
}

fn only_request(actions: Vec<Action>) -> HttpRequest {
    let mut requests: Vec<HttpRequest> = actions
        .into_iter()
        .filter_map(|action| match action {
            Action::SendRequest(request) => Some(request),
            _ => None,
        })
        .collect();
    assert_eq!(requests.len(), 1, "expected exactly one request");
    requests.remove(0)
}

fn respond(state: &mut AppState, request: &HttpRequest, status: u16, body: &str) -> Vec<Action> {
    send(
        state,
        Event::WebResponse {
            status,
            body: body.as_bytes().to_vec(),
            context: request.context.to_map(),
        },
    )
}

fn search_body(ids: &[u64], total_pages: u32) -> String {
    let data: Vec<String> = ids
        .iter()
        .map(|id| format!(r#"{{"id": {id}, "title": "Work {id}", "image_id": "img-{id}"}}"#))
        .collect();
    format!(
        r#"{{
            "pagination": {{"total": {total}, "limit": 12, "offset": 0, "total_pages": {total_pages}, "current_page": 1}},
            "data": [{data}],
            "config": {{"iiif_url": "https://www.artic.edu/iiif/2"}}
        }}"#,
        total = u64::from(total_pages) * 12,
        data = data.join(","),
    )
}

fn type_query(state: &mut AppState, text: &str) -> Vec<Action> {
    send(state, Event::EditQuery);
    for c in text.chars() {
        send(state, Event::Char(c));
    }
    send(state, Event::Enter)
}

#[test]
fn typed_query_then_period_filter() {
    let mut state = state_with_key();

    let first = only_request(type_query(&mut state, "impressionism"));
    assert_eq!(state.effective_query(), "impressionism");
    assert_eq!(first.verb, Verb::Get);
    assert!(first.url.contains("q=impressionism"));
    assert!(state.loading);
    respond(&mut state, &first, 200, &search_body(&[1, 2], 3));
    assert!(!state.loading);

    send(&mut state, Event::OpenPicker(FilterKind::Period));
    let period_index = 1 + FilterKind::Period
        .presets()
        .iter()
        .position(|p| *p == "1800s")
        .unwrap();
    for _ in 0..period_index {
        send(&mut state, Event::KeyDown);
    }
    let second = only_request(send(&mut state, Event::Enter));

    assert_eq!(state.effective_query(), "impressionism 1800s");
    assert_eq!(state.page, 1);
    assert_eq!(state.filters.color, None);
    assert_eq!(state.input_mode, InputMode::Browse);
    assert!(second.url.contains("q=impressionism%201800s"));
}

#[test]
fn color_enhancement_rewrites_query_and_searches() {
    let mut state = state_with_key();
    let search = only_request(type_query(&mut state, "impressionism"));
    respond(&mut state, &search, 200, &search_body(&[1], 1));

    let enhance = only_request(send(&mut state, Event::ToggleColor("blue".to_string())));
    assert_eq!(enhance.verb, Verb::Post);
    assert_eq!(enhance.context.kind, RequestKind::Enhance);
    assert!(state.generating);

    let follow_up = only_request(respond(
        &mut state,
        &enhance,
        200,
        r#"{"candidates":[{"content":{"parts":[{"text":"impressionism blue skies"}]}}]}"#,
    ));

    assert!(!state.generating);
    assert_eq!(state.base_query, "impressionism blue skies");
    assert_eq!(state.filters.period, None);
    assert_eq!(state.filters.medium, None);
    assert_eq!(state.filters.color.as_deref(), Some("blue"));
    assert_eq!(state.page, 1);
    assert_eq!(follow_up.context.kind, RequestKind::Search);
    assert!(follow_up.url.contains("q=impressionism%20blue%20skies"));

    respond(&mut state, &follow_up, 200, &search_body(&[4], 1));

    // Picking the same color again only deselects it.
    let actions = send(&mut state, Event::ToggleColor("blue".to_string()));
    assert!(actions.is_empty());
    assert_eq!(state.filters.color, None);
    assert_eq!(state.base_query, "impressionism blue skies");
}

#[test]
fn failed_enhancement_keeps_query_and_reverts_color() {
    let mut state = state_with_key();
    state.set_base_query("still life");

    let enhance = only_request(send(&mut state, Event::ToggleColor("red".to_string())));
    let actions = respond(&mut state, &enhance, 500, "internal error");

    assert!(actions.is_empty());
    assert_eq!(state.base_query, "still life");
    assert_eq!(state.filters.color, None);
    assert!(!state.generating);
    assert!(state.error.is_some());
}

#[test]
fn stale_search_responses_are_discarded() {
    let mut state = state_with_key();
    let first = only_request(type_query(&mut state, "monet"));
    respond(&mut state, &first, 200, &search_body(&[1, 2, 3], 5));

    let to_page_two = only_request(send(&mut state, Event::NextPage));
    let to_page_three = only_request(send(&mut state, Event::NextPage));
    assert_eq!(state.page, 3);

    respond(&mut state, &to_page_three, 200, &search_body(&[30, 31], 5));
    let changed = handle_event(
        &mut state,
        &Event::WebResponse {
            status: 200,
            body: search_body(&[20], 5).into_bytes(),
            context: to_page_two.context.to_map(),
        },
    )
    .unwrap()
    .0;

    assert!(!changed);
    let ids: Vec<u64> = state.results.iter().map(|a| a.id).collect();
    assert_eq!(ids, vec![30, 31]);
}

#[test]
fn failed_search_clears_results_and_retry_recovers() {
    let mut state = state_with_key();
    let first = only_request(type_query(&mut state, "hokusai"));
    respond(&mut state, &first, 200, &search_body(&[1, 2], 2));

    let second = only_request(send(&mut state, Event::NextPage));
    respond(&mut state, &second, 503, "");

    assert!(state.results.is_empty());
    assert!(state.pagination.is_none());
    assert!(state.error.is_some());
    assert!(!state.loading);

    let retry = only_request(send(&mut state, Event::Retry));
    assert!(state.error.is_none());
    respond(&mut state, &retry, 200, &search_body(&[5], 1));
    assert_eq!(state.results.len(), 1);
}

#[test]
fn input_is_ignored_while_a_search_is_pending() {
    let mut state = state_with_key();
    only_request(type_query(&mut state, "degas"));
    assert!(state.loading);

    assert!(send(&mut state, Event::EditQuery).is_empty());
    assert_eq!(state.input_mode, InputMode::Browse);
    assert!(send(&mut state, Event::ToggleColor("green".to_string())).is_empty());
    assert_eq!(state.filters.color, None);
}

#[test]
fn empty_query_never_reaches_the_network() {
    let mut state = state_with_key();
    let actions = type_query(&mut state, "   ");

    assert!(actions.is_empty());
    assert!(state.results.is_empty());
    assert!(state.pagination.is_none());
    assert!(!state.loading);
}

#[test]
fn results_without_images_are_hidden_and_details_link_the_image() {
    let mut state = state_with_key();
    let search = only_request(type_query(&mut state, "cassatt"));
    respond(
        &mut state,
        &search,
        200,
        r#"{
            "pagination": {"total": 2, "total_pages": 1},
            "data": [{"id": 1, "title": "The Child's Bath", "image_id": "abc"}, {"id": 2, "title": "Lost", "image_id": null}],
            "config": {"iiif_url": "https://www.artic.edu/iiif/2"}
        }"#,
    );

    assert_eq!(state.results.len(), 1);

    send(&mut state, Event::Enter);
    assert_eq!(
        state.selected_image_url().as_deref(),
        Some("https://www.artic.edu/iiif/2/abc/full/843,/0/default.jpg")
    );

    send(&mut state, Event::Escape);
    assert!(state.selected.is_none());
}

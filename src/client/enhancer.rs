//! Color enhancement via a generative text model.
//!
//! The enhancer rewrites the current search query so results lean toward a
//! requested color. The rewritten text replaces the base query wholesale.

use super::context::RequestContext;
use super::request::{is_success, ClientSettings, HttpRequest, Verb};
use crate::domain::{GalleriaError, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Query used when the user picks a color before typing anything.
pub const FALLBACK_QUERY: &str = "art";

#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    contents: [Content<'a>; 1],
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    parts: [Part<'a>; 1],
}

#[derive(Debug, Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    #[serde(default)]
    text: String,
}

/// Builds the instruction sent to the model.
#[must_use]
pub fn build_prompt(query: &str, color: &str) -> String {
    format!(
        "You help people search a museum's art collection. Rewrite the search query \
         \"{query}\" so that it finds artworks where the color {color} is prominent. \
         Keep the original subject. Answer with the rewritten search query only, \
         in at most eight words, without quotes or explanation."
    )
}

/// Builds the enhancement request for a query and color.
///
/// # Errors
///
/// Returns [`GalleriaError::Generation`] when no API key is configured; no
/// request can be made in that case.
pub fn build_enhance_request(
    settings: &ClientSettings,
    query: &str,
    color: &str,
    context: RequestContext,
) -> Result<HttpRequest> {
    let api_key = settings
        .ai_api_key
        .as_deref()
        .filter(|key| !key.trim().is_empty())
        .ok_or_else(|| GalleriaError::Generation("no ai_api_key configured".to_string()))?;

    let prompt = build_prompt(query, color);
    let body = serde_json::to_vec(&GenerateRequest {
        contents: [Content { parts: [Part { text: &prompt }] }],
    })?;

    let url = format!(
        "{}/models/{}:generateContent?key={}",
        settings.ai_base_url.trim_end_matches('/'),
        settings.ai_model,
        urlencoding::encode(api_key),
    );

    let mut headers = BTreeMap::new();
    headers.insert("Content-Type".to_string(), "application/json".to_string());

    Ok(HttpRequest {
        url,
        verb: Verb::Post,
        headers,
        body,
        context,
    })
}

/// Decodes the model's answer into a search query.
///
/// Takes the first text part of the first candidate, keeps its first
/// non-empty line and strips surrounding quotes.
///
/// # Errors
///
/// Returns [`GalleriaError::Generation`] for non-success statuses, invalid
/// payloads and answers with no usable text.
pub fn decode_enhance_response(status: u16, body: &[u8]) -> Result<String> {
    if !is_success(status) {
        return Err(GalleriaError::Generation(format!("HTTP {status}")));
    }

    let response: GenerateResponse = serde_json::from_slice(body)
        .map_err(|e| GalleriaError::Generation(format!("invalid generation payload: {e}")))?;

    let text = response
        .candidates
        .into_iter()
        .next()
        .and_then(|candidate| candidate.content)
        .and_then(|content| content.parts.into_iter().next())
        .map(|part| part.text)
        .unwrap_or_default();

    let query = text
        .lines()
        .map(str::trim)
        .find(|line| !line.is_empty())
        .unwrap_or_default()
        .trim_matches(|c| c == '"' || c == '\'' || c == '`')
        .trim()
        .to_string();

    if query.is_empty() {
        return Err(GalleriaError::Generation("empty answer".to_string()));
    }

    Ok(query)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings_with_key() -> ClientSettings {
        ClientSettings {
            ai_api_key: Some("secret key".to_string()),
            ..ClientSettings::default()
        }
    }

    #[test]
    fn missing_key_fails_before_any_request() {
        let err = build_enhance_request(
            &ClientSettings::default(),
            "impressionism",
            "blue",
            RequestContext::enhance(1, "blue"),
        )
        .unwrap_err();
        assert!(matches!(err, GalleriaError::Generation(_)));
    }

    #[test]
    fn request_posts_prompt_to_model() {
        let request = build_enhance_request(
            &settings_with_key(),
            "impressionism",
            "blue",
            RequestContext::enhance(1, "blue"),
        )
        .unwrap();

        assert_eq!(request.verb, Verb::Post);
        assert_eq!(
            request.url,
            "https://generativelanguage.googleapis.com/v1beta/models/gemini-1.5-flash:generateContent?key=secret%20key"
        );

        let body: serde_json::Value = serde_json::from_slice(&request.body).unwrap();
        let text = body["contents"][0]["parts"][0]["text"].as_str().unwrap();
        assert!(text.contains("\"impressionism\""));
        assert!(text.contains("blue"));
    }

    #[test]
    fn answer_is_trimmed_and_unquoted() {
        let body = br#"{"candidates":[{"content":{"parts":[{"text":"\"impressionism blue skies\"\n"}],"role":"model"}}]}"#;
        assert_eq!(
            decode_enhance_response(200, body).unwrap(),
            "impressionism blue skies"
        );
    }

    #[test]
    fn empty_or_failed_answers_are_generation_errors() {
        assert!(matches!(
            decode_enhance_response(200, br#"{"candidates":[]}"#),
            Err(GalleriaError::Generation(_))
        ));
        assert!(matches!(
            decode_enhance_response(429, b""),
            Err(GalleriaError::Generation(_))
        ));
        assert!(matches!(
            decode_enhance_response(200, b"not json"),
            Err(GalleriaError::Generation(_))
        ));
    }
}

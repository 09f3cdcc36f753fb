//! Request context carried through Zellij's web request round trip.
//!
//! Zellij echoes the context map of a `web_request` back in the matching
//! `WebRequestResult` event. The plugin stores the request kind, its sequence
//! number and the originating trace context there, so responses can be routed,
//! checked for staleness and linked to the span that issued them.

use std::collections::BTreeMap;

const KIND_KEY: &str = "galleria.kind";
const SEQ_KEY: &str = "galleria.seq";
const COLOR_KEY: &str = "galleria.color";
const TRACE_ID_KEY: &str = "galleria.trace_id";
const PARENT_SPAN_ID_KEY: &str = "galleria.parent_span_id";

/// Distributed tracing context for linking response handling to its request.
///
/// Captures the current trace and span IDs from OpenTelemetry when the
/// request is built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TraceContext {
    /// OpenTelemetry trace ID as a hex string.
    pub trace_id: String,

    /// Parent span ID for linking spans across the round trip.
    pub parent_span_id: String,
}

impl TraceContext {
    /// Creates a trace context from the current tracing span.
    ///
    /// Returns `None` if the current span context is invalid or not sampled,
    /// which is always the case when tracing has not been initialized.
    pub fn from_current() -> Option<Self> {
        use opentelemetry::trace::TraceContextExt;
        use tracing_opentelemetry::OpenTelemetrySpanExt;

        let span = tracing::Span::current();

        let otel_context = span.context();
        let span_ref = otel_context.span();
        let span_context = span_ref.span_context();

        if span_context.is_valid() {
            Some(Self {
                trace_id: format!("{:032x}", span_context.trace_id()),
                parent_span_id: format!("{:016x}", span_context.span_id()),
            })
        } else {
            None
        }
    }

    /// Attaches this context as the remote parent of spans on the current thread.
    ///
    /// Returns a guard that must be held for the duration of the handling.
    #[must_use]
    pub fn attach(&self) -> Option<opentelemetry::ContextGuard> {
        use opentelemetry::trace::{
            SpanContext, SpanId, TraceContextExt, TraceFlags, TraceId, TraceState,
        };

        let trace_id = TraceId::from_hex(&self.trace_id).ok()?;
        let span_id = SpanId::from_hex(&self.parent_span_id).ok()?;

        let span_context = SpanContext::new(
            trace_id,
            span_id,
            TraceFlags::SAMPLED,
            true,
            TraceState::default(),
        );

        let otel_context = opentelemetry::Context::current().with_remote_span_context(span_context);

        Some(otel_context.attach())
    }
}

/// Which collaborator a request was sent to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestKind {
    /// Artwork search API.
    Search,
    /// Generative text API used for color enhancement.
    Enhance,
}

impl RequestKind {
    const fn as_str(self) -> &'static str {
        match self {
            Self::Search => "search",
            Self::Enhance => "enhance",
        }
    }

    fn parse(value: &str) -> Option<Self> {
        match value {
            "search" => Some(Self::Search),
            "enhance" => Some(Self::Enhance),
            _ => None,
        }
    }
}

/// Metadata attached to every outgoing request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestContext {
    pub kind: RequestKind,

    /// Monotonic sequence number of the request within its kind.
    pub seq: u64,

    /// Color being applied (enhancement requests only).
    pub color: Option<String>,

    pub trace_context: Option<TraceContext>,
}

impl RequestContext {
    /// Creates a search request context tagged with the current trace context.
    #[must_use]
    pub fn search(seq: u64) -> Self {
        Self {
            kind: RequestKind::Search,
            seq,
            color: None,
            trace_context: TraceContext::from_current(),
        }
    }

    /// Creates an enhancement request context tagged with the current trace context.
    #[must_use]
    pub fn enhance(seq: u64, color: impl Into<String>) -> Self {
        Self {
            kind: RequestKind::Enhance,
            seq,
            color: Some(color.into()),
            trace_context: TraceContext::from_current(),
        }
    }

    /// Encodes the context into the string map Zellij carries with the request.
    #[must_use]
    pub fn to_map(&self) -> BTreeMap<String, String> {
        let mut map = BTreeMap::new();
        map.insert(KIND_KEY.to_string(), self.kind.as_str().to_string());
        map.insert(SEQ_KEY.to_string(), self.seq.to_string());
        if let Some(color) = &self.color {
            map.insert(COLOR_KEY.to_string(), color.clone());
        }
        if let Some(trace) = &self.trace_context {
            map.insert(TRACE_ID_KEY.to_string(), trace.trace_id.clone());
            map.insert(PARENT_SPAN_ID_KEY.to_string(), trace.parent_span_id.clone());
        }
        map
    }

    /// Decodes a context map echoed back by Zellij.
    ///
    /// Returns `None` for maps that were not produced by [`Self::to_map`], for
    /// example responses to requests issued by another plugin instance.
    #[must_use]
    pub fn from_map(map: &BTreeMap<String, String>) -> Option<Self> {
        let kind = RequestKind::parse(map.get(KIND_KEY)?)?;
        let seq = map.get(SEQ_KEY)?.parse().ok()?;

        if kind == RequestKind::Enhance && !map.contains_key(COLOR_KEY) {
            return None;
        }

        let trace_context = match (map.get(TRACE_ID_KEY), map.get(PARENT_SPAN_ID_KEY)) {
            (Some(trace_id), Some(parent_span_id)) => Some(TraceContext {
                trace_id: trace_id.clone(),
                parent_span_id: parent_span_id.clone(),
            }),
            _ => None,
        };

        Some(Self {
            kind,
            seq,
            color: map.get(COLOR_KEY).cloned(),
            trace_context,
        })
    }
}

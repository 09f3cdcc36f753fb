//! Request builders and response decoders for the plugin's remote collaborators.
//!
//! Zellij performs HTTP on the host side: the plugin hands it a request via
//! `web_request` and later receives a `WebRequestResult` event carrying the
//! status, body and the context map that was attached to the request. This
//! module keeps both ends of that exchange pure so they can be tested without
//! a running Zellij instance.
//!
//! # Architecture
//!
//! - `context`: Request context codec (kind, sequence number, trace context)
//! - `request`: Transport-neutral [`HttpRequest`] and client settings
//! - `search`: Artwork search request/response
//! - `enhancer`: AI query enhancement request/response
//! - `image`: IIIF image URL construction

pub mod context;
pub mod enhancer;
pub mod image;
pub mod request;
pub mod search;

pub use context::{RequestContext, RequestKind, TraceContext};
pub use image::image_url;
pub use request::{ClientSettings, HttpRequest, Verb};

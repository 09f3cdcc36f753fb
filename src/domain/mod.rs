//! Domain layer for the Galleria plugin.
//!
//! This module contains the core domain types for the gallery browser,
//! independent of Zellij-specific APIs or network plumbing. Payload types
//! mirror the artwork search API closely enough to deserialize directly.
//!
//! # Organization
//!
//! - [`error`]: Error types and result aliases
//! - [`artwork`]: Artwork, pagination and image-serving configuration
//! - [`filters`]: Active filters, filter presets and effective query derivation
//!
//! # Examples
//!
//! ```
//! use galleria::domain::{effective_query, ActiveFilters};
//!
//! let filters = ActiveFilters {
//!     period: Some("1800s".to_string()),
//!     ..ActiveFilters::default()
//! };
//! assert_eq!(effective_query("impressionism", &filters), "impressionism 1800s");
//! ```

pub mod artwork;
pub mod error;
pub mod filters;

pub use artwork::{Artwork, ImageConfig, PaginationInfo, SearchPage, Thumbnail};
pub use error::{GalleriaError, Result};
pub use filters::{effective_query, ActiveFilters, FilterKind, COLORS, MEDIUMS, PERIODS};

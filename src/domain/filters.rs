//! Search filters and effective query derivation.
//!
//! Period and medium filters are appended to the free-text query; the color
//! filter never is. Color is applied by rewriting the base query through the
//! query enhancer, so it is mutually exclusive with a fresh period or medium
//! choice.

/// Period presets offered by the period picker.
pub const PERIODS: &[&str] = &[
    "Ancient",
    "Medieval",
    "Renaissance",
    "Baroque",
    "1700s",
    "1800s",
    "1900s",
    "Contemporary",
];

/// Medium presets offered by the medium picker.
pub const MEDIUMS: &[&str] = &[
    "Oil on canvas",
    "Watercolor",
    "Photograph",
    "Sculpture",
    "Print",
    "Drawing",
    "Textile",
    "Ceramic",
];

/// Color terms offered by the color picker.
pub const COLORS: &[&str] = &[
    "red", "orange", "yellow", "green", "blue", "purple", "black", "white",
];

/// The three filter groups a user can set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterKind {
    Period,
    Medium,
    Color,
}

impl FilterKind {
    /// Preset values for this filter group.
    #[must_use]
    pub const fn presets(self) -> &'static [&'static str] {
        match self {
            Self::Period => PERIODS,
            Self::Medium => MEDIUMS,
            Self::Color => COLORS,
        }
    }

    /// Human-readable label used in the filter bar and picker title.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Period => "Period",
            Self::Medium => "Medium",
            Self::Color => "Color",
        }
    }
}

/// Currently active filters.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ActiveFilters {
    pub period: Option<String>,
    pub medium: Option<String>,
    pub color: Option<String>,
}

impl ActiveFilters {
    /// Returns the active value for a filter group.
    #[must_use]
    pub fn get(&self, kind: FilterKind) -> Option<&str> {
        match kind {
            FilterKind::Period => self.period.as_deref(),
            FilterKind::Medium => self.medium.as_deref(),
            FilterKind::Color => self.color.as_deref(),
        }
    }

    /// Returns `true` when no filter is set.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.period.is_none() && self.medium.is_none() && self.color.is_none()
    }
}

/// Derives the query string actually sent to the search API.
///
/// Joins the trimmed, non-empty values of the base query, period and medium
/// with single spaces. The color filter is deliberately excluded.
#[must_use]
pub fn effective_query(base_query: &str, filters: &ActiveFilters) -> String {
    [
        Some(base_query),
        filters.period.as_deref(),
        filters.medium.as_deref(),
    ]
    .into_iter()
    .flatten()
    .map(str::trim)
    .filter(|part| !part.is_empty())
    .collect::<Vec<_>>()
    .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn joins_base_period_and_medium() {
        let filters = ActiveFilters {
            period: Some("1800s".into()),
            medium: Some("Oil on canvas".into()),
            color: None,
        };
        assert_eq!(
            effective_query("impressionism", &filters),
            "impressionism 1800s Oil on canvas"
        );
    }

    #[test]
    fn color_never_contributes() {
        let filters = ActiveFilters {
            color: Some("blue".into()),
            ..ActiveFilters::default()
        };
        assert_eq!(effective_query("waves", &filters), "waves");
    }

    #[test]
    fn empty_parts_are_skipped() {
        let filters = ActiveFilters {
            period: Some("Baroque".into()),
            ..ActiveFilters::default()
        };
        assert_eq!(effective_query("   ", &filters), "Baroque");
        assert_eq!(effective_query("", &ActiveFilters::default()), "");
    }

    #[test]
    fn presets_are_exposed_per_kind() {
        assert!(FilterKind::Period.presets().contains(&"1800s"));
        assert!(FilterKind::Color.presets().contains(&"blue"));
        assert_eq!(FilterKind::Medium.label(), "Medium");
    }
}

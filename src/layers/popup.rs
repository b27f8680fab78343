//! Content of the marker popup and the detail overlay.
//!
//! Both show the same thing: a title, a description that folds at
//! [`DESCRIPTION_CHAR_LIMIT`] characters, and whichever contact rows the
//! location actually has.

use crate::core::constants::DESCRIPTION_CHAR_LIMIT;
use crate::data::geojson::LocationFeature;
use fxhash::FxHashSet;

/// How the description should be shown right now
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DescriptionView<'a> {
    /// Short enough to show whole, no toggle
    Full(&'a str),
    /// Folded preview ending in `...`, with a "show more" toggle
    Collapsed(String),
    /// Long description unfolded, with a "show less" toggle
    Expanded(&'a str),
}

impl DescriptionView<'_> {
    pub fn text(&self) -> &str {
        match self {
            Self::Full(text) | Self::Expanded(text) => *text,
            Self::Collapsed(preview) => preview.as_str(),
        }
    }

    pub fn toggle_label(&self) -> Option<&'static str> {
        match self {
            Self::Full(_) => None,
            Self::Collapsed(_) => Some("Show more"),
            Self::Expanded(_) => Some("Show less"),
        }
    }
}

/// Folds `text` to `limit` characters plus `...` when it is longer
pub fn truncate_description(text: &str, limit: usize) -> Option<String> {
    let mut chars = text.char_indices();
    let (cut, _) = chars.nth(limit)?;
    Some(format!("{}...", &text[..cut]))
}

/// Per-location "show more" state, kept across popup openings
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExpandedDescriptions {
    ids: FxHashSet<String>,
}

impl ExpandedDescriptions {
    pub fn is_expanded(&self, feature_id: &str) -> bool {
        self.ids.contains(feature_id)
    }

    pub fn toggle(&mut self, feature_id: &str) {
        if !self.ids.remove(feature_id) {
            self.ids.insert(feature_id.to_string());
        }
    }

    pub fn view<'a>(&self, feature: &'a LocationFeature) -> Option<DescriptionView<'a>> {
        let description = feature.description()?;
        Some(match truncate_description(description, DESCRIPTION_CHAR_LIMIT) {
            None => DescriptionView::Full(description),
            Some(_) if self.is_expanded(feature.id()) => DescriptionView::Expanded(description),
            Some(preview) => DescriptionView::Collapsed(preview),
        })
    }
}

/// One contact row under the description
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InfoRow<'a> {
    Address(&'a str),
    Phone(&'a str),
    Website(&'a str),
    MapLink(&'a str),
}

impl InfoRow<'_> {
    /// Rows present on `feature`, in display order
    pub fn for_feature(feature: &LocationFeature) -> Vec<InfoRow<'_>> {
        [
            feature.address().map(InfoRow::Address),
            feature.phone().map(InfoRow::Phone),
            feature.website().map(InfoRow::Website),
            feature.glink().map(InfoRow::MapLink),
        ]
        .into_iter()
        .flatten()
        .collect()
    }

    pub fn icon(&self) -> &'static str {
        match self {
            Self::Address(_) => "🏢",
            Self::Phone(_) => "📞",
            Self::Website(_) => "🌐",
            Self::MapLink(_) => "🗺",
        }
    }

    /// Text shown for the row
    pub fn label(&self) -> &str {
        match self {
            Self::Address(text) | Self::Phone(text) | Self::Website(text) => *text,
            Self::MapLink(_) => "Open in Google Maps",
        }
    }

    /// Link target, for rows that open a browser
    pub fn url(&self) -> Option<&str> {
        match self {
            Self::Website(url) | Self::MapLink(url) => Some(*url),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::geojson::LocationProperties;

    fn feature(description: &str) -> LocationFeature {
        LocationFeature::new(
            LocationProperties {
                id: "f1".to_string(),
                name: "青埔公園".to_string(),
                category: "park".to_string(),
                description: description.to_string(),
                phone: "03-1234567".to_string(),
                glink: "https://maps.google.com/?q=1".to_string(),
                ..Default::default()
            },
            121.2,
            25.0,
        )
    }

    #[test]
    fn test_truncate_counts_characters() {
        let text = "青".repeat(60);
        let preview = truncate_description(&text, 52).unwrap();
        assert_eq!(preview.chars().count(), 55);
        assert!(preview.ends_with("..."));

        assert_eq!(truncate_description(&"a".repeat(52), 52), None);
    }

    #[test]
    fn test_description_toggle_per_feature() {
        let long = feature(&"x".repeat(80));
        let mut expanded = ExpandedDescriptions::default();

        let view = expanded.view(&long).unwrap();
        assert!(matches!(view, DescriptionView::Collapsed(_)));
        assert_eq!(view.toggle_label(), Some("Show more"));

        expanded.toggle("f1");
        let view = expanded.view(&long).unwrap();
        assert_eq!(view.text().len(), 80);
        assert_eq!(view.toggle_label(), Some("Show less"));
    }

    #[test]
    fn test_short_or_missing_description() {
        let expanded = ExpandedDescriptions::default();
        assert_eq!(expanded.view(&feature("short")), Some(DescriptionView::Full("short")));
        assert_eq!(expanded.view(&feature("  ")), None);
    }

    #[test]
    fn test_only_present_rows() {
        let f = feature("");
        let rows = InfoRow::for_feature(&f);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0], InfoRow::Phone("03-1234567"));
        assert_eq!(rows[1].label(), "Open in Google Maps");
        assert!(rows[1].url().is_some());
    }
}

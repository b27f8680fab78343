//! Location search over the category-filtered feature list.
//!
//! Matching is a plain case-insensitive substring test on the name, in input
//! order. [`SearchBox`] holds the interactive state around it: the typed
//! term, whether the hint list is open and which hint is highlighted.

use crate::data::geojson::LocationFeature;
use crate::input::events::KeyCode;

/// Features whose name contains `term`, ignoring case, in input order.
///
/// The iterator is lazy and can be cloned to restart it.
pub fn search<'a>(
    candidates: &'a [LocationFeature],
    term: &str,
) -> impl Iterator<Item = &'a LocationFeature> + Clone + 'a {
    let needle = term.to_lowercase();
    candidates
        .iter()
        .filter(move |feature| feature.name().to_lowercase().contains(&needle))
}

/// State of the search input and its hint list
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchBox {
    term: String,
    show_results: bool,
    highlighted: Option<usize>,
}

impl SearchBox {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn term(&self) -> &str {
        &self.term
    }

    pub fn is_open(&self) -> bool {
        self.show_results
    }

    pub fn highlighted(&self) -> Option<usize> {
        self.highlighted
    }

    /// The user edited the input
    pub fn set_term(&mut self, term: impl Into<String>) {
        self.term = term.into();
        self.show_results = !self.term.is_empty();
        self.highlighted = None;
    }

    /// The candidate list changed underneath us, e.g. a new category filter
    pub fn on_candidates_changed(&mut self) {
        self.highlighted = None;
        if self.term.is_empty() {
            self.show_results = false;
        }
    }

    /// The input gained focus.
    ///
    /// Returns whether the existing text should be selected for overwrite.
    pub fn focus(&mut self) -> bool {
        if self.term.is_empty() {
            return false;
        }
        self.show_results = true;
        true
    }

    /// Hints currently shown under the input; empty while the list is closed
    pub fn hints<'a>(&self, candidates: &'a [LocationFeature]) -> Vec<&'a LocationFeature> {
        if !self.show_results || self.term.is_empty() {
            return Vec::new();
        }
        search(candidates, &self.term).collect()
    }

    /// Handles a key press, returning the committed feature on Enter
    pub fn handle_key(
        &mut self,
        key: KeyCode,
        candidates: &[LocationFeature],
    ) -> Option<LocationFeature> {
        match key {
            KeyCode::ArrowDown => {
                let count = self.hints(candidates).len();
                if count > 0 {
                    self.highlighted = Some(match self.highlighted {
                        Some(index) => (index + 1) % count,
                        None => 0,
                    });
                }
                None
            }
            KeyCode::ArrowUp => {
                let count = self.hints(candidates).len();
                if count > 0 {
                    self.highlighted = Some(match self.highlighted {
                        Some(index) => (index + count - 1) % count,
                        None => count - 1,
                    });
                }
                None
            }
            KeyCode::Enter => {
                let index = self.highlighted?;
                let chosen = self.hints(candidates).get(index).map(|f| (*f).clone())?;
                self.commit(&chosen);
                Some(chosen)
            }
            KeyCode::Escape => {
                self.show_results = false;
                self.highlighted = None;
                None
            }
            _ => None,
        }
    }

    /// A hint was chosen, by Enter or by clicking it
    pub fn commit(&mut self, feature: &LocationFeature) {
        log::debug!("search selected {}", feature.id());
        self.term = feature.name().to_string();
        self.show_results = false;
        self.highlighted = None;
    }
}

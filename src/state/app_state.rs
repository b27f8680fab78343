//! Session-scoped UI selection state.
//!
//! Every update consumes the current state and returns the next one, so the
//! owner decides when a change becomes visible and components never share a
//! mutable store.

use crate::data::category::CategoryFilter;
use fxhash::FxHashSet;
use serde::{Deserialize, Serialize};

/// Which panel the navbar has open
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CurrentView {
    #[default]
    Filter,
    About,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppState {
    pub current_view: CurrentView,
    pub sidebar_collapsed: bool,
    pub selected_category: CategoryFilter,
    /// Category ids whose subcategory list is unfolded in the sidebar
    pub expanded_categories: FxHashSet<String>,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Selects `filter`, or clears the selection to
    /// [`CategoryFilter::None`] when `filter` is already selected.
    #[must_use]
    pub fn select_category(self, filter: CategoryFilter) -> Self {
        let selected_category = if self.selected_category == filter {
            CategoryFilter::None
        } else {
            filter
        };
        log::debug!(
            "category filter {} -> {}",
            self.selected_category,
            selected_category
        );
        Self {
            selected_category,
            ..self
        }
    }

    #[must_use]
    pub fn set_current_view(self, current_view: CurrentView) -> Self {
        Self {
            current_view,
            ..self
        }
    }

    #[must_use]
    pub fn set_sidebar_collapsed(self, sidebar_collapsed: bool) -> Self {
        Self {
            sidebar_collapsed,
            ..self
        }
    }

    #[must_use]
    pub fn toggle_sidebar(self) -> Self {
        let collapsed = !self.sidebar_collapsed;
        self.set_sidebar_collapsed(collapsed)
    }

    #[must_use]
    pub fn toggle_expanded(mut self, category_id: &str) -> Self {
        if !self.expanded_categories.remove(category_id) {
            self.expanded_categories.insert(category_id.to_string());
        }
        self
    }

    pub fn is_expanded(&self, category_id: &str) -> bool {
        self.expanded_categories.contains(category_id)
    }
}

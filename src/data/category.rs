//! Category taxonomy and category-membership resolution.
//!
//! Locations carry a single category id, usually a leaf. Filters may select
//! any node of the hierarchy, and selecting a node implicitly selects its
//! whole subtree.

use crate::core::constants::ALL_CATEGORIES;
use fxhash::FxHashSet;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// A node of the category taxonomy
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: String,
    pub name: String,
    /// Display color, e.g. `#22c55e`. Subcategories may omit it.
    #[serde(default)]
    pub color: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub subcategories: Vec<Category>,
}

impl Category {
    pub fn new(id: impl Into<String>, name: impl Into<String>, color: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            color: color.into(),
            subcategories: Vec::new(),
        }
    }

    pub fn with_subcategories(mut self, subcategories: Vec<Category>) -> Self {
        self.subcategories = subcategories;
        self
    }

    pub fn is_leaf(&self) -> bool {
        self.subcategories.is_empty()
    }

    /// Pushes this node's id and every descendant id, pre-order
    fn collect_ids(&self, out: &mut FxHashSet<String>) {
        out.insert(self.id.clone());
        for child in &self.subcategories {
            child.collect_ids(out);
        }
    }

    /// This node's id followed by all descendant ids, pre-order
    pub fn subtree_ids(&self) -> FxHashSet<String> {
        let mut ids = FxHashSet::default();
        self.collect_ids(&mut ids);
        ids
    }
}

/// The category filter currently applied to the map.
///
/// Three states on purpose: `All` shows everything, `None` (a filter that
/// was toggled off) shows nothing, `Id` shows one subtree.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum CategoryFilter {
    #[default]
    All,
    None,
    Id(String),
}

impl CategoryFilter {
    /// Maps the wire representation: `"all"`, `null`, or a category id
    pub fn from_option(value: Option<&str>) -> Self {
        match value {
            Some(ALL_CATEGORIES) => Self::All,
            Some(id) => Self::Id(id.to_string()),
            None => Self::None,
        }
    }

    pub fn as_option(&self) -> Option<&str> {
        match self {
            Self::All => Some(ALL_CATEGORIES),
            Self::None => None,
            Self::Id(id) => Some(id.as_str()),
        }
    }

    pub fn id(id: impl Into<String>) -> Self {
        let id = id.into();
        if id == ALL_CATEGORIES {
            Self::All
        } else {
            Self::Id(id)
        }
    }
}

impl fmt::Display for CategoryFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => write!(f, "{}", ALL_CATEGORIES),
            Self::None => write!(f, "none"),
            Self::Id(id) => write!(f, "{}", id),
        }
    }
}

impl Serialize for CategoryFilter {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.as_option().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for CategoryFilter {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Option::<String>::deserialize(deserializer)?;
        Ok(Self::from_option(value.as_deref()))
    }
}

/// The set of category ids a filter resolves to
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CategoryMatch {
    Everything,
    Nothing,
    Ids(FxHashSet<String>),
}

impl CategoryMatch {
    pub fn contains(&self, category_id: &str) -> bool {
        match self {
            Self::Everything => true,
            Self::Nothing => false,
            Self::Ids(ids) => ids.contains(category_id),
        }
    }
}

/// Immutable category taxonomy loaded once per session
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CategoryTree {
    roots: Vec<Category>,
}

impl CategoryTree {
    pub fn new(roots: Vec<Category>) -> Self {
        Self { roots }
    }

    pub fn roots(&self) -> &[Category] {
        &self.roots
    }

    pub fn is_empty(&self) -> bool {
        self.roots.is_empty()
    }

    /// Depth-first, pre-order lookup; the first node with `id` wins
    pub fn find(&self, id: &str) -> Option<&Category> {
        find_in(&self.roots, id)
    }

    /// The chain of nodes from a root down to `id`, inclusive
    pub fn path_to(&self, id: &str) -> Vec<&Category> {
        let mut path = Vec::new();
        if path_in(&self.roots, id, &mut path) {
            path
        } else {
            Vec::new()
        }
    }

    /// Materializes the ids matched by `filter`. Unknown ids match nothing.
    pub fn resolve(&self, filter: &CategoryFilter) -> CategoryMatch {
        match filter {
            CategoryFilter::All => CategoryMatch::Everything,
            CategoryFilter::None => CategoryMatch::Nothing,
            CategoryFilter::Id(id) => match self.find(id) {
                Some(node) => CategoryMatch::Ids(node.subtree_ids()),
                None => {
                    log::debug!("category filter {} not found in tree", id);
                    CategoryMatch::Nothing
                }
            },
        }
    }

    pub fn is_in_selected_category(&self, feature_category_id: &str, selected: &CategoryFilter) -> bool {
        is_in_selected_category(&self.roots, feature_category_id, selected.as_option())
    }
}

impl From<Vec<Category>> for CategoryTree {
    fn from(roots: Vec<Category>) -> Self {
        Self::new(roots)
    }
}

fn find_in<'a>(nodes: &'a [Category], id: &str) -> Option<&'a Category> {
    for node in nodes {
        if node.id == id {
            return Some(node);
        }
        if let Some(found) = find_in(&node.subcategories, id) {
            return Some(found);
        }
    }
    None
}

fn path_in<'a>(nodes: &'a [Category], id: &str, path: &mut Vec<&'a Category>) -> bool {
    for node in nodes {
        path.push(node);
        if node.id == id || path_in(&node.subcategories, id, path) {
            return true;
        }
        path.pop();
    }
    false
}

/// Whether a location tagged `feature_category_id` passes the filter
/// `selected_category_id` (`Some("all")`, `None`, or a category id).
pub fn is_in_selected_category(
    categories: &[Category],
    feature_category_id: &str,
    selected_category_id: Option<&str>,
) -> bool {
    match selected_category_id {
        Some(ALL_CATEGORIES) => true,
        None => false,
        Some(selected) => find_in(categories, selected)
            .map(|node| node.subtree_ids().contains(feature_category_id))
            .unwrap_or(false),
    }
}

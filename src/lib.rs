//! # Lohas in Qingpu
//!
//! Categorized points of interest (parks, shops, bike stations, ...) over an
//! interactive map, with filtering by category and text search over
//! location names.
//!
//! The library holds everything that is not pixels: the category taxonomy
//! and membership resolution, the search box state machine, the selection
//! store, the map view controller that reconciles them, camera transitions,
//! and data access. The `egui` feature adds immediate-mode widgets on top.

pub mod animation;
pub mod core;
pub mod data;
pub mod input;
pub mod layers;
pub mod prelude;
pub mod search;
pub mod state;
#[cfg(feature = "egui")]
pub mod ui;
pub use crate::core::constants;

// Re-export public API
pub use core::{
    config::{AppConfig, CameraConfig, CameraProfile, DataSourceConfig},
    geo::{LatLng, Point},
    viewport::Viewport,
};

pub use data::{
    category::{is_in_selected_category, Category, CategoryFilter, CategoryTree},
    geojson::{LocationCollection, LocationFeature, LocationProperties},
    loader::{fetch_map_data, DataLoader, LoadState, MapData},
    source::{DataSource, HttpDataSource, MemoryDataSource},
};

#[cfg(feature = "tokio-runtime")]
pub use data::source::FileDataSource;

pub use input::events::{InputEvent, KeyCode};

pub use layers::{
    marker::{Marker, MarkerIcon},
    popup::ExpandedDescriptions,
};

pub use search::{search, SearchBox};

pub use state::{
    app_state::{AppState, CurrentView},
    controller::{MapViewController, ViewEffect},
};

/// Result type used throughout the library
pub type Result<T> = std::result::Result<T, MapError>;

/// Common error types
#[derive(Debug, thiserror::Error)]
pub enum MapError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("failed to fetch {resource}: HTTP {status}")]
    Status { resource: String, status: u16 },

    #[error("Invalid coordinates: {0}")]
    InvalidCoordinates(String),

    #[error("Parse error: {0}")]
    ParseError(String),
}

/// Error type alias for convenience
pub type Error = MapError;

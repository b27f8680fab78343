//! Prelude module for common lohas types
//!
//! This module re-exports the most commonly used types, traits, and functions
//! for easy importing with `use lohas::prelude::*;`

pub use crate::core::{
    config::{AppConfig, CameraConfig, CameraProfile, DataSourceConfig, ViewConfig},
    geo::{LatLng, Point},
    viewport::Viewport,
};

pub use crate::data::{
    category::{is_in_selected_category, Category, CategoryFilter, CategoryTree},
    geojson::{LocationCollection, LocationFeature, LocationProperties},
    loader::{fetch_map_data, DataLoader, LoadState, MapData},
    source::{DataSource, HttpDataSource, MemoryDataSource},
};

#[cfg(feature = "tokio-runtime")]
pub use crate::data::source::FileDataSource;

pub use crate::input::events::{InputEvent, KeyCode};

pub use crate::layers::{
    marker::{Marker, MarkerIcon},
    popup::{DescriptionView, ExpandedDescriptions, InfoRow},
};

pub use crate::animation::{EasingType, Transition, TransitionType};

pub use crate::search::{search, SearchBox};

pub use crate::state::{AppState, CurrentView, MapViewController, ViewEffect};

#[cfg(feature = "egui")]
pub use crate::ui::{MapCanvas, MapStyle};

pub use crate::{MapError, Result};

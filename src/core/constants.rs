//! Core constants for the Qingpu map and its Leaflet-style markers.

/// Initial map center `[latitude, longitude]` (Qingpu, Taoyuan).
pub const DEFAULT_CENTER: [f64; 2] = [25.011905, 121.216255];

/// Initial zoom level.
pub const DEFAULT_ZOOM: f64 = 16.0;

/// Zoom level the camera flies to when a location is picked from search.
pub const SELECTION_ZOOM: f64 = 18.0;

pub const MIN_ZOOM: f64 = 3.0;
pub const MAX_ZOOM: f64 = 19.0;

/// Default square tile size in pixels.
pub const TILE_SIZE: u32 = 256;

/// Fallback delay between issuing a camera move and opening the marker popup,
/// used only when the camera move has no completion signal (transitions off).
pub const POPUP_OPEN_DELAY_MS: u64 = 250;

/// Fly-to duration when camera transitions are enabled.
pub const FLY_DURATION_MS: u64 = 600;

/// Reserved category filter value meaning "no category restriction".
pub const ALL_CATEGORIES: &str = "all";

/// Descriptions longer than this many characters are truncated in the popup.
pub const DESCRIPTION_CHAR_LIMIT: usize = 52;

/// Marker icon default size (regular PNG).
pub const MARKER_ICON_SIZE: (u32, u32) = (25, 41);

/// Anchor inside the icon (hot-spot) in pixel coords.
pub const MARKER_ICON_ANCHOR: (u32, u32) = (12, 41);

/// Popup anchor relative to the icon anchor.
pub const MARKER_POPUP_ANCHOR: (i32, i32) = (1, -34);

/// Fill color for markers whose category carries no usable color.
pub const DEFAULT_MARKER_COLOR: &str = "#3388ff";

/// Tile attribution shown in the corner of the map.
pub const ATTRIBUTION: &str = "© OpenStreetMap contributors";

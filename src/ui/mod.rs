//! egui widgets for the map viewer.
//!
//! Each widget is a thin view over library state: the sidebar maps an
//! [`AppState`](crate::state::AppState) to the next one, the search box
//! drives a [`SearchBox`](crate::search::SearchBox), and the canvas paints
//! and feeds a [`MapViewController`](crate::state::MapViewController).

pub mod map_view;
pub mod popup;
pub mod search_box;
pub mod sidebar;
pub mod status;
pub mod style;

pub use map_view::MapCanvas;
pub use popup::{location_details, location_overlay, marker_popup};
pub use search_box::search_box_ui;
pub use sidebar::sidebar_ui;
pub use status::{error_screen, loading_screen};
pub use style::{parse_hex_color, AttributionStyle, MapStyle, MarkerStyle};

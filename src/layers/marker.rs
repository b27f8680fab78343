use crate::{
    core::{
        constants::{DEFAULT_MARKER_COLOR, MARKER_ICON_ANCHOR, MARKER_ICON_SIZE, MARKER_POPUP_ANCHOR},
        geo::{LatLng, Point},
        viewport::Viewport,
    },
    data::{category::CategoryTree, geojson::LocationFeature},
};

/// Marker pin variants, picked by category name
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum MarkerIcon {
    Green,
    Gold,
    #[default]
    Default,
}

impl MarkerIcon {
    pub fn for_category_name(name: &str) -> Self {
        match name {
            "公園" => Self::Green,
            "YouBike 站點" => Self::Gold,
            _ => Self::Default,
        }
    }

    /// Pin fill as RGB
    pub fn rgb(&self) -> [u8; 3] {
        match self {
            Self::Green => [0x2a, 0xad, 0x27],
            Self::Gold => [0xff, 0xd3, 0x26],
            Self::Default => [0x2a, 0x81, 0xcb],
        }
    }
}

/// One rendered map pin for a location
#[derive(Debug, Clone, PartialEq)]
pub struct Marker {
    pub feature_id: String,
    pub name: String,
    /// Already in map order, `[latitude, longitude]`
    pub position: LatLng,
    pub icon: MarkerIcon,
    /// Color of the owning category, used as the pin outline
    pub color: String,
    pub pulsating: bool,
    pub popup_open: bool,
}

impl Marker {
    /// Builds the marker for `feature`, styled after its category path
    pub fn for_feature(feature: &LocationFeature, categories: &CategoryTree) -> Self {
        let path = categories.path_to(feature.category());

        // Nearest named match wins, walking from the leaf up
        let icon = path
            .iter()
            .rev()
            .map(|c| MarkerIcon::for_category_name(&c.name))
            .find(|icon| *icon != MarkerIcon::Default)
            .unwrap_or_default();

        let color = path
            .iter()
            .rev()
            .map(|c| c.color.trim())
            .find(|color| !color.is_empty())
            .unwrap_or(DEFAULT_MARKER_COLOR)
            .to_string();

        Self {
            feature_id: feature.id().to_string(),
            name: feature.name().to_string(),
            position: feature.position(),
            icon,
            color,
            pulsating: false,
            popup_open: false,
        }
    }

    /// Container pixel of the pin tip
    pub fn anchor_pixel(&self, viewport: &Viewport) -> Point {
        viewport.lat_lng_to_pixel(&self.position)
    }

    /// Container pixel the popup hangs from
    pub fn popup_pixel(&self, viewport: &Viewport) -> Point {
        let (dx, dy) = MARKER_POPUP_ANCHOR;
        self.anchor_pixel(viewport)
            .add(&Point::new(f64::from(dx), f64::from(dy)))
    }

    /// Top-left corner and size of the icon rectangle
    pub fn icon_rect(&self, viewport: &Viewport) -> (Point, Point) {
        let (w, h) = MARKER_ICON_SIZE;
        let (ax, ay) = MARKER_ICON_ANCHOR;
        let tip = self.anchor_pixel(viewport);
        (
            tip.subtract(&Point::new(f64::from(ax), f64::from(ay))),
            Point::new(f64::from(w), f64::from(h)),
        )
    }

    pub fn hit_test(&self, viewport: &Viewport, pixel: &Point) -> bool {
        let (min, size) = self.icon_rect(viewport);
        pixel.x >= min.x && pixel.x <= min.x + size.x && pixel.y >= min.y && pixel.y <= min.y + size.y
    }

    pub fn is_visible(&self, viewport: &Viewport) -> bool {
        let (w, h) = MARKER_ICON_SIZE;
        viewport.contains_pixel(&self.anchor_pixel(viewport), f64::from(w.max(h)))
    }
}

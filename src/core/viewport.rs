use crate::core::constants::TILE_SIZE;
use crate::core::geo::{LatLng, Point, EARTH_RADIUS};
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

/// Manages the current view of the map: center, zoom, and screen dimensions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    /// The center of the map view in geographical coordinates
    pub center: LatLng,
    /// The current zoom level
    pub zoom: f64,
    /// The size of the viewport in pixels
    pub size: Point,
    /// The minimum allowed zoom level
    pub min_zoom: f64,
    /// The maximum allowed zoom level
    pub max_zoom: f64,
}

impl Viewport {
    /// Creates a new viewport
    pub fn new(center: LatLng, zoom: f64, size: Point) -> Self {
        Self {
            center: Self::clamp_center(center),
            zoom: zoom.clamp(0.0, 19.0),
            size,
            min_zoom: 0.0,
            max_zoom: 19.0,
        }
    }

    /// Sets the center of the viewport
    pub fn set_center(&mut self, center: LatLng) {
        self.center = Self::clamp_center(center);
    }

    /// Sets the zoom level, clamping to valid range
    pub fn set_zoom(&mut self, zoom: f64) {
        self.zoom = zoom.clamp(self.min_zoom, self.max_zoom);
    }

    pub fn set_view(&mut self, center: LatLng, zoom: f64) {
        self.set_center(center);
        self.set_zoom(zoom);
    }

    /// Sets the viewport size
    pub fn set_size(&mut self, size: Point) {
        self.size = size;
    }

    /// Sets the zoom limits
    pub fn set_zoom_limits(&mut self, min_zoom: f64, max_zoom: f64) {
        self.min_zoom = min_zoom;
        self.max_zoom = max_zoom;
        self.zoom = self.zoom.clamp(min_zoom, max_zoom);
    }

    /// Projects a LatLng to world pixel coordinates (EPSG:3857) at the given zoom level
    pub fn project(&self, lat_lng: &LatLng, zoom: Option<f64>) -> Point {
        let scale = TILE_SIZE as f64 * 2_f64.powf(zoom.unwrap_or(self.zoom));
        let mercator = lat_lng.to_mercator();
        let world = 2.0 * PI * EARTH_RADIUS;

        Point::new(
            (mercator.x + PI * EARTH_RADIUS) / world * scale,
            (-mercator.y + PI * EARTH_RADIUS) / world * scale,
        )
    }

    /// Unprojects world pixel coordinates back to LatLng at the given zoom level
    pub fn unproject(&self, pixel: &Point, zoom: Option<f64>) -> LatLng {
        let scale = TILE_SIZE as f64 * 2_f64.powf(zoom.unwrap_or(self.zoom));
        let world = 2.0 * PI * EARTH_RADIUS;

        let x = (pixel.x / scale) * world - PI * EARTH_RADIUS;
        let y = PI * EARTH_RADIUS - (pixel.y / scale) * world;

        LatLng::from_mercator(Point::new(x, y))
    }

    /// Converts a geographical coordinate to container pixel coordinates
    pub fn lat_lng_to_pixel(&self, lat_lng: &LatLng) -> Point {
        let origin = self.project(&self.center, None);
        let half = Point::new(self.size.x / 2.0, self.size.y / 2.0);
        self.project(lat_lng, None).subtract(&origin).add(&half)
    }

    /// Converts container pixel coordinates back to geographical coordinates
    pub fn pixel_to_lat_lng(&self, pixel: &Point) -> LatLng {
        let origin = self.project(&self.center, None);
        let half = Point::new(self.size.x / 2.0, self.size.y / 2.0);
        self.unproject(&pixel.subtract(&half).add(&origin), None)
    }

    /// Whether a container pixel falls inside the viewport, with `margin` slack
    pub fn contains_pixel(&self, pixel: &Point, margin: f64) -> bool {
        pixel.x >= -margin
            && pixel.y >= -margin
            && pixel.x <= self.size.x + margin
            && pixel.y <= self.size.y + margin
    }

    /// Pans the viewport by the given pixel offset (drag delta)
    pub fn pan(&mut self, delta: Point) {
        let center_pixel = self.project(&self.center, None);
        let new_center = self.unproject(&center_pixel.subtract(&delta), None);
        self.set_center(new_center);
    }

    /// Zooms to a specific level, keeping `focus_point` stationary if given
    pub fn zoom_to(&mut self, zoom: f64, focus_point: Option<Point>) {
        let new_zoom = zoom.clamp(self.min_zoom, self.max_zoom);
        if (new_zoom - self.zoom).abs() < 0.001 {
            return;
        }

        match focus_point {
            Some(focus_screen) => {
                let focus_lat_lng = self.pixel_to_lat_lng(&focus_screen);
                self.zoom = new_zoom;
                let drifted = self.lat_lng_to_pixel(&focus_lat_lng);
                self.pan(focus_screen.subtract(&drifted));
            }
            None => self.zoom = new_zoom,
        }
    }

    /// Clamps center to world bounds
    fn clamp_center(center: LatLng) -> LatLng {
        LatLng::new(
            LatLng::clamp_lat(center.lat),
            center.lng.clamp(-180.0, 180.0),
        )
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(LatLng::new(0.0, 0.0), 0.0, Point::new(800.0, 600.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_center_maps_to_middle_of_container() {
        let center = LatLng::new(25.011905, 121.216255);
        let viewport = Viewport::new(center, 16.0, Point::new(800.0, 600.0));
        let pixel = viewport.lat_lng_to_pixel(&center);
        assert!((pixel.x - 400.0).abs() < 1e-6);
        assert!((pixel.y - 300.0).abs() < 1e-6);
    }

    #[test]
    fn test_pixel_round_trip() {
        let viewport = Viewport::new(LatLng::new(25.0, 121.2), 16.0, Point::new(800.0, 600.0));
        let pixel = Point::new(120.0, 480.0);
        let back = viewport.lat_lng_to_pixel(&viewport.pixel_to_lat_lng(&pixel));
        assert!((back.x - pixel.x).abs() < 1e-6);
        assert!((back.y - pixel.y).abs() < 1e-6);
    }

    #[test]
    fn test_east_is_right_and_north_is_up() {
        let center = LatLng::new(25.0, 121.2);
        let viewport = Viewport::new(center, 16.0, Point::new(800.0, 600.0));
        let east = viewport.lat_lng_to_pixel(&LatLng::new(25.0, 121.201));
        let north = viewport.lat_lng_to_pixel(&LatLng::new(25.001, 121.2));
        assert!(east.x > 400.0);
        assert!(north.y < 300.0);
    }

    #[test]
    fn test_zoom_limits() {
        let mut viewport = Viewport::default();
        viewport.set_zoom_limits(3.0, 18.0);

        viewport.set_zoom(1.0);
        assert_eq!(viewport.zoom, 3.0);

        viewport.set_zoom(20.0);
        assert_eq!(viewport.zoom, 18.0);
    }

    #[test]
    fn test_pan_moves_center() {
        let mut viewport = Viewport::new(LatLng::new(25.0, 121.2), 16.0, Point::new(512.0, 512.0));
        let original_center = viewport.center;
        viewport.pan(Point::new(10.0, 0.0));
        // Dragging right reveals what is to the west
        assert!(viewport.center.lng < original_center.lng);
    }

    #[test]
    fn test_zoom_keeps_focus_point() {
        let mut viewport = Viewport::new(LatLng::new(25.0, 121.2), 15.0, Point::new(800.0, 600.0));
        let focus = Point::new(600.0, 200.0);
        let under_cursor = viewport.pixel_to_lat_lng(&focus);
        viewport.zoom_to(16.0, Some(focus));
        let after = viewport.lat_lng_to_pixel(&under_cursor);
        assert!((after.x - focus.x).abs() < 1e-3);
        assert!((after.y - focus.y).abs() < 1e-3);
    }
}

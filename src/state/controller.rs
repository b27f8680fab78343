//! Map view controller.
//!
//! Reconciles the category filter, search selection and direct marker
//! interaction into one "what is shown" state, and drives the camera. The
//! renderer reads markers and the viewport from here and drains
//! [`ViewEffect`]s to learn about camera moves and popups.

use crate::{
    animation::transitions::{CameraFrame, Transition, TransitionType},
    core::{config::AppConfig, config::CameraConfig, geo::LatLng, geo::Point, viewport::Viewport},
    data::{
        category::{CategoryFilter, CategoryMatch, CategoryTree},
        geojson::LocationFeature,
        loader::MapData,
    },
    input::events::{InputEvent, KeyCode},
    layers::marker::Marker,
};
use instant::Instant;
use std::time::Duration;

/// Shown instead of an unexplained empty map
pub const EMPTY_NOTICE: &str = "No matching locations. Try relaxing the category filter.";

/// Side effects for the renderer, in the order they were issued
#[derive(Debug, Clone, PartialEq)]
pub enum ViewEffect {
    CameraMove {
        feature_id: String,
        center: LatLng,
        zoom: f64,
    },
    OpenPopup {
        feature_id: String,
    },
    ClosePopup {
        feature_id: String,
    },
}

/// What a deferred popup is waiting for
#[derive(Debug, Clone, Copy, PartialEq)]
enum PopupTrigger {
    /// The camera transition finishing
    CameraSettled,
    /// A fixed delay, when the camera move has no completion signal
    After(Duration),
}

#[derive(Debug, Clone)]
struct PendingPopup {
    feature_id: String,
    issued_at: Instant,
    trigger: PopupTrigger,
}

pub struct MapViewController {
    camera_config: CameraConfig,
    viewport: Viewport,
    camera: Option<Transition>,
    categories: CategoryTree,
    locations: Vec<LocationFeature>,
    filter: CategoryFilter,
    matched: CategoryMatch,
    filtered: Vec<LocationFeature>,
    selected: Option<LocationFeature>,
    pulsating: Option<String>,
    popup_open: Option<String>,
    pending_popup: Option<PendingPopup>,
    effects: Vec<ViewEffect>,
}

impl MapViewController {
    pub fn new(config: &AppConfig, size: Point) -> Self {
        let mut viewport = Viewport::new(config.view.center(), config.view.zoom, size);
        viewport.set_zoom_limits(config.view.min_zoom, config.view.max_zoom);

        Self {
            camera_config: config.camera.clone(),
            viewport,
            camera: None,
            categories: CategoryTree::default(),
            locations: Vec::new(),
            filter: CategoryFilter::All,
            matched: CategoryMatch::Everything,
            filtered: Vec::new(),
            selected: None,
            pulsating: None,
            popup_open: None,
            pending_popup: None,
            effects: Vec::new(),
        }
    }

    /// Replaces the loaded data and recomputes the visible set
    pub fn set_data(&mut self, data: MapData) {
        self.categories = data.categories;
        self.locations = data.locations.features;
        self.refilter();
    }

    pub fn categories(&self) -> &CategoryTree {
        &self.categories
    }

    pub fn all_locations(&self) -> &[LocationFeature] {
        &self.locations
    }

    pub fn filter(&self) -> &CategoryFilter {
        &self.filter
    }

    /// Applies a new category filter.
    ///
    /// Any change dismisses the current selection, whether or not the
    /// selected location still passes the new filter. Returns `false` when
    /// `filter` is already active.
    pub fn set_category(&mut self, filter: CategoryFilter) -> bool {
        if self.filter == filter {
            return false;
        }
        log::debug!("filter changed {} -> {}", self.filter, filter);
        self.filter = filter;
        self.dismiss();
        self.refilter();
        true
    }

    fn refilter(&mut self) {
        self.matched = self.categories.resolve(&self.filter);
        let matched = &self.matched;
        self.filtered = self
            .locations
            .iter()
            .filter(|f| matched.contains(f.category()))
            .cloned()
            .collect();
        log::debug!(
            "{} of {} locations pass filter {}",
            self.filtered.len(),
            self.locations.len(),
            self.filter
        );
    }

    /// Locations passing the active filter, in data order
    pub fn filtered_locations(&self) -> &[LocationFeature] {
        &self.filtered
    }

    /// One marker per filtered location
    pub fn visible_markers(&self) -> Vec<Marker> {
        self.filtered
            .iter()
            .map(|feature| {
                let mut marker = Marker::for_feature(feature, &self.categories);
                marker.pulsating = self.pulsating.as_deref() == Some(feature.id());
                marker.popup_open = self.popup_open.as_deref() == Some(feature.id());
                marker
            })
            .collect()
    }

    pub fn empty_notice(&self) -> Option<&'static str> {
        if self.filtered.is_empty() {
            Some(EMPTY_NOTICE)
        } else {
            None
        }
    }

    pub fn selected_feature(&self) -> Option<&LocationFeature> {
        self.selected.as_ref()
    }

    pub fn pulsating_id(&self) -> Option<&str> {
        self.pulsating.as_deref()
    }

    pub fn open_popup_id(&self) -> Option<&str> {
        self.popup_open.as_deref()
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    /// A location was committed from the search box.
    ///
    /// Selects it, starts the camera move and defers the popup until the
    /// camera has settled.
    pub fn select_from_search(&mut self, feature: &LocationFeature, now: Instant) {
        log::debug!("search selection {}", feature.id());
        self.close_popup();
        self.pulsating = None;
        self.selected = Some(feature.clone());

        let target = CameraFrame {
            center: feature.position(),
            zoom: self.camera_config.selection_zoom,
        };
        self.effects.push(ViewEffect::CameraMove {
            feature_id: feature.id().to_string(),
            center: target.center,
            zoom: target.zoom,
        });

        let trigger = if self.camera_config.enable_transitions {
            let from = CameraFrame {
                center: self.viewport.center,
                zoom: self.viewport.zoom,
            };
            let mut transition = Transition::new(
                TransitionType::FlyTo,
                from,
                target,
                self.camera_config.fly_duration(),
            )
            .with_easing(self.camera_config.easing);
            transition.start(now);
            self.camera = Some(transition);
            PopupTrigger::CameraSettled
        } else {
            self.camera = None;
            self.viewport.set_view(target.center, target.zoom);
            PopupTrigger::After(self.camera_config.popup_delay())
        };

        self.pending_popup = Some(PendingPopup {
            feature_id: feature.id().to_string(),
            issued_at: now,
            trigger,
        });
    }

    /// A marker was clicked: select it and open its popup right away
    pub fn click_marker(&mut self, feature_id: &str) -> bool {
        let Some(feature) = self.filtered.iter().find(|f| f.id() == feature_id).cloned() else {
            return false;
        };
        log::debug!("marker clicked {}", feature_id);

        self.pending_popup = None;
        if self.popup_open.as_deref() != Some(feature_id) {
            self.close_popup();
            self.open_popup(feature_id);
        }
        self.pulsating = Some(feature_id.to_string());
        self.selected = Some(feature);
        true
    }

    /// Explicit close of the detail view
    pub fn close(&mut self) {
        if self.selected.is_some() {
            log::debug!("detail view closed");
        }
        self.dismiss();
    }

    fn dismiss(&mut self) {
        self.close_popup();
        self.selected = None;
        self.pulsating = None;
        self.pending_popup = None;
    }

    fn open_popup(&mut self, feature_id: &str) {
        self.popup_open = Some(feature_id.to_string());
        self.effects.push(ViewEffect::OpenPopup {
            feature_id: feature_id.to_string(),
        });
    }

    fn close_popup(&mut self) {
        if let Some(feature_id) = self.popup_open.take() {
            self.effects.push(ViewEffect::ClosePopup { feature_id });
        }
    }

    /// Id of the topmost marker under a container pixel
    pub fn marker_at(&self, pixel: &Point) -> Option<String> {
        // Later markers draw on top
        self.visible_markers()
            .into_iter()
            .rev()
            .find(|m| m.hit_test(&self.viewport, pixel))
            .map(|m| m.feature_id)
    }

    /// Applies a pointer or keyboard event on the map canvas.
    ///
    /// Returns whether anything visible changed.
    pub fn handle_input(&mut self, event: &InputEvent) -> bool {
        match event {
            InputEvent::Click { position } => match self.marker_at(position) {
                Some(id) => self.click_marker(&id),
                None => false,
            },
            InputEvent::Drag { delta } => {
                self.stop_camera();
                self.viewport.pan(*delta);
                true
            }
            InputEvent::Scroll { delta, position } => {
                if *delta == 0.0 {
                    return false;
                }
                self.stop_camera();
                let zoom = self.viewport.zoom + delta.signum();
                self.viewport.zoom_to(zoom, Some(*position));
                true
            }
            InputEvent::KeyPress { key } => {
                let step = match key {
                    KeyCode::Plus => 1.0,
                    KeyCode::Minus => -1.0,
                    _ => return false,
                };
                self.stop_camera();
                let zoom = self.viewport.zoom + step;
                self.viewport.zoom_to(zoom, None);
                true
            }
            InputEvent::Resize { size } => {
                self.viewport.set_size(*size);
                true
            }
        }
    }

    fn stop_camera(&mut self) {
        if let Some(mut transition) = self.camera.take() {
            transition.cancel();
            log::debug!("camera transition interrupted");
        }
    }

    /// Advances the camera and fires a deferred popup once it is due.
    ///
    /// Returns whether another frame is needed.
    pub fn tick(&mut self, now: Instant) -> bool {
        if let Some(transition) = self.camera.as_mut() {
            if let Some(frame) = transition.update(now) {
                self.viewport.set_view(frame.center, frame.zoom);
            }
            if transition.is_complete() {
                log::debug!("camera settled at zoom {:.1}", self.viewport.zoom);
            }
            if transition.is_finished() {
                self.camera = None;
            }
        }

        let due = match &self.pending_popup {
            Some(pending) => match pending.trigger {
                PopupTrigger::CameraSettled => self.camera.is_none(),
                PopupTrigger::After(delay) => {
                    now.saturating_duration_since(pending.issued_at) >= delay
                }
            },
            None => false,
        };

        if due {
            if let Some(pending) = self.pending_popup.take() {
                self.open_popup(&pending.feature_id);
                self.pulsating = Some(pending.feature_id);
            }
        }

        self.is_animating()
    }

    pub fn is_animating(&self) -> bool {
        self.camera.is_some() || self.pending_popup.is_some()
    }

    /// Effects issued since the last drain, oldest first.
    ///
    /// The controller has already applied each one to its own state by the
    /// time it is drained; the log tells the renderer what changed.
    pub fn drain_effects(&mut self) -> Vec<ViewEffect> {
        std::mem::take(&mut self.effects)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::CameraProfile;
    use crate::data::category::Category;
    use crate::data::geojson::{LocationCollection, LocationProperties};

    fn feature(id: &str, category: &str, lng: f64, lat: f64) -> LocationFeature {
        LocationFeature::new(
            LocationProperties {
                id: id.to_string(),
                name: format!("Place {}", id),
                category: category.to_string(),
                ..Default::default()
            },
            lng,
            lat,
        )
    }

    fn data() -> MapData {
        MapData {
            categories: CategoryTree::new(vec![
                Category::new("park", "公園", "#0f0"),
                Category::new("bike", "YouBike 站點", "#ff0"),
            ]),
            locations: LocationCollection::new(vec![
                feature("p1", "park", 121.2160, 25.0120),
                feature("b1", "bike", 121.2170, 25.0110),
            ]),
        }
    }

    fn controller(profile: CameraProfile) -> MapViewController {
        let config = AppConfig::default().with_camera_profile(profile);
        let mut controller = MapViewController::new(&config, Point::new(800.0, 600.0));
        controller.set_data(data());
        controller
    }

    #[test]
    fn test_filter_drives_visible_set() {
        let mut c = controller(CameraProfile::Smooth);
        assert_eq!(c.visible_markers().len(), 2);
        assert!(c.empty_notice().is_none());

        c.set_category(CategoryFilter::id("park"));
        let ids: Vec<String> = c.visible_markers().into_iter().map(|m| m.feature_id).collect();
        assert_eq!(ids, vec!["p1".to_string()]);

        c.set_category(CategoryFilter::None);
        assert!(c.visible_markers().is_empty());
        assert_eq!(c.empty_notice(), Some(EMPTY_NOTICE));
    }

    #[test]
    fn test_filter_change_clears_selection() {
        let mut c = controller(CameraProfile::Smooth);
        assert!(c.click_marker("p1"));
        assert_eq!(c.pulsating_id(), Some("p1"));

        // p1 still passes the new filter and is dismissed anyway
        assert!(c.set_category(CategoryFilter::id("park")));
        assert!(c.selected_feature().is_none());
        assert!(c.pulsating_id().is_none());
        assert!(c.open_popup_id().is_none());
    }

    #[test]
    fn test_same_filter_is_not_a_change() {
        let mut c = controller(CameraProfile::Smooth);
        c.click_marker("p1");
        assert!(!c.set_category(CategoryFilter::All));
        assert_eq!(c.pulsating_id(), Some("p1"));
    }

    #[test]
    fn test_popup_waits_for_camera() {
        let mut c = controller(CameraProfile::Smooth);
        let target = c.all_locations()[1].clone();
        let t0 = Instant::now();

        c.select_from_search(&target, t0);
        assert_eq!(c.selected_feature().map(|f| f.id()), Some("b1"));
        assert!(c.pulsating_id().is_none());

        c.tick(t0 + Duration::from_millis(300));
        assert!(c.open_popup_id().is_none());

        let still_animating = c.tick(t0 + Duration::from_millis(600));
        assert!(!still_animating);
        assert_eq!(c.open_popup_id(), Some("b1"));
        assert_eq!(c.pulsating_id(), Some("b1"));
        assert_eq!(c.viewport().center, target.position());

        let effects = c.drain_effects();
        assert!(matches!(effects[0], ViewEffect::CameraMove { .. }));
        assert_eq!(
            effects[1],
            ViewEffect::OpenPopup {
                feature_id: "b1".to_string()
            }
        );
    }

    #[test]
    fn test_drained_effects_are_already_applied() {
        let mut c = controller(CameraProfile::Instant);
        let target = c.all_locations()[0].clone();
        let t0 = Instant::now();

        c.select_from_search(&target, t0);
        c.tick(t0 + Duration::from_millis(250));
        let effects = c.drain_effects();

        for effect in &effects {
            match effect {
                ViewEffect::CameraMove { center, .. } => {
                    assert_eq!(c.viewport().center, *center)
                }
                ViewEffect::OpenPopup { feature_id } => {
                    assert_eq!(c.open_popup_id(), Some(feature_id.as_str()))
                }
                ViewEffect::ClosePopup { .. } => unreachable!(),
            }
        }
        assert_eq!(effects.len(), 2);
        assert!(c.drain_effects().is_empty());
    }

    #[test]
    fn test_popup_falls_back_to_fixed_delay() {
        let mut c = controller(CameraProfile::Instant);
        let target = c.all_locations()[0].clone();
        let t0 = Instant::now();

        c.select_from_search(&target, t0);
        assert_eq!(c.viewport().center, target.position());

        c.tick(t0 + Duration::from_millis(100));
        assert!(c.open_popup_id().is_none());
        c.tick(t0 + Duration::from_millis(250));
        assert_eq!(c.open_popup_id(), Some("p1"));
    }

    #[test]
    fn test_open_popup_never_precedes_camera_move() {
        for profile in [CameraProfile::Smooth, CameraProfile::Instant] {
            let mut c = controller(profile);
            let t0 = Instant::now();
            c.click_marker("p1");
            let target = c.all_locations()[1].clone();
            c.select_from_search(&target, t0);
            for ms in [0, 100, 250, 600, 1000] {
                c.tick(t0 + Duration::from_millis(ms));
            }

            let effects = c.drain_effects();
            let move_at = effects
                .iter()
                .position(|e| matches!(e, ViewEffect::CameraMove { feature_id, .. } if feature_id == "b1"))
                .unwrap();
            let open_at = effects
                .iter()
                .position(|e| matches!(e, ViewEffect::OpenPopup { feature_id } if feature_id == "b1"))
                .unwrap();
            assert!(move_at < open_at);
            assert!(effects.contains(&ViewEffect::ClosePopup {
                feature_id: "p1".to_string()
            }));
        }
    }

    #[test]
    fn test_marker_click_opens_popup_without_camera_move() {
        let mut c = controller(CameraProfile::Smooth);
        let center = c.viewport().center;
        assert!(c.click_marker("b1"));
        assert_eq!(c.viewport().center, center);
        assert_eq!(
            c.drain_effects(),
            vec![ViewEffect::OpenPopup {
                feature_id: "b1".to_string()
            }]
        );
        assert!(!c.click_marker("unknown"));
    }

    #[test]
    fn test_close_clears_everything() {
        let mut c = controller(CameraProfile::Smooth);
        c.click_marker("p1");
        c.close();
        assert!(c.selected_feature().is_none());
        assert!(c.pulsating_id().is_none());
        assert_eq!(
            c.drain_effects().last(),
            Some(&ViewEffect::ClosePopup {
                feature_id: "p1".to_string()
            })
        );
    }

    #[test]
    fn test_filter_change_cancels_pending_popup() {
        let mut c = controller(CameraProfile::Instant);
        let target = c.all_locations()[0].clone();
        let t0 = Instant::now();
        c.select_from_search(&target, t0);
        c.set_category(CategoryFilter::id("bike"));
        c.tick(t0 + Duration::from_secs(1));
        assert!(c.open_popup_id().is_none());
        assert!(!c.is_animating());
    }

    #[test]
    fn test_click_hits_marker_under_pointer() {
        let mut c = controller(CameraProfile::Smooth);
        let markers = c.visible_markers();
        let tip = markers[0].anchor_pixel(c.viewport());
        let clicked = c.handle_input(&InputEvent::Click {
            position: Point::new(tip.x, tip.y - 10.0),
        });
        assert!(clicked);
        assert_eq!(c.selected_feature().map(|f| f.id()), Some("p1"));

        let missed = c.handle_input(&InputEvent::Click {
            position: Point::new(-100.0, -100.0),
        });
        assert!(!missed);
    }

    #[test]
    fn test_drag_interrupts_camera_and_popup_still_opens() {
        let mut c = controller(CameraProfile::Smooth);
        let target = c.all_locations()[1].clone();
        let t0 = Instant::now();
        c.select_from_search(&target, t0);
        c.tick(t0 + Duration::from_millis(100));

        c.handle_input(&InputEvent::Drag {
            delta: Point::new(10.0, 0.0),
        });
        c.tick(t0 + Duration::from_millis(120));
        assert_eq!(c.open_popup_id(), Some("b1"));
    }
}

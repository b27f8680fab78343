use lohas::{
    data::source::Resource, fetch_map_data, AppConfig, AppState, CameraProfile, Category,
    CategoryFilter, KeyCode, LoadState, LocationCollection, LocationFeature, LocationProperties,
    MapViewController, MemoryDataSource, Point, SearchBox, ViewEffect,
};
use std::time::{Duration, Instant};

/// Integration tests for whole user flows: load, filter, search, select
#[cfg(test)]
mod integration_tests {
    use super::*;

    fn park_feature() -> LocationFeature {
        LocationFeature::new(
            LocationProperties {
                id: "p1".to_string(),
                name: "青埔公園".to_string(),
                category: "park".to_string(),
                ..Default::default()
            },
            121.5,
            25.0,
        )
    }

    fn park_source() -> MemoryDataSource {
        MemoryDataSource::new(
            vec![Category::new("park", "公園", "#0f0")],
            LocationCollection::new(vec![park_feature()]),
        )
    }

    fn controller(profile: CameraProfile) -> MapViewController {
        let config = AppConfig::default().with_camera_profile(profile);
        MapViewController::new(&config, Point::new(800.0, 600.0))
    }

    /// Load, then walk the filter through all, park and an unknown id
    #[tokio::test]
    async fn test_end_to_end_filtering() {
        let data = fetch_map_data(&park_source()).await.unwrap();
        let mut map = controller(CameraProfile::Smooth);
        let mut state = AppState::new();
        map.set_data(data);

        assert_eq!(state.selected_category, CategoryFilter::All);
        assert_eq!(map.visible_markers().len(), 1);

        state = state.select_category(CategoryFilter::id("park"));
        map.set_category(state.selected_category.clone());
        assert_eq!(map.visible_markers().len(), 1);
        assert!(map.empty_notice().is_none());

        state = state.select_category(CategoryFilter::id("other"));
        map.set_category(state.selected_category.clone());
        assert_eq!(map.visible_markers().len(), 0);
        assert!(map.empty_notice().is_some());
    }

    #[tokio::test]
    async fn test_markers_are_transposed() {
        let data = fetch_map_data(&park_source()).await.unwrap();
        let mut map = controller(CameraProfile::Smooth);
        map.set_data(data);

        let marker = &map.visible_markers()[0];
        assert_eq!(marker.position.to_array(), [25.0, 121.5]);
    }

    #[tokio::test]
    async fn test_fetch_failure_is_terminal() {
        for resource in [Resource::Categories, Resource::Locations] {
            let source = park_source().with_failure(resource, 500);
            let state = LoadState::from_result(fetch_map_data(&source).await);
            assert!(state.error().is_some());
            assert!(state.data().is_none());
        }
    }

    /// Search, commit with Enter twice; only the first commit reaches the map
    #[tokio::test]
    async fn test_search_commit_is_idempotent() {
        let data = fetch_map_data(&park_source()).await.unwrap();
        let mut map = controller(CameraProfile::Smooth);
        map.set_data(data);
        let mut search = SearchBox::new();
        let t0 = Instant::now();

        search.set_term("公園");
        for _ in 0..2 {
            search.handle_key(KeyCode::ArrowDown, map.filtered_locations());
        }
        assert_eq!(search.highlighted(), Some(0));

        let mut commits = 0;
        for _ in 0..2 {
            if let Some(feature) = search.handle_key(KeyCode::Enter, map.filtered_locations()) {
                map.select_from_search(&feature, t0);
                commits += 1;
            }
        }
        assert_eq!(commits, 1);
        assert_eq!(search.term(), "青埔公園");

        map.tick(t0 + Duration::from_secs(1));
        assert_eq!(map.selected_feature().map(|f| f.id()), Some("p1"));
        assert_eq!(map.pulsating_id(), Some("p1"));

        let effects = map.drain_effects();
        let moves = effects
            .iter()
            .filter(|e| matches!(e, ViewEffect::CameraMove { .. }))
            .count();
        let opens = effects
            .iter()
            .filter(|e| matches!(e, ViewEffect::OpenPopup { .. }))
            .count();
        assert_eq!((moves, opens), (1, 1));
    }

    #[tokio::test]
    async fn test_filter_change_dismisses_search_selection() {
        let data = fetch_map_data(&park_source()).await.unwrap();
        let mut map = controller(CameraProfile::Instant);
        map.set_data(data);
        let t0 = Instant::now();

        map.select_from_search(&park_feature(), t0);
        map.tick(t0 + Duration::from_millis(250));
        assert_eq!(map.pulsating_id(), Some("p1"));

        let state = AppState::new().select_category(CategoryFilter::All);
        assert_eq!(state.selected_category, CategoryFilter::None);
        map.set_category(state.selected_category);

        assert!(map.selected_feature().is_none());
        assert!(map.pulsating_id().is_none());
        assert!(map.visible_markers().is_empty());
    }

    #[cfg(feature = "tokio-runtime")]
    #[tokio::test]
    async fn test_bundled_data_loads() {
        let source = lohas::FileDataSource::new(concat!(env!("CARGO_MANIFEST_DIR"), "/data"));
        let data = fetch_map_data(&source).await.unwrap();
        let mut map = controller(CameraProfile::Smooth);
        map.set_data(data);

        map.set_category(CategoryFilter::id("park"));
        let parks = map.filtered_locations().len();
        assert!(parks >= 2, "parent category should include its subcategories");
        assert!(map
            .visible_markers()
            .iter()
            .all(|m| m.icon == lohas::MarkerIcon::Green));
    }

    /// Renders one headless frame with every widget on screen
    #[cfg(feature = "egui")]
    #[tokio::test]
    async fn test_widgets_render_headless() {
        use lohas::ui::{search_box_ui, sidebar_ui, MapCanvas, MapStyle};
        use lohas::ExpandedDescriptions;

        let data = fetch_map_data(&park_source()).await.unwrap();
        let mut map = controller(CameraProfile::Smooth);
        map.set_data(data);
        map.click_marker("p1");

        let mut state = AppState::new();
        let mut search = SearchBox::new();
        let mut expanded = ExpandedDescriptions::default();
        let style = MapStyle::default();

        let ctx = egui::Context::default();
        let input = egui::RawInput {
            screen_rect: Some(egui::Rect::from_min_size(
                egui::Pos2::ZERO,
                egui::vec2(1024.0, 768.0),
            )),
            ..Default::default()
        };
        let _ = ctx.run(input, |ctx| {
            egui::SidePanel::left("sidebar").show(ctx, |ui| {
                search_box_ui(ui, &mut search, map.filtered_locations());
                state = sidebar_ui(ui, state.clone(), map.categories());
            });
            egui::CentralPanel::default().show(ctx, |ui| {
                let response = ui.add(MapCanvas::new(&mut map, &mut expanded, &style));
                assert!(response.rect.width() > 0.0);
            });
        });

        assert_eq!(map.open_popup_id(), Some("p1"));
    }
}

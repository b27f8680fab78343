use crate::{
    core::{constants::ATTRIBUTION, geo::Point},
    input::events::{InputEvent, KeyCode},
    layers::{marker::Marker, popup::ExpandedDescriptions},
    state::controller::MapViewController,
    ui::{
        popup::marker_popup,
        style::{parse_hex_color, MapStyle},
    },
};
use egui::{Align2, Color32, Key, Painter, Pos2, Rect, Response, Sense, Shape, Stroke, Ui, Widget};
use instant::Instant;

/// Grid spacing in screen points
const GRID_STEP: f32 = 64.0;

/// Interactive map canvas: markers, pan/zoom, marker popups.
///
/// All state lives in the [`MapViewController`]; the widget only translates
/// egui input into [`InputEvent`]s and paints what the controller says.
pub struct MapCanvas<'a> {
    controller: &'a mut MapViewController,
    expanded: &'a mut ExpandedDescriptions,
    style: &'a MapStyle,
}

impl<'a> MapCanvas<'a> {
    pub fn new(
        controller: &'a mut MapViewController,
        expanded: &'a mut ExpandedDescriptions,
        style: &'a MapStyle,
    ) -> Self {
        Self {
            controller,
            expanded,
            style,
        }
    }

    fn handle_input(&mut self, ui: &Ui, rect: Rect, response: &Response) {
        let to_local = |p: Pos2| Point::new((p.x - rect.min.x) as f64, (p.y - rect.min.y) as f64);

        let size = Point::new(rect.width() as f64, rect.height() as f64);
        if self.controller.viewport().size != size {
            self.controller.handle_input(&InputEvent::Resize { size });
        }

        if response.dragged() {
            let delta = response.drag_delta();
            if delta.length_sq() > 0.0 {
                self.controller.handle_input(&InputEvent::Drag {
                    delta: Point::new(delta.x as f64, delta.y as f64),
                });
            }
        }

        if response.hovered() {
            let scroll = ui.input(|i| i.raw_scroll_delta.y);
            if scroll.abs() > 0.1 {
                if let Some(pointer) = response.hover_pos() {
                    self.controller.handle_input(&InputEvent::Scroll {
                        delta: scroll.signum() as f64,
                        position: to_local(pointer),
                    });
                }
            }

            for (key, code) in [(Key::Plus, KeyCode::Plus), (Key::Minus, KeyCode::Minus)] {
                if ui.input(|i| i.key_pressed(key)) {
                    self.controller.handle_input(&InputEvent::KeyPress { key: code });
                }
            }
        }

        if response.clicked() {
            if let Some(pointer) = response.interact_pointer_pos() {
                self.controller.handle_input(&InputEvent::Click {
                    position: to_local(pointer),
                });
            }
        }
    }

    fn paint_background(&self, painter: &Painter, rect: Rect) {
        painter.rect_filled(rect, 0.0, self.style.background_color);

        let mut x = rect.min.x + GRID_STEP;
        while x < rect.max.x {
            painter.vline(x, rect.y_range(), self.style.grid_stroke);
            x += GRID_STEP;
        }
        let mut y = rect.min.y + GRID_STEP;
        while y < rect.max.y {
            painter.hline(rect.x_range(), y, self.style.grid_stroke);
            y += GRID_STEP;
        }
    }

    fn paint_marker(&self, painter: &Painter, rect: Rect, marker: &Marker, time: f64) {
        let viewport = self.controller.viewport();
        if !marker.is_visible(viewport) {
            return;
        }

        let tip = marker.anchor_pixel(viewport);
        let tip = Pos2::new(rect.min.x + tip.x as f32, rect.min.y + tip.y as f32);
        let head = tip - egui::vec2(0.0, 28.0);
        let radius = 11.0;

        let style = &self.style.markers;
        if marker.pulsating {
            let phase = (time as f32 / style.pulse_period).fract();
            let alpha = ((1.0 - phase) * 200.0) as u8;
            let [r, g, b, _] = style.pulse_color.to_array();
            painter.circle_stroke(
                tip,
                6.0 + phase * style.pulse_radius,
                Stroke::new(3.0, Color32::from_rgba_unmultiplied(r, g, b, alpha)),
            );
        }

        let fill = style.fill(marker.icon);
        let outline = Stroke::new(
            style.border_width,
            parse_hex_color(&marker.color).unwrap_or(Color32::from_gray(40)),
        );

        painter.add(Shape::convex_polygon(
            vec![
                head + egui::vec2(-radius * 0.8, 6.0),
                tip,
                head + egui::vec2(radius * 0.8, 6.0),
            ],
            fill,
            Stroke::NONE,
        ));
        painter.circle(head, radius, fill, outline);
        painter.circle_filled(head, radius * 0.4, Color32::WHITE);
    }

    fn paint_overlays(&self, painter: &Painter, rect: Rect) {
        if let Some(notice) = self.controller.empty_notice() {
            let galley = painter.layout_no_wrap(
                notice.to_string(),
                egui::FontId::proportional(14.0),
                Color32::from_gray(50),
            );
            let pos = rect.center_top() + egui::vec2(0.0, 16.0);
            let bg = Rect::from_center_size(
                pos + egui::vec2(0.0, galley.size().y / 2.0),
                galley.size() + egui::vec2(20.0, 12.0),
            );
            painter.rect_filled(bg, 6.0, self.style.notice_background);
            painter.text(
                bg.center(),
                Align2::CENTER_CENTER,
                notice,
                egui::FontId::proportional(14.0),
                Color32::from_gray(50),
            );
        }

        let attribution = &self.style.attribution;
        let galley = painter.layout_no_wrap(
            ATTRIBUTION.to_string(),
            attribution.font_id.clone(),
            attribution.text_color,
        );
        let padding = egui::vec2(attribution.padding, attribution.padding);
        let bg = Rect::from_min_size(
            rect.right_bottom() - galley.size() - padding * 2.0,
            galley.size() + padding * 2.0,
        );
        painter.rect_filled(bg, 0.0, attribution.background_color);
        painter.text(
            bg.min + padding,
            Align2::LEFT_TOP,
            ATTRIBUTION,
            attribution.font_id.clone(),
            attribution.text_color,
        );
    }
}

impl Widget for MapCanvas<'_> {
    fn ui(mut self, ui: &mut Ui) -> Response {
        let desired_size = ui.available_size();
        let (rect, response) = ui.allocate_exact_size(desired_size, Sense::click_and_drag());

        self.handle_input(ui, rect, &response);
        let animating = self.controller.tick(Instant::now());

        let painter = ui.painter_at(rect);
        let time = ui.input(|i| i.time);
        self.paint_background(&painter, rect);

        let markers = self.controller.visible_markers();
        for marker in &markers {
            self.paint_marker(&painter, rect, marker, time);
        }
        self.paint_overlays(&painter, rect);

        let popup = markers.iter().find(|m| m.popup_open).and_then(|marker| {
            let feature = self
                .controller
                .filtered_locations()
                .iter()
                .find(|f| f.id() == marker.feature_id)?
                .clone();
            let anchor = marker.popup_pixel(self.controller.viewport());
            Some((feature, anchor))
        });

        if let Some((feature, anchor)) = popup {
            let screen = Point::new(
                rect.min.x as f64 + anchor.x,
                rect.min.y as f64 + anchor.y,
            );
            if marker_popup(ui.ctx(), screen, &feature, self.expanded, self.style) {
                self.controller.close();
            }
        }

        if animating || self.controller.pulsating_id().is_some() {
            ui.ctx().request_repaint();
        }

        if response.hovered() {
            ui.ctx().set_cursor_icon(if response.dragged() {
                egui::CursorIcon::Grabbing
            } else {
                egui::CursorIcon::Grab
            });
        }

        response
    }
}

use crate::{
    core::geo::Point,
    data::geojson::LocationFeature,
    layers::popup::{ExpandedDescriptions, InfoRow},
    ui::style::MapStyle,
};
use egui::{Align2, Context, Id, Pos2, RichText, Ui};

/// Description and contact rows, shared by the marker popup and the overlay
pub fn location_details(
    ui: &mut Ui,
    feature: &LocationFeature,
    expanded: &mut ExpandedDescriptions,
    style: &MapStyle,
) {
    let mut toggled = false;
    if let Some(view) = expanded.view(feature) {
        ui.horizontal_wrapped(|ui| {
            ui.label(view.text());
            if let Some(label) = view.toggle_label() {
                if ui
                    .link(RichText::new(label).color(style.accent_color))
                    .clicked()
                {
                    toggled = true;
                }
            }
        });
        ui.add_space(6.0);
    }
    if toggled {
        expanded.toggle(feature.id());
    }

    for row in InfoRow::for_feature(feature) {
        ui.horizontal(|ui| {
            ui.label(row.icon());
            match row.url() {
                Some(url) => {
                    ui.hyperlink_to(RichText::new(row.label()).color(style.accent_color), url);
                }
                None => {
                    ui.label(row.label());
                }
            }
        });
    }
}

/// Popup hanging above a marker. Returns `true` when the close button was hit.
pub fn marker_popup(
    ctx: &Context,
    anchor: Point,
    feature: &LocationFeature,
    expanded: &mut ExpandedDescriptions,
    style: &MapStyle,
) -> bool {
    let mut closed = false;
    egui::Area::new(Id::new("marker_popup").with(feature.id()))
        .fixed_pos(Pos2::new(anchor.x as f32, anchor.y as f32))
        .pivot(Align2::CENTER_BOTTOM)
        .order(egui::Order::Foreground)
        .show(ctx, |ui| {
            egui::Frame::popup(ui.style()).show(ui, |ui| {
                ui.set_max_width(280.0);
                ui.horizontal(|ui| {
                    ui.strong(feature.name());
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        if ui.small_button("✕").clicked() {
                            closed = true;
                        }
                    });
                });
                ui.separator();
                location_details(ui, feature, expanded, style);
            });
        });
    closed
}

/// Detail panel sliding up from the bottom. Returns `true` when closed.
pub fn location_overlay(
    ctx: &Context,
    feature: &LocationFeature,
    expanded: &mut ExpandedDescriptions,
    style: &MapStyle,
) -> bool {
    let mut closed = false;
    egui::TopBottomPanel::bottom("location_overlay")
        .resizable(false)
        .show(ctx, |ui| {
            ui.add_space(4.0);
            ui.horizontal(|ui| {
                ui.heading(feature.name());
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if ui.button("✕").on_hover_text("Close").clicked() {
                        closed = true;
                    }
                });
            });
            ui.separator();
            location_details(ui, feature, expanded, style);
            ui.add_space(4.0);
        });
    closed
}

use crate::ui::style::MapStyle;
use egui::{RichText, Ui};

/// Full-screen spinner while map data is loading
pub fn loading_screen(ui: &mut Ui) {
    ui.centered_and_justified(|ui| {
        ui.add(egui::Spinner::new().size(48.0));
    });
    ui.ctx().request_repaint();
}

/// Full-screen terminal error. The session has to be restarted to retry.
pub fn error_screen(ui: &mut Ui, message: &str, style: &MapStyle) {
    let rect = ui.max_rect();
    ui.painter().rect_filled(rect, 0.0, style.error_background);
    ui.centered_and_justified(|ui| {
        ui.label(RichText::new(message).color(style.error_text).size(16.0));
    });
}

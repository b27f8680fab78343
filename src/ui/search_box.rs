use crate::{
    data::geojson::LocationFeature,
    input::events::KeyCode,
    search::SearchBox,
};
use egui::{Key, Ui};

/// Keys the hint list reacts to, in egui terms
const NAV_KEYS: [(Key, KeyCode); 4] = [
    (Key::ArrowUp, KeyCode::ArrowUp),
    (Key::ArrowDown, KeyCode::ArrowDown),
    (Key::Enter, KeyCode::Enter),
    (Key::Escape, KeyCode::Escape),
];

/// Search input with its hint list.
///
/// `candidates` is the category-filtered location list. Returns the feature
/// the user committed this frame, by keyboard or by clicking a hint.
pub fn search_box_ui(
    ui: &mut Ui,
    search: &mut SearchBox,
    candidates: &[LocationFeature],
) -> Option<LocationFeature> {
    let mut text = search.term().to_string();
    let output = egui::TextEdit::singleline(&mut text)
        .hint_text("Search locations")
        .desired_width(f32::INFINITY)
        .show(ui);
    let response = &output.response;

    if response.changed() {
        search.set_term(text.clone());
    }

    if response.gained_focus() && search.focus() {
        let mut state = output.state.clone();
        let len = text.chars().count();
        state.set_ccursor_range(Some(egui::text::CCursorRange::two(
            egui::text::CCursor::new(0),
            egui::text::CCursor::new(len),
        )));
        state.store(ui.ctx(), response.id);
    }

    let mut chosen = None;

    // Enter surrenders focus in a single-line edit, so accept it on that frame too
    if response.has_focus() || response.lost_focus() {
        for (key, code) in NAV_KEYS {
            if ui.input_mut(|i| i.consume_key(egui::Modifiers::NONE, key)) {
                if let Some(feature) = search.handle_key(code, candidates) {
                    chosen = Some(feature);
                }
            }
        }
    }

    let hints = search.hints(candidates);
    if !hints.is_empty() {
        let mut clicked = None;
        egui::Frame::popup(ui.style()).show(ui, |ui| {
            egui::ScrollArea::vertical()
                .max_height(240.0)
                .show(ui, |ui| {
                    for (index, hint) in hints.iter().enumerate() {
                        let highlighted = search.highlighted() == Some(index);
                        if ui.selectable_label(highlighted, hint.name()).clicked() {
                            clicked = Some((*hint).clone());
                        }
                    }
                });
        });
        if let Some(feature) = clicked {
            search.commit(&feature);
            chosen = Some(feature);
        }
    }

    chosen
}

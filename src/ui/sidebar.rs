use crate::{
    data::category::{Category, CategoryFilter, CategoryTree},
    state::app_state::{AppState, CurrentView},
    ui::style::parse_hex_color,
};
use egui::{Color32, RichText, Ui};

const ABOUT_TEXT: &str = "Lohas in Qingpu collects parks, shops, bike stations and other \
everyday places around Qingpu on one map. Pick a category to narrow the map down, or \
search for a place by name.";

/// Navbar tabs plus the active panel. Returns the state to use next frame.
pub fn sidebar_ui(ui: &mut Ui, state: AppState, categories: &CategoryTree) -> AppState {
    let mut next = state;

    ui.horizontal(|ui| {
        for (view, label) in [(CurrentView::Filter, "Filter"), (CurrentView::About, "About")] {
            if ui
                .selectable_label(next.current_view == view, label)
                .clicked()
            {
                next = next.clone().set_current_view(view);
            }
        }
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            let arrow = if next.sidebar_collapsed { "▶" } else { "◀" };
            if ui.small_button(arrow).on_hover_text("Toggle sidebar").clicked() {
                next = next.clone().toggle_sidebar();
            }
        });
    });
    ui.separator();

    if next.sidebar_collapsed {
        return next;
    }

    match next.current_view {
        CurrentView::Filter => filter_panel(ui, next, categories),
        CurrentView::About => {
            ui.label(ABOUT_TEXT);
            next
        }
    }
}

fn filter_panel(ui: &mut Ui, state: AppState, categories: &CategoryTree) -> AppState {
    let mut next = state;

    let all_selected = next.selected_category == CategoryFilter::All;
    if ui.checkbox(&mut all_selected.clone(), "All").clicked() {
        next = next.select_category(CategoryFilter::All);
    }

    egui::ScrollArea::vertical().show(ui, |ui| {
        for category in categories.roots() {
            next = category_row(ui, next.clone(), category, 0);
        }
    });

    next
}

fn category_row(ui: &mut Ui, state: AppState, category: &Category, depth: usize) -> AppState {
    let mut next = state;
    let filter = CategoryFilter::id(category.id.clone());
    let checked = next.selected_category == filter;

    ui.horizontal(|ui| {
        ui.add_space(depth as f32 * 16.0);

        if !category.is_leaf() {
            let arrow = if next.is_expanded(&category.id) { "▼" } else { "▶" };
            if ui.small_button(arrow).clicked() {
                next = next.clone().toggle_expanded(&category.id);
            }
        }

        let swatch = parse_hex_color(&category.color).unwrap_or(Color32::GRAY);
        let (rect, _) = ui.allocate_exact_size(egui::vec2(10.0, 10.0), egui::Sense::hover());
        ui.painter().rect_filled(rect, 2.0, swatch);

        let text = if checked {
            RichText::new(&category.name).strong()
        } else {
            RichText::new(&category.name)
        };
        if ui.checkbox(&mut checked.clone(), text).clicked() {
            next = next.clone().select_category(filter.clone());
        }
    });

    if next.is_expanded(&category.id) {
        for child in &category.subcategories {
            next = category_row(ui, next.clone(), child, depth + 1);
        }
    }

    next
}

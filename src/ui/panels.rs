use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};
use egui_extras::DatePickerButton;

use crate::data::model::display_phase;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Left side panel – filter widgets
// ---------------------------------------------------------------------------

/// Render the left filter panel: date range, crop-cycle phases, fiscal years.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Filters");
    ui.separator();

    let dataset = match state.dataset.clone() {
        Some(ds) => ds,
        None => {
            ui.label("No dataset loaded.");
            return;
        }
    };

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            // ---- Date range ----
            ui.strong("Period");
            let mut start = state.criteria.start;
            let mut end = state.criteria.end;
            let mut changed = false;

            ui.horizontal(|ui: &mut Ui| {
                ui.label("from");
                changed |= ui
                    .add(DatePickerButton::new(&mut start).id_salt("start_date"))
                    .changed();
            });
            ui.horizontal(|ui: &mut Ui| {
                ui.label("to");
                changed |= ui
                    .add(DatePickerButton::new(&mut end).id_salt("end_date"))
                    .changed();
            });
            if changed {
                state.set_date_range(start, end);
            }
            if ui.small_button("Full range").clicked() {
                state.set_date_range(dataset.min_date, dataset.max_date);
            }
            ui.separator();

            // ---- Crop-cycle phases ----
            let n_phases = state.criteria.phases.len();
            ui.strong(format!("Cycle phases ({n_phases}/{})", dataset.phases.len()));
            ui.horizontal(|ui: &mut Ui| {
                if ui.small_button("All").clicked() {
                    state.select_all_phases();
                }
                if ui.small_button("None").clicked() {
                    state.select_no_phases();
                }
            });
            for phase in &dataset.phases {
                let mut checked = state.criteria.phases.contains(phase);
                let mut text = RichText::new(display_phase(phase));
                if let Some(palette) = &state.phase_colors {
                    text = text.color(palette.color_for(phase));
                }
                if ui.checkbox(&mut checked, text).changed() {
                    state.toggle_phase(phase);
                }
            }
            ui.separator();

            // ---- Fiscal years ----
            let n_years = state.criteria.years.len();
            ui.strong(format!("Fiscal years ({n_years}/{})", dataset.years.len()));
            ui.horizontal(|ui: &mut Ui| {
                if ui.small_button("All").clicked() {
                    state.select_all_years();
                }
                if ui.small_button("None").clicked() {
                    state.select_no_years();
                }
            });
            for &year in &dataset.years {
                let mut checked = state.criteria.years.contains(&year);
                if ui.checkbox(&mut checked, year.to_string()).changed() {
                    state.toggle_year(year);
                }
            }
        });
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open…").clicked() {
                open_file_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();

        if let Some(ds) = &state.dataset {
            ui.label(format!(
                "{} records loaded, {} in view • {} – {}",
                ds.len(),
                state.visible.len(),
                state.criteria.start.format("%d/%m/%Y"),
                state.criteria.end.format("%d/%m/%Y"),
            ));
        }

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// File dialog
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open market data")
        .add_filter("CSV", &["csv"])
        .pick_file();

    if let Some(path) = file {
        state.load_path(&path);
    }
}

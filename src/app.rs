use std::path::Path;

use eframe::egui::{self, RichText};

use crate::data::kpi;
use crate::data::loader::DEFAULT_DATA_FILE;
use crate::state::{AppState, Tab};
use crate::ui::{kpi as kpi_ui, market, panels, seasonal, table};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct SoyDeskApp {
    pub state: AppState,
}

impl Default for SoyDeskApp {
    fn default() -> Self {
        let mut state = AppState::default();
        let default_path = Path::new(DEFAULT_DATA_FILE);
        if default_path.exists() {
            state.load_path(default_path);
        } else {
            state.status_message =
                Some(format!("'{DEFAULT_DATA_FILE}' not found — use File → Open"));
        }
        Self { state }
    }
}

impl eframe::App for SoyDeskApp {
    /// One full recomputation per interaction: filters feed the cached view,
    /// KPIs and aggregates are derived fresh every frame.
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Left side panel: filters ----
        egui::SidePanel::left("filter_panel")
            .default_width(220.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // ---- Central panel: KPIs + tabs ----
        egui::CentralPanel::default().show(ctx, |ui| {
            let Some(dataset) = self.state.dataset.clone() else {
                ui.centered_and_justified(|ui: &mut egui::Ui| {
                    ui.heading("Open a market CSV to get started  (File → Open…)");
                });
                return;
            };

            let Some(summary) = kpi::summarize(&dataset, &self.state.visible) else {
                ui.add_space(16.0);
                ui.label(
                    RichText::new(
                        "No records match this filter combination. \
                         Try selecting more phases or years.",
                    )
                    .heading()
                    .color(egui::Color32::YELLOW),
                );
                return;
            };

            kpi_ui::metrics_strip(ui, &summary);
            ui.separator();

            ui.horizontal(|ui: &mut egui::Ui| {
                ui.selectable_value(&mut self.state.tab, Tab::Market, "📈 Market");
                ui.selectable_value(&mut self.state.tab, Tab::Seasonal, "🧠 Seasonal");
                ui.selectable_value(&mut self.state.tab, Tab::Data, "📋 Data");
            });
            ui.separator();

            match self.state.tab {
                Tab::Market => market::market_tab(ui, &dataset, &self.state.visible),
                Tab::Seasonal => seasonal::seasonal_tab(ui, &self.state, &dataset),
                Tab::Data => table::data_table(ui, &dataset, &self.state.visible),
            }
        });
    }
}

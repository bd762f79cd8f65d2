use eframe::egui::Ui;
use egui_extras::{Column, TableBuilder};

use crate::data::model::MarketDataset;

// ---------------------------------------------------------------------------
// Data tab – raw filtered table
// ---------------------------------------------------------------------------

/// Render the filtered records as a striped table, mirroring the export's
/// column order.
pub fn data_table(ui: &mut Ui, dataset: &MarketDataset, view: &[usize]) {
    ui.strong(format!("Filtered records ({})", view.len()));
    ui.add_space(4.0);

    TableBuilder::new(ui)
        .striped(true)
        .resizable(true)
        .column(Column::auto().at_least(90.0))
        .column(Column::auto().at_least(90.0))
        .column(Column::auto().at_least(80.0))
        .column(Column::auto().at_least(110.0))
        .column(Column::auto().at_least(70.0))
        .column(Column::remainder().at_least(70.0))
        .header(20.0, |mut header| {
            for title in ["Date", "Soy price", "PTAX", "Cycle phase", "Soy %", "USD %"] {
                header.col(|ui: &mut Ui| {
                    ui.strong(title);
                });
            }
        })
        .body(|body| {
            body.rows(18.0, view.len(), |mut row| {
                let r = &dataset.records[view[row.index()]];
                row.col(|ui: &mut Ui| {
                    ui.label(r.date.format("%d/%m/%Y").to_string());
                });
                row.col(|ui: &mut Ui| {
                    ui.label(format!("R$ {:.2}", r.price_brl));
                });
                row.col(|ui: &mut Ui| {
                    ui.label(format!("R$ {:.4}", r.fx_ptax));
                });
                row.col(|ui: &mut Ui| {
                    ui.label(r.phase_display());
                });
                row.col(|ui: &mut Ui| {
                    ui.label(format!("{:.2} %", r.price_pct));
                });
                row.col(|ui: &mut Ui| {
                    ui.label(format!("{:.2} %", r.fx_pct));
                });
            });
        });
}

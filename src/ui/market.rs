use chrono::{Datelike, NaiveDate};
use eframe::egui::{Color32, Ui};
use egui_plot::{GridMark, Legend, Line, Plot, PlotPoints};

use crate::data::model::MarketDataset;

// ---------------------------------------------------------------------------
// Market tab – price and PTAX over time
// ---------------------------------------------------------------------------

const PRICE_COLOR: Color32 = Color32::from_rgb(0x00, 0xd4, 0xff);
const FX_COLOR: Color32 = Color32::from_rgb(0xff, 0x4b, 0x4b);

/// Day count since CE as the plot's x coordinate.
pub fn date_to_x(date: NaiveDate) -> f64 {
    date.num_days_from_ce() as f64
}

fn x_to_date_label(x: f64) -> String {
    NaiveDate::from_num_days_from_ce_opt(x.round() as i32)
        .map(|d| d.format("%d/%m/%Y").to_string())
        .unwrap_or_default()
}

/// Render the price evolution (area) stacked over the PTAX line. egui_plot
/// has no secondary y axis, so the two series get their own aligned plots
/// instead of the dual-axis chart a plotting DSL would produce.
pub fn market_tab(ui: &mut Ui, dataset: &MarketDataset, view: &[usize]) {
    ui.strong("Price evolution: soy vs. dollar");
    ui.add_space(4.0);

    let half = (ui.available_height() - 16.0) / 2.0;

    let price_points: PlotPoints = view
        .iter()
        .map(|&i| {
            let r = &dataset.records[i];
            [date_to_x(r.date), r.price_brl]
        })
        .collect();

    Plot::new("price_series")
        .height(half)
        .legend(Legend::default())
        .y_axis_label("Price (R$/sack)")
        .x_axis_formatter(|mark: GridMark, _range| x_to_date_label(mark.value))
        .label_formatter(|name, value| {
            format!("{name}\n{}\nR$ {:.2}", x_to_date_label(value.x), value.y)
        })
        .show(ui, |plot_ui| {
            plot_ui.line(
                Line::new(price_points)
                    .name("Soy price")
                    .color(PRICE_COLOR)
                    .width(2.0)
                    .fill(0.0),
            );
        });

    let fx_points: PlotPoints = view
        .iter()
        .map(|&i| {
            let r = &dataset.records[i];
            [date_to_x(r.date), r.fx_ptax]
        })
        .collect();

    Plot::new("fx_series")
        .height(half)
        .legend(Legend::default())
        .y_axis_label("PTAX (R$)")
        .x_axis_formatter(|mark: GridMark, _range| x_to_date_label(mark.value))
        .label_formatter(|name, value| {
            format!("{name}\n{}\nR$ {:.4}", x_to_date_label(value.x), value.y)
        })
        .show(ui, |plot_ui| {
            plot_ui.line(
                Line::new(fx_points)
                    .name("USD PTAX")
                    .color(FX_COLOR)
                    .width(1.5),
            );
        });
}

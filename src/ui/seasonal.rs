use eframe::egui::{self, Color32, Rect, RichText, Sense, Stroke, Ui, Vec2};
use egui_plot::{BoxElem, BoxPlot, BoxSpread, Legend, Line, Plot, PlotPoints, Points};

use crate::color::{heat_color, PhasePalette};
use crate::data::model::{display_phase, MarketDataset};
use crate::data::stats::{box_stats, linear_fit, monthly_pivot, pearson, MonthlyPivot};
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Seasonal tab – distribution per phase, correlation, year×month heatmap
// ---------------------------------------------------------------------------

const MONTH_LABELS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

pub fn seasonal_tab(ui: &mut Ui, state: &AppState, dataset: &MarketDataset) {
    let chart_height = (ui.available_height() - 40.0) * 0.55;
    ui.columns(2, |cols: &mut [Ui]| {
        phase_box_plot(&mut cols[0], state, dataset, chart_height);
        correlation_scatter(&mut cols[1], dataset, &state.visible, chart_height);
    });
    ui.add_space(8.0);
    heatmap(ui, dataset, state);
}

// ---- Box plot ----

/// Price distribution per crop-cycle phase over the filtered view, with
/// 1.5×IQR whiskers and individual outlier markers.
fn phase_box_plot(ui: &mut Ui, state: &AppState, dataset: &MarketDataset, height: f32) {
    ui.strong("Price dispersion by cycle phase");

    // Group view prices by phase, keeping the dataset's phase order.
    let mut groups: Vec<(&str, Vec<f64>)> = Vec::new();
    for phase in &dataset.phases {
        let prices: Vec<f64> = state
            .visible
            .iter()
            .map(|&i| &dataset.records[i])
            .filter(|r| r.phase == *phase)
            .map(|r| r.price_brl)
            .collect();
        if !prices.is_empty() {
            groups.push((phase, prices));
        }
    }

    let labels: Vec<String> = groups
        .iter()
        .map(|(phase, _)| display_phase(phase).to_string())
        .collect();

    let mut boxes = Vec::new();
    let mut outlier_points: Vec<(f64, f64, Color32)> = Vec::new();
    for (slot, (phase, prices)) in groups.iter().enumerate() {
        let Some(bs) = box_stats(prices, 1.5) else {
            continue;
        };
        let color = state
            .phase_colors
            .as_ref()
            .map(|p| p.color_for(phase))
            .unwrap_or(Color32::LIGHT_BLUE);
        boxes.push(
            BoxElem::new(
                slot as f64,
                BoxSpread::new(bs.lower_whisker, bs.q1, bs.median, bs.q3, bs.upper_whisker),
            )
            .name(display_phase(phase))
            .fill(color.gamma_multiply(0.4))
            .stroke(Stroke::new(1.5, color)),
        );
        for v in bs.outliers {
            outlier_points.push((slot as f64, v, color));
        }
    }

    Plot::new("phase_boxplot")
        .height(height)
        .y_axis_label("Price (R$)")
        .x_axis_formatter(move |mark: egui_plot::GridMark, _range| {
            let slot = mark.value.round();
            if (mark.value - slot).abs() > 1e-6 || slot < 0.0 {
                return String::new();
            }
            labels.get(slot as usize).cloned().unwrap_or_default()
        })
        .show(ui, |plot_ui| {
            plot_ui.box_plot(BoxPlot::new(boxes));
            for (x, y, color) in outlier_points {
                plot_ui.points(
                    Points::new(PlotPoints::from(vec![[x, y]]))
                        .color(color)
                        .radius(2.5),
                );
            }
        });
}

// ---- Scatter with OLS trendline ----

/// Price vs. PTAX scatter over the filtered view with the least-squares
/// trendline and the Pearson coefficient in the caption.
fn correlation_scatter(ui: &mut Ui, dataset: &MarketDataset, view: &[usize], height: f32) {
    let fx: Vec<f64> = view.iter().map(|&i| dataset.records[i].fx_ptax).collect();
    let price: Vec<f64> = view.iter().map(|&i| dataset.records[i].price_brl).collect();

    match pearson(&price, &fx) {
        Some(r) => ui.strong(format!("Dollar × price correlation — Pearson {r:.2}")),
        None => ui.strong("Dollar × price correlation"),
    };

    let scatter: PlotPoints = fx.iter().zip(&price).map(|(&x, &y)| [x, y]).collect();

    Plot::new("correlation_scatter")
        .height(height)
        .legend(Legend::default())
        .x_axis_label("PTAX (R$)")
        .y_axis_label("Price (R$)")
        .show(ui, |plot_ui| {
            plot_ui.points(
                Points::new(scatter)
                    .name("Days")
                    .color(Color32::LIGHT_BLUE)
                    .radius(2.0),
            );

            if let Some((slope, intercept)) = linear_fit(&fx, &price) {
                let (x0, x1) = fx
                    .iter()
                    .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| {
                        (lo.min(v), hi.max(v))
                    });
                if x0.is_finite() && x1 > x0 {
                    let trend = PlotPoints::from(vec![
                        [x0, slope * x0 + intercept],
                        [x1, slope * x1 + intercept],
                    ]);
                    plot_ui.line(Line::new(trend).name("Trend").color(Color32::RED).width(2.0));
                }
            }
        });
}

// ---- Heatmap ----

/// Year×month mean-price heatmap over the year-filtered dataset, painted as
/// a colored grid. Missing months stay as gaps.
fn heatmap(ui: &mut Ui, dataset: &MarketDataset, state: &AppState) {
    ui.strong("Monthly mean price by year");

    let Some(pivot) = monthly_pivot(dataset, &state.criteria.years) else {
        ui.label(RichText::new("No year selected.").weak());
        return;
    };

    paint_pivot(ui, &pivot);
}

fn paint_pivot(ui: &mut Ui, pivot: &MonthlyPivot) {
    let rows = pivot.years.len();
    let label_w = 44.0;
    let cell_h = 24.0;
    let header_h = 18.0;
    let cell_w = ((ui.available_width() - label_w) / 12.0).max(24.0);

    let size = Vec2::new(
        label_w + cell_w * 12.0,
        header_h + cell_h * rows as f32,
    );
    let (response, painter) = ui.allocate_painter(size, Sense::hover());
    let origin = response.rect.min;
    let font = egui::TextStyle::Small.resolve(ui.style());
    let text_color = ui.visuals().text_color();
    let span = (pivot.max - pivot.min).max(f64::EPSILON);

    for (m, label) in MONTH_LABELS.iter().enumerate() {
        painter.text(
            origin + Vec2::new(label_w + (m as f32 + 0.5) * cell_w, header_h * 0.5),
            egui::Align2::CENTER_CENTER,
            *label,
            font.clone(),
            text_color,
        );
    }

    for (row, year) in pivot.years.iter().enumerate() {
        let y = header_h + row as f32 * cell_h;
        painter.text(
            origin + Vec2::new(label_w * 0.5, y + cell_h * 0.5),
            egui::Align2::CENTER_CENTER,
            year.to_string(),
            font.clone(),
            text_color,
        );

        for m in 0..12 {
            let rect = Rect::from_min_size(
                origin + Vec2::new(label_w + m as f32 * cell_w, y),
                Vec2::new(cell_w, cell_h),
            )
            .shrink(1.0);

            match pivot.cells[row][m] {
                Some(mean) => {
                    let t = ((mean - pivot.min) / span) as f32;
                    painter.rect_filled(rect, egui::CornerRadius::same(2), heat_color(t));
                    if cell_w > 40.0 {
                        painter.text(
                            rect.center(),
                            egui::Align2::CENTER_CENTER,
                            format!("{mean:.0}"),
                            font.clone(),
                            Color32::WHITE,
                        );
                    }
                }
                None => {
                    // Gap: no observations for this (year, month).
                    painter.rect_filled(rect, egui::CornerRadius::same(2), ui.visuals().faint_bg_color);
                }
            }
        }
    }
}

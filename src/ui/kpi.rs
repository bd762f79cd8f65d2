use eframe::egui::{Color32, RichText, Ui};

use crate::data::kpi::KpiSummary;

// ---------------------------------------------------------------------------
// Metric cards strip
// ---------------------------------------------------------------------------

const UP: Color32 = Color32::from_rgb(0x2e, 0xcc, 0x71);
const DOWN: Color32 = Color32::from_rgb(0xe7, 0x4c, 0x3c);

/// Four metric cards over the filtered view: soy price, PTAX, period mean,
/// current cycle phase.
pub fn metrics_strip(ui: &mut Ui, kpi: &KpiSummary) {
    ui.columns(4, |cols: &mut [Ui]| {
        metric(
            &mut cols[0],
            "Soy price (sack)",
            format!("R$ {:.2}", kpi.latest_price),
            // Rising soy is good for the seller.
            Some((kpi.price_delta, format!("{:+.2} R$", kpi.price_delta), false)),
        );
        metric(
            &mut cols[1],
            "USD PTAX",
            format!("R$ {:.4}", kpi.latest_fx),
            // Rising dollar is a cost, so the delta color is inverted.
            Some((kpi.fx_delta, format!("{:+.4} R$", kpi.fx_delta), true)),
        );
        metric(
            &mut cols[2],
            "Mean price (filter)",
            format!("R$ {:.2}", kpi.mean_price),
            None,
        );
        metric(
            &mut cols[3],
            "Cycle phase (latest)",
            kpi.current_phase.clone(),
            None,
        );
    });
}

fn metric(ui: &mut Ui, title: &str, value: String, delta: Option<(f64, String, bool)>) {
    ui.vertical(|ui: &mut Ui| {
        ui.label(RichText::new(title).small().weak());
        ui.label(RichText::new(value).size(22.0).strong());
        if let Some((amount, text, inverted)) = delta {
            let rising = amount >= 0.0;
            let color = if rising != inverted { UP } else { DOWN };
            ui.label(RichText::new(text).color(color));
        }
    });
}

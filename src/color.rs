use std::collections::{BTreeMap, BTreeSet};

use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Mix, Srgb};

// ---------------------------------------------------------------------------
// Color palette generator
// ---------------------------------------------------------------------------

/// Generates `n` visually distinct colours using evenly spaced hues.
pub fn generate_palette(n: usize) -> Vec<Color32> {
    if n == 0 {
        return Vec::new();
    }
    (0..n)
        .map(|i| {
            let hue = (i as f32 / n as f32) * 360.0;
            let hsl = Hsl::new(hue, 0.65, 0.55);
            let rgb: Srgb = hsl.into_color();
            Color32::from_rgb(
                (rgb.red * 255.0) as u8,
                (rgb.green * 255.0) as u8,
                (rgb.blue * 255.0) as u8,
            )
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Phase palette: crop-cycle phase → Color32
// ---------------------------------------------------------------------------

/// Maps each crop-cycle phase to a distinct colour, shared between the
/// sidebar checkboxes and the seasonal box plot.
#[derive(Debug, Clone)]
pub struct PhasePalette {
    mapping: BTreeMap<String, Color32>,
    default_color: Color32,
}

impl PhasePalette {
    /// Build the palette from the dataset's sorted phase set.
    pub fn new(phases: &BTreeSet<String>) -> Self {
        let palette = generate_palette(phases.len());
        let mapping: BTreeMap<String, Color32> = phases
            .iter()
            .cloned()
            .zip(palette)
            .collect();

        PhasePalette {
            mapping,
            default_color: Color32::GRAY,
        }
    }

    /// Look up the colour for a phase label.
    pub fn color_for(&self, phase: &str) -> Color32 {
        self.mapping
            .get(phase)
            .copied()
            .unwrap_or(self.default_color)
    }
}

// ---------------------------------------------------------------------------
// Heat gradient: normalized value → Color32
// ---------------------------------------------------------------------------

/// Cold-to-hot gradient for the year×month heatmap. `t` is clamped to
/// `[0, 1]`; 0 maps to a deep blue, 1 to a warm red.
pub fn heat_color(t: f32) -> Color32 {
    let t = t.clamp(0.0, 1.0);
    let cold = Hsl::new(220.0, 0.70, 0.35);
    let hot = Hsl::new(10.0, 0.85, 0.55);
    let rgb: Srgb = cold.mix(hot, t).into_color();
    Color32::from_rgb(
        (rgb.red * 255.0) as u8,
        (rgb.green * 255.0) as u8,
        (rgb.blue * 255.0) as u8,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn palette_has_distinct_colors() {
        let colors = generate_palette(4);
        assert_eq!(colors.len(), 4);
        assert_ne!(colors[0], colors[2]);
    }

    #[test]
    fn phase_palette_is_stable_and_total() {
        let phases: BTreeSet<String> =
            ["1.Plantio".to_string(), "2.Crescimento".to_string()].into();
        let palette = PhasePalette::new(&phases);
        assert_eq!(
            palette.color_for("1.Plantio"),
            palette.color_for("1.Plantio")
        );
        assert_ne!(
            palette.color_for("1.Plantio"),
            palette.color_for("2.Crescimento")
        );
        assert_eq!(palette.color_for("unknown"), Color32::GRAY);
    }

    #[test]
    fn heat_color_clamps() {
        assert_eq!(heat_color(-1.0), heat_color(0.0));
        assert_eq!(heat_color(2.0), heat_color(1.0));
        assert_ne!(heat_color(0.0), heat_color(1.0));
    }
}

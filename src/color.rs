use palette::{Hsl, IntoColor, Srgb};
use plotters::style::RGBColor;

use crate::data::model::Planner;

// ---------------------------------------------------------------------------
// Color palette generator
// ---------------------------------------------------------------------------

/// Generates `n` visually distinct colours using evenly spaced hues.
///
/// Hues start at 210° so the first two series come out blue and orange.
pub fn generate_palette(n: usize) -> Vec<RGBColor> {
    if n == 0 {
        return Vec::new();
    }
    (0..n)
        .map(|i| {
            let hue = 210.0 + (i as f32 / n as f32) * 360.0;
            let hsl = Hsl::new(hue, 0.75, 0.45);
            let rgb: Srgb = hsl.into_color();
            RGBColor(
                (rgb.red.clamp(0.0, 1.0) * 255.0) as u8,
                (rgb.green.clamp(0.0, 1.0) * 255.0) as u8,
                (rgb.blue.clamp(0.0, 1.0) * 255.0) as u8,
            )
        })
        .collect()
}

/// Line colour per planner, fixed so every chart uses the same pairing.
#[derive(Debug, Clone, Copy)]
pub struct PlannerColors {
    pub mcp: RGBColor,
    pub hsp: RGBColor,
}

impl PlannerColors {
    pub fn color_for(&self, planner: Planner) -> RGBColor {
        match planner {
            Planner::Mcp => self.mcp,
            Planner::Hsp => self.hsp,
        }
    }
}

impl Default for PlannerColors {
    fn default() -> Self {
        let palette = generate_palette(Planner::ALL.len());
        PlannerColors {
            mcp: palette[0],
            hsp: palette[1],
        }
    }
}

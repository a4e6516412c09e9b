use std::collections::{BTreeMap, BTreeSet};

use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Srgb};

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
            let hsl = Hsl::new(hue, 0.75, 0.55);
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
// Color mapping: region → Color32
// ---------------------------------------------------------------------------

/// Assigns each region of the loaded dataset a stable colour, so a state
/// keeps its colour in the filter list and in the region panels.
#[derive(Debug, Clone)]
pub struct ColorMap {
    mapping: BTreeMap<String, Color32>,
    default_color: Color32,
}

impl ColorMap {
    pub fn new(regions: &BTreeSet<String>) -> Self {
        let palette = generate_palette(regions.len());
        let mapping = regions.iter().cloned().zip(palette).collect();

        ColorMap {
            mapping,
            default_color: Color32::GRAY,
        }
    }

    /// Look up the colour for a region.
    pub fn color_for(&self, region: &str) -> Color32 {
        self.mapping
            .get(region)
            .copied()
            .unwrap_or(self.default_color)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn palette_is_distinct() {
        let p = generate_palette(6);
        assert_eq!(p.len(), 6);
        let unique: BTreeSet<[u8; 4]> = p.iter().map(|c| c.to_array()).collect();
        assert_eq!(unique.len(), 6);
        assert!(generate_palette(0).is_empty());
    }

    #[test]
    fn unknown_region_is_gray() {
        let regions: BTreeSet<String> = ["NV", "TX"].iter().map(|s| s.to_string()).collect();
        let cm = ColorMap::new(&regions);
        assert_ne!(cm.color_for("TX"), cm.color_for("NV"));
        assert_eq!(cm.color_for("QC"), Color32::GRAY);
    }
}

use std::collections::HashMap;

use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Srgb};

use crate::data::dataset::{DashboardData, Scenario};

// ---------------------------------------------------------------------------
// Color palette generator
// ---------------------------------------------------------------------------

/// Generates `n` visually distinct colours, stepping the hue by the golden angle.
pub fn generate_palette(n: usize) -> Vec<Color32> {
    (0..n)
        .map(|i| {
            let hue = (i as f32 * 137.508) % 360.0;
            let hsl = Hsl::new(hue, 0.70, 0.50);
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
// Series colours: column name → Color32
// ---------------------------------------------------------------------------

/// One colour per column name, shared by every chart, so a model or
/// indicator looks the same in the baseline and scenario plots.
#[derive(Debug, Clone)]
pub struct SeriesColors {
    mapping: HashMap<String, Color32>,
    default_color: Color32,
}

impl SeriesColors {
    /// Assign colours in first-seen order; repeated names keep their first colour.
    pub fn new<'a>(names: impl IntoIterator<Item = &'a str>) -> Self {
        let mut ordered: Vec<&str> = Vec::new();
        for name in names {
            if !ordered.contains(&name) {
                ordered.push(name);
            }
        }
        let mapping = ordered
            .iter()
            .zip(generate_palette(ordered.len()))
            .map(|(name, c)| (name.to_string(), c))
            .collect();

        SeriesColors {
            mapping,
            default_color: Color32::GRAY,
        }
    }

    /// Colours for every column of every loaded table.
    pub fn for_data(data: &DashboardData) -> Self {
        Self::new(
            Scenario::ALL
                .iter()
                .flat_map(|&s| data.table(s).column_names()),
        )
    }

    pub fn color_for(&self, name: &str) -> Color32 {
        self.mapping
            .get(name)
            .copied()
            .unwrap_or(self.default_color)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn palette_has_requested_size() {
        assert!(generate_palette(0).is_empty());
        assert_eq!(generate_palette(7).len(), 7);
    }

    #[test]
    fn repeated_names_share_a_colour() {
        let colors = SeriesColors::new(["OCR", "CPI", "OCR", "GDP"]);
        let again = SeriesColors::new(["OCR", "CPI", "GDP"]);
        for name in ["OCR", "CPI", "GDP"] {
            assert_eq!(colors.color_for(name), again.color_for(name));
        }
        assert_ne!(colors.color_for("OCR"), colors.color_for("CPI"));
        assert_ne!(colors.color_for("CPI"), colors.color_for("GDP"));
    }

    #[test]
    fn unknown_name_gets_default() {
        let colors = SeriesColors::new(["OCR"]);
        assert_eq!(colors.color_for("Unemployment"), Color32::GRAY);
    }
}

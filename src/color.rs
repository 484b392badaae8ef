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
            let hsl = Hsl::new(hue, 0.65, 0.5);
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
// Color mapping: city → Color32
// ---------------------------------------------------------------------------

/// Maps every city in the dataset to a distinct colour so a city keeps its
/// colour across views and across filter changes.
#[derive(Debug, Clone, Default)]
pub struct CityColors {
    mapping: BTreeMap<String, Color32>,
}

impl CityColors {
    /// Build a colour map from the dataset's city index.
    pub fn new(cities: &BTreeSet<String>) -> Self {
        let palette = generate_palette(cities.len());
        let mapping = cities
            .iter()
            .zip(palette)
            .map(|(city, color)| (city.clone(), color))
            .collect();
        CityColors { mapping }
    }

    /// Look up the colour for a city. Unknown cities get a neutral gray.
    pub fn color_for(&self, city: &str) -> Color32 {
        self.mapping.get(city).copied().unwrap_or(Color32::GRAY)
    }
}

// ---------------------------------------------------------------------------
// Sequential ramp: normalized ratio → Color32
// ---------------------------------------------------------------------------

/// Maps a normalized housing cost ratio in `[0, 1]` onto a warm sequential
/// ramp, pale for the cheapest cell and dark for the most burdened one.
/// Values outside the range are clamped.
pub fn ratio_color(t: f32) -> Color32 {
    let t = t.clamp(0.0, 1.0);
    let hsl = Hsl::new(28.0, 0.55, 0.92 - 0.67 * t);
    let rgb: Srgb = hsl.into_color();
    Color32::from_rgb(
        (rgb.red * 255.0) as u8,
        (rgb.green * 255.0) as u8,
        (rgb.blue * 255.0) as u8,
    )
}

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
// Series colours
// ---------------------------------------------------------------------------

/// One colour per plotted series.
#[derive(Debug, Clone, Copy)]
pub struct SeriesColors {
    pub outside: Color32,
    pub inside: Color32,
    pub polygon: Color32,
    pub region: Color32,
}

impl Default for SeriesColors {
    fn default() -> Self {
        // Hues 0°, 90°, 180°, 270°: red, chartreuse, cyan, violet.
        match generate_palette(4).as_slice() {
            &[region, inside, outside, polygon] => SeriesColors {
                outside,
                inside,
                polygon,
                region,
            },
            _ => SeriesColors {
                outside: Color32::LIGHT_BLUE,
                inside: Color32::GREEN,
                polygon: Color32::BLUE,
                region: Color32::RED,
            },
        }
    }
}

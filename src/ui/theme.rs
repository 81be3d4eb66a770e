//! Theme colors

use iced::Color;

pub const BACKGROUND: Color = Color::from_rgb(0.09, 0.09, 0.11);
pub const SURFACE: Color = Color::from_rgb(0.12, 0.12, 0.14);
pub const SURFACE_HIGHLIGHT: Color = Color::from_rgb(0.18, 0.18, 0.22);
pub const BORDER: Color = Color::from_rgb(0.25, 0.25, 0.28);
pub const PRIMARY: Color = Color::from_rgb(0.4, 0.55, 1.0);
pub const TEXT: Color = Color::from_rgb(0.95, 0.95, 0.95);
pub const TEXT_MUTED: Color = Color::from_rgb(0.55, 0.55, 0.6);
pub const TEXT_PLACEHOLDER: Color = Color::from_rgb(0.4, 0.4, 0.45);

// Score colors, matching the report palette (#27ae60, #f39c12, #e74c3c).
pub const SUCCESS: Color = Color::from_rgb(0.15, 0.68, 0.38);
pub const WARNING: Color = Color::from_rgb(0.95, 0.61, 0.07);
pub const DANGER: Color = Color::from_rgb(0.91, 0.30, 0.24);

/// Score bar color by match percentage.
pub fn score_color(percent: f64) -> Color {
    if percent >= 70.0 {
        SUCCESS
    } else if percent >= 50.0 {
        WARNING
    } else {
        DANGER
    }
}

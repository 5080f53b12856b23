use crate::breakdown::Breakdown;
use ratatui::style::Color;

/// Map a `#rrggbb` palette entry onto a terminal color.
pub fn hex_color(hex: &str) -> Color {
    let hex = hex.trim_start_matches('#');
    if hex.len() != 6 {
        return Color::White;
    }
    let parse = |s: &str| u8::from_str_radix(s, 16).unwrap_or(0xff);
    Color::Rgb(parse(&hex[0..2]), parse(&hex[2..4]), parse(&hex[4..6]))
}

/// Color assigned to a file-type category in the current breakdown.
pub fn category_color(breakdown: &Breakdown, category: &str) -> Color {
    breakdown
        .categories
        .iter()
        .find(|c| c.category == category)
        .map(|c| hex_color(&c.color))
        .unwrap_or(Color::Gray)
}

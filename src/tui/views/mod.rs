use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::Cell;

mod breakdown;
mod files;
mod help;
mod narrative;
mod scatter;

pub use breakdown::draw_breakdown_view;
pub use files::draw_files_view;
pub use help::draw_help_overlay;
pub use narrative::draw_narrative_view;
pub use scatter::draw_scatter_view;

/// Convenience helper to build a styled table header cell.
pub(crate) fn header_cell(text: &str, color: Color) -> Cell<'static> {
    Cell::from(text.to_string()).style(Style::default().fg(color).add_modifier(Modifier::BOLD))
}

/// Truncate a string to `max` chars with an ellipsis when necessary.
pub(crate) fn truncate(s: &str, max: usize) -> String {
    if s.len() > max {
        format!("{}...", &s[..max.saturating_sub(3)])
    } else {
        s.to_string()
    }
}

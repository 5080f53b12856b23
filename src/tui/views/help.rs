use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};
use ratatui::Frame;

use crate::tui::centered_rect;

/// Draw the modal help overlay describing navigation, views, and shortcuts.
pub fn draw_help_overlay(f: &mut Frame, area: Rect) {
    let block = Block::default().title("Help").borders(Borders::ALL);
    let help_area = centered_rect(70, 80, area);

    f.render_widget(Clear, help_area);

    let section = |text: &str| {
        Line::from(vec![Span::styled(
            text.to_string(),
            Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
        )])
    };

    let help_text = vec![
        Line::from(vec![Span::styled(
            "locmap - Help",
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        )]),
        Line::from(""),
        section("Views:"),
        Line::from("  Tab         Next view (Scatter/Breakdown/Files/Narrative)"),
        Line::from("  Shift+Tab   Previous view"),
        Line::from(""),
        section("Time window:"),
        Line::from("  ←/→         Move the cutoff slider (Shift = ±10)"),
        Line::from("  Home/End    Jump to earliest/latest"),
        Line::from(""),
        section("Brush:"),
        Line::from("  b           Toggle the brush rectangle"),
        Line::from("  Arrows      Move the brush"),
        Line::from("  H/L, J/K    Shrink/grow width and height"),
        Line::from("  Esc         Clear the brush"),
        Line::from(""),
        section("Narrative:"),
        Line::from("  ↑/↓         Step through commits (drives the window)"),
        Line::from("  PgUp/PgDn   Move by 5 steps"),
        Line::from("  c / y       Copy commit id / commit URL"),
        Line::from(""),
        section("General:"),
        Line::from("  h, F1       Toggle this help"),
        Line::from("  q           Quit application"),
        Line::from(""),
        Line::from(vec![Span::styled(
            "Press 'h' or 'Esc' to close this help",
            Style::default().fg(Color::Gray),
        )]),
    ];

    let help_paragraph = Paragraph::new(help_text)
        .block(block)
        .wrap(ratatui::widgets::Wrap { trim: true });
    f.render_widget(help_paragraph, help_area);
}

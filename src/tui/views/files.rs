use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

use crate::session::ViewData;

use super::super::draw::category_color;
use super::super::state::TuiState;
use super::truncate;

/// Render the per-file unit grid: one colored cell per line change,
/// files ordered by descending count.
pub fn draw_files_view(f: &mut Frame, area: Rect, data: &ViewData, _state: &TuiState) {
    let unit_width = (area.width as usize).saturating_sub(36).max(10);
    let visible_files = (area.height as usize).saturating_sub(3);

    let mut lines: Vec<Line> = vec![Line::from(vec![Span::styled(
        format!("{} files, {} lines", data.breakdown.files.len(), data.breakdown.total_lines),
        Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
    )])];

    for file in data.breakdown.files.iter().take(visible_files) {
        let color = category_color(&data.breakdown, &file.category);
        let shown = file.lines.min(unit_width);
        let mut spans = vec![
            Span::styled(
                format!("{:<28} ", truncate(&file.path, 27)),
                Style::default().fg(Color::White),
            ),
            Span::styled(format!("{:>5} ", file.lines), Style::default().fg(Color::Cyan)),
            Span::styled("■".repeat(shown), Style::default().fg(color)),
        ];
        if file.lines > shown {
            spans.push(Span::styled(
                format!(" +{}", file.lines - shown),
                Style::default().fg(Color::Gray),
            ));
        }
        lines.push(Line::from(spans));
    }

    if data.breakdown.files.len() > visible_files {
        lines.push(Line::from(Span::styled(
            format!("… (+{} more files)", data.breakdown.files.len() - visible_files),
            Style::default().fg(Color::Gray),
        )));
    }

    let paragraph = Paragraph::new(lines).block(
        Block::default()
            .title("Lines by File")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Blue)),
    );
    f.render_widget(paragraph, area);
}

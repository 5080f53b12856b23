use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use ratatui::Frame;

use crate::narrative::short_id;
use crate::session::ViewData;

use super::super::state::TuiState;

/// Render the scroll-driven narrative; the highlighted step is the one
/// currently driving the time window.
pub fn draw_narrative_view(f: &mut Frame, area: Rect, data: &ViewData, state: &TuiState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(3)])
        .split(area);

    // Keep the active step roughly centered in the visible window.
    let per_step = 3usize;
    let visible_steps = ((chunks[0].height as usize).saturating_sub(2) / per_step).max(1);
    let start = state
        .narrative_index
        .saturating_sub(visible_steps / 2)
        .min(state.steps.len().saturating_sub(visible_steps));
    let end = (start + visible_steps).min(state.steps.len());

    let mut lines: Vec<Line> = Vec::new();
    for step in &state.steps[start..end] {
        let is_active = step.index == state.narrative_index;
        let marker = if is_active { "▶ " } else { "  " };
        let style = if is_active {
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::White)
        };
        lines.push(Line::from(vec![
            Span::styled(marker, style),
            Span::styled(format!("[{}] ", short_id(&step.commit_id)), Style::default().fg(Color::Gray)),
            Span::styled(step.text.clone(), style),
        ]));
        lines.push(Line::from(""));
        lines.push(Line::from(""));
    }

    let title = format!(
        "Narrative - step {}/{}",
        state.narrative_index + 1,
        state.steps.len().max(1)
    );
    let paragraph = Paragraph::new(lines)
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .title(title)
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Blue)),
        );
    f.render_widget(paragraph, chunks[0]);

    let status = Paragraph::new(Line::from(vec![Span::styled(
        format!(
            "{} commits visible up to this step  |  ↑/↓ step, c copy id, y copy url",
            data.windowed.len()
        ),
        Style::default().fg(Color::Cyan),
    )]))
    .block(Block::default().borders(Borders::ALL));
    f.render_widget(status, chunks[1]);
}

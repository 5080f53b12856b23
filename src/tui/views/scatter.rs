use std::collections::HashSet;

use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Style};
use ratatui::symbols::Marker;
use ratatui::text::{Line, Span};
use ratatui::widgets::canvas::{Canvas, Circle, Rectangle};
use ratatui::widgets::{Block, Borders, Gauge, Paragraph};
use ratatui::Frame;

use crate::model::Commit;
use crate::session::{ViewData, CHART_MAX};

use super::super::state::TuiState;

/// Render the commits-by-time-of-day scatter with the window slider and
/// a selection status line.
pub fn draw_scatter_view(
    f: &mut Frame,
    area: Rect,
    commits: &[Commit],
    data: &ViewData,
    state: &TuiState,
) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),
            Constraint::Length(3),
            Constraint::Length(3),
        ])
        .split(area);

    let active_ids: HashSet<&str> = data.active.iter().map(|c| c.id.as_str()).collect();
    let max_lines = commits.iter().map(|c| c.total_lines).max().unwrap_or(1).max(1);

    let brush = state.view.brush;
    let time_scale = state.view.time_scale.clone();
    let hour_scale = state.view.hour_scale.clone();

    let canvas = Canvas::default()
        .block(
            Block::default()
                .title("Commits by Time of Day")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Blue)),
        )
        .marker(Marker::Braille)
        .x_bounds([0.0, CHART_MAX])
        .y_bounds([0.0, CHART_MAX])
        .paint(|ctx| {
            for commit in commits {
                let x = time_scale.scale(&commit.datetime);
                let y = hour_scale.scale(commit.hour_frac);
                let radius =
                    0.6 + (commit.total_lines as f64 / max_lines as f64).sqrt() * 2.4;
                let color = if active_ids.contains(commit.id.as_str()) {
                    Color::Cyan
                } else {
                    Color::DarkGray
                };
                ctx.draw(&Circle { x, y, radius, color });
            }

            if let Some(rect) = &brush {
                ctx.draw(&Rectangle {
                    x: rect.x0,
                    y: rect.y0,
                    width: rect.width(),
                    height: rect.height(),
                    color: Color::Yellow,
                });
            }
        });
    f.render_widget(canvas, chunks[0]);

    let gauge = Gauge::default()
        .block(
            Block::default()
                .title("Time Window")
                .borders(Borders::ALL),
        )
        .gauge_style(Style::default().fg(Color::Green))
        .percent(state.view.slider_pos.round() as u16)
        .label(format!(
            "{:.0}% | up to {}",
            state.view.slider_pos,
            data.cutoff.format("%Y-%m-%d %H:%M")
        ));
    f.render_widget(gauge, chunks[1]);

    let selection = if state.view.brush.is_some() {
        format!("{} commits brushed", data.brushed.len())
    } else {
        format!("{} of {} commits in window", data.windowed.len(), commits.len())
    };
    let mut status_spans = vec![Span::styled(selection, Style::default().fg(Color::Cyan))];
    if let Some((message, at)) = &state.status_message {
        if at.elapsed() < std::time::Duration::from_secs(3) {
            status_spans.push(Span::raw("  |  "));
            status_spans.push(Span::styled(
                message.clone(),
                Style::default().fg(Color::Yellow),
            ));
        }
    }
    let status = Paragraph::new(Line::from(status_spans)).block(
        Block::default()
            .title("Selection | ←/→ window, b brush, h help")
            .borders(Borders::ALL),
    );
    f.render_widget(status, chunks[2]);
}

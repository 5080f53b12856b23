use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Style};
use ratatui::widgets::{Block, Borders, Cell, Row, Table};
use ratatui::Frame;

use crate::session::ViewData;

use super::super::draw::hex_color;
use super::super::state::TuiState;
use super::{header_cell, truncate};

/// Render the file-type and per-file breakdown of the active subset.
pub fn draw_breakdown_view(f: &mut Frame, area: Rect, data: &ViewData, state: &TuiState) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(45), Constraint::Percentage(55)])
        .split(area);

    let category_rows: Vec<Row> = data
        .breakdown
        .categories
        .iter()
        .map(|c| {
            let label = if c.category.is_empty() {
                "(none)".to_string()
            } else {
                c.category.clone()
            };
            Row::new(vec![
                Cell::from("■").style(Style::default().fg(hex_color(&c.color))),
                Cell::from(label),
                Cell::from(format!("{}", c.lines)),
                Cell::from(format!("{:.1}%", c.percentage)),
            ])
        })
        .collect();

    let source = if state.view.brush.is_some() && !data.brushed.is_empty() {
        "brushed"
    } else if state.view.brush.is_some() {
        "brushed: none - showing all"
    } else {
        "windowed"
    };

    let category_table = Table::new(
        category_rows,
        [
            Constraint::Length(2),
            Constraint::Length(12),
            Constraint::Length(8),
            Constraint::Length(8),
        ],
    )
    .header(Row::new([
        header_cell(" ", Color::White),
        header_cell("Type", Color::Yellow),
        header_cell("Lines", Color::Green),
        header_cell("Share", Color::Cyan),
    ]))
    .block(
        Block::default()
            .title(format!("Breakdown ({source})"))
            .borders(Borders::ALL),
    );
    f.render_widget(category_table, chunks[0]);

    let file_rows: Vec<Row> = data
        .breakdown
        .files
        .iter()
        .map(|file| {
            Row::new(vec![
                Cell::from("■").style(
                    Style::default().fg(super::super::draw::category_color(
                        &data.breakdown,
                        &file.category,
                    )),
                ),
                Cell::from(truncate(&file.path, 40)),
                Cell::from(format!("{}", file.lines)),
            ])
        })
        .collect();

    let file_table = Table::new(
        file_rows,
        [
            Constraint::Length(2),
            Constraint::Percentage(80),
            Constraint::Length(8),
        ],
    )
    .header(Row::new([
        header_cell(" ", Color::White),
        header_cell("File", Color::Yellow),
        header_cell("Lines", Color::Green),
    ]))
    .block(
        Block::default()
            .title(format!("{} lines total", data.breakdown.total_lines))
            .borders(Borders::ALL),
    );
    f.render_widget(file_table, chunks[1]);
}

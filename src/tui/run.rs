use std::io;

use crossterm::event::{poll, read, Event};
use crossterm::terminal::{disable_raw_mode, enable_raw_mode};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;

use crate::aggregate::group_commits_chronological;
use crate::cli::CommonArgs;
use crate::loader::load_line_changes;
use crate::narrative::build_narrative;
use crate::session::{recompute, ViewState};

use super::input::handle_key_event;
use super::state::{TuiState, ViewMode};
use super::views::{
    draw_breakdown_view, draw_files_view, draw_help_overlay, draw_narrative_view,
    draw_scatter_view,
};

pub fn run(common: &CommonArgs) -> io::Result<()> {
    let range = common
        .resolve_range()
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e.to_string()))?;
    let exclude = common
        .exclude_matcher()
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e.to_string()))?;
    let changes = load_line_changes(&common.input, &range, &exclude, true)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e.to_string()))?;
    let commits = group_commits_chronological(&changes, &common.url_base);

    let Some(view) = ViewState::new(&commits) else {
        eprintln!("No commits in {}", common.input.display());
        return Ok(());
    };
    let steps = build_narrative(&commits);
    let mut state = TuiState::new(view, steps);

    enable_raw_mode()?;
    let mut terminal = Terminal::new(CrosstermBackend::new(io::stdout()))?;
    terminal.clear()?;

    loop {
        // Full recomputation per frame; the collection is immutable and
        // small relative to interaction latency.
        let Some(data) = recompute(&commits, &mut state.view) else {
            break;
        };
        state.view_mode = ViewMode::from_tab(state.tab_index);

        let draw_result = terminal.draw(|f| {
            let size = f.size();

            if state.show_help {
                draw_help_overlay(f, size);
                return;
            }

            let chunks = ratatui::layout::Layout::default()
                .direction(ratatui::layout::Direction::Vertical)
                .constraints([
                    ratatui::layout::Constraint::Length(3),
                    ratatui::layout::Constraint::Min(0),
                ])
                .split(size);

            let tabs = ratatui::widgets::Tabs::new(vec![
                "Scatter",
                "Breakdown",
                "Files",
                "Narrative",
            ])
            .block(
                ratatui::widgets::Block::default()
                    .borders(ratatui::widgets::Borders::ALL)
                    .title("View Mode"),
            )
            .highlight_style(
                ratatui::style::Style::default()
                    .fg(ratatui::style::Color::Yellow)
                    .add_modifier(ratatui::style::Modifier::BOLD),
            )
            .select(state.tab_index);
            f.render_widget(tabs, chunks[0]);

            match state.view_mode {
                ViewMode::Scatter => draw_scatter_view(f, chunks[1], &commits, &data, &state),
                ViewMode::Breakdown => draw_breakdown_view(f, chunks[1], &data, &state),
                ViewMode::Files => draw_files_view(f, chunks[1], &data, &state),
                ViewMode::Narrative => draw_narrative_view(f, chunks[1], &data, &state),
            }
        });

        if let Err(e) = draw_result {
            eprintln!("TUI draw error: {e}");
        }

        if poll(std::time::Duration::from_millis(200))? {
            if let Event::Key(key_event) = read()? {
                if handle_key_event(key_event, &mut state, &commits)? {
                    break;
                }
            }
        }
    }

    terminal.clear()?;
    disable_raw_mode()?;
    Ok(())
}

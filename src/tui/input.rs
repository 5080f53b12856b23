use std::io;

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::model::Commit;
use crate::select::BrushRect;
use crate::session::CHART_MAX;
use crate::window::{instant_span, position_for_instant};

use super::state::{TuiState, ViewMode};

const BRUSH_STEP: f64 = 2.0;

pub fn copy_to_clipboard(text: &str) -> Result<(), arboard::Error> {
    let mut clipboard = arboard::Clipboard::new()?;
    clipboard.set_text(text.to_string())
}

/// Handle a keyboard event, mutating the view state. Returns `true`
/// when the loop should exit.
pub fn handle_key_event(
    key_event: KeyEvent,
    state: &mut TuiState,
    commits: &[Commit],
) -> io::Result<bool> {
    if key_event.kind != KeyEventKind::Press {
        return Ok(false);
    }

    if state.show_help {
        if matches!(key_event.code, KeyCode::Char('h') | KeyCode::Esc | KeyCode::F(1)) {
            state.show_help = false;
        }
        return Ok(false);
    }

    let shift = key_event.modifiers.contains(KeyModifiers::SHIFT);

    match key_event.code {
        KeyCode::Char('q') => return Ok(true),
        KeyCode::Char('h') | KeyCode::F(1) => state.show_help = !state.show_help,
        KeyCode::Tab => state.tab_index = (state.tab_index + 1) % 4,
        KeyCode::BackTab => {
            state.tab_index = if state.tab_index == 0 { 3 } else { state.tab_index - 1 }
        }
        KeyCode::Char('c') => copy_step_field(state, |s| s.commit_id.clone(), "id"),
        KeyCode::Char('y') => copy_step_field(state, |s| s.url.clone(), "url"),
        KeyCode::Esc => state.view.brush = None,
        code => match state.view_mode {
            ViewMode::Narrative => handle_narrative_key(code, state, commits),
            _ => handle_selection_key(code, shift, state),
        },
    }

    Ok(false)
}

/// Slider and brush movement; a slider move supersedes the brush so at
/// most one selection mechanism drives the displayed subset.
fn handle_selection_key(code: KeyCode, shift: bool, state: &mut TuiState) {
    let slider_step = if shift { 10.0 } else { 1.0 };

    match code {
        KeyCode::Char('b') => {
            state.view.brush = match state.view.brush {
                Some(_) => None,
                None => Some(BrushRect::from_corners((40.0, 40.0), (60.0, 60.0))),
            };
        }
        KeyCode::Left | KeyCode::Right | KeyCode::Up | KeyCode::Down => {
            let (dx, dy) = match code {
                KeyCode::Left => (-BRUSH_STEP, 0.0),
                KeyCode::Right => (BRUSH_STEP, 0.0),
                KeyCode::Up => (0.0, BRUSH_STEP),
                KeyCode::Down => (0.0, -BRUSH_STEP),
                _ => unreachable!(),
            };
            match &mut state.view.brush {
                Some(rect) => move_brush(rect, dx, dy),
                None => {
                    if code == KeyCode::Left {
                        state.view.slider_pos =
                            (state.view.slider_pos - slider_step).max(0.0);
                    } else if code == KeyCode::Right {
                        state.view.slider_pos =
                            (state.view.slider_pos + slider_step).min(100.0);
                    }
                }
            }
        }
        KeyCode::Char('L') => resize_brush(state, BRUSH_STEP, 0.0),
        KeyCode::Char('H') => resize_brush(state, -BRUSH_STEP, 0.0),
        KeyCode::Char('K') => resize_brush(state, 0.0, BRUSH_STEP),
        KeyCode::Char('J') => resize_brush(state, 0.0, -BRUSH_STEP),
        KeyCode::Home => {
            state.view.brush = None;
            state.view.slider_pos = 0.0;
        }
        KeyCode::End => {
            state.view.brush = None;
            state.view.slider_pos = 100.0;
        }
        _ => {}
    }
}

fn move_brush(rect: &mut BrushRect, dx: f64, dy: f64) {
    let dx = dx.clamp(-rect.x0, CHART_MAX - rect.x1);
    let dy = dy.clamp(-rect.y0, CHART_MAX - rect.y1);
    rect.x0 += dx;
    rect.x1 += dx;
    rect.y0 += dy;
    rect.y1 += dy;
}

fn resize_brush(state: &mut TuiState, dw: f64, dh: f64) {
    if let Some(rect) = &mut state.view.brush {
        rect.x1 = (rect.x1 + dw).clamp(rect.x0, CHART_MAX);
        rect.y1 = (rect.y1 + dh).clamp(rect.y0, CHART_MAX);
    }
}

/// Scroll the narrative; the step under the cursor is the active step
/// and drives the time window through the shared dispatcher.
fn handle_narrative_key(code: KeyCode, state: &mut TuiState, commits: &[Commit]) {
    let last = state.steps.len().saturating_sub(1);
    let target = match code {
        KeyCode::Up => state.narrative_index.saturating_sub(1),
        KeyCode::Down => (state.narrative_index + 1).min(last),
        KeyCode::PageUp => state.narrative_index.saturating_sub(5),
        KeyCode::PageDown => (state.narrative_index + 5).min(last),
        KeyCode::Home => 0,
        KeyCode::End => last,
        _ => return,
    };

    state.narrative_index = target;
    if let Some(step) = state.tracker.enter(&state.steps, target) {
        if let Some(span) = instant_span(commits) {
            state.view.brush = None;
            state.view.slider_pos = position_for_instant(span, step.cutoff);
        }
    }
}

fn copy_step_field(
    state: &mut TuiState,
    field: impl Fn(&crate::narrative::NarrativeStep) -> String,
    label: &str,
) {
    if let Some(step) = state.steps.get(state.narrative_index) {
        match copy_to_clipboard(&field(step)) {
            Ok(_) => {
                state.status_message = Some((
                    format!("Copied {label}: {}", crate::narrative::short_id(&step.commit_id)),
                    std::time::Instant::now(),
                ));
            }
            Err(err) => {
                state.status_message =
                    Some((format!("Clipboard error: {err}"), std::time::Instant::now()));
            }
        }
    }
}

use crate::narrative::{NarrativeStep, StepTracker};
use crate::session::ViewState;

#[derive(Clone, Copy, PartialEq)]
pub enum ViewMode {
    Scatter,
    Breakdown,
    Files,
    Narrative,
}

impl ViewMode {
    pub fn from_tab(tab_index: usize) -> Self {
        match tab_index {
            0 => ViewMode::Scatter,
            1 => ViewMode::Breakdown,
            2 => ViewMode::Files,
            3 => ViewMode::Narrative,
            _ => ViewMode::Scatter,
        }
    }
}

pub struct TuiState {
    pub view: ViewState,
    pub view_mode: ViewMode,
    pub tab_index: usize,
    pub show_help: bool,
    pub narrative_index: usize,
    pub steps: Vec<NarrativeStep>,
    pub tracker: StepTracker,
    pub status_message: Option<(String, std::time::Instant)>,
}

impl TuiState {
    pub fn new(view: ViewState, steps: Vec<NarrativeStep>) -> Self {
        Self {
            view,
            view_mode: ViewMode::Scatter,
            tab_index: 0,
            show_help: false,
            narrative_index: 0,
            steps,
            tracker: StepTracker::new(),
            status_message: None,
        }
    }
}

use crate::breakdown::{compute_breakdown, Breakdown, Palette};
use crate::model::Commit;
use crate::select::{commits_in_brush, BrushRect, HourScale, TimeScale};
use crate::window::{cutoff_for_position, filter_until, instant_span};
use chrono::{DateTime, FixedOffset};

/// Chart-space extent shared by the scatter canvas and the brush.
pub const CHART_MAX: f64 = 100.0;

/// Explicit view state passed into every recomputation: slider
/// position, optional brush, and the scales used to plot. No ambient
/// globals; the renderer holds the only mutable reference.
pub struct ViewState {
    pub slider_pos: f64,
    pub brush: Option<BrushRect>,
    pub time_scale: TimeScale,
    pub hour_scale: HourScale,
    pub palette: Palette,
}

impl ViewState {
    pub fn new(commits: &[Commit]) -> Option<Self> {
        let span = instant_span(commits)?;
        Some(Self {
            slider_pos: 100.0,
            brush: None,
            time_scale: TimeScale::new(span, (0.0, CHART_MAX)),
            hour_scale: HourScale::new((0.0, 24.0), (0.0, CHART_MAX)),
            palette: Palette::new(),
        })
    }
}

/// Everything the views need for one frame, derived from the immutable
/// commit collection.
pub struct ViewData<'a> {
    pub cutoff: DateTime<FixedOffset>,
    pub windowed: Vec<&'a Commit>,
    pub brushed: Vec<&'a Commit>,
    pub active: Vec<&'a Commit>,
    pub breakdown: Breakdown,
}

/// The single dispatcher: re-derive the active subset and its breakdown
/// from the commit collection and the current view state. Every
/// interaction (slider, brush, narrative step) funnels through here so
/// the selection mechanisms cannot diverge.
pub fn recompute<'a>(commits: &'a [Commit], state: &mut ViewState) -> Option<ViewData<'a>> {
    let span = instant_span(commits)?;
    let cutoff = cutoff_for_position(span, state.slider_pos);
    let windowed = filter_until(commits, cutoff);

    let brushed = commits_in_brush(
        commits,
        &state.time_scale,
        &state.hour_scale,
        state.brush.as_ref(),
    );

    // An active brush takes precedence over the window.
    let active: Vec<&Commit> = if state.brush.is_some() {
        brushed.clone()
    } else {
        windowed.clone()
    };

    let breakdown = compute_breakdown(&active, commits, &mut state.palette);

    Some(ViewData {
        cutoff,
        windowed,
        brushed,
        active,
        breakdown,
    })
}

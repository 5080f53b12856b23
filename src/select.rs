use crate::model::Commit;
use chrono::{DateTime, FixedOffset};

/// Linear map from the commit time domain to chart x coordinates.
#[derive(Debug, Clone)]
pub struct TimeScale {
    domain: (DateTime<FixedOffset>, DateTime<FixedOffset>),
    range: (f64, f64),
}

impl TimeScale {
    pub fn new(domain: (DateTime<FixedOffset>, DateTime<FixedOffset>), range: (f64, f64)) -> Self {
        Self { domain, range }
    }

    pub fn scale(&self, instant: &DateTime<FixedOffset>) -> f64 {
        let total =
            (self.domain.1.timestamp_millis() - self.domain.0.timestamp_millis()) as f64;
        if total == 0.0 {
            return self.range.0;
        }
        let elapsed = (instant.timestamp_millis() - self.domain.0.timestamp_millis()) as f64;
        self.range.0 + elapsed / total * (self.range.1 - self.range.0)
    }
}

/// Linear map from fractional hour of day to chart y coordinates.
#[derive(Debug, Clone)]
pub struct HourScale {
    domain: (f64, f64),
    range: (f64, f64),
}

impl HourScale {
    pub fn new(domain: (f64, f64), range: (f64, f64)) -> Self {
        Self { domain, range }
    }

    pub fn scale(&self, hour_frac: f64) -> f64 {
        let total = self.domain.1 - self.domain.0;
        if total == 0.0 {
            return self.range.0;
        }
        self.range.0 + (hour_frac - self.domain.0) / total * (self.range.1 - self.range.0)
    }
}

/// Rectangular brush region in chart coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BrushRect {
    pub x0: f64,
    pub y0: f64,
    pub x1: f64,
    pub y1: f64,
}

impl BrushRect {
    /// Normalize two opposite corners into a rectangle.
    pub fn from_corners(a: (f64, f64), b: (f64, f64)) -> Self {
        Self {
            x0: a.0.min(b.0),
            y0: a.1.min(b.1),
            x1: a.0.max(b.0),
            y1: a.1.max(b.1),
        }
    }

    pub fn contains(&self, x: f64, y: f64) -> bool {
        x >= self.x0 && x <= self.x1 && y >= self.y0 && y <= self.y1
    }

    pub fn width(&self) -> f64 {
        self.x1 - self.x0
    }

    pub fn height(&self) -> f64 {
        self.y1 - self.y0
    }
}

/// Commits whose plotted position falls inside the brush, boundaries
/// inclusive. No brush means an empty selection, not the full
/// collection; callers must not confuse the two.
pub fn commits_in_brush<'a>(
    commits: &'a [Commit],
    time_scale: &TimeScale,
    hour_scale: &HourScale,
    brush: Option<&BrushRect>,
) -> Vec<&'a Commit> {
    let Some(rect) = brush else {
        return Vec::new();
    };
    commits
        .iter()
        .filter(|c| rect.contains(time_scale.scale(&c.datetime), hour_scale.scale(c.hour_frac)))
        .collect()
}

use crate::model::Commit;
use chrono::{DateTime, FixedOffset};

/// Earliest and latest commit instants, or `None` for an empty collection.
pub fn instant_span(commits: &[Commit]) -> Option<(DateTime<FixedOffset>, DateTime<FixedOffset>)> {
    let min = commits.iter().map(|c| c.datetime).min()?;
    let max = commits.iter().map(|c| c.datetime).max()?;
    Some((min, max))
}

/// Commits with instant at or before `cutoff`. Pure; monotonic in the
/// cutoff: a later cutoff always yields a superset.
pub fn filter_until<'a>(
    commits: &'a [Commit],
    cutoff: DateTime<FixedOffset>,
) -> Vec<&'a Commit> {
    commits.iter().filter(|c| c.datetime <= cutoff).collect()
}

/// Map a slider position in [0, 100] linearly onto the commit span.
/// Position 100 lands on the latest instant, so every commit is included.
pub fn cutoff_for_position(
    span: (DateTime<FixedOffset>, DateTime<FixedOffset>),
    position: f64,
) -> DateTime<FixedOffset> {
    let (min, max) = span;
    let position = position.clamp(0.0, 100.0);
    let total = (max.timestamp_millis() - min.timestamp_millis()) as f64;
    let offset_ms = (total * position / 100.0).round() as i64;
    min + chrono::Duration::milliseconds(offset_ms)
}

/// Inverse of `cutoff_for_position`: the slider position whose cutoff is
/// `instant`, clamped to [0, 100].
pub fn position_for_instant(
    span: (DateTime<FixedOffset>, DateTime<FixedOffset>),
    instant: DateTime<FixedOffset>,
) -> f64 {
    let (min, max) = span;
    let total = (max.timestamp_millis() - min.timestamp_millis()) as f64;
    if total == 0.0 {
        return 100.0;
    }
    let elapsed = (instant.timestamp_millis() - min.timestamp_millis()) as f64;
    (elapsed / total * 100.0).clamp(0.0, 100.0)
}

use chrono::{DateTime, Duration, FixedOffset, Timelike};
use locmap::aggregate::{group_commits, group_commits_chronological};
use locmap::breakdown::{compute_breakdown, Breakdown, Palette};
use locmap::loader::load_line_changes;
use locmap::model::{hour_frac, Commit, DateRange, LineChange};
use locmap::select::{commits_in_brush, BrushRect, HourScale, TimeScale};
use locmap::util::ExcludeMatcher;
use locmap::window::{cutoff_for_position, filter_until, instant_span};
use pretty_assertions::assert_eq;
use std::io::Write;

const URL_BASE: &str = "https://example.com/commit/";

fn changes_from_csv(body: &str) -> Vec<LineChange> {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    let header = "commit,file,line,depth,length,date,time,timezone,datetime,author\n";
    file.write_all(header.as_bytes()).unwrap();
    file.write_all(body.as_bytes()).unwrap();
    file.flush().unwrap();

    load_line_changes(
        file.path(),
        &DateRange::new(),
        &ExcludeMatcher::new(&[]).unwrap(),
        false,
    )
    .unwrap()
}

/// Two commits: c1 with 3 lines of `a.js` at 09:30, c2 with 2 lines of
/// `b.css` at 14:15 the next day.
fn scenario_changes() -> Vec<LineChange> {
    changes_from_csv(concat!(
        "c1,a.js,1,0,10,2024-01-01,09:30,-05:00,2024-01-01T09:30:00-05:00,ada\n",
        "c1,a.js,2,1,20,2024-01-01,09:30,-05:00,2024-01-01T09:30:00-05:00,ada\n",
        "c1,a.js,3,1,30,2024-01-01,09:30,-05:00,2024-01-01T09:30:00-05:00,ada\n",
        "c2,b.css,1,0,12,2024-01-02,14:15,-05:00,2024-01-02T14:15:00-05:00,ada\n",
        "c2,b.css,2,0,14,2024-01-02,14:15,-05:00,2024-01-02T14:15:00-05:00,ada\n",
    ))
}

fn scenario_commits() -> Vec<Commit> {
    group_commits_chronological(&scenario_changes(), URL_BASE)
}

fn at(rfc3339: &str) -> DateTime<FixedOffset> {
    DateTime::parse_from_rfc3339(rfc3339).unwrap()
}

#[test]
fn concrete_scenario_aggregates_two_commits() {
    let commits = scenario_commits();
    assert_eq!(commits.len(), 2);

    let c1 = &commits[0];
    assert_eq!(c1.id, "c1");
    assert_eq!(c1.url, format!("{URL_BASE}c1"));
    assert_eq!(c1.total_lines, 3);
    assert_eq!(c1.hour_frac, 9.5);
    assert_eq!(c1.total_lines, c1.lines.len());

    let c2 = &commits[1];
    assert_eq!(c2.id, "c2");
    assert_eq!(c2.total_lines, 2);
    assert_eq!(c2.hour_frac, 14.25);
}

#[test]
fn window_filter_cuts_at_instant() {
    let commits = scenario_commits();
    let subset = filter_until(&commits, at("2024-01-01T23:59:00-05:00"));
    let ids: Vec<&str> = subset.iter().map(|c| c.id.as_str()).collect();
    assert_eq!(ids, vec!["c1"]);
}

#[test]
fn window_filter_is_monotonic() {
    let commits = scenario_commits();
    let span = instant_span(&commits).unwrap();

    let mut previous: Vec<String> = Vec::new();
    for position in [0.0, 10.0, 25.0, 50.0, 75.0, 99.0, 100.0] {
        let cutoff = cutoff_for_position(span, position);
        let ids: Vec<String> = filter_until(&commits, cutoff)
            .iter()
            .map(|c| c.id.clone())
            .collect();
        for id in &previous {
            assert!(ids.contains(id), "position {position} dropped {id}");
        }
        previous = ids;
    }
}

#[test]
fn window_filter_endpoints() {
    let commits = scenario_commits();
    let (min, max) = instant_span(&commits).unwrap();

    assert_eq!(filter_until(&commits, max).len(), commits.len());
    assert!(filter_until(&commits, min - Duration::seconds(1)).is_empty());
    // Inclusive comparison: the earliest commit is in at its own instant.
    assert_eq!(filter_until(&commits, min).len(), 1);
}

#[test]
fn position_hundred_includes_every_commit() {
    let commits = scenario_commits();
    let span = instant_span(&commits).unwrap();
    let cutoff = cutoff_for_position(span, 100.0);
    assert_eq!(filter_until(&commits, cutoff).len(), commits.len());
}

#[test]
fn aggregation_is_idempotent_on_regrouping() {
    let commits = scenario_commits();
    let flattened: Vec<LineChange> = commits.iter().flat_map(|c| c.lines.clone()).collect();
    let regrouped = group_commits(&flattened, URL_BASE);

    assert_eq!(commits.len(), regrouped.len());
    for (a, b) in commits.iter().zip(regrouped.iter()) {
        assert_eq!(a.id, b.id);
        assert_eq!(a.total_lines, b.total_lines);
        assert_eq!(a.hour_frac, b.hour_frac);
    }
}

#[test]
fn hour_frac_recomputes_for_every_minute_of_day() {
    let offset = FixedOffset::west_opt(5 * 3600).unwrap();
    for minute_of_day in 0..1440u32 {
        let base = at("2024-01-01T00:00:00-05:00").with_timezone(&offset)
            + Duration::minutes(minute_of_day as i64);
        let frac = hour_frac(&base);
        assert!((0.0..24.0).contains(&frac));
        assert_eq!(frac, base.hour() as f64 + base.minute() as f64 / 60.0);
    }
}

fn full_breakdown(commits: &[Commit]) -> Breakdown {
    let subset: Vec<&Commit> = commits.iter().collect();
    compute_breakdown(&subset, commits, &mut Palette::new())
}

#[test]
fn breakdown_counts_and_percentages() {
    let commits = scenario_commits();
    let breakdown = full_breakdown(&commits);

    assert_eq!(breakdown.total_lines, 5);
    let js = breakdown.categories.iter().find(|c| c.category == "js").unwrap();
    assert_eq!(js.lines, 3);
    assert_eq!(js.percentage, 60.0);
    let css = breakdown.categories.iter().find(|c| c.category == "css").unwrap();
    assert_eq!(css.lines, 2);
    assert_eq!(css.percentage, 40.0);

    let sum: f64 = breakdown.categories.iter().map(|c| c.percentage).sum();
    assert!((sum - 100.0).abs() <= 0.1);
}

#[test]
fn breakdown_of_empty_subset_falls_back_to_full_collection() {
    let commits = scenario_commits();
    let full = full_breakdown(&commits);
    let fallback = compute_breakdown(&[], &commits, &mut Palette::new());

    assert_eq!(fallback.total_lines, full.total_lines);
    for (a, b) in full.categories.iter().zip(fallback.categories.iter()) {
        assert_eq!(a.category, b.category);
        assert_eq!(a.lines, b.lines);
        assert_eq!(a.percentage, b.percentage);
    }
}

#[test]
fn palette_assignment_is_stable_across_recomputation() {
    let commits = scenario_commits();
    let mut palette = Palette::new();
    let subset: Vec<&Commit> = commits.iter().collect();

    let first = compute_breakdown(&subset, &commits, &mut palette);
    let only_c1: Vec<&Commit> = commits.iter().take(1).collect();
    let second = compute_breakdown(&only_c1, &commits, &mut palette);

    let color_in = |b: &Breakdown, cat: &str| {
        b.categories.iter().find(|c| c.category == cat).map(|c| c.color.clone())
    };
    assert_eq!(color_in(&first, "js"), color_in(&second, "js"));
}

#[test]
fn brush_selection_is_boundary_inclusive() {
    let commits = scenario_commits();
    let span = instant_span(&commits).unwrap();
    let time_scale = TimeScale::new(span, (0.0, 100.0));
    let hour_scale = HourScale::new((0.0, 24.0), (0.0, 100.0));

    let c1 = &commits[0];
    let x = time_scale.scale(&c1.datetime);
    let y = hour_scale.scale(c1.hour_frac);

    // Point sitting exactly on the rectangle boundary is selected.
    let exact = BrushRect::from_corners((x, y), (x + 2.0, y + 2.0));
    let ids: Vec<&str> = commits_in_brush(&commits, &time_scale, &hour_scale, Some(&exact))
        .iter()
        .map(|c| c.id.as_str())
        .collect();
    assert_eq!(ids, vec!["c1"]);

    // Shrinking any side past the point excludes it.
    let shrunk = [
        BrushRect::from_corners((x + 1.0, y), (x + 2.0, y + 2.0)),
        BrushRect::from_corners((x, y + 1.0), (x + 2.0, y + 2.0)),
        BrushRect::from_corners((x - 2.0, y), (x - 1.0, y + 2.0)),
        BrushRect::from_corners((x, y - 2.0), (x + 2.0, y - 1.0)),
    ];
    for rect in shrunk {
        assert!(commits_in_brush(&commits, &time_scale, &hour_scale, Some(&rect)).is_empty());
    }
}

#[test]
fn absent_brush_selects_nothing() {
    let commits = scenario_commits();
    let span = instant_span(&commits).unwrap();
    let time_scale = TimeScale::new(span, (0.0, 100.0));
    let hour_scale = HourScale::new((0.0, 24.0), (0.0, 100.0));

    assert!(commits_in_brush(&commits, &time_scale, &hour_scale, None).is_empty());
}

#[test]
fn empty_input_yields_empty_collection() {
    let commits = group_commits_chronological(&[], URL_BASE);
    assert!(commits.is_empty());
    assert!(instant_span(&commits).is_none());
}

#[test]
fn grouping_preserves_first_encounter_order() {
    // c2 rows appear first in the input; encounter order keeps c2 first.
    let changes = changes_from_csv(concat!(
        "c2,b.css,1,0,12,2024-01-02,14:15,-05:00,2024-01-02T14:15:00-05:00,ada\n",
        "c1,a.js,1,0,10,2024-01-01,09:30,-05:00,2024-01-01T09:30:00-05:00,ada\n",
        "c2,b.css,2,0,14,2024-01-02,14:15,-05:00,2024-01-02T14:15:00-05:00,ada\n",
    ));
    let grouped = group_commits(&changes, URL_BASE);
    let ids: Vec<&str> = grouped.iter().map(|c| c.id.as_str()).collect();
    assert_eq!(ids, vec!["c2", "c1"]);
    assert_eq!(grouped[0].total_lines, 2);
}

#[test]
fn malformed_numeric_field_fails_the_load() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "commit,file,line,depth,length,date,time,timezone,datetime,author").unwrap();
    writeln!(file, "c1,a.js,not-a-number,0,10,2024-01-01,09:30,-05:00,2024-01-01T09:30:00-05:00,ada").unwrap();
    file.flush().unwrap();

    let result = load_line_changes(
        file.path(),
        &DateRange::new(),
        &ExcludeMatcher::new(&[]).unwrap(),
        false,
    );
    assert!(result.is_err());
}

#[test]
fn missing_header_column_fails_the_load() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "commit,file,line,depth,length,date,time,timezone,author").unwrap();
    file.flush().unwrap();

    let result = load_line_changes(
        file.path(),
        &DateRange::new(),
        &ExcludeMatcher::new(&[]).unwrap(),
        false,
    );
    assert!(result.is_err());
}

use crate::aggregate::group_commits_chronological;
use crate::cli::CommonArgs;
use crate::error::Result;
use crate::loader::load_line_changes;
use crate::model::{Commit, LineChange, StatsOutput, SCHEMA_VERSION};
use crate::util::{format_hour_ampm, weekday_label};
use anyhow::Context;
use chrono::{Datelike, Utc};
use console::style;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Summary {
    pub total_lines: usize,
    pub total_commits: usize,
    pub avg_lines_per_commit: f64,
    pub typical_hour: Option<String>,
    pub typical_day: Option<String>,
}

/// Aggregate summary over the whole collection: total lines of code,
/// commit count, mean commit size, and the typical hour and weekday.
pub fn compute_summary(changes: &[LineChange], commits: &[Commit]) -> Summary {
    let total_commits = commits.len();

    let avg_lines_per_commit = if total_commits == 0 {
        0.0
    } else {
        let sum: usize = commits.iter().map(|c| c.total_lines).sum();
        sum as f64 / total_commits as f64
    };

    let typical_hour = if total_commits == 0 {
        None
    } else {
        let mean: f64 =
            commits.iter().map(|c| c.hour_frac).sum::<f64>() / total_commits as f64;
        Some(format_hour_ampm(mean))
    };

    let typical_day = most_frequent_weekday(commits);

    Summary {
        total_lines: changes.len(),
        total_commits,
        avg_lines_per_commit,
        typical_hour,
        typical_day,
    }
}

/// Most frequent author-local weekday, from the calendar `date` column.
fn most_frequent_weekday(commits: &[Commit]) -> Option<String> {
    let mut counts: HashMap<chrono::Weekday, usize> = HashMap::new();
    for commit in commits {
        *counts.entry(commit.date.weekday()).or_insert(0) += 1;
    }
    counts
        .into_iter()
        .max_by(|a, b| {
            a.1.cmp(&b.1)
                .then_with(|| b.0.num_days_from_sunday().cmp(&a.0.num_days_from_sunday()))
        })
        .map(|(day, _)| weekday_label(day).to_string())
}

pub fn exec(common: CommonArgs, json: bool) -> anyhow::Result<()> {
    let range = common.resolve_range().context("Failed to resolve date range")?;
    let exclude = common.exclude_matcher().context("Failed to build exclude matcher")?;

    let changes = load_line_changes(&common.input, &range, &exclude, !json)
        .context("Failed to load line log")?;
    let commits = group_commits_chronological(&changes, &common.url_base);
    let summary = compute_summary(&changes, &commits);

    if json {
        output_json(&summary, &common)?;
    } else {
        output_summary(&summary)?;
    }

    Ok(())
}

fn output_json(summary: &Summary, common: &CommonArgs) -> Result<()> {
    let output = StatsOutput {
        version: SCHEMA_VERSION,
        generated_at: Utc::now(),
        input_path: common.input.to_string_lossy().to_string(),
        since: common.since.clone(),
        until: common.until.clone(),
        summary: summary.clone(),
    };
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

fn output_summary(summary: &Summary) -> Result<()> {
    println!("{}", style("Line Log Summary").bold());
    println!("{}", "─".repeat(40));
    println!("Total LOC: {}", style(summary.total_lines).cyan());
    println!("Total commits: {}", style(summary.total_commits).cyan());
    println!(
        "Average lines / commit: {}",
        style(format!("{:.2}", summary.avg_lines_per_commit)).cyan()
    );
    if let Some(hour) = &summary.typical_hour {
        println!("Typical commit hour: {}", style(hour).yellow());
    }
    if let Some(day) = &summary.typical_day {
        println!("Typical commit day: {}", style(day).yellow());
    }
    Ok(())
}

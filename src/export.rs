use crate::aggregate::group_commits_chronological;
use crate::cli::CommonArgs;
use crate::error::Result;
use crate::loader::load_line_changes;
use crate::model::{Commit, CommitEntry, CommitsOutput, SCHEMA_VERSION};
use anyhow::Context;
use chrono::Utc;
use std::collections::HashSet;

pub fn exec(common: CommonArgs, json: bool, ndjson: bool) -> anyhow::Result<()> {
    let range = common.resolve_range().context("Failed to resolve date range")?;
    let exclude = common.exclude_matcher().context("Failed to build exclude matcher")?;

    let changes = load_line_changes(&common.input, &range, &exclude, !json && !ndjson)
        .context("Failed to load line log")?;
    let commits = group_commits_chronological(&changes, &common.url_base);
    let entries = prepare_entries(&commits);

    if json {
        output_json(&entries, &common)?;
    } else if ndjson {
        output_ndjson(&entries)?;
    } else {
        output_summary(&commits)?;
    }

    Ok(())
}

fn prepare_entries(commits: &[Commit]) -> Vec<CommitEntry> {
    commits
        .iter()
        .map(|c| CommitEntry {
            id: c.id.clone(),
            url: c.url.clone(),
            author: c.author.clone(),
            datetime: c.datetime,
            hour_frac: c.hour_frac,
            total_lines: c.total_lines,
            files_touched: c.distinct_files(),
        })
        .collect()
}

fn output_json(entries: &[CommitEntry], common: &CommonArgs) -> Result<()> {
    let output = CommitsOutput {
        version: SCHEMA_VERSION,
        generated_at: Utc::now(),
        input_path: common.input.to_string_lossy().to_string(),
        since: common.since.clone(),
        until: common.until.clone(),
        entries: entries.to_vec(),
    };
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

fn output_ndjson(entries: &[CommitEntry]) -> Result<()> {
    for entry in entries {
        println!("{}", serde_json::to_string(entry)?);
    }
    Ok(())
}

fn output_summary(commits: &[Commit]) -> Result<()> {
    use console::style;

    println!("{}", style("Commit Summary").bold());
    println!("{}", "─".repeat(50));

    let total_commits = commits.len();
    let total_lines: usize = commits.iter().map(|c| c.total_lines).sum();
    let unique_authors: HashSet<&str> = commits.iter().map(|c| c.author.as_str()).collect();
    let unique_files: HashSet<&str> = commits
        .iter()
        .flat_map(|c| c.lines.iter())
        .map(|l| l.file.as_str())
        .collect();

    println!("Total commits: {}", style(total_commits).cyan());
    println!("Total line changes: {}", style(total_lines).green());
    println!("Unique files: {}", style(unique_files.len()).cyan());
    println!("Unique authors: {}", style(unique_authors.len()).yellow());

    if let (Some(first), Some(last)) = (commits.first(), commits.last()) {
        println!(
            "Date range: {} to {}",
            style(first.datetime.format("%Y-%m-%d")).dim(),
            style(last.datetime.format("%Y-%m-%d")).dim()
        );
    }

    println!("\nUse --json or --ndjson flags to export the raw data.");
    Ok(())
}

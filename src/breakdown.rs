use crate::aggregate::group_commits_chronological;
use crate::cli::CommonArgs;
use crate::error::Result;
use crate::loader::load_line_changes;
use crate::model::{BreakdownOutput, Commit, LineChange, SCHEMA_VERSION};
use anyhow::Context;
use chrono::Utc;
use console::style;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Fixed categorical palette (Tableau 10), assigned to file types in
/// first-encountered order and recycled past ten categories.
pub const PALETTE: [&str; 10] = [
    "#4e79a7", "#f28e2c", "#e15759", "#76b7b2", "#59a14f",
    "#edc949", "#af7aa1", "#ff9da7", "#9c755f", "#bab0ab",
];

/// First-encounter color assignment, stable across recomputations as
/// long as the same categories keep appearing in the same order.
#[derive(Debug, Default, Clone)]
pub struct Palette {
    assigned: Vec<String>,
}

impl Palette {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn color_for(&mut self, category: &str) -> &'static str {
        let idx = match self.assigned.iter().position(|c| c == category) {
            Some(idx) => idx,
            None => {
                self.assigned.push(category.to_string());
                self.assigned.len() - 1
            }
        };
        PALETTE[idx % PALETTE.len()]
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryCount {
    pub category: String,
    pub lines: usize,
    pub percentage: f64,
    pub color: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileCount {
    pub path: String,
    pub lines: usize,
    pub category: String,
}

#[derive(Debug, Clone)]
pub struct Breakdown {
    pub total_lines: usize,
    pub categories: Vec<CategoryCount>,
    pub files: Vec<FileCount>,
}

/// Count a subset's line changes by file type and by file.
///
/// An empty subset falls back to the full collection so the summary
/// panel is never blank when nothing is brushed.
pub fn compute_breakdown(
    subset: &[&Commit],
    full: &[Commit],
    palette: &mut Palette,
) -> Breakdown {
    let flat: Vec<&LineChange> = if subset.is_empty() {
        full.iter().flat_map(|c| c.lines.iter()).collect()
    } else {
        subset.iter().flat_map(|c| c.lines.iter()).collect()
    };
    let total = flat.len();

    for change in &flat {
        palette.color_for(&change.file_type);
    }

    let mut by_category: HashMap<&str, usize> = HashMap::new();
    let mut by_file: HashMap<&str, (usize, &str)> = HashMap::new();
    for change in &flat {
        *by_category.entry(change.file_type.as_str()).or_insert(0) += 1;
        let entry = by_file
            .entry(change.file.as_str())
            .or_insert((0, change.file_type.as_str()));
        entry.0 += 1;
    }

    let mut categories: Vec<CategoryCount> = by_category
        .into_iter()
        .map(|(category, lines)| CategoryCount {
            category: category.to_string(),
            lines,
            percentage: percentage_of(lines, total),
            color: palette.color_for(category).to_string(),
        })
        .collect();
    categories.sort_by(|a, b| b.lines.cmp(&a.lines).then_with(|| a.category.cmp(&b.category)));

    let mut files: Vec<FileCount> = by_file
        .into_iter()
        .map(|(path, (lines, category))| FileCount {
            path: path.to_string(),
            lines,
            category: category.to_string(),
        })
        .collect();
    files.sort_by(|a, b| b.lines.cmp(&a.lines).then_with(|| a.path.cmp(&b.path)));

    Breakdown {
        total_lines: total,
        categories,
        files,
    }
}

/// Proportion of `total` as a percentage rounded to one decimal place.
pub fn percentage_of(count: usize, total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    (count as f64 / total as f64 * 1000.0).round() / 10.0
}

pub fn exec(common: CommonArgs, json: bool, ndjson: bool) -> anyhow::Result<()> {
    let range = common.resolve_range().context("Failed to resolve date range")?;
    let exclude = common.exclude_matcher().context("Failed to build exclude matcher")?;

    let changes = load_line_changes(&common.input, &range, &exclude, !json && !ndjson)
        .context("Failed to load line log")?;
    let commits = group_commits_chronological(&changes, &common.url_base);

    let subset: Vec<&Commit> = commits.iter().collect();
    let mut palette = Palette::new();
    let breakdown = compute_breakdown(&subset, &commits, &mut palette);

    if json {
        output_json(&breakdown, &common)?;
    } else if ndjson {
        output_ndjson(&breakdown)?;
    } else {
        output_table(&breakdown)?;
    }

    Ok(())
}

fn output_json(breakdown: &Breakdown, common: &CommonArgs) -> anyhow::Result<()> {
    let output = BreakdownOutput {
        version: SCHEMA_VERSION,
        generated_at: Utc::now(),
        input_path: common.input.to_string_lossy().to_string(),
        since: common.since.clone(),
        until: common.until.clone(),
        total_lines: breakdown.total_lines,
        categories: breakdown.categories.clone(),
        files: breakdown.files.clone(),
    };
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

fn output_ndjson(breakdown: &Breakdown) -> anyhow::Result<()> {
    for category in &breakdown.categories {
        println!("{}", serde_json::to_string(category)?);
    }
    for file in &breakdown.files {
        println!("{}", serde_json::to_string(file)?);
    }
    Ok(())
}

fn output_table(breakdown: &Breakdown) -> anyhow::Result<()> {
    println!(
        "{:<12} {:>8} {:>8}",
        style("Type").bold(),
        style("Lines").bold(),
        style("Share").bold()
    );
    println!("{}", "─".repeat(30));
    for c in &breakdown.categories {
        let label = if c.category.is_empty() { "(none)" } else { c.category.as_str() };
        println!("{:<12} {:>8} {:>7.1}%", label, c.lines, c.percentage);
    }

    println!();
    println!(
        "{:<50} {:>8}",
        style("File").bold(),
        style("Lines").bold()
    );
    println!("{}", "─".repeat(60));
    for f in breakdown.files.iter().take(50) {
        println!("{:<50} {:>8}", f.path, f.lines);
    }
    if breakdown.files.len() > 50 {
        println!("\n... and {} more files", breakdown.files.len() - 50);
    }
    Ok(())
}

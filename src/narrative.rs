use crate::aggregate::group_commits_chronological;
use crate::cli::CommonArgs;
use crate::error::Result;
use crate::loader::load_line_changes;
use crate::model::{Commit, NarrativeOutput, SCHEMA_VERSION};
use anyhow::Context;
use chrono::{DateTime, FixedOffset, Utc};
use console::style;
use serde::{Deserialize, Serialize};

/// One scroll-driven narrative step, carrying the sentence to display
/// and the instant that becomes the window cutoff when the step is
/// entered.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NarrativeStep {
    pub index: usize,
    pub commit_id: String,
    pub url: String,
    pub cutoff: DateTime<FixedOffset>,
    pub text: String,
}

/// Build one step per commit from the chronologically sorted collection.
pub fn build_narrative(commits: &[Commit]) -> Vec<NarrativeStep> {
    commits
        .iter()
        .enumerate()
        .map(|(index, commit)| NarrativeStep {
            index,
            commit_id: commit.id.clone(),
            url: commit.url.clone(),
            cutoff: commit.datetime,
            text: step_text(commit, index == 0),
        })
        .collect()
}

fn step_text(commit: &Commit, is_first: bool) -> String {
    let when = commit.datetime.format("%B %-d, %Y at %-I:%M %p");
    let files = commit.distinct_files();
    let file_word = if files == 1 { "file" } else { "files" };
    let line_word = if commit.total_lines == 1 { "line" } else { "lines" };
    if is_first {
        format!(
            "On {when}, the first commit landed, touching {} {line_word} across {files} {file_word}.",
            commit.total_lines
        )
    } else {
        format!(
            "On {when}, another commit followed with {} {line_word} across {files} {file_word}.",
            commit.total_lines
        )
    }
}

/// Tracks which narrative step is active. Step entries are pushed in by
/// an external observer (scroll position); the tracker holds no timer
/// and never polls.
#[derive(Debug, Default)]
pub struct StepTracker {
    current: Option<usize>,
}

impl StepTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record that the step at `index` was entered; returns its cutoff
    /// when the active step actually changed.
    pub fn enter<'a>(
        &mut self,
        steps: &'a [NarrativeStep],
        index: usize,
    ) -> Option<&'a NarrativeStep> {
        let step = steps.get(index)?;
        if self.current == Some(index) {
            return None;
        }
        self.current = Some(index);
        Some(step)
    }

    pub fn current(&self) -> Option<usize> {
        self.current
    }
}

pub fn exec(common: CommonArgs, json: bool) -> anyhow::Result<()> {
    let range = common.resolve_range().context("Failed to resolve date range")?;
    let exclude = common.exclude_matcher().context("Failed to build exclude matcher")?;

    let changes = load_line_changes(&common.input, &range, &exclude, !json)
        .context("Failed to load line log")?;
    let commits = group_commits_chronological(&changes, &common.url_base);
    let steps = build_narrative(&commits);

    if json {
        output_json(&steps, &common)?;
    } else {
        output_paragraphs(&steps)?;
    }

    Ok(())
}

fn output_json(steps: &[NarrativeStep], common: &CommonArgs) -> Result<()> {
    let output = NarrativeOutput {
        version: SCHEMA_VERSION,
        generated_at: Utc::now(),
        input_path: common.input.to_string_lossy().to_string(),
        steps: steps.to_vec(),
    };
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

fn output_paragraphs(steps: &[NarrativeStep]) -> Result<()> {
    if steps.is_empty() {
        println!("No commits to narrate");
        return Ok(());
    }
    for step in steps {
        println!(
            "{} {}",
            style(format!("[{}]", &short_id(&step.commit_id))).dim(),
            step.text
        );
        println!();
    }
    Ok(())
}

pub(crate) fn short_id(id: &str) -> &str {
    &id[..id.len().min(7)]
}

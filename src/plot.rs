use crate::aggregate::group_commits_chronological;
use crate::cli::CommonArgs;
use crate::loader::load_line_changes;
use crate::model::Commit;
use anyhow::Context;
use console::style;

pub fn exec(common: CommonArgs, interactive: bool) -> anyhow::Result<()> {
    if interactive {
        return crate::tui::run(&common).map_err(|e| anyhow::anyhow!(e));
    }

    let range = common.resolve_range().context("Failed to resolve date range")?;
    let exclude = common.exclude_matcher().context("Failed to build exclude matcher")?;

    let changes = load_line_changes(&common.input, &range, &exclude, true)
        .context("Failed to load line log")?;
    let commits = group_commits_chronological(&changes, &common.url_base);

    output_hour_histogram(&commits)
}

/// Print a textual commits-by-hour-of-day histogram.
fn output_hour_histogram(commits: &[Commit]) -> anyhow::Result<()> {
    if commits.is_empty() {
        println!("No data to display");
        return Ok(());
    }

    let mut buckets = [0usize; 24];
    for commit in commits {
        let hour = (commit.hour_frac.floor() as usize).min(23);
        buckets[hour] += 1;
    }
    let max = buckets.iter().copied().max().unwrap_or(1).max(1);

    println!("{}", style("Commits by Hour of Day").bold());
    println!("{}", "─".repeat(50));

    for (hour, &count) in buckets.iter().enumerate() {
        let intensity = ((count as f64 / max as f64) * 5.0) as u32;
        let glyph = match intensity {
            0 if count == 0 => " ",
            0 | 1 => "▁",
            2 => "▃",
            3 => "▅",
            4 => "▇",
            _ => "█",
        };
        println!(
            "{hour:>02}:00 {} commits: {count:>4}",
            style(glyph).green()
        );
    }

    println!("\n{} commits total", commits.len());
    println!("Use --interactive for the scatter view.");
    Ok(())
}

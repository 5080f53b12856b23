use crate::model::{hour_frac, Commit, LineChange};
use std::collections::HashMap;

/// Group line changes into one commit per identifier.
///
/// Grouping is stable: groups appear in first-encounter order of the
/// input, and each commit's scalar fields come from its group's first
/// row (all rows of one commit share them by construction).
pub fn group_commits(changes: &[LineChange], url_base: &str) -> Vec<Commit> {
    let mut group_of: HashMap<&str, usize> = HashMap::new();
    let mut groups: Vec<Vec<LineChange>> = Vec::new();

    for change in changes {
        match group_of.get(change.commit.as_str()) {
            Some(&i) => groups[i].push(change.clone()),
            None => {
                group_of.insert(change.commit.as_str(), groups.len());
                groups.push(vec![change.clone()]);
            }
        }
    }

    groups
        .into_iter()
        .map(|lines| {
            let first = &lines[0];
            Commit {
                id: first.commit.clone(),
                url: format!("{url_base}{}", first.commit),
                author: first.author.clone(),
                date: first.date,
                time: first.time.clone(),
                timezone: first.timezone.clone(),
                datetime: first.datetime,
                hour_frac: hour_frac(&first.datetime),
                total_lines: lines.len(),
                lines,
            }
        })
        .collect()
}

/// Order commits by ascending instant, ties broken by identifier, so
/// the scatter plot and narrative share one chronological layout.
pub fn sort_chronological(commits: &mut [Commit]) {
    commits.sort_by(|a, b| {
        a.datetime
            .timestamp_millis()
            .cmp(&b.datetime.timestamp_millis())
            .then_with(|| a.id.cmp(&b.id))
    });
}

/// Group and chronologically order in one step.
pub fn group_commits_chronological(changes: &[LineChange], url_base: &str) -> Vec<Commit> {
    let mut commits = group_commits(changes, url_base);
    sort_chronological(&mut commits);
    commits
}

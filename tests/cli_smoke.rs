use assert_cmd::prelude::*;
use std::fs;
use std::path::Path;
use std::process::Command;
use tempfile::tempdir;

const CSV: &str = "\
commit,file,line,depth,length,date,time,timezone,datetime,author
c1,src/a.js,1,0,10,2024-01-01,09:30,-05:00,2024-01-01T09:30:00-05:00,ada
c1,src/a.js,2,1,20,2024-01-01,09:30,-05:00,2024-01-01T09:30:00-05:00,ada
c1,src/a.js,3,1,30,2024-01-01,09:30,-05:00,2024-01-01T09:30:00-05:00,ada
c2,style/b.css,1,0,12,2024-01-02,14:15,-05:00,2024-01-02T14:15:00-05:00,ada
c2,style/b.css,2,0,14,2024-01-02,14:15,-05:00,2024-01-02T14:15:00-05:00,ada
";

fn write_log(dir: &Path) -> std::path::PathBuf {
    let path = dir.join("loc.csv");
    fs::write(&path, CSV).unwrap();
    path
}

fn locmap() -> Command {
    Command::cargo_bin("locmap").unwrap()
}

#[test]
fn stats_json_reports_totals() {
    let dir = tempdir().unwrap();
    let input = write_log(dir.path());

    let mut cmd = locmap();
    cmd.arg("--input").arg(&input).args(["stats", "--json"]);
    let out = cmd.assert().success().get_output().stdout.clone();
    let v: serde_json::Value = serde_json::from_slice(&out).unwrap();

    assert_eq!(v["summary"]["total_lines"].as_u64(), Some(5));
    assert_eq!(v["summary"]["total_commits"].as_u64(), Some(2));
    assert_eq!(v["summary"]["avg_lines_per_commit"].as_f64(), Some(2.5));
}

#[test]
fn breakdown_json_outputs_categories() {
    let dir = tempdir().unwrap();
    let input = write_log(dir.path());

    let mut cmd = locmap();
    cmd.arg("--input").arg(&input).args(["breakdown", "--json"]);
    let out = cmd.assert().success().get_output().stdout.clone();
    let v: serde_json::Value = serde_json::from_slice(&out).unwrap();

    let categories = v["categories"].as_array().unwrap();
    assert_eq!(categories.len(), 2);
    assert_eq!(categories[0]["category"].as_str(), Some("js"));
    assert_eq!(categories[0]["percentage"].as_f64(), Some(60.0));
}

#[test]
fn commits_json_outputs_chronological_entries() {
    let dir = tempdir().unwrap();
    let input = write_log(dir.path());

    let mut cmd = locmap();
    cmd.arg("--input").arg(&input).args(["commits", "--json"]);
    let out = cmd.assert().success().get_output().stdout.clone();
    let v: serde_json::Value = serde_json::from_slice(&out).unwrap();

    let entries = v["entries"].as_array().unwrap();
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0]["id"].as_str(), Some("c1"));
    assert_eq!(entries[0]["hour_frac"].as_f64(), Some(9.5));
    assert_eq!(entries[1]["id"].as_str(), Some("c2"));
}

#[test]
fn commits_ndjson_outputs_one_line_per_commit() {
    let dir = tempdir().unwrap();
    let input = write_log(dir.path());

    let mut cmd = locmap();
    cmd.arg("--input").arg(&input).args(["commits", "--ndjson"]);
    let out = cmd.assert().success().get_output().stdout.clone();
    let lines: Vec<_> = out
        .split(|&b| b == b'\n')
        .filter(|l| !l.is_empty())
        .collect();
    assert_eq!(lines.len(), 2);
    for line in lines {
        let _: serde_json::Value = serde_json::from_slice(line).unwrap();
    }
}

#[test]
fn narrative_json_marks_first_step() {
    let dir = tempdir().unwrap();
    let input = write_log(dir.path());

    let mut cmd = locmap();
    cmd.arg("--input").arg(&input).args(["narrative", "--json"]);
    let out = cmd.assert().success().get_output().stdout.clone();
    let v: serde_json::Value = serde_json::from_slice(&out).unwrap();

    let steps = v["steps"].as_array().unwrap();
    assert_eq!(steps.len(), 2);
    assert!(steps[0]["text"].as_str().unwrap().contains("first commit"));
    assert!(!steps[1]["text"].as_str().unwrap().contains("first commit"));
}

#[test]
fn plot_prints_hour_histogram() {
    let dir = tempdir().unwrap();
    let input = write_log(dir.path());

    let mut cmd = locmap();
    cmd.arg("--input").arg(&input).arg("plot");
    let out = cmd.assert().success().get_output().stdout.clone();
    let text = String::from_utf8_lossy(&out);
    assert!(text.contains("Commits by Hour of Day"));
}

#[test]
fn until_flag_restricts_the_window() {
    let dir = tempdir().unwrap();
    let input = write_log(dir.path());

    let mut cmd = locmap();
    cmd.arg("--input")
        .arg(&input)
        .args(["--until", "2024-01-02", "commits", "--json"]);
    let out = cmd.assert().success().get_output().stdout.clone();
    let v: serde_json::Value = serde_json::from_slice(&out).unwrap();

    let entries = v["entries"].as_array().unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0]["id"].as_str(), Some("c1"));
}

#[test]
fn exclude_glob_drops_matching_paths() {
    let dir = tempdir().unwrap();
    let input = write_log(dir.path());

    let mut cmd = locmap();
    cmd.arg("--input")
        .arg(&input)
        .args(["--exclude", "*.css", "stats", "--json"]);
    let out = cmd.assert().success().get_output().stdout.clone();
    let v: serde_json::Value = serde_json::from_slice(&out).unwrap();

    assert_eq!(v["summary"]["total_lines"].as_u64(), Some(3));
    assert_eq!(v["summary"]["total_commits"].as_u64(), Some(1));
}

#[test]
fn malformed_row_aborts_with_error() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("loc.csv");
    fs::write(
        &path,
        "commit,file,line,depth,length,date,time,timezone,datetime,author\n\
         c1,a.js,x,0,10,2024-01-01,09:30,-05:00,2024-01-01T09:30:00-05:00,ada\n",
    )
    .unwrap();

    let mut cmd = locmap();
    cmd.arg("--input").arg(&path).args(["stats", "--json"]);
    cmd.assert().failure();
}

#[test]
fn invalid_range_is_rejected() {
    let dir = tempdir().unwrap();
    let input = write_log(dir.path());

    let mut cmd = locmap();
    cmd.arg("--input")
        .arg(&input)
        .args(["--since", "2024-02-01", "--until", "2024-01-01", "stats"]);
    cmd.assert().failure();
}

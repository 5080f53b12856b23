use chrono::{DateTime, FixedOffset, NaiveDate, Timelike, Utc};
use serde::{Deserialize, Serialize};

pub const SCHEMA_VERSION: u32 = 1;

/// One line-level edit event belonging to exactly one commit.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LineChange {
    pub commit: String,
    pub file: String,
    pub line: u32,
    pub depth: u32,
    pub length: u32,
    pub author: String,
    pub date: NaiveDate,
    pub time: String,
    pub timezone: String,
    pub datetime: DateTime<FixedOffset>,
    pub file_type: String,
}

/// Aggregate of all line changes sharing one commit identifier.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Commit {
    pub id: String,
    pub url: String,
    pub author: String,
    pub date: NaiveDate,
    pub time: String,
    pub timezone: String,
    pub datetime: DateTime<FixedOffset>,
    pub hour_frac: f64,
    pub total_lines: usize,
    pub lines: Vec<LineChange>,
}

impl Commit {
    pub fn distinct_files(&self) -> usize {
        let mut paths: Vec<&str> = self.lines.iter().map(|l| l.file.as_str()).collect();
        paths.sort_unstable();
        paths.dedup();
        paths.len()
    }
}

/// Fractional hour of day for a timestamp, in its own offset.
pub fn hour_frac(datetime: &DateTime<FixedOffset>) -> f64 {
    datetime.hour() as f64 + datetime.minute() as f64 / 60.0
}

#[derive(Debug, Clone)]
pub struct DateRange {
    pub since: Option<DateTime<Utc>>,
    pub until: Option<DateTime<Utc>>,
}

impl DateRange {
    pub fn new() -> Self {
        Self { since: None, until: None }
    }

    pub fn with_since(mut self, since: DateTime<Utc>) -> Self {
        self.since = Some(since);
        self
    }

    pub fn with_until(mut self, until: DateTime<Utc>) -> Self {
        self.until = Some(until);
        self
    }

    pub fn contains(&self, timestamp: &DateTime<FixedOffset>) -> bool {
        if let Some(since) = self.since {
            if timestamp < &since {
                return false;
            }
        }
        if let Some(until) = self.until {
            if timestamp > &until {
                return false;
            }
        }
        true
    }
}

impl Default for DateRange {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommitEntry {
    pub id: String,
    pub url: String,
    pub author: String,
    pub datetime: DateTime<FixedOffset>,
    pub hour_frac: f64,
    pub total_lines: usize,
    pub files_touched: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommitsOutput {
    pub version: u32,
    pub generated_at: DateTime<Utc>,
    pub input_path: String,
    pub since: Option<String>,
    pub until: Option<String>,
    pub entries: Vec<CommitEntry>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BreakdownOutput {
    pub version: u32,
    pub generated_at: DateTime<Utc>,
    pub input_path: String,
    pub since: Option<String>,
    pub until: Option<String>,
    pub total_lines: usize,
    pub categories: Vec<crate::breakdown::CategoryCount>,
    pub files: Vec<crate::breakdown::FileCount>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatsOutput {
    pub version: u32,
    pub generated_at: DateTime<Utc>,
    pub input_path: String,
    pub since: Option<String>,
    pub until: Option<String>,
    pub summary: crate::stats::Summary,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NarrativeOutput {
    pub version: u32,
    pub generated_at: DateTime<Utc>,
    pub input_path: String,
    pub steps: Vec<crate::narrative::NarrativeStep>,
}

use chrono::{DateTime, NaiveDate, TimeZone, Utc, Weekday};
use ignore::gitignore::{Gitignore, GitignoreBuilder};
use std::path::Path;
use std::time::SystemTime;

use crate::error::{LocmapError, Result};

/// Lower-cased file extension used as the file-type category; empty when none.
pub fn file_type_of(path: &str) -> String {
    Path::new(path)
        .extension()
        .and_then(|s| s.to_str())
        .unwrap_or("")
        .to_lowercase()
}

const DAY_NAMES: [&str; 7] = ["Sun", "Mon", "Tues", "Wed", "Thurs", "Fri", "Sat"];

pub fn weekday_label(day: Weekday) -> &'static str {
    DAY_NAMES[day.num_days_from_sunday() as usize]
}

/// 12-hour clock label for a fractional hour, truncated to the hour.
pub fn format_hour_ampm(hour_frac: f64) -> String {
    let mut hours = hour_frac.floor() as i64;
    let am_pm = if hours >= 12 { "PM" } else { "AM" };
    if hours > 12 {
        hours -= 12;
    }
    if hours == 0 {
        hours = 12;
    }
    format!("{hours} {am_pm}")
}

/// Parse a `--since`/`--until` value: RFC3339, YYYY-MM-DD, or a
/// humantime duration interpreted as "that long ago".
pub fn parse_when(input: &str) -> Result<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(input) {
        return Ok(dt.with_timezone(&Utc));
    }

    if let Ok(date) = NaiveDate::parse_from_str(input, "%Y-%m-%d") {
        if let Some(datetime) = date.and_hms_opt(0, 0, 0) {
            return Ok(Utc.from_utc_datetime(&datetime));
        }
    }

    if let Ok(duration) = humantime::parse_duration(input) {
        let target = SystemTime::now()
            .checked_sub(duration)
            .ok_or_else(|| LocmapError::InvalidDate(format!("Duration overflow for '{input}'")))?;
        return Ok(DateTime::<Utc>::from(target));
    }

    Err(LocmapError::InvalidDate(format!(
        "Cannot parse '{input}' as RFC3339, YYYY-MM-DD, or duration"
    )))
}

/// Matcher for `--exclude` globs over line-change file paths.
pub struct ExcludeMatcher {
    matcher: Option<Gitignore>,
}

impl ExcludeMatcher {
    pub fn new(globs: &[String]) -> Result<Self> {
        if globs.is_empty() {
            return Ok(Self { matcher: None });
        }
        let mut builder = GitignoreBuilder::new("");
        for glob in globs {
            builder.add_line(None, glob)?;
        }
        Ok(Self {
            matcher: Some(builder.build()?),
        })
    }

    pub fn is_excluded(&self, path: &str) -> bool {
        match &self.matcher {
            Some(gi) => gi.matched(path, false).is_ignore(),
            None => false,
        }
    }
}

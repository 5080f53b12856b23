use crate::error::{LocmapError, Result};
use crate::model::{DateRange, LineChange};
use crate::util::{file_type_of, ExcludeMatcher};
use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, TimeZone};
use indicatif::{ProgressBar, ProgressStyle};
use std::collections::HashMap;
use std::fs;
use std::path::Path;

const REQUIRED_COLUMNS: [&str; 9] = [
    "commit", "file", "line", "depth", "length", "date", "timezone", "datetime", "author",
];

/// Column-name-to-index mapping resolved from the header row.
pub struct Header {
    index: HashMap<String, usize>,
}

impl Header {
    pub fn parse(line: &str) -> Result<Self> {
        let index: HashMap<String, usize> = split_record(line)
            .into_iter()
            .enumerate()
            .map(|(i, name)| (name.trim().to_string(), i))
            .collect();

        for column in REQUIRED_COLUMNS {
            if !index.contains_key(column) {
                return Err(LocmapError::MissingColumn(column.to_string()));
            }
        }
        Ok(Self { index })
    }

    fn get<'a>(&self, fields: &'a [String], column: &str) -> Option<&'a str> {
        self.index
            .get(column)
            .and_then(|&i| fields.get(i))
            .map(|s| s.as_str())
    }
}

/// One raw data row as a mapping from column name to string field.
pub struct Row<'a> {
    header: &'a Header,
    fields: Vec<String>,
    number: usize,
}

impl<'a> Row<'a> {
    pub fn new(header: &'a Header, fields: Vec<String>, number: usize) -> Self {
        Self { header, fields, number }
    }

    fn get(&self, column: &str) -> Result<&str> {
        self.header.get(&self.fields, column).ok_or_else(|| {
            LocmapError::MalformedRow {
                line: self.number,
                reason: format!("missing field '{column}'"),
            }
        })
    }

    fn get_u32(&self, column: &str) -> Result<u32> {
        let raw = self.get(column)?;
        raw.trim().parse::<u32>().map_err(|_| LocmapError::MalformedRow {
            line: self.number,
            reason: format!("'{raw}' is not an integer in '{column}'"),
        })
    }

    fn malformed(&self, reason: String) -> LocmapError {
        LocmapError::MalformedRow { line: self.number, reason }
    }
}

/// Parse one raw row into a typed line change.
///
/// The `datetime` column is authoritative for ordering and hour-of-day;
/// `date` + `timezone` only carry the author-local calendar date.
pub fn parse_row(row: &Row) -> Result<LineChange> {
    let commit = row.get("commit")?.to_string();
    let file = row.get("file")?.to_string();
    let line = row.get_u32("line")?;
    let depth = row.get_u32("depth")?;
    let length = row.get_u32("length")?;
    let author = row.get("author")?.to_string();
    let timezone = row.get("timezone")?.to_string();

    let date_raw = row.get("date")?;
    let date = NaiveDate::parse_from_str(date_raw.trim(), "%Y-%m-%d")
        .map_err(|_| row.malformed(format!("'{date_raw}' is not a YYYY-MM-DD date")))?;

    let offset = parse_offset(&timezone)
        .ok_or_else(|| row.malformed(format!("'{timezone}' is not a timezone offset")))?;

    let datetime_raw = row.get("datetime")?;
    let datetime = parse_instant(datetime_raw.trim(), offset)
        .ok_or_else(|| row.malformed(format!("'{datetime_raw}' is not a datetime")))?;

    let time = match row.header.get(&row.fields, "time") {
        Some(t) if !t.is_empty() => t.to_string(),
        _ => datetime.format("%H:%M").to_string(),
    };

    let file_type = file_type_of(&file);

    Ok(LineChange {
        commit,
        file,
        line,
        depth,
        length,
        author,
        date,
        time,
        timezone,
        datetime,
        file_type,
    })
}

/// Load, parse, and filter the line log at `path`.
///
/// A single malformed row fails the whole load; downstream aggregation
/// assumes well-formed numeric and date fields.
pub fn load_line_changes(
    path: &Path,
    range: &DateRange,
    exclude: &ExcludeMatcher,
    progress: bool,
) -> Result<Vec<LineChange>> {
    let content = fs::read_to_string(path)?;
    let mut lines = content.lines().enumerate();

    let (_, header_line) = lines
        .next()
        .ok_or_else(|| LocmapError::Parse(format!("{}: empty file", path.display())))?;
    let header = Header::parse(header_line)?;

    let pb = if progress {
        let pb = ProgressBar::new_spinner();
        pb.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.green} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );
        pb.set_message("Reading line log...");
        Some(pb)
    } else {
        None
    };

    let mut changes = Vec::new();
    for (idx, raw) in lines {
        if raw.trim().is_empty() {
            continue;
        }
        let row = Row::new(&header, split_record(raw), idx + 1);
        let change = parse_row(&row)?;

        if !range.contains(&change.datetime) || exclude.is_excluded(&change.file) {
            continue;
        }
        changes.push(change);

        if let Some(pb) = &pb {
            pb.inc(1);
        }
    }

    if let Some(pb) = &pb {
        pb.finish_with_message(format!("{} line changes", changes.len()));
    }

    Ok(changes)
}

/// Split one comma-separated record, honoring double-quoted fields.
fn split_record(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut field = String::new();
    let mut in_quotes = false;
    let mut chars = line.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '"' if in_quotes => {
                if chars.peek() == Some(&'"') {
                    chars.next();
                    field.push('"');
                } else {
                    in_quotes = false;
                }
            }
            '"' if field.is_empty() => in_quotes = true,
            ',' if !in_quotes => {
                fields.push(std::mem::take(&mut field));
            }
            _ => field.push(c),
        }
    }
    fields.push(field);
    fields
}

/// Parse a `+HH:MM` / `-HHMM` / `+HH` style offset.
fn parse_offset(raw: &str) -> Option<FixedOffset> {
    let raw = raw.trim();
    let (sign, rest) = match raw.strip_prefix('+') {
        Some(rest) => (1, rest),
        None => (-1, raw.strip_prefix('-')?),
    };
    let digits: String = rest.chars().filter(|c| c.is_ascii_digit()).collect();
    let (hours, minutes) = match digits.len() {
        2 => (digits.parse::<i32>().ok()?, 0),
        4 => (
            digits[..2].parse::<i32>().ok()?,
            digits[2..].parse::<i32>().ok()?,
        ),
        _ => return None,
    };
    FixedOffset::east_opt(sign * (hours * 3600 + minutes * 60))
}

fn parse_instant(raw: &str, offset: FixedOffset) -> Option<DateTime<FixedOffset>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt);
    }
    for format in ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, format) {
            return offset.from_local_datetime(&naive).single();
        }
    }
    None
}

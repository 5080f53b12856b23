use crate::error::{LocmapError, Result};
use crate::model::DateRange;
use crate::util::{parse_when, ExcludeMatcher};
use anyhow::Result as AnyResult;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "locmap")]
#[command(about = "Commit history analysis for per-line change logs")]
#[command(version)]
pub struct Cli {
    #[clap(flatten)]
    pub common: CommonArgs,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Args, Clone)]
pub struct CommonArgs {
    #[arg(long, help = "Path to the line log file", default_value = "loc.csv")]
    pub input: PathBuf,

    #[arg(
        long,
        help = "Prefix for commit reference URLs",
        default_value = "https://github.com/vis-society/lab-7/commit/"
    )]
    pub url_base: String,

    #[arg(long, help = "Keep rows at or after this instant (RFC3339, YYYY-MM-DD, or duration ago)")]
    pub since: Option<String>,

    #[arg(long, help = "Keep rows at or before this instant (RFC3339, YYYY-MM-DD, or duration ago)")]
    pub until: Option<String>,

    #[arg(long, help = "Drop rows whose file path matches this glob", value_name = "GLOB")]
    pub exclude: Vec<String>,
}

impl CommonArgs {
    pub fn resolve_range(&self) -> Result<DateRange> {
        let mut range = DateRange::new();

        let since = self.since.as_deref().map(parse_when).transpose()?;
        let until = self.until.as_deref().map(parse_when).transpose()?;

        if let (Some(s), Some(u)) = (since, until) {
            if s > u {
                return Err(LocmapError::InvalidDate(format!(
                    "Invalid range: since ({s}) is after until ({u})"
                )));
            }
        }

        if let Some(s) = since {
            range = range.with_since(s);
        }
        if let Some(u) = until {
            range = range.with_until(u);
        }

        Ok(range)
    }

    pub fn exclude_matcher(&self) -> Result<ExcludeMatcher> {
        ExcludeMatcher::new(&self.exclude)
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Summary statistics for the line log
    Stats {
        #[arg(long, help = "Output as JSON")]
        json: bool,
    },
    /// File-type and per-file breakdown
    Breakdown {
        #[arg(long, help = "Output as JSON")]
        json: bool,

        #[arg(long, help = "Output as NDJSON")]
        ndjson: bool,
    },
    /// Export aggregated commits
    Commits {
        #[arg(long, help = "Output as JSON")]
        json: bool,

        #[arg(long, help = "Output as NDJSON")]
        ndjson: bool,
    },
    /// Chronological narrative of the commit history
    Narrative {
        #[arg(long, help = "Output as JSON")]
        json: bool,
    },
    /// Commits-by-time-of-day view
    Plot {
        #[arg(long = "interactive", alias = "tui", alias = "ui", help = "Enable interactive terminal UI")]
        interactive: bool,
    },
}

impl Cli {
    pub fn parse() -> Self {
        <Self as Parser>::parse()
    }

    pub fn execute(self) -> AnyResult<()> {
        match self.command {
            Commands::Stats { json } => crate::stats::exec(self.common, json),
            Commands::Breakdown { json, ndjson } => {
                crate::breakdown::exec(self.common, json, ndjson)
            }
            Commands::Commits { json, ndjson } => crate::export::exec(self.common, json, ndjson),
            Commands::Narrative { json } => crate::narrative::exec(self.common, json),
            Commands::Plot { interactive } => crate::plot::exec(self.common, interactive),
        }
    }
}

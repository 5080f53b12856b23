use thiserror::Error;

pub type Result<T> = std::result::Result<T, LocmapError>;

#[derive(Error, Debug)]
pub enum LocmapError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("Missing column '{0}' in header")]
    MissingColumn(String),
    #[error("Malformed row {line}: {reason}")]
    MalformedRow { line: usize, reason: String },
    #[error("Invalid date: {0}")]
    InvalidDate(String),
    #[error("Parse error: {0}")]
    Parse(String),
    #[error("Exclude pattern error: {0}")]
    Exclude(#[from] ignore::Error),
}

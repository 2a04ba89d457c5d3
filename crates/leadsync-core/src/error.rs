use thiserror::Error;

use crate::resolver::Role;

/// Caller-level failures. These propagate; per-page problems never do.
#[derive(Debug, Error)]
pub enum Error {
    #[error("expected a list of pages, found {found}")]
    NotAPageList { found: &'static str },
    #[error("invalid column pattern for role '{role}': {source}")]
    InvalidPattern {
        role: Role,
        #[source]
        source: regex::Error,
    },
    #[error("invalid timestamp format '{0}'")]
    InvalidTimestampFormat(String),
    #[error(transparent)]
    Config(#[from] config::ConfigError),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

/// Reason a single page was left out of a batch.
#[derive(Debug, Error)]
pub enum PageError {
    #[error("page has no identifier")]
    MissingId,
    #[error("page does not have the expected shape: {0}")]
    Malformed(#[source] serde_json::Error),
    #[error("page has neither a date column value nor a creation time")]
    MissingTimestamp,
    #[error("timestamp '{value}' is not ISO-8601: {source}")]
    InvalidTimestamp {
        value: String,
        #[source]
        source: chrono::ParseError,
    },
}

pub type Result<T> = std::result::Result<T, Error>;

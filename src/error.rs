use std::path::{Path, PathBuf};

use rust_decimal::Decimal;
use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum Error {
    #[error("failed to parse input, reason: `{0}`")]
    ParsingFailure(String),
    #[error("`{value}` is not a valid date in format `{format}`")]
    InvalidDate { value: String, format: &'static str },
    #[error("loan record is missing the `{0}` field")]
    MissingField(&'static str),
    #[error("date range of {days} days starting at {start} is out of the supported calendar range")]
    DateOutOfRange { start: chrono::NaiveDate, days: usize },
    #[error("input file `{0}` not found")]
    InputNotFound(PathBuf),
    #[error("I/O failure on `{path}`: {reason}")]
    Io { path: PathBuf, reason: String },
    #[error("late fees of patron `{0}` exceed the representable amount")]
    FeeOverflow(String),
    #[error("daily late fee rate must not be negative, got {0}")]
    NegativeRate(Decimal),
}

impl Error {
    pub(crate) fn io(path: impl Into<PathBuf>, error: impl std::fmt::Display) -> Self {
        Error::Io {
            path: path.into(),
            reason: error.to_string(),
        }
    }

    /// Attributes a read failure from an anonymous stream to the file it came from.
    pub(crate) fn on_path(self, path: &Path) -> Self {
        match self {
            Error::Io { path: source, reason } if source.as_os_str().is_empty() => Error::Io {
                path: path.to_path_buf(),
                reason,
            },
            other => other,
        }
    }
}

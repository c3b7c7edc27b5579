//! Error types for calpost.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while loading, classifying or rendering events.
#[derive(Error, Debug)]
pub enum CalpostError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("No piped input and events file not found at {}", .0.display())]
    MissingInputSource(PathBuf),

    #[error("Could not read {}: {source}", path.display())]
    InputRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Events CSV is missing required column '{0}'")]
    MissingColumn(String),

    #[error("Row {row}: invalid {field}: {message}")]
    MalformedRow {
        row: usize,
        field: &'static str,
        message: String,
    },

    #[error("CSV error: {0}")]
    Csv(String),

    #[error("ICS parse error: {0}")]
    IcsParse(String),

    #[error("Could not write {}: {source}", path.display())]
    OutputWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl CalpostError {
    pub(crate) fn malformed(row: usize, field: &'static str, message: impl Into<String>) -> Self {
        CalpostError::MalformedRow {
            row,
            field,
            message: message.into(),
        }
    }
}

impl From<csv::Error> for CalpostError {
    fn from(e: csv::Error) -> Self {
        CalpostError::Csv(e.to_string())
    }
}

/// Result type alias for calpost operations.
pub type CalpostResult<T> = Result<T, CalpostError>;

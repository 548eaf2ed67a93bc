// file: src/error.rs
// description: Custom error types and result type aliases
// reference: https://docs.rs/thiserror

use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, PipelineError>;

#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("File operation failed for {path}: {source}")]
    FileOperation {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to decode {filename}: {message}")]
    Decode { filename: String, message: String },

    #[error("Extraction budget exceeded for {filename}: {budget}")]
    Timeout { filename: String, budget: String },

    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

impl PipelineError {
    pub fn decode(filename: &str, message: impl ToString) -> Self {
        Self::Decode {
            filename: filename.to_string(),
            message: message.to_string(),
        }
    }

    pub fn timeout(filename: &str, budget: impl ToString) -> Self {
        Self::Timeout {
            filename: filename.to_string(),
            budget: budget.to_string(),
        }
    }
}

/// Batch preconditions checked before any file is touched.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("no keywords supplied")]
    NoKeywords,

    #[error("no files supplied")]
    NoFiles,

    #[error("no files and no keywords supplied")]
    NoInput,

    #[error("{0}")]
    Invalid(String),
}

impl From<serde_json::Error> for PipelineError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages_name_the_file() {
        let err = PipelineError::decode("report.pdf", "invalid file header");
        assert_eq!(
            err.to_string(),
            "Failed to decode report.pdf: invalid file header"
        );
    }

    #[test]
    fn test_validation_messages_are_distinct() {
        assert_ne!(
            ValidationError::NoKeywords.to_string(),
            ValidationError::NoFiles.to_string()
        );
    }
}

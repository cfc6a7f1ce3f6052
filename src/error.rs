use std::path::PathBuf;

use thiserror::Error;

/// Errors raised at the edges of the gate: parsing text, loading configuration, reading files.
///
/// The decision itself never fails; see [`crate::gate::evaluator`].
#[derive(Debug, Error)]
pub enum GateError {
    /// SQL text rejected by the parser.
    #[error("SQL parse error: {0}")]
    Parse(String),
    /// Malformed configuration document.
    #[error("Invalid configuration: {0}")]
    Config(String),
    /// Ownership pattern that is not a valid regular expression.
    #[error("Invalid ownership pattern '{pattern}': {source}")]
    InvalidPattern {
        /// Pattern text as written in the configuration.
        pattern: String,
        /// Underlying regex compilation error.
        #[source]
        source: regex::Error,
    },
    /// File could not be read.
    #[error("Failed to read {}: {source}", .path.display())]
    Io {
        /// Path that failed.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
    /// Report serialization failure.
    #[error("Failed to serialize report: {0}")]
    Serialize(String),
}

impl From<sqlparser::parser::ParserError> for GateError {
    fn from(err: sqlparser::parser::ParserError) -> Self {
        GateError::Parse(err.to_string())
    }
}

impl From<serde_json::Error> for GateError {
    fn from(err: serde_json::Error) -> Self {
        GateError::Config(format!(
            "{} at line {} column {}",
            err,
            err.line(),
            err.column()
        ))
    }
}

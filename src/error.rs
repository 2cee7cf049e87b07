//! Error types for thread extraction

use std::path::PathBuf;
use thiserror::Error;

/// Errors that stop a run before any source is parsed
#[derive(Error, Debug)]
pub enum ParseError {
    /// Configuration could not be parsed or failed validation
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// Configuration file could not be read
    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Dialect marker set is unusable
    #[error("Invalid dialect marker for {field}: {details}")]
    InvalidDialect { field: String, details: String },

    /// Marker regex failed to compile
    #[error("Failed to compile marker pattern: {0}")]
    Regex(#[from] regex::Error),

    /// Discovery pattern is invalid
    #[error("Invalid discovery pattern: {0}")]
    Pattern(#[from] glob::PatternError),

    /// Records could not be serialized
    #[error("Failed to serialize records: {0}")]
    Serialize(#[from] serde_json::Error),

    /// Serialized records could not be written
    #[error("Failed to write records: {0}")]
    Write(#[from] std::io::Error),
}

/// Why a single source file was skipped by the loader
#[derive(Error, Debug)]
pub enum SourceError {
    /// File exists but could not be opened or read
    #[error("unreadable: {0}")]
    Unreadable(#[source] std::io::Error),

    /// File content is not valid UTF-8
    #[error("undecodable: {0}")]
    Undecodable(#[source] std::string::FromUtf8Error),
}

/// Result type for thread extraction operations
pub type Result<T> = std::result::Result<T, ParseError>;

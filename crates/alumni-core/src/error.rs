//! Error types for the alumni analytics engine

use std::{error::Error as StdError, fmt};

/// Main error type for the alumni analytics engine
#[derive(Debug)]
pub enum Error {
    /// I/O error
    Io(std::io::Error),

    /// Configuration error
    Configuration {
        /// Error message
        message: String,
    },

    /// Validation error
    Validation {
        /// Field that failed validation
        field: String,
        /// Validation error message
        message: String,
    },

    /// Requested page is outside the valid range for the current result set
    PageOutOfRange {
        /// Page that was requested
        requested: u32,
        /// Number of pages currently available
        total_pages: u32,
    },

    /// Page number typed by the user could not be parsed
    InvalidPageInput {
        /// Raw input text
        input: String,
    },

    /// Trend data point label that is not a recognised date
    MalformedLabel {
        /// The offending label
        label: String,
    },

    /// Serialization error
    Serialization(serde_json::Error),

    /// Other error
    Other(String),
}

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(err) => write!(f, "I/O error: {err}"),
            Self::Configuration { message } => write!(f, "Configuration error: {message}"),
            Self::Validation { field, message } => {
                write!(f, "Validation error: {field} - {message}")
            }
            Self::PageOutOfRange {
                requested,
                total_pages,
            } => write!(f, "Page {requested} is outside 1..={total_pages}"),
            Self::InvalidPageInput { input } => write!(f, "Invalid page input: {input:?}"),
            Self::MalformedLabel { label } => write!(f, "Malformed trend label: {label:?}"),
            Self::Serialization(err) => write!(f, "Serialization error: {err}"),
            Self::Other(msg) => write!(f, "{msg}"),
        }
    }
}

impl StdError for Error {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            Self::Serialization(err) => Some(err),
            _ => None,
        }
    }
}

// From implementations for automatic conversions
impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err)
    }
}

impl From<config::ConfigError> for Error {
    fn from(err: config::ConfigError) -> Self {
        Self::Configuration {
            message: err.to_string(),
        }
    }
}

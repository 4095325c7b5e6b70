//! Vessel Adaptor Library
//!
//! A Rust library for ingesting legacy vessel position reports from CSV files
//! and forwarding them as grouped outbound messages.
//!
//! This library provides tools for:
//! - Watching an input directory and detecting when files have stopped growing
//! - Parsing and validating comma-delimited position report lines
//! - Grouping validated records into outbound message batches by correlation key
//! - Resolving missing or malformed correlation identifiers against message history
//! - Reconciling delivery acknowledgments back onto the original lines for audit output

pub mod config;
pub mod constants;

// Core application modules
pub mod app {
    pub mod models;
    pub mod ports;
    pub mod services {
        pub mod correlation;
        pub mod csv_translator;
        pub mod file_processor;
        pub mod watcher;
    }
}

// CLI modules
pub mod cli {
    pub mod args;
    pub mod commands;
}

// Re-export commonly used types
pub use app::models::{AckStatus, DeliveryReceipt, VesselPayload, VesselReport};
pub use config::Config;

/// Result type alias for the vessel adaptor
pub type Result<T> = std::result::Result<T, Error>;

/// Comprehensive error types for vessel adaptor operations
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// I/O operation failed
    #[error("I/O error: {message}")]
    Io {
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// Line does not split into the expected number of fields
    #[error("Unable to translate vessel input with {found} fields. Lines should have {expected} fields")]
    FieldCount { found: usize, expected: usize },

    /// A present field fails type, length, range or pairing rules
    #[error("{message}")]
    FieldFormat { message: String },

    /// Required recipient or context identifier cannot be resolved
    #[error("Correlation error: {message}")]
    Correlation { message: String },

    /// The outbound transport call failed or returned an unusable result
    #[error("Delivery error: {message}")]
    Delivery { message: String },

    /// Configuration error
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    /// Date/time parsing error
    #[error("Date/time parsing error: {message}")]
    DateTimeParsing {
        message: String,
        #[source]
        source: chrono::ParseError,
    },

    /// Directory traversal error
    #[error("Directory traversal error: {message}")]
    DirectoryTraversal {
        message: String,
        #[source]
        source: walkdir::Error,
    },

    /// Processing interrupted
    #[error("Processing interrupted: {reason}")]
    ProcessingInterrupted { reason: String },
}

impl Error {
    /// Create an I/O error with context
    pub fn io(message: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            message: message.into(),
            source,
        }
    }

    /// Create an I/O error with a simple message
    pub fn io_error(message: impl Into<String>) -> Self {
        let message_str = message.into();
        Self::Io {
            message: message_str.clone(),
            source: std::io::Error::other(message_str),
        }
    }

    /// Create a field count error
    pub fn field_count(found: usize, expected: usize) -> Self {
        Self::FieldCount { found, expected }
    }

    /// Create a field format error
    pub fn field_format(message: impl Into<String>) -> Self {
        Self::FieldFormat {
            message: message.into(),
        }
    }

    /// Create a correlation error
    pub fn correlation(message: impl Into<String>) -> Self {
        Self::Correlation {
            message: message.into(),
        }
    }

    /// Create a delivery error
    pub fn delivery(message: impl Into<String>) -> Self {
        Self::Delivery {
            message: message.into(),
        }
    }

    /// Create a configuration error
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Create a date/time parsing error
    pub fn datetime_parsing(message: impl Into<String>, source: chrono::ParseError) -> Self {
        Self::DateTimeParsing {
            message: message.into(),
            source,
        }
    }

    /// Create a directory traversal error
    pub fn directory_traversal(message: impl Into<String>, source: walkdir::Error) -> Self {
        Self::DirectoryTraversal {
            message: message.into(),
            source,
        }
    }

    /// Create a processing interrupted error
    pub fn processing_interrupted(reason: impl Into<String>) -> Self {
        Self::ProcessingInterrupted {
            reason: reason.into(),
        }
    }

    /// True for errors that belong to a single line rather than the whole file
    pub fn is_line_error(&self) -> bool {
        matches!(
            self,
            Self::FieldCount { .. } | Self::FieldFormat { .. } | Self::DateTimeParsing { .. }
        )
    }
}

// Automatic conversions from common error types
impl From<std::io::Error> for Error {
    fn from(error: std::io::Error) -> Self {
        Self::Io {
            message: "I/O operation failed".to_string(),
            source: error,
        }
    }
}

impl From<chrono::ParseError> for Error {
    fn from(error: chrono::ParseError) -> Self {
        Self::DateTimeParsing {
            message: "Date/time parsing failed".to_string(),
            source: error,
        }
    }
}

impl From<walkdir::Error> for Error {
    fn from(error: walkdir::Error) -> Self {
        Self::DirectoryTraversal {
            message: "Directory traversal failed".to_string(),
            source: error,
        }
    }
}

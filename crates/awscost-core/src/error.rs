//! Error types for awscost
//!
//! This module defines the error types used throughout the awscost crates.
//! All errors are derived from `thiserror` for convenient error handling
//! and automatic `From` implementations.
//!
//! # Example
//!
//! ```
//! use awscost_core::error::{CostError, Result};
//!
//! fn example_function() -> Result<()> {
//!     // This will automatically convert io::Error to CostError
//!     let _file = std::fs::read_to_string("nonexistent.txt")?;
//!     Ok(())
//! }
//! ```

use chrono::NaiveDate;
use std::fmt;
use thiserror::Error;

/// Main error type for awscost operations
///
/// Every step of a run (configuration, date resolution, the Cost Explorer
/// query, normalization, file output and the S3 upload) reports failures
/// through this enum.
#[derive(Error, Debug)]
pub enum CostError {
    /// IO error occurred
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization or parsing error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// CSV serialization error
    #[error("CSV error: {0}")]
    Csv(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Invalid date format
    #[error("Invalid date format: {0}")]
    InvalidDate(String),

    /// Range whose start falls after its end
    #[error("Invalid date range: start {start} is after end {end}")]
    InvalidDateRange {
        /// First day of the range
        start: NaiveDate,
        /// Last day of the range
        end: NaiveDate,
    },

    /// Invalid timezone
    #[error("Invalid timezone: {0}")]
    InvalidTimezone(String),

    /// Cost Explorer returned something the normalizer cannot read
    #[error("Malformed cost response: {0}")]
    MalformedResponse(String),

    /// Cost amount that does not parse as a number
    #[error("Invalid amount '{amount}' for service {service}")]
    InvalidAmount {
        /// Service the amount belongs to
        service: String,
        /// The raw amount string
        amount: String,
    },

    /// Cost Explorer request failed
    #[error("Cost Explorer error: {0}")]
    CostQuery(String),

    /// S3 upload failed
    #[error("Upload of {key} failed: {message}")]
    Upload {
        /// Object key that was being written
        key: String,
        /// The error message
        message: String,
    },
}

/// Broad classification of a [`CostError`]
///
/// Lets callers tell a bad configuration apart from a failing remote service
/// without matching on every variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Missing or inconsistent settings
    Configuration,
    /// User supplied input that does not parse (dates, timezones)
    Input,
    /// AWS call failed or returned unusable data
    Remote,
    /// Local filesystem or serialization failure
    Local,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorKind::Configuration => write!(f, "configuration"),
            ErrorKind::Input => write!(f, "input"),
            ErrorKind::Remote => write!(f, "remote"),
            ErrorKind::Local => write!(f, "local"),
        }
    }
}

impl CostError {
    /// Classify this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            CostError::Config(_) => ErrorKind::Configuration,
            CostError::InvalidDate(_)
            | CostError::InvalidDateRange { .. }
            | CostError::InvalidTimezone(_) => ErrorKind::Input,
            CostError::MalformedResponse(_)
            | CostError::InvalidAmount { .. }
            | CostError::CostQuery(_)
            | CostError::Upload { .. } => ErrorKind::Remote,
            CostError::Io(_) | CostError::Json(_) | CostError::Csv(_) => ErrorKind::Local,
        }
    }

    /// Whether the failure came from an AWS service
    pub fn is_remote(&self) -> bool {
        self.kind() == ErrorKind::Remote
    }
}

/// Convenience type alias for Results in awscost
///
/// # Example
///
/// ```
/// use awscost_core::Result;
///
/// fn process_data() -> Result<String> {
///     Ok("Processed successfully".to_string())
/// }
/// ```
pub type Result<T> = std::result::Result<T, CostError>;

//! Unified error types for chataudit.
//!
//! This module provides a single [`AuditError`] enum that covers every fatal
//! error in the library. Most problems in a chat export are *not* fatal:
//! unmatched lines and unparseable dates are counted in
//! [`ParseStats`](crate::parser::ParseStats) and the batch carries on. Only
//! the cases below abort an operation.
//!
//! # Error Handling Philosophy
//!
//! - **Library users** get typed errors they can match on
//! - **Application users** get clear, actionable error messages
//! - **Developers** get source error chains for debugging

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// A specialized [`Result`] type for chataudit operations.
///
/// # Example
///
/// ```rust
/// use chataudit::error::Result;
/// use chataudit::Message;
///
/// fn my_function() -> Result<Vec<Message>> {
///     Ok(vec![])
/// }
/// ```
pub type Result<T> = std::result::Result<T, AuditError>;

/// The error type for all chataudit operations.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AuditError {
    /// An I/O error occurred.
    ///
    /// This typically happens when:
    /// - The input export or rules file doesn't exist
    /// - Permission denied
    /// - Disk is full (when writing output)
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// The input bytes are neither valid UTF-8 nor valid UTF-16.
    ///
    /// This is the only fatal error while parsing an export: nothing is
    /// returned when the text cannot be decoded.
    #[error("Could not decode {context} as UTF-8 or UTF-16 ({len} bytes)")]
    Decode {
        /// What was being decoded (file path or "input")
        context: String,
        /// Size of the rejected input
        len: usize,
    },

    /// Invalid date in a filter value.
    #[error("Invalid date '{input}'. Expected format: {expected}")]
    InvalidDate {
        /// The invalid date string that was provided
        input: String,
        /// Expected format description
        expected: &'static str,
    },

    /// Invalid year in a filter value.
    #[error("Invalid year '{input}'. Expected a four-digit year")]
    InvalidYear {
        /// The value that could not be read as a year
        input: String,
    },

    /// Invalid month in a filter value.
    #[error("Invalid month '{input}'. Expected 1-12 or a month name")]
    InvalidMonth {
        /// The value that could not be read as a month
        input: String,
    },

    /// A value doesn't match the expected structure.
    ///
    /// Raised for unknown output format names and for output formats whose
    /// cargo feature is disabled. Unknown header format names in a settings
    /// file surface as [`AuditError::Config`] instead.
    #[error("Invalid {format} format: {message}")]
    InvalidFormat {
        /// The kind of value that was expected
        format: &'static str,
        /// Description of what's wrong
        message: String,
    },

    /// The settings file could not be parsed.
    #[cfg(feature = "toml-config")]
    #[error("Invalid settings{}: {source}", path.as_ref().map(|p| format!(" in {}", p.display())).unwrap_or_default())]
    Config {
        /// The underlying TOML error
        #[source]
        source: toml::de::Error,
        /// The settings file, if loaded from disk
        path: Option<PathBuf>,
    },

    /// CSV writing error.
    #[cfg(feature = "csv-output")]
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON serialization error.
    #[cfg(feature = "json-output")]
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// UTF-8 encoding error while converting output to a string.
    #[error("UTF-8 encoding error in {context}: {source}")]
    Utf8 {
        /// Description of where the error occurred
        context: String,
        /// The underlying UTF-8 error
        #[source]
        source: std::string::FromUtf8Error,
    },
}

impl From<std::string::FromUtf8Error> for AuditError {
    fn from(err: std::string::FromUtf8Error) -> Self {
        AuditError::Utf8 {
            context: "output conversion".to_string(),
            source: err,
        }
    }
}

// ============================================================================
// Convenience constructors
// ============================================================================

impl AuditError {
    /// Creates a decode error.
    pub fn decode(context: impl Into<String>, len: usize) -> Self {
        AuditError::Decode {
            context: context.into(),
            len,
        }
    }

    /// Creates an invalid format error.
    pub fn invalid_format(format: &'static str, message: impl Into<String>) -> Self {
        AuditError::InvalidFormat {
            format,
            message: message.into(),
        }
    }

    /// Creates an invalid date error.
    pub fn invalid_date(input: impl Into<String>) -> Self {
        AuditError::InvalidDate {
            input: input.into(),
            expected: "YYYY-MM-DD or DD/MM/YYYY",
        }
    }

    /// Creates an invalid year error.
    pub fn invalid_year(input: impl Into<String>) -> Self {
        AuditError::InvalidYear {
            input: input.into(),
        }
    }

    /// Creates an invalid month error.
    pub fn invalid_month(input: impl Into<String>) -> Self {
        AuditError::InvalidMonth {
            input: input.into(),
        }
    }

    /// Creates a settings error.
    #[cfg(feature = "toml-config")]
    pub fn config(source: toml::de::Error, path: Option<PathBuf>) -> Self {
        AuditError::Config { source, path }
    }

    /// Returns `true` if this is an IO error.
    pub fn is_io(&self) -> bool {
        matches!(self, AuditError::Io(_))
    }

    /// Returns `true` if the input could not be decoded.
    pub fn is_decode(&self) -> bool {
        matches!(self, AuditError::Decode { .. })
    }

    /// Returns `true` if this is an invalid format error.
    pub fn is_invalid_format(&self) -> bool {
        matches!(self, AuditError::InvalidFormat { .. })
    }

    /// Returns `true` if this is a date, year or month filter error.
    pub fn is_invalid_date(&self) -> bool {
        matches!(
            self,
            AuditError::InvalidDate { .. }
                | AuditError::InvalidYear { .. }
                | AuditError::InvalidMonth { .. }
        )
    }
}

// ============================================================================
// Tests
// ============================================================================

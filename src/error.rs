//! Error types for the diária calculation engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for all error conditions that can occur while calculating a per-diem.

use chrono::NaiveDateTime;
use thiserror::Error;

/// The main error type for the diária calculation engine.
///
/// All operations in the engine return this error type, making it easy
/// to handle errors consistently throughout the application.
///
/// # Example
///
/// ```
/// use diaria_engine::error::EngineError;
///
/// let error = EngineError::UnknownRate {
///     rank: "XYZ".to_string(),
/// };
/// assert_eq!(error.to_string(), "No daily rate configured for rank 'XYZ'");
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// The travel interval does not end after it starts.
    #[error("Invalid travel interval: end {end} must be after start {start}")]
    InvalidRange {
        /// The start of the interval.
        start: NaiveDateTime,
        /// The end of the interval.
        end: NaiveDateTime,
    },

    /// The rank code has no entry in the base daily rate table.
    #[error("No daily rate configured for rank '{rank}'")]
    UnknownRate {
        /// The normalized rank code that was looked up.
        rank: String,
    },

    /// A timestamp could not be parsed.
    #[error("Invalid timestamp '{value}': {message}")]
    InvalidTimestamp {
        /// The raw value that failed to parse.
        value: String,
        /// A description of the parse failure.
        message: String,
    },

    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// A monetary value exceeded the decimal range.
    #[error("Amount out of range while computing {operation}")]
    AmountOverflow {
        /// The quantity being computed when the overflow occurred.
        operation: String,
    },

    /// A travel report did not contain the expected data.
    #[error("Failed to parse travel report: {message}")]
    ReportParse {
        /// A description of what was missing or malformed.
        message: String,
    },
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;

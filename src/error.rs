//! Error handling for osc-replay
//!
//! This module defines the error type and Result alias used throughout the
//! crate. Errors fall into four families:
//!
//! - **Parse errors** ([`ReplayError::MissingAddress`], [`ReplayError::InvalidFloat`]):
//!   a single log line could not be turned into a record. The loader recovers
//!   from these by skipping the line.
//! - **Empty sequence** ([`ReplayError::EmptySequence`]): nothing usable was
//!   found in the source. Fatal; replay must not start.
//! - **Transmission errors** ([`ReplayError::Transmission`], [`ReplayError::Encode`]):
//!   the transport failed. Fatal; terminates the replay loop.
//! - **Setup errors** (config, frame rate, I/O).
//!
//! Cancellation is not represented here. A stopped replay returns `Ok`.

use std::num::ParseFloatError;
use thiserror::Error;

/// Main error type for osc-replay operations
#[derive(Error, Debug)]
pub enum ReplayError {
    /// A candidate line had no `ADDRESS(...)` token
    #[error("Cannot find ADDRESS in line: {line:?}")]
    MissingAddress { line: String },

    /// A `FLOAT(...)` token matched but did not parse as a number
    #[error("Invalid FLOAT token {token:?}: {source}")]
    InvalidFloat {
        token: String,
        #[source]
        source: ParseFloatError,
    },

    /// No valid records were found in the whole source
    #[error("No valid RECEIVE entries found in {source_name}")]
    EmptySequence { source_name: String },

    /// The transport failed to deliver a message
    #[error("Transmission error: {0}")]
    Transmission(String),

    /// A record could not be encoded for the wire
    #[error("Encode error: {0}")]
    Encode(String),

    /// Frame rate must be finite and positive
    #[error("Invalid frame rate: {0} (must be a finite value > 0)")]
    InvalidFrameRate(f64),

    /// Errors related to configuration loading
    #[error("Configuration error: {0}")]
    Config(String),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic errors with context
    #[error("{context}: {source}")]
    WithContext {
        context: String,
        #[source]
        source: Box<ReplayError>,
    },
}

impl ReplayError {
    /// Add context to an error
    pub fn with_context(self, context: impl Into<String>) -> Self {
        ReplayError::WithContext {
            context: context.into(),
            source: Box::new(self),
        }
    }

    /// Whether this error only invalidates a single log line
    pub fn is_parse_error(&self) -> bool {
        match self {
            ReplayError::MissingAddress { .. } | ReplayError::InvalidFloat { .. } => true,
            ReplayError::WithContext { source, .. } => source.is_parse_error(),
            _ => false,
        }
    }

    /// Whether this error came from the transport
    pub fn is_transmission_error(&self) -> bool {
        match self {
            ReplayError::Transmission(_) | ReplayError::Encode(_) => true,
            ReplayError::WithContext { source, .. } => source.is_transmission_error(),
            _ => false,
        }
    }
}

/// Result type alias for osc-replay operations
pub type Result<T> = std::result::Result<T, ReplayError>;

/// Extension trait for adding context to Results
pub trait ResultExt<T> {
    /// Add context to an error result
    fn context(self, context: impl Into<String>) -> Result<T>;

    /// Add context lazily to an error result
    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String;
}

impl<T> ResultExt<T> for Result<T> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| e.with_context(context))
    }

    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String,
    {
        self.map_err(|e| e.with_context(f()))
    }
}

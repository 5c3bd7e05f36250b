//! Error types for pool-tester.
//!
//! This module defines domain-specific error types organized by functional area.

use std::fmt;
use thiserror::Error;

/// Top-level error type encompassing all possible errors.
#[derive(Error, Debug)]
pub enum TesterError {
    /// Connection-related errors
    #[error(transparent)]
    Connection(#[from] ConnectionError),

    /// Statement execution errors
    #[error(transparent)]
    Statement(#[from] StatementError),
}

/// Errors related to the fake connection.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConnectionError {
    /// Connection is closed
    #[error("Connection is closed")]
    ConnectionClosed,

    /// Catalog lookup failed
    #[error("Catalog unavailable: {0}")]
    CatalogUnavailable(String),

    /// Invalid connection parameters
    #[error("Invalid connection parameter '{parameter}': {message}")]
    InvalidParameter { parameter: String, message: String },

    /// Connection string parsing error
    #[error("Failed to parse connection string: {0}")]
    ParseError(String),
}

/// Errors raised by statements and result sets.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StatementError {
    /// The resource has been closed
    #[error("Resource is closed")]
    ResourceClosed,

    /// Simulated query timeout
    #[error("query timeout after {timeout_secs}s")]
    QueryTimeout { timeout_secs: u32 },

    /// Capability the fake does not emulate
    #[error("Not implemented: {0}")]
    NotImplemented(&'static str),
}

/// Error codes a pool layer can use to classify failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    /// Operation on a closed resource
    ResourceClosed = 1,
    /// Query timed out
    Timeout = 2,
    /// Unsupported capability
    NotImplemented = 3,
    /// Connection failure
    Connection = 4,
    /// Invalid argument
    InvalidArgument = 5,
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorCode::ResourceClosed => write!(f, "RESOURCE_CLOSED"),
            ErrorCode::Timeout => write!(f, "TIMEOUT"),
            ErrorCode::NotImplemented => write!(f, "NOT_IMPLEMENTED"),
            ErrorCode::Connection => write!(f, "CONNECTION"),
            ErrorCode::InvalidArgument => write!(f, "INVALID_ARGUMENT"),
        }
    }
}

impl TesterError {
    /// Map to an error code.
    pub fn to_error_code(&self) -> ErrorCode {
        match self {
            TesterError::Connection(e) => e.to_error_code(),
            TesterError::Statement(e) => e.to_error_code(),
        }
    }
}

impl ConnectionError {
    /// Map to an error code.
    pub fn to_error_code(&self) -> ErrorCode {
        match self {
            ConnectionError::ConnectionClosed => ErrorCode::ResourceClosed,
            ConnectionError::InvalidParameter { .. } | ConnectionError::ParseError(_) => {
                ErrorCode::InvalidArgument
            }
            ConnectionError::CatalogUnavailable(_) => ErrorCode::Connection,
        }
    }
}

impl StatementError {
    /// Map to an error code.
    pub fn to_error_code(&self) -> ErrorCode {
        match self {
            StatementError::ResourceClosed => ErrorCode::ResourceClosed,
            StatementError::QueryTimeout { .. } => ErrorCode::Timeout,
            StatementError::NotImplemented(_) => ErrorCode::NotImplemented,
        }
    }
}

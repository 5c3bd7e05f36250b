//! Shared statement state.
//!
//! Every fake statement holds one `StatementState` value carrying the
//! lifecycle flag and the knobs a harness pre-configures before execution.

use crate::error::{ConnectionError, StatementError};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Scrollability of result sets produced by a statement.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResultSetType {
    /// Cursor moves forward only
    #[default]
    ForwardOnly,
    /// Scrollable, not sensitive to underlying changes
    ScrollInsensitive,
    /// Scrollable and sensitive to underlying changes
    ScrollSensitive,
}

impl ResultSetType {
    /// Name used in connection strings and fixtures.
    pub fn as_str(&self) -> &'static str {
        match self {
            ResultSetType::ForwardOnly => "forward_only",
            ResultSetType::ScrollInsensitive => "scroll_insensitive",
            ResultSetType::ScrollSensitive => "scroll_sensitive",
        }
    }
}

impl fmt::Display for ResultSetType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ResultSetType {
    type Err = ConnectionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "forward_only" => Ok(ResultSetType::ForwardOnly),
            "scroll_insensitive" => Ok(ResultSetType::ScrollInsensitive),
            "scroll_sensitive" => Ok(ResultSetType::ScrollSensitive),
            other => Err(ConnectionError::InvalidParameter {
                parameter: "result_set_type".to_string(),
                message: format!("Unknown result set type '{}'", other),
            }),
        }
    }
}

/// Whether result sets may be updated through the cursor.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResultSetConcurrency {
    /// Read-only cursor
    #[default]
    ReadOnly,
    /// Updatable cursor
    Updatable,
}

impl ResultSetConcurrency {
    /// Name used in connection strings and fixtures.
    pub fn as_str(&self) -> &'static str {
        match self {
            ResultSetConcurrency::ReadOnly => "read_only",
            ResultSetConcurrency::Updatable => "updatable",
        }
    }
}

impl fmt::Display for ResultSetConcurrency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ResultSetConcurrency {
    type Err = ConnectionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "read_only" => Ok(ResultSetConcurrency::ReadOnly),
            "updatable" => Ok(ResultSetConcurrency::Updatable),
            other => Err(ConnectionError::InvalidParameter {
                parameter: "result_set_concurrency".to_string(),
                message: format!("Unknown result set concurrency '{}'", other),
            }),
        }
    }
}

/// Lifecycle flag plus pre-configured execution knobs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatementState {
    open: bool,
    /// Value returned by every plain update execution
    pub rows_updated: i64,
    /// Query timeout in seconds, 0 when unset
    pub query_timeout_secs: u32,
    /// Type of result sets produced
    pub result_set_type: ResultSetType,
    /// Concurrency of result sets produced
    pub result_set_concurrency: ResultSetConcurrency,
}

impl Default for StatementState {
    fn default() -> Self {
        Self {
            open: true,
            rows_updated: 1,
            query_timeout_secs: 0,
            result_set_type: ResultSetType::default(),
            result_set_concurrency: ResultSetConcurrency::default(),
        }
    }
}

impl StatementState {
    /// Create an open state with default knobs.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the fixed update count.
    pub fn with_rows_updated(mut self, rows_updated: i64) -> Self {
        self.rows_updated = rows_updated;
        self
    }

    /// Set the query timeout.
    pub fn with_query_timeout(mut self, query_timeout_secs: u32) -> Self {
        self.query_timeout_secs = query_timeout_secs;
        self
    }

    /// Set the result-set type and concurrency.
    pub fn with_result_set_mode(
        mut self,
        result_set_type: ResultSetType,
        result_set_concurrency: ResultSetConcurrency,
    ) -> Self {
        self.result_set_type = result_set_type;
        self.result_set_concurrency = result_set_concurrency;
        self
    }

    /// Fail with `ResourceClosed` once the owner has been closed.
    pub fn check_open(&self) -> Result<(), StatementError> {
        if self.open {
            Ok(())
        } else {
            Err(StatementError::ResourceClosed)
        }
    }

    /// Whether the owner is still open.
    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Mark closed. Returns `false` if it was already closed.
    pub fn close(&mut self) -> bool {
        std::mem::replace(&mut self.open, false)
    }

    /// Whether the configured timeout falls in the simulated-timeout band (1..=4).
    pub fn simulates_timeout(&self) -> bool {
        self.query_timeout_secs > 0 && self.query_timeout_secs < 5
    }
}

//! Fake result set.
//!
//! Result sets produced by the fake statement carry no rows; they only
//! remember the mode they were created with and whether they are open.

use crate::error::StatementError;
use crate::query::state::{ResultSetConcurrency, ResultSetType};
use tracing::debug;

/// Empty result resource returned by query execution and key retrieval.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TesterResultSet {
    result_set_type: ResultSetType,
    result_set_concurrency: ResultSetConcurrency,
    open: bool,
}

impl TesterResultSet {
    /// Create an open result set with the given mode.
    pub fn new(
        result_set_type: ResultSetType,
        result_set_concurrency: ResultSetConcurrency,
    ) -> Self {
        Self {
            result_set_type,
            result_set_concurrency,
            open: true,
        }
    }

    /// Scrollability this result set was created with.
    pub fn result_set_type(&self) -> ResultSetType {
        self.result_set_type
    }

    /// Concurrency this result set was created with.
    pub fn result_set_concurrency(&self) -> ResultSetConcurrency {
        self.result_set_concurrency
    }

    /// Advance the cursor. There are never any rows.
    pub fn next_row(&mut self) -> Result<bool, StatementError> {
        self.check_open()?;
        Ok(false)
    }

    /// Check if the result set has been closed.
    pub fn is_closed(&self) -> bool {
        !self.open
    }

    /// Close the result set. Closing twice is a no-op.
    pub fn close(&mut self) -> Result<(), StatementError> {
        if self.open {
            debug!(result_set_type = %self.result_set_type, "result set closed");
            self.open = false;
        }
        Ok(())
    }

    fn check_open(&self) -> Result<(), StatementError> {
        if self.open {
            Ok(())
        } else {
            Err(StatementError::ResourceClosed)
        }
    }
}

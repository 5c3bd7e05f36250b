//! Fake prepared statement.
//!
//! `TesterPreparedStatement` stands in for a driver's prepared statement so a
//! pool can be driven through its failure paths without a database:
//!
//! - SQL text `"null"` makes query execution return no result object.
//! - A query timeout of 1 to 4 seconds makes [`PreparedStatement::execute_query`]
//!   fail with [`StatementError::QueryTimeout`]. Queries passed as text at
//!   call time never time out.
//! - Once closed, every guarded operation fails with
//!   [`StatementError::ResourceClosed`].
//! - Capabilities the fake does not emulate fail with
//!   [`StatementError::NotImplemented`] whether open or not.

use crate::connection::CatalogProvider;
use crate::error::StatementError;
use crate::query::results::TesterResultSet;
use crate::query::state::{ResultSetConcurrency, ResultSetType, StatementState};
use crate::query::statement::{
    ColumnMetadata, CurrentResult, GeneratedKeys, Holdability, Parameter, PreparedStatement,
    Statement,
};
use std::fmt;
use tracing::{debug, trace};

/// SQL text that makes query execution return no result object.
pub const NULL_RESULT_SQL: &str = "null";

/// A prepared statement double.
#[derive(Debug, Clone)]
pub struct TesterPreparedStatement {
    /// Text fixed at construction
    sql: Option<String>,
    /// Catalog captured from the owning connection
    catalog: Option<String>,
    /// Lifecycle flag and execution knobs
    state: StatementState,
}

impl TesterPreparedStatement {
    /// Create a statement with no SQL text.
    pub fn new<C: CatalogProvider + ?Sized>(conn: &C) -> Self {
        Self::from_state(conn, None, StatementState::new())
    }

    /// Create a statement for fixed SQL text.
    pub fn with_sql<C: CatalogProvider + ?Sized>(conn: &C, sql: impl Into<String>) -> Self {
        Self::from_state(conn, Some(sql.into()), StatementState::new())
    }

    /// Create a statement for fixed SQL text and an explicit result-set mode.
    pub fn with_result_set_mode<C: CatalogProvider + ?Sized>(
        conn: &C,
        sql: impl Into<String>,
        result_set_type: ResultSetType,
        result_set_concurrency: ResultSetConcurrency,
    ) -> Self {
        let state =
            StatementState::new().with_result_set_mode(result_set_type, result_set_concurrency);
        Self::from_state(conn, Some(sql.into()), state)
    }

    /// Create a statement around a pre-configured state.
    ///
    /// The catalog is looked up once; a failing lookup leaves it unset.
    pub fn from_state<C: CatalogProvider + ?Sized>(
        conn: &C,
        sql: Option<String>,
        state: StatementState,
    ) -> Self {
        let catalog = conn.catalog().ok().flatten();
        debug!(sql = ?sql, catalog = ?catalog, "prepared statement created");
        Self {
            sql,
            catalog,
            state,
        }
    }

    /// Catalog captured at construction.
    pub fn catalog(&self) -> Option<&str> {
        self.catalog.as_deref()
    }

    /// SQL text fixed at construction.
    pub fn sql(&self) -> Option<&str> {
        self.sql.as_deref()
    }

    /// Row count returned by plain updates.
    pub fn rows_updated(&self) -> i64 {
        self.state.rows_updated
    }

    /// Type of result sets this statement produces.
    pub fn result_set_type(&self) -> ResultSetType {
        self.state.result_set_type
    }

    /// Concurrency of result sets this statement produces.
    pub fn result_set_concurrency(&self) -> ResultSetConcurrency {
        self.state.result_set_concurrency
    }

    /// Shared statement state.
    pub fn state(&self) -> &StatementState {
        &self.state
    }

    fn new_result_set(&self) -> TesterResultSet {
        TesterResultSet::new(
            self.state.result_set_type,
            self.state.result_set_concurrency,
        )
    }
}

impl fmt::Display for TesterPreparedStatement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.sql.as_deref().unwrap_or_default())
    }
}

impl Statement for TesterPreparedStatement {
    type ResultSet = TesterResultSet;

    fn execute_query_sql(&mut self, sql: &str) -> Result<Option<TesterResultSet>, StatementError> {
        self.state.check_open()?;
        if sql == NULL_RESULT_SQL {
            return Ok(None);
        }
        Ok(Some(self.new_result_set()))
    }

    fn execute_update_sql(&mut self, _sql: &str) -> Result<i64, StatementError> {
        self.state.check_open()?;
        Ok(self.state.rows_updated)
    }

    fn execute_update_with_keys(
        &mut self,
        _sql: &str,
        _keys: GeneratedKeys,
    ) -> Result<i64, StatementError> {
        self.state.check_open()?;
        Ok(0)
    }

    fn execute_sql(&mut self, _sql: &str) -> Result<bool, StatementError> {
        self.state.check_open()?;
        Ok(true)
    }

    fn execute_with_keys(
        &mut self,
        _sql: &str,
        _keys: GeneratedKeys,
    ) -> Result<bool, StatementError> {
        self.state.check_open()?;
        Ok(true)
    }

    fn generated_keys(&self) -> Result<TesterResultSet, StatementError> {
        Ok(self.new_result_set())
    }

    fn more_results(&mut self, _current: CurrentResult) -> Result<bool, StatementError> {
        Err(StatementError::NotImplemented("more_results"))
    }

    fn result_set_holdability(&self) -> Result<Holdability, StatementError> {
        Err(StatementError::NotImplemented("result_set_holdability"))
    }

    fn query_timeout(&self) -> Result<u32, StatementError> {
        self.state.check_open()?;
        Ok(self.state.query_timeout_secs)
    }

    fn set_query_timeout(&mut self, secs: u32) -> Result<(), StatementError> {
        self.state.check_open()?;
        self.state.query_timeout_secs = secs;
        Ok(())
    }

    fn close(&mut self) -> Result<(), StatementError> {
        if self.state.close() {
            debug!(sql = ?self.sql, "prepared statement closed");
        }
        Ok(())
    }

    fn is_closed(&self) -> bool {
        !self.state.is_open()
    }
}

impl PreparedStatement for TesterPreparedStatement {
    fn execute_query(&mut self) -> Result<Option<TesterResultSet>, StatementError> {
        self.state.check_open()?;
        if self.sql.as_deref() == Some(NULL_RESULT_SQL) {
            return Ok(None);
        }
        if self.state.simulates_timeout() {
            debug!(
                timeout_secs = self.state.query_timeout_secs,
                "simulating query timeout"
            );
            return Err(StatementError::QueryTimeout {
                timeout_secs: self.state.query_timeout_secs,
            });
        }
        Ok(Some(self.new_result_set()))
    }

    fn execute_update(&mut self) -> Result<i64, StatementError> {
        self.state.check_open()?;
        Ok(self.state.rows_updated)
    }

    fn execute(&mut self) -> Result<bool, StatementError> {
        self.state.check_open()?;
        Ok(true)
    }

    fn bind(&mut self, index: usize, value: Parameter) -> Result<(), StatementError> {
        if let Some(capability) = value.unsupported_capability() {
            return Err(StatementError::NotImplemented(capability));
        }
        self.state.check_open()?;
        trace!(index, "parameter bound and discarded");
        Ok(())
    }

    fn clear_parameters(&mut self) -> Result<(), StatementError> {
        self.state.check_open()
    }

    fn add_batch(&mut self) -> Result<(), StatementError> {
        self.state.check_open()
    }

    fn metadata(&self) -> Result<Option<Vec<ColumnMetadata>>, StatementError> {
        self.state.check_open()?;
        Ok(None)
    }

    fn parameter_metadata(&self) -> Result<Vec<ColumnMetadata>, StatementError> {
        Err(StatementError::NotImplemented("parameter_metadata"))
    }
}

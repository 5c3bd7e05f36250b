//! Fake connection.

use crate::connection::params::TesterParams;
use crate::connection::CatalogProvider;
use crate::error::ConnectionError;
use crate::query::prepared::TesterPreparedStatement;
use crate::query::state::{ResultSetConcurrency, ResultSetType};
use std::str::FromStr;
use tracing::debug;

/// Connection double that hands out [`TesterPreparedStatement`]s.
///
/// Statements are seeded from the connection's [`TesterParams`]; the catalog
/// and the catalog-failure switch can be changed between statements.
#[derive(Debug, Clone)]
pub struct TesterConnection {
    params: TesterParams,
    catalog: Option<String>,
    fail_catalog: bool,
    open: bool,
}

impl TesterConnection {
    /// Create a connection with default params.
    pub fn new() -> Self {
        Self::with_params(TesterParams::default())
    }

    /// Create a connection from explicit params.
    pub fn with_params(params: TesterParams) -> Self {
        debug!(%params, "tester connection opened");
        Self {
            catalog: params.catalog.clone(),
            fail_catalog: params.fail_catalog,
            params,
            open: true,
        }
    }

    /// Create a connection from a `tester://` connection string.
    pub fn open(connection_string: &str) -> Result<Self, ConnectionError> {
        Ok(Self::with_params(TesterParams::from_str(connection_string)?))
    }

    /// Params the connection was created with.
    pub fn params(&self) -> &TesterParams {
        &self.params
    }

    /// Change the catalog reported to statements created afterwards.
    pub fn set_catalog(&mut self, catalog: Option<&str>) -> Result<(), ConnectionError> {
        self.check_open()?;
        self.catalog = catalog.map(str::to_string);
        Ok(())
    }

    /// Make catalog lookups fail (or succeed again).
    pub fn set_fail_catalog(&mut self, fail: bool) {
        self.fail_catalog = fail;
    }

    /// Create a statement with no SQL text.
    pub fn create_statement(&self) -> Result<TesterPreparedStatement, ConnectionError> {
        self.check_open()?;
        Ok(TesterPreparedStatement::from_state(
            self,
            None,
            self.params.statement_state(),
        ))
    }

    /// Prepare a statement for fixed SQL text.
    pub fn prepare_statement(&self, sql: &str) -> Result<TesterPreparedStatement, ConnectionError> {
        self.check_open()?;
        Ok(TesterPreparedStatement::from_state(
            self,
            Some(sql.to_string()),
            self.params.statement_state(),
        ))
    }

    /// Prepare a statement with an explicit result-set mode.
    pub fn prepare_statement_with(
        &self,
        sql: &str,
        result_set_type: ResultSetType,
        result_set_concurrency: ResultSetConcurrency,
    ) -> Result<TesterPreparedStatement, ConnectionError> {
        self.check_open()?;
        let state = self
            .params
            .statement_state()
            .with_result_set_mode(result_set_type, result_set_concurrency);
        Ok(TesterPreparedStatement::from_state(
            self,
            Some(sql.to_string()),
            state,
        ))
    }

    /// Check if the connection has been closed.
    pub fn is_closed(&self) -> bool {
        !self.open
    }

    /// Close the connection. Closing twice is a no-op.
    pub fn close(&mut self) {
        if self.open {
            debug!("tester connection closed");
            self.open = false;
        }
    }

    fn check_open(&self) -> Result<(), ConnectionError> {
        if self.open {
            Ok(())
        } else {
            Err(ConnectionError::ConnectionClosed)
        }
    }
}

impl Default for TesterConnection {
    fn default() -> Self {
        Self::new()
    }
}

impl CatalogProvider for TesterConnection {
    fn catalog(&self) -> Result<Option<String>, ConnectionError> {
        self.check_open()?;
        if self.fail_catalog {
            return Err(ConnectionError::CatalogUnavailable(
                "catalog lookup disabled for this connection".to_string(),
            ));
        }
        Ok(self.catalog.clone())
    }
}

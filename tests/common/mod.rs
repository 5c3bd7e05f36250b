//! Common test utilities for pool-tester integration tests.
//!
//! Tests build their fake connections from connection strings so each test
//! reads like the configuration a pool harness would be given.

#![allow(dead_code)]

use pool_tester::{
    PreparedStatement, StatementError, TesterConnection, TesterParams, TesterPreparedStatement,
    TesterResultSet,
};
use std::str::FromStr;

/// Catalog reported by [`connection`].
pub const DEFAULT_CATALOG: &str = "TEST_CATALOG";

/// Row count reported by [`connection`] updates.
pub const DEFAULT_ROWS_UPDATED: i64 = 3;

/// Validation query a pool would issue on checkout.
pub const VALIDATION_QUERY: &str = "SELECT 1";

/// Connection with the default test catalog and row count.
pub fn connection() -> TesterConnection {
    TesterConnection::open(&format!(
        "tester://{}?rows_updated={}",
        DEFAULT_CATALOG, DEFAULT_ROWS_UPDATED
    ))
    .expect("default connection string must parse")
}

/// Connection built from an arbitrary connection string.
pub fn connection_from(connection_string: &str) -> TesterConnection {
    TesterConnection::with_params(
        TesterParams::from_str(connection_string).expect("connection string must parse"),
    )
}

/// Statement prepared on the default connection.
pub fn prepared(sql: &str) -> TesterPreparedStatement {
    connection()
        .prepare_statement(sql)
        .expect("open connection must prepare")
}

/// Outcome of validating a pooled statement the way a pool would.
#[derive(Debug, PartialEq, Eq)]
pub enum Validation {
    /// Statement produced a result
    Valid,
    /// Driver returned no result object
    NoResult,
    /// Statement must be evicted
    Evict(StatementError),
}

/// Run the validation query through the trait object a pool holds.
pub fn validate(stmt: &mut dyn PreparedStatement<ResultSet = TesterResultSet>) -> Validation {
    match stmt.execute_query() {
        Ok(Some(mut rs)) => match rs.close() {
            Ok(()) => Validation::Valid,
            Err(e) => Validation::Evict(e),
        },
        Ok(None) => Validation::NoResult,
        Err(e) => Validation::Evict(e),
    }
}

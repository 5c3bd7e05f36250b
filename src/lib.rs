//! # pool-tester
//!
//! Deterministic database doubles for exercising a connection-pooling layer.
//!
//! [`TesterPreparedStatement`] behaves like a driver's prepared statement
//! without touching a database. Test code forces it into a handful of
//! observable behaviors: closed-resource errors, a simulated query timeout,
//! and a query that returns no result object.
//!
//! ## Example
//!
//! ```
//! # use pool_tester::*;
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let connection = TesterConnection::open("tester://SALES?rows_updated=3")?;
//!
//! let mut stmt = connection.prepare_statement("UPDATE accounts SET active = ?")?;
//! stmt.bind(0, true.into())?;
//! assert_eq!(stmt.execute_update()?, 3);
//! assert_eq!(stmt.catalog(), Some("SALES"));
//!
//! let mut empty = connection.prepare_statement("null")?;
//! assert!(empty.execute_query()?.is_none());
//!
//! stmt.close()?;
//! assert!(stmt.execute_update().is_err());
//! # Ok(())
//! # }
//! ```

pub mod connection;
pub mod error;
pub mod query;

// Re-export public API
pub use connection::{CatalogProvider, TesterConnection, TesterParams, TesterParamsBuilder};
pub use error::{ConnectionError, ErrorCode, StatementError, TesterError};
pub use query::{
    GeneratedKeys, Parameter, PreparedStatement, ResultSetConcurrency, ResultSetType, Statement,
    StatementState, TesterPreparedStatement, TesterResultSet,
};

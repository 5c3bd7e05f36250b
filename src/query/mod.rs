//! Statement double and result handling.
//!
//! The query module is organized into:
//! - `statement` - the statement capability traits and parameter values
//! - `state` - lifecycle flag and execution knobs shared by statements
//! - `prepared` - the fake prepared statement
//! - `results` - the fake result set
//!
//! # Example
//!
//! ```
//! use pool_tester::connection::TesterConnection;
//! use pool_tester::error::StatementError;
//! use pool_tester::query::{PreparedStatement, Statement};
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let connection = TesterConnection::new();
//! let mut stmt = connection.prepare_statement("SELECT 1")?;
//!
//! assert!(stmt.execute_query()?.is_some());
//!
//! stmt.set_query_timeout(3)?;
//! assert!(matches!(
//!     stmt.execute_query(),
//!     Err(StatementError::QueryTimeout { timeout_secs: 3 })
//! ));
//!
//! stmt.close()?;
//! assert!(matches!(stmt.execute_update(), Err(StatementError::ResourceClosed)));
//! # Ok(())
//! # }
//! ```

pub mod prepared;
pub mod results;
pub mod state;
pub mod statement;

pub use prepared::{TesterPreparedStatement, NULL_RESULT_SQL};
pub use results::TesterResultSet;
pub use state::{ResultSetConcurrency, ResultSetType, StatementState};
pub use statement::{
    ColumnMetadata, CurrentResult, GeneratedKeys, Holdability, LobKind, Parameter,
    PreparedStatement, Statement, StreamKind, StreamLength,
};

//! Fake connection and its parameters.
//!
//! This module provides the connection side of the test double: parameter
//! parsing, the catalog lookup seam statements depend on, and the
//! [`TesterConnection`] that creates statements.
//!
//! # Example
//!
//! ```
//! # use pool_tester::connection::{TesterConnection, TesterParams};
//! # use std::str::FromStr;
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let params = TesterParams::from_str("tester://SALES?rows_updated=2")?;
//! let connection = TesterConnection::with_params(params);
//!
//! let stmt = connection.prepare_statement("UPDATE t SET x = 1")?;
//! assert_eq!(stmt.catalog(), Some("SALES"));
//! # Ok(())
//! # }
//! ```

pub mod params;
pub mod tester;

use crate::error::ConnectionError;

pub use params::{TesterParams, TesterParamsBuilder};
pub use tester::TesterConnection;

/// Catalog lookup offered by whatever owns a statement.
pub trait CatalogProvider {
    /// Current catalog name, `None` when the connection has none.
    fn catalog(&self) -> Result<Option<String>, ConnectionError>;
}

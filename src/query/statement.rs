//! Statement capability surface and parameter values.
//!
//! A pool wraps whatever statement the driver hands it, so the surface is
//! expressed as two traits: [`Statement`] for operations that take ad hoc SQL
//! and [`PreparedStatement`] for operations on the text fixed at preparation.

use crate::error::StatementError;
use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime};

/// Kind of streamed parameter payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StreamKind {
    /// ASCII character stream
    Ascii,
    /// Unicode character stream (deprecated upstream, still accepted)
    Unicode,
    /// Raw byte stream
    Binary,
    /// Character reader
    Character,
    /// National character reader
    NCharacter,
    /// Byte stream written into a BLOB
    Blob,
    /// Character reader written into a CLOB
    Clob,
    /// Character reader written into an NCLOB
    NClob,
}

/// Declared length of a streamed parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StreamLength {
    /// 32-bit length
    Int(i32),
    /// 64-bit length
    Long(i64),
    /// Read until exhausted
    Unbounded,
}

/// Kind of large-object parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LobKind {
    /// SQL REF
    Ref,
    /// Binary large object
    Blob,
    /// Character large object
    Clob,
    /// National character large object
    NClob,
    /// SQL ARRAY
    Array,
}

/// Parameter value for prepared statements.
#[derive(Debug, Clone, PartialEq)]
pub enum Parameter {
    /// NULL value
    Null,
    /// Boolean value
    Boolean(bool),
    /// Integer value (byte, short, int, long)
    Integer(i64),
    /// Float value
    Float(f64),
    /// Decimal value in its textual form
    Decimal(String),
    /// String value
    String(String),
    /// Binary data
    Binary(Vec<u8>),
    /// Date value
    Date(NaiveDate),
    /// Time value
    Time(NaiveTime),
    /// Timestamp value
    Timestamp(NaiveDateTime),
    /// Date, time or timestamp interpreted in an explicit zone
    Zoned(DateTime<FixedOffset>),
    /// Streamed payload
    Stream {
        kind: StreamKind,
        data: Vec<u8>,
        length: StreamLength,
    },
    /// Large object or SQL structured value
    Lob { kind: LobKind, data: Vec<u8> },
    /// Arbitrary object value
    Object(serde_json::Value),
    /// URL value
    Url(String),
    /// Row identifier
    RowId(Vec<u8>),
    /// National character string
    NString(String),
    /// SQL/XML document
    SqlXml(String),
}

impl Parameter {
    /// Name of the capability this value needs when the fake does not
    /// emulate it, `None` when binding is supported.
    pub fn unsupported_capability(&self) -> Option<&'static str> {
        match self {
            Parameter::Url(_) => Some("set_url"),
            Parameter::RowId(_) => Some("set_row_id"),
            Parameter::NString(_) => Some("set_nstring"),
            Parameter::SqlXml(_) => Some("set_sqlxml"),
            Parameter::Lob {
                kind: LobKind::NClob,
                ..
            } => Some("set_nclob"),
            Parameter::Stream { kind, length, .. } => match (kind, length) {
                (StreamKind::NCharacter, _) => Some("set_ncharacter_stream"),
                (StreamKind::NClob, _) => Some("set_nclob"),
                (StreamKind::Blob, _) => Some("set_blob"),
                (StreamKind::Clob, _) => Some("set_clob"),
                (_, StreamLength::Int(_)) => None,
                (_, StreamLength::Long(_) | StreamLength::Unbounded) => Some("set_stream"),
            },
            _ => None,
        }
    }

    /// Whether the fake accepts this value.
    pub fn is_supported(&self) -> bool {
        self.unsupported_capability().is_none()
    }
}

impl From<bool> for Parameter {
    fn from(value: bool) -> Self {
        Parameter::Boolean(value)
    }
}

impl From<i8> for Parameter {
    fn from(value: i8) -> Self {
        Parameter::Integer(value as i64)
    }
}

impl From<i16> for Parameter {
    fn from(value: i16) -> Self {
        Parameter::Integer(value as i64)
    }
}

impl From<i32> for Parameter {
    fn from(value: i32) -> Self {
        Parameter::Integer(value as i64)
    }
}

impl From<i64> for Parameter {
    fn from(value: i64) -> Self {
        Parameter::Integer(value)
    }
}

impl From<f32> for Parameter {
    fn from(value: f32) -> Self {
        Parameter::Float(value as f64)
    }
}

impl From<f64> for Parameter {
    fn from(value: f64) -> Self {
        Parameter::Float(value)
    }
}

impl From<String> for Parameter {
    fn from(value: String) -> Self {
        Parameter::String(value)
    }
}

impl From<&str> for Parameter {
    fn from(value: &str) -> Self {
        Parameter::String(value.to_string())
    }
}

impl From<Vec<u8>> for Parameter {
    fn from(value: Vec<u8>) -> Self {
        Parameter::Binary(value)
    }
}

impl From<NaiveDate> for Parameter {
    fn from(value: NaiveDate) -> Self {
        Parameter::Date(value)
    }
}

impl From<NaiveTime> for Parameter {
    fn from(value: NaiveTime) -> Self {
        Parameter::Time(value)
    }
}

impl From<NaiveDateTime> for Parameter {
    fn from(value: NaiveDateTime) -> Self {
        Parameter::Timestamp(value)
    }
}

impl From<DateTime<FixedOffset>> for Parameter {
    fn from(value: DateTime<FixedOffset>) -> Self {
        Parameter::Zoned(value)
    }
}

impl From<serde_json::Value> for Parameter {
    fn from(value: serde_json::Value) -> Self {
        Parameter::Object(value)
    }
}

impl<T: Into<Parameter>> From<Option<T>> for Parameter {
    fn from(value: Option<T>) -> Self {
        value.map_or(Parameter::Null, Into::into)
    }
}

/// Which generated keys an update or execute call asks the driver to keep.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GeneratedKeys {
    /// Return generated keys or not
    Flag(bool),
    /// Return keys for these column positions
    ColumnIndexes(Vec<usize>),
    /// Return keys for these column names
    ColumnNames(Vec<String>),
}

/// What to do with the current result when advancing to the next one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CurrentResult {
    /// Close the current result set
    Close,
    /// Keep the current result set open
    Keep,
    /// Close every previously kept result set
    CloseAll,
}

/// Cursor holdability across commits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Holdability {
    /// Cursors stay open after commit
    HoldOverCommit,
    /// Cursors close at commit
    CloseAtCommit,
}

/// Column or parameter description.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnMetadata {
    /// Column or parameter name
    pub name: String,
    /// Database type name
    pub type_name: String,
    /// Whether NULL is allowed
    pub nullable: bool,
}

/// Operations available on any statement, taking SQL at call time.
pub trait Statement {
    /// Result resource produced by queries.
    type ResultSet;

    /// Execute a query. `None` means the driver returned no result object.
    fn execute_query_sql(&mut self, sql: &str) -> Result<Option<Self::ResultSet>, StatementError>;

    /// Execute an update and return the affected row count.
    fn execute_update_sql(&mut self, sql: &str) -> Result<i64, StatementError>;

    /// Execute an update, asking for generated keys.
    fn execute_update_with_keys(
        &mut self,
        sql: &str,
        keys: GeneratedKeys,
    ) -> Result<i64, StatementError>;

    /// Execute any statement. Returns `true` when the first result is a result set.
    fn execute_sql(&mut self, sql: &str) -> Result<bool, StatementError>;

    /// Execute any statement, asking for generated keys.
    fn execute_with_keys(&mut self, sql: &str, keys: GeneratedKeys)
        -> Result<bool, StatementError>;

    /// Keys generated by the last execution.
    fn generated_keys(&self) -> Result<Self::ResultSet, StatementError>;

    /// Advance to the next result.
    fn more_results(&mut self, current: CurrentResult) -> Result<bool, StatementError>;

    /// Holdability of produced result sets.
    fn result_set_holdability(&self) -> Result<Holdability, StatementError>;

    /// Query timeout in seconds, 0 when unset.
    fn query_timeout(&self) -> Result<u32, StatementError>;

    /// Set the query timeout in seconds.
    fn set_query_timeout(&mut self, secs: u32) -> Result<(), StatementError>;

    /// Close the statement.
    fn close(&mut self) -> Result<(), StatementError>;

    /// Check if the statement has been closed.
    fn is_closed(&self) -> bool;
}

/// Operations on a statement whose SQL was fixed at preparation.
pub trait PreparedStatement: Statement {
    /// Execute the prepared query.
    fn execute_query(&mut self) -> Result<Option<Self::ResultSet>, StatementError>;

    /// Execute the prepared update.
    fn execute_update(&mut self) -> Result<i64, StatementError>;

    /// Execute the prepared statement.
    fn execute(&mut self) -> Result<bool, StatementError>;

    /// Bind a parameter at the given zero-based index.
    fn bind(&mut self, index: usize, value: Parameter) -> Result<(), StatementError>;

    /// Clear all bound parameters.
    fn clear_parameters(&mut self) -> Result<(), StatementError>;

    /// Add the current parameter set to the batch.
    fn add_batch(&mut self) -> Result<(), StatementError>;

    /// Description of the result columns, if known before execution.
    fn metadata(&self) -> Result<Option<Vec<ColumnMetadata>>, StatementError>;

    /// Description of the statement's parameters.
    fn parameter_metadata(&self) -> Result<Vec<ColumnMetadata>, StatementError>;
}

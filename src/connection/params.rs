//! Connection parameter parsing and validation.
//!
//! Harnesses describe a fake connection either through [`TesterParamsBuilder`]
//! or a connection string:
//!
//! `tester://[catalog][?rows_updated=N&query_timeout=S&result_set_type=T&result_set_concurrency=C&fail_catalog=B]`

use crate::error::ConnectionError;
use crate::query::state::{ResultSetConcurrency, ResultSetType, StatementState};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

const SCHEME: &str = "tester://";

/// Parameters for a fake connection and the statements it creates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TesterParams {
    /// Catalog reported by the connection
    pub catalog: Option<String>,

    /// Make every catalog lookup fail
    pub fail_catalog: bool,

    /// Row count returned by plain update executions
    pub rows_updated: i64,

    /// Query timeout (seconds) seeded into new statements
    pub query_timeout_secs: u32,

    /// Default result-set type for new statements
    pub result_set_type: ResultSetType,

    /// Default result-set concurrency for new statements
    pub result_set_concurrency: ResultSetConcurrency,

    /// Unrecognized connection-string attributes
    pub attributes: HashMap<String, String>,
}

impl Default for TesterParams {
    fn default() -> Self {
        let state = StatementState::default();
        Self {
            catalog: None,
            fail_catalog: false,
            rows_updated: state.rows_updated,
            query_timeout_secs: state.query_timeout_secs,
            result_set_type: state.result_set_type,
            result_set_concurrency: state.result_set_concurrency,
            attributes: HashMap::new(),
        }
    }
}

impl TesterParams {
    /// Create a new TesterParamsBuilder.
    pub fn builder() -> TesterParamsBuilder {
        TesterParamsBuilder::new()
    }

    /// Parse params from a JSON fixture.
    pub fn from_json(json: &str) -> Result<Self, ConnectionError> {
        let params: Self =
            serde_json::from_str(json).map_err(|e| ConnectionError::ParseError(e.to_string()))?;
        params.validate()?;
        Ok(params)
    }

    /// Validate the parameter values.
    pub fn validate(&self) -> Result<(), ConnectionError> {
        if self.rows_updated < 0 {
            return Err(ConnectionError::InvalidParameter {
                parameter: "rows_updated".to_string(),
                message: "Row count cannot be negative".to_string(),
            });
        }

        if let Some(catalog) = &self.catalog {
            if catalog.trim().is_empty() {
                return Err(ConnectionError::InvalidParameter {
                    parameter: "catalog".to_string(),
                    message: "Catalog cannot be blank".to_string(),
                });
            }
        }

        Ok(())
    }

    /// Fresh open statement state seeded from these params.
    pub fn statement_state(&self) -> StatementState {
        StatementState::new()
            .with_rows_updated(self.rows_updated)
            .with_query_timeout(self.query_timeout_secs)
            .with_result_set_mode(self.result_set_type, self.result_set_concurrency)
    }
}

impl FromStr for TesterParams {
    type Err = ConnectionError;

    /// Parse a connection string.
    ///
    /// # Examples
    ///
    /// ```
    /// # use pool_tester::connection::TesterParams;
    /// # use std::str::FromStr;
    /// let params = TesterParams::from_str("tester://SALES?rows_updated=3&query_timeout=2")?;
    /// assert_eq!(params.catalog.as_deref(), Some("SALES"));
    /// assert_eq!(params.rows_updated, 3);
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let url = s.trim();

        let rest = url.strip_prefix(SCHEME).ok_or_else(|| {
            ConnectionError::ParseError(format!("Connection string must start with '{}'", SCHEME))
        })?;

        let (catalog_part, query_string) = match rest.split_once('?') {
            Some((catalog, query)) => (catalog, Some(query)),
            None => (rest, None),
        };

        let params = parse_query_params(query_string)?;

        let catalog = catalog_part.trim_end_matches('/');
        let mut builder = TesterParamsBuilder::new();
        if !catalog.is_empty() {
            let catalog = urlencoding::decode(catalog)
                .map_err(|e| ConnectionError::ParseError(format!("Failed to decode catalog: {}", e)))?;
            builder = builder.catalog(&catalog);
        }

        builder = apply_query_params(builder, params)?;

        builder.build()
    }
}

impl fmt::Display for TesterParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{}?rows_updated={}&query_timeout={}&result_set_type={}&result_set_concurrency={}&fail_catalog={}",
            SCHEME,
            self.catalog
                .as_deref()
                .map(|c| urlencoding::encode(c).into_owned())
                .unwrap_or_default(),
            self.rows_updated,
            self.query_timeout_secs,
            self.result_set_type,
            self.result_set_concurrency,
            self.fail_catalog
        )?;

        let mut attributes: Vec<_> = self.attributes.iter().collect();
        attributes.sort();
        for (key, value) in attributes {
            write!(
                f,
                "&{}={}",
                urlencoding::encode(key),
                urlencoding::encode(value)
            )?;
        }
        Ok(())
    }
}

/// Builder for constructing TesterParams with validation.
#[derive(Debug, Clone, Default)]
pub struct TesterParamsBuilder {
    catalog: Option<String>,
    fail_catalog: Option<bool>,
    rows_updated: Option<i64>,
    query_timeout_secs: Option<u32>,
    result_set_type: Option<ResultSetType>,
    result_set_concurrency: Option<ResultSetConcurrency>,
    attributes: HashMap<String, String>,
}

impl TesterParamsBuilder {
    /// Create a new TesterParamsBuilder with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the catalog reported by the connection.
    pub fn catalog(mut self, catalog: &str) -> Self {
        self.catalog = Some(catalog.to_string());
        self
    }

    /// Make catalog lookups fail.
    pub fn fail_catalog(mut self, fail: bool) -> Self {
        self.fail_catalog = Some(fail);
        self
    }

    /// Set the row count returned by updates.
    pub fn rows_updated(mut self, rows: i64) -> Self {
        self.rows_updated = Some(rows);
        self
    }

    /// Set the query timeout in seconds.
    pub fn query_timeout(mut self, secs: u32) -> Self {
        self.query_timeout_secs = Some(secs);
        self
    }

    /// Set the default result-set type.
    pub fn result_set_type(mut self, result_set_type: ResultSetType) -> Self {
        self.result_set_type = Some(result_set_type);
        self
    }

    /// Set the default result-set concurrency.
    pub fn result_set_concurrency(mut self, concurrency: ResultSetConcurrency) -> Self {
        self.result_set_concurrency = Some(concurrency);
        self
    }

    /// Add a custom attribute.
    pub fn attribute(mut self, key: &str, value: &str) -> Self {
        self.attributes.insert(key.to_string(), value.to_string());
        self
    }

    /// Build the TesterParams with validation.
    pub fn build(self) -> Result<TesterParams, ConnectionError> {
        let defaults = TesterParams::default();

        let params = TesterParams {
            catalog: self.catalog,
            fail_catalog: self.fail_catalog.unwrap_or(defaults.fail_catalog),
            rows_updated: self.rows_updated.unwrap_or(defaults.rows_updated),
            query_timeout_secs: self.query_timeout_secs.unwrap_or(defaults.query_timeout_secs),
            result_set_type: self.result_set_type.unwrap_or(defaults.result_set_type),
            result_set_concurrency: self
                .result_set_concurrency
                .unwrap_or(defaults.result_set_concurrency),
            attributes: self.attributes,
        };
        params.validate()?;
        Ok(params)
    }
}

/// Parse query parameters from URL query string.
fn parse_query_params(query: Option<&str>) -> Result<HashMap<String, String>, ConnectionError> {
    let mut params = HashMap::new();

    if let Some(query) = query {
        for pair in query.split('&') {
            if pair.is_empty() {
                continue;
            }

            let (key, value) = pair.split_once('=').ok_or_else(|| {
                ConnectionError::ParseError(format!("Invalid query parameter format: {}", pair))
            })?;

            let key = urlencoding::decode(key)
                .map_err(|e| ConnectionError::ParseError(format!("Failed to decode key: {}", e)))?
                .into_owned();
            let value = urlencoding::decode(value)
                .map_err(|e| ConnectionError::ParseError(format!("Failed to decode value: {}", e)))?
                .into_owned();

            params.insert(key, value);
        }
    }

    Ok(params)
}

/// Apply query parameters to builder.
fn apply_query_params(
    mut builder: TesterParamsBuilder,
    params: HashMap<String, String>,
) -> Result<TesterParamsBuilder, ConnectionError> {
    for (key, value) in params {
        match key.as_str() {
            "rows_updated" => {
                let rows: i64 = value.parse().map_err(|_| ConnectionError::InvalidParameter {
                    parameter: key.clone(),
                    message: format!("Invalid row count: {}", value),
                })?;
                builder = builder.rows_updated(rows);
            }
            "query_timeout" => {
                let secs: u32 = value.parse().map_err(|_| ConnectionError::InvalidParameter {
                    parameter: key.clone(),
                    message: format!("Invalid timeout value: {}", value),
                })?;
                builder = builder.query_timeout(secs);
            }
            "result_set_type" => {
                builder = builder.result_set_type(value.parse()?);
            }
            "result_set_concurrency" => {
                builder = builder.result_set_concurrency(value.parse()?);
            }
            "fail_catalog" => {
                builder = builder.fail_catalog(parse_bool(&key, &value)?);
            }
            _ => {
                builder = builder.attribute(&key, &value);
            }
        }
    }

    Ok(builder)
}

/// Parse boolean value from string.
fn parse_bool(key: &str, s: &str) -> Result<bool, ConnectionError> {
    match s.to_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Ok(true),
        "false" | "0" | "no" | "off" => Ok(false),
        _ => Err(ConnectionError::InvalidParameter {
            parameter: key.to_string(),
            message: format!("Invalid boolean value: {}", s),
        }),
    }
}

//! Integration tests driving the statement double through its public API,
//! the way a connection pool under test would.

mod common;

use common::{Validation, DEFAULT_CATALOG, DEFAULT_ROWS_UPDATED, VALIDATION_QUERY};
use mockall::mock;
use pool_tester::connection::CatalogProvider;
use pool_tester::query::{CurrentResult, StreamKind, StreamLength};
use pool_tester::{
    ConnectionError, ErrorCode, GeneratedKeys, Parameter, PreparedStatement,
    ResultSetConcurrency, ResultSetType, Statement, StatementError, StatementState, TesterError,
    TesterParams, TesterPreparedStatement, TesterResultSet,
};

mock! {
    pub Owner {}

    impl CatalogProvider for Owner {
        fn catalog(&self) -> Result<Option<String>, ConnectionError>;
    }
}

// ============================================================================
// Construction
// ============================================================================

#[test]
fn test_statement_captures_connection_catalog() {
    let stmt = common::prepared(VALIDATION_QUERY);
    assert_eq!(stmt.catalog(), Some(DEFAULT_CATALOG));
    assert_eq!(stmt.sql(), Some(VALIDATION_QUERY));
}

#[test]
fn test_failing_catalog_never_fails_construction() {
    let conn = common::connection_from("tester://SALES?fail_catalog=true");

    let stmt = conn.prepare_statement(VALIDATION_QUERY).unwrap();
    assert_eq!(stmt.catalog(), None);

    let stmt = conn.create_statement().unwrap();
    assert_eq!(stmt.catalog(), None);
    assert_eq!(stmt.sql(), None);
}

#[test]
fn test_catalog_lookup_happens_once_per_construction() {
    let mut owner = MockOwner::new();
    owner
        .expect_catalog()
        .times(3)
        .returning(|| Ok(Some("OWNED".to_string())));

    let a = TesterPreparedStatement::new(&owner);
    let b = TesterPreparedStatement::with_sql(&owner, "SELECT 1");
    let c = TesterPreparedStatement::with_result_set_mode(
        &owner,
        "SELECT 1",
        ResultSetType::ForwardOnly,
        ResultSetConcurrency::ReadOnly,
    );

    for stmt in [&a, &b, &c] {
        assert_eq!(stmt.catalog(), Some("OWNED"));
    }
}

#[test]
fn test_catalog_provider_as_trait_object() {
    let mut owner = MockOwner::new();
    owner
        .expect_catalog()
        .returning(|| Err(ConnectionError::ConnectionClosed));

    let provider: &dyn CatalogProvider = &owner;
    let stmt = TesterPreparedStatement::with_sql(provider, "SELECT 1");
    assert_eq!(stmt.catalog(), None);
}

#[test]
fn test_catalog_change_affects_later_statements_only() {
    let mut conn = common::connection();
    let before = conn.prepare_statement(VALIDATION_QUERY).unwrap();

    conn.set_catalog(Some("OTHER")).unwrap();
    let after = conn.prepare_statement(VALIDATION_QUERY).unwrap();

    assert_eq!(before.catalog(), Some(DEFAULT_CATALOG));
    assert_eq!(after.catalog(), Some("OTHER"));
}

#[test]
fn test_display_is_sql_text() {
    let stmt = common::prepared("SELECT name FROM users WHERE id = ?");
    assert_eq!(stmt.to_string(), "SELECT name FROM users WHERE id = ?");
}

// ============================================================================
// Query execution
// ============================================================================

#[test]
fn test_worked_examples() {
    let mut stmt = common::prepared("SELECT 1");
    assert!(stmt.execute_query().unwrap().is_some());

    let mut stmt = common::prepared("null");
    assert!(stmt.execute_query().unwrap().is_none());

    let mut stmt = common::prepared("SELECT 1");
    stmt.set_query_timeout(3).unwrap();
    assert!(matches!(
        stmt.execute_query(),
        Err(StatementError::QueryTimeout { timeout_secs: 3 })
    ));

    stmt.set_query_timeout(10).unwrap();
    assert!(stmt.execute_query().unwrap().is_some());
}

#[test]
fn test_timeout_seeded_from_connection_string() {
    let conn = common::connection_from("tester://?query_timeout=4");
    let mut stmt = conn.prepare_statement(VALIDATION_QUERY).unwrap();

    let err = stmt.execute_query().unwrap_err();
    assert_eq!(err.to_error_code(), ErrorCode::Timeout);
    assert!(err.to_string().contains("query timeout"));

    // Ad hoc SQL bypasses the timeout simulation
    assert!(stmt.execute_query_sql(VALIDATION_QUERY).unwrap().is_some());
}

#[test]
fn test_result_sets_are_empty_and_closable() {
    let conn = common::connection();
    let mut stmt = conn
        .prepare_statement_with(
            VALIDATION_QUERY,
            ResultSetType::ScrollSensitive,
            ResultSetConcurrency::Updatable,
        )
        .unwrap();

    let mut rs = stmt.execute_query().unwrap().unwrap();
    assert_eq!(rs.result_set_type(), ResultSetType::ScrollSensitive);
    assert_eq!(rs.result_set_concurrency(), ResultSetConcurrency::Updatable);
    assert_eq!(rs.next_row(), Ok(false));

    rs.close().unwrap();
    assert_eq!(rs.next_row(), Err(StatementError::ResourceClosed));
}

// ============================================================================
// Updates
// ============================================================================

#[test]
fn test_update_overloads_are_distinguishable() {
    let mut stmt = common::prepared("UPDATE t SET x = ?");

    assert_eq!(stmt.execute_update().unwrap(), DEFAULT_ROWS_UPDATED);
    assert_eq!(
        stmt.execute_update_sql("anything at all").unwrap(),
        DEFAULT_ROWS_UPDATED
    );
    assert_eq!(
        stmt.execute_update_with_keys("INSERT", GeneratedKeys::Flag(true))
            .unwrap(),
        0
    );
}

#[test]
fn test_rows_updated_from_state() {
    let owner = common::connection();
    let mut stmt = TesterPreparedStatement::from_state(
        &owner,
        Some("DELETE FROM t".to_string()),
        StatementState::new().with_rows_updated(0),
    );
    assert_eq!(stmt.execute_update().unwrap(), 0);
}

// ============================================================================
// Lifecycle
// ============================================================================

#[test]
fn test_pool_validation_outcomes() {
    let mut healthy = common::prepared(VALIDATION_QUERY);
    assert_eq!(common::validate(&mut healthy), Validation::Valid);

    let mut degenerate = common::prepared("null");
    assert_eq!(common::validate(&mut degenerate), Validation::NoResult);

    let mut slow = common::prepared(VALIDATION_QUERY);
    slow.set_query_timeout(1).unwrap();
    assert_eq!(
        common::validate(&mut slow),
        Validation::Evict(StatementError::QueryTimeout { timeout_secs: 1 })
    );

    let mut closed = common::prepared(VALIDATION_QUERY);
    closed.close().unwrap();
    assert_eq!(
        common::validate(&mut closed),
        Validation::Evict(StatementError::ResourceClosed)
    );
}

#[test]
fn test_closed_statement_through_trait_object() {
    let mut stmt = common::prepared(VALIDATION_QUERY);
    let pooled: &mut dyn PreparedStatement<ResultSet = TesterResultSet> = &mut stmt;

    pooled.close().unwrap();
    assert!(pooled.is_closed());
    assert_eq!(pooled.execute(), Err(StatementError::ResourceClosed));
    assert_eq!(
        pooled.bind(0, Parameter::Boolean(true)),
        Err(StatementError::ResourceClosed)
    );
    assert_eq!(pooled.add_batch(), Err(StatementError::ResourceClosed));

    // Generated keys stay available after close
    assert!(pooled.generated_keys().is_ok());
}

#[test]
fn test_closed_connection_refuses_statements() {
    let mut conn = common::connection();
    conn.close();

    let err: TesterError = conn.prepare_statement(VALIDATION_QUERY).unwrap_err().into();
    assert_eq!(err.to_error_code(), ErrorCode::ResourceClosed);
}

// ============================================================================
// Binding and unsupported capabilities
// ============================================================================

#[test]
fn test_binding_every_supported_kind() {
    let mut stmt = common::prepared("INSERT INTO t VALUES (?)");
    let values: Vec<Parameter> = vec![
        Parameter::Null,
        true.into(),
        7i8.into(),
        7i16.into(),
        7i32.into(),
        7i64.into(),
        1.5f32.into(),
        2.5f64.into(),
        Parameter::Decimal("10.01".to_string()),
        "text".into(),
        vec![0u8, 1].into(),
        chrono::NaiveDate::from_ymd_opt(2024, 5, 1).unwrap().into(),
        chrono::NaiveTime::from_hms_opt(8, 0, 0).unwrap().into(),
        serde_json::json!({"id": 1}).into(),
        Parameter::Stream {
            kind: StreamKind::Binary,
            data: vec![1, 2, 3],
            length: StreamLength::Int(3),
        },
    ];

    for (index, value) in values.into_iter().enumerate() {
        assert_eq!(stmt.bind(index, value), Ok(()));
    }
    assert_eq!(stmt.clear_parameters(), Ok(()));
}

#[test]
fn test_unsupported_capabilities_surface_immediately() {
    let mut stmt = common::prepared(VALIDATION_QUERY);

    let err = stmt.parameter_metadata().unwrap_err();
    assert_eq!(err.to_error_code(), ErrorCode::NotImplemented);

    assert!(matches!(
        stmt.more_results(CurrentResult::Keep),
        Err(StatementError::NotImplemented(_))
    ));
    assert!(matches!(
        stmt.bind(
            0,
            Parameter::Stream {
                kind: StreamKind::Character,
                data: vec![],
                length: StreamLength::Unbounded,
            }
        ),
        Err(StatementError::NotImplemented(_))
    ));
    assert!(matches!(
        stmt.bind(0, Parameter::RowId(vec![1])),
        Err(StatementError::NotImplemented("set_row_id"))
    ));
}

// ============================================================================
// Configuration
// ============================================================================

#[test]
fn test_params_from_json_fixture() {
    let params = TesterParams::from_json(
        r#"{
            "catalog": "FIXTURE",
            "rows_updated": 11,
            "query_timeout_secs": 2,
            "result_set_type": "scroll_insensitive"
        }"#,
    )
    .unwrap();

    let conn = pool_tester::TesterConnection::with_params(params);
    let mut stmt = conn.prepare_statement(VALIDATION_QUERY).unwrap();

    assert_eq!(stmt.catalog(), Some("FIXTURE"));
    assert_eq!(stmt.execute_update().unwrap(), 11);
    assert_eq!(stmt.result_set_type(), ResultSetType::ScrollInsensitive);
    assert!(stmt.execute_query().is_err());
}

#[test]
fn test_json_fixture_with_negative_rows_is_rejected() {
    let err = TesterParams::from_json(r#"{"catalog": "FIXTURE", "rows_updated": -5}"#).unwrap_err();
    assert!(matches!(err, ConnectionError::InvalidParameter { .. }));
}

#[test]
fn test_timeout_spelling_is_stable_across_parses() {
    for _ in 0..100 {
        let conn = common::connection_from("tester://?query_timeout=3&timeout=10");
        let mut stmt = conn.prepare_statement(VALIDATION_QUERY).unwrap();
        assert!(matches!(
            stmt.execute_query(),
            Err(StatementError::QueryTimeout { timeout_secs: 3 })
        ));
    }
}

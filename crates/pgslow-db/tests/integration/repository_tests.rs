//! Integration tests for StatsRepository over PgExecutor.
//!
//! Ignored by default: each test starts a PostgreSQL container.

use pgslow_core::{AppError, QueryParams};

use crate::integration::common::{repository, setup_test_db};

fn params(page_size: u32, query_type: &str, order_by: &str) -> QueryParams {
    QueryParams {
        page: 0,
        page_size,
        query_type: query_type.to_string(),
        order_by: order_by.to_string(),
    }
}

#[tokio::test]
#[ignore] // Requires Docker
async fn test_demo_seeds_and_cleans_up() {
    let (pool, _container) = setup_test_db().await;
    let repo = repository(pool.clone());

    repo.demo().await.expect("demo should succeed");

    let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM users")
        .fetch_one(&pool)
        .await
        .expect("users table should exist");
    assert_eq!(count, 0, "demo deletes the row it inserted");
}

#[tokio::test]
#[ignore] // Requires Docker
async fn test_demo_is_rerunnable() {
    let (pool, _container) = setup_test_db().await;
    let repo = repository(pool);

    repo.demo().await.expect("first run should succeed");
    repo.demo().await.expect("second run should succeed");
}

#[tokio::test]
#[ignore] // Requires Docker
async fn test_demo_replaces_existing_users_table() {
    let (pool, _container) = setup_test_db().await;

    sqlx::query("CREATE TABLE users (legacy_id INT)")
        .execute(&pool)
        .await
        .expect("pre-existing table");

    let repo = repository(pool);
    repo.demo()
        .await
        .expect("drop-if-exists should precede create");
}

#[tokio::test]
#[ignore] // Requires Docker
async fn test_get_filters_by_statement_prefix() {
    let (pool, _container) = setup_test_db().await;
    let repo = repository(pool);
    repo.demo().await.expect("demo should succeed");

    let logs = repo
        .get(&params(100, "SELECT", ""))
        .await
        .expect("get should succeed");

    assert!(!logs.is_empty(), "demo runs at least one SELECT");
    for log in &logs {
        assert!(
            log.query.to_lowercase().starts_with("select"),
            "unexpected statement: {}",
            log.query
        );
        assert!(log.total_exec_time.parse::<f64>().is_ok());
    }
}

#[tokio::test]
#[ignore] // Requires Docker
async fn test_get_orders_by_total_exec_time() {
    let (pool, _container) = setup_test_db().await;
    let repo = repository(pool);
    repo.demo().await.expect("demo should succeed");

    for (order, descending) in [("desc", true), ("asc", false)] {
        let logs = repo
            .get(&params(100, "", order))
            .await
            .expect("get should succeed");
        let times: Vec<f64> = logs
            .iter()
            .map(|log| log.total_exec_time.parse().unwrap())
            .collect();

        for pair in times.windows(2) {
            if descending {
                assert!(pair[0] >= pair[1], "{:?} not descending", times);
            } else {
                assert!(pair[0] <= pair[1], "{:?} not ascending", times);
            }
        }
    }
}

#[tokio::test]
#[ignore] // Requires Docker
async fn test_get_respects_limit_and_offset() {
    let (pool, _container) = setup_test_db().await;
    let repo = repository(pool);
    repo.demo().await.expect("demo should succeed");

    let first = repo.get(&params(1, "", "")).await.unwrap();
    assert_eq!(first.len(), 1);

    let far = repo
        .get(&QueryParams {
            page: 100_000,
            page_size: 10,
            ..Default::default()
        })
        .await
        .unwrap();
    assert!(far.is_empty(), "a page past the end is empty, not an error");
}

#[tokio::test]
#[ignore] // Requires Docker
async fn test_get_without_extension_fails() {
    let (pool, _container) = setup_test_db().await;
    let repo = repository(pool);

    let err = repo
        .get(&QueryParams::default())
        .await
        .expect_err("view does not exist before the extension is created");
    assert!(matches!(err, AppError::ExecutionError(_)));
}

//! Query tests for sldb-db against a seeded in-memory `SQLite` database.
//!
//! The pool is pinned to a single connection so every query sees the same
//! in-memory database.

use std::collections::HashSet;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};

use serde_json::Value;
use sldb_core::{AppConfig, CityName, Environment, Page, StateCode};
use sldb_db::{
    connect_pool, get_location_by_store_id, health_check, list_cities, list_locations,
    list_locations_by_city, list_locations_by_state, list_states, DbError, PoolConfig,
};
use sqlx::sqlite::{SqlitePool, SqlitePoolOptions};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

async fn memory_pool() -> SqlitePool {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .expect("open in-memory sqlite");

    sqlx::query(
        "CREATE TABLE locations ( \
             storeId INTEGER PRIMARY KEY, \
             storeName TEXT NOT NULL, \
             city TEXT, \
             stateCode TEXT, \
             latitude REAL, \
             openHours TEXT, \
             driveThroughHours TEXT \
         )",
    )
    .execute(&pool)
    .await
    .expect("create locations table");

    pool
}

async fn insert_location(
    pool: &SqlitePool,
    store_id: i64,
    city: Option<&str>,
    state: Option<&str>,
) {
    sqlx::query(
        "INSERT INTO locations (storeId, storeName, city, stateCode, latitude, openHours) \
         VALUES (?, ?, ?, ?, ?, ?)",
    )
    .bind(store_id)
    .bind(format!("Store {store_id}"))
    .bind(city)
    .bind(state)
    .bind(30.25_f64)
    .bind("{'hoursMonday': '6:00 AM - 11:00 PM'}")
    .execute(pool)
    .await
    .expect("insert location");
}

/// Twelve rows across three states and a mix of city casings.
async fn seeded_pool() -> SqlitePool {
    let pool = memory_pool().await;
    let fixtures: [(i64, Option<&str>, Option<&str>); 12] = [
        (1, Some("Austin"), Some("TX")),
        (2, Some("AUSTIN"), Some("TX")),
        (3, Some("Dallas"), Some("TX")),
        (4, Some("Brooklyn"), Some("NY")),
        (5, Some("Albany"), Some("NY")),
        (6, Some("Austin"), Some("TX")),
        (7, Some("Reno"), Some("NV")),
        (8, Some("Houston"), Some("TX")),
        (9, Some("Buffalo"), Some("NY")),
        (10, Some("El Paso"), Some("TX")),
        (11, Some("Laredo"), Some("TX")),
        (12, None, None),
    ];
    for (store_id, city, state) in fixtures {
        insert_location(&pool, store_id, city, state).await;
    }
    pool
}

fn store_ids(rows: &[sldb_core::LocationRow]) -> Vec<i64> {
    rows.iter()
        .map(|row| {
            row.get("storeId")
                .and_then(Value::as_i64)
                .expect("storeId column")
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Pool
// ---------------------------------------------------------------------------

#[test]
fn pool_config_from_app_config_uses_core_values() {
    let app_config = AppConfig {
        database_url: "sqlite://locations.sqlite".to_string(),
        env: Environment::Test,
        bind_addr: SocketAddr::new(IpAddr::V4(Ipv4Addr::LOCALHOST), 3000),
        log_level: "info".to_string(),
        db_max_connections: 42,
        db_min_connections: 7,
        db_acquire_timeout_secs: 9,
    };

    let pool_config = PoolConfig::from_app_config(&app_config);
    assert_eq!(pool_config.max_connections, 42);
    assert_eq!(pool_config.min_connections, 7);
    assert_eq!(pool_config.acquire_timeout_secs, 9);
}

#[tokio::test]
async fn connect_pool_does_not_create_missing_database() {
    let path =
        std::env::temp_dir().join(format!("sldb-missing-{}.sqlite", std::process::id()));
    let url = format!("sqlite://{}", path.display());
    let config = PoolConfig {
        acquire_timeout_secs: 2,
        ..PoolConfig::default()
    };

    let result = connect_pool(&url, config).await;
    assert!(result.is_err(), "read-only pool must not create {url}");
    assert!(!path.exists());
}

#[tokio::test]
async fn health_check_succeeds_on_live_pool() {
    let pool = memory_pool().await;
    health_check(&pool).await.expect("health check");
}

// ---------------------------------------------------------------------------
// Pagination
// ---------------------------------------------------------------------------

#[tokio::test]
async fn list_locations_pages_are_disjoint_and_bounded() {
    let pool = seeded_pool().await;

    let first = list_locations(&pool, Page::from_param(Some("1")))
        .await
        .expect("page 1");
    let second = list_locations(&pool, Page::from_param(Some("2")))
        .await
        .expect("page 2");

    assert_eq!(first.len(), 10);
    assert_eq!(second.len(), 2);

    let first_ids: HashSet<i64> = store_ids(&first).into_iter().collect();
    assert!(store_ids(&second).iter().all(|id| !first_ids.contains(id)));
}

#[tokio::test]
async fn list_locations_past_the_end_is_empty() {
    let pool = seeded_pool().await;
    let rows = list_locations(&pool, Page::from_param(Some("50")))
        .await
        .expect("page 50");
    assert!(rows.is_empty());
}

#[tokio::test]
async fn list_locations_clamped_page_matches_first_page() {
    let pool = seeded_pool().await;
    let clamped = list_locations(&pool, Page::from_param(Some("-4")))
        .await
        .expect("clamped page");
    let first = list_locations(&pool, Page::default())
        .await
        .expect("default page");
    assert_eq!(store_ids(&clamped), store_ids(&first));
}

// ---------------------------------------------------------------------------
// Filters
// ---------------------------------------------------------------------------

#[tokio::test]
async fn list_locations_by_state_is_case_insensitive() {
    let pool = seeded_pool().await;

    let lower = StateCode::parse(Some("ny")).expect("state");
    let upper = StateCode::parse(Some("NY")).expect("state");

    let lower_rows = list_locations_by_state(&pool, &lower, Page::default())
        .await
        .expect("lower");
    let upper_rows = list_locations_by_state(&pool, &upper, Page::default())
        .await
        .expect("upper");

    assert_eq!(store_ids(&lower_rows), vec![4, 5, 9]);
    assert_eq!(store_ids(&lower_rows), store_ids(&upper_rows));
}

#[tokio::test]
async fn list_locations_by_state_paginates() {
    let pool = seeded_pool().await;
    let texas = StateCode::parse(Some("tx")).expect("state");

    let rows = list_locations_by_state(&pool, &texas, Page::default())
        .await
        .expect("texas");
    assert_eq!(rows.len(), 7);

    let second = list_locations_by_state(&pool, &texas, Page::from_param(Some("2")))
        .await
        .expect("texas page 2");
    assert!(second.is_empty());
}

#[tokio::test]
async fn list_locations_by_city_matches_both_casings() {
    let pool = seeded_pool().await;
    let city = CityName::parse(Some("aUsTiN")).expect("city");

    let rows = list_locations_by_city(&pool, &city, Page::default())
        .await
        .expect("austin");
    assert_eq!(store_ids(&rows), vec![1, 2, 6]);
}

// ---------------------------------------------------------------------------
// Lookup
// ---------------------------------------------------------------------------

#[tokio::test]
async fn get_location_by_store_id_returns_decoded_row() {
    let pool = seeded_pool().await;

    let row = get_location_by_store_id(&pool, "7").await.expect("store 7");
    assert_eq!(row.get("storeId"), Some(&Value::from(7)));
    assert_eq!(row.get("city").and_then(Value::as_str), Some("Reno"));
    assert_eq!(row.get("latitude").and_then(Value::as_f64), Some(30.25));
    assert_eq!(row.get("driveThroughHours"), Some(&Value::Null));
    assert_eq!(
        row.get("openHours").and_then(Value::as_str),
        Some("{'hoursMonday': '6:00 AM - 11:00 PM'}")
    );
}

#[tokio::test]
async fn get_location_by_store_id_reports_not_found() {
    let pool = seeded_pool().await;
    let err = get_location_by_store_id(&pool, "999")
        .await
        .expect_err("no such store");
    assert!(matches!(err, DbError::NotFound), "got {err:?}");
}

#[tokio::test]
async fn invalid_utf8_text_decodes_lossily() {
    let pool = seeded_pool().await;
    sqlx::query(
        "INSERT INTO locations (storeId, storeName, city) \
         VALUES (50, 'Store 50', CAST(x'4175ff' AS TEXT))",
    )
    .execute(&pool)
    .await
    .expect("insert invalid utf-8 city");

    let row = get_location_by_store_id(&pool, "50").await.expect("store 50");
    assert_eq!(row.get("city").and_then(Value::as_str), Some("Au\u{fffd}"));
    assert_eq!(row.get("storeName").and_then(Value::as_str), Some("Store 50"));
}

#[tokio::test]
async fn decoded_row_preserves_column_order() {
    let pool = seeded_pool().await;
    let row = get_location_by_store_id(&pool, "1").await.expect("store 1");
    let columns: Vec<&str> = row.0.keys().map(String::as_str).collect();
    assert_eq!(
        columns,
        [
            "storeId",
            "storeName",
            "city",
            "stateCode",
            "latitude",
            "openHours",
            "driveThroughHours",
        ]
    );
}

// ---------------------------------------------------------------------------
// Distinct values
// ---------------------------------------------------------------------------

#[tokio::test]
async fn list_states_is_sorted_and_distinct() {
    let pool = seeded_pool().await;
    let states = list_states(&pool).await.expect("states");
    assert_eq!(states, vec!["NV", "NY", "TX"]);
}

#[tokio::test]
async fn list_cities_is_sorted_and_distinct() {
    let pool = seeded_pool().await;
    let cities = list_cities(&pool).await.expect("cities");

    let mut expected = cities.clone();
    expected.sort();
    expected.dedup();
    assert_eq!(cities, expected);
    assert_eq!(cities.first().map(String::as_str), Some("AUSTIN"));
    assert_eq!(cities.iter().filter(|c| c.as_str() == "Austin").count(), 1);
}

#[tokio::test]
async fn distinct_lists_are_empty_for_empty_table() {
    let pool = memory_pool().await;
    assert!(list_states(&pool).await.expect("states").is_empty());
    assert!(list_cities(&pool).await.expect("cities").is_empty());
}

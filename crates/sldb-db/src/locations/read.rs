//! Read operations for the `locations` table.
//!
//! Every query is parameterized; filter values are never spliced into SQL.

use sqlx::SqlitePool;

use sldb_core::{CityName, LocationRow, Page, StateCode};

use super::row::decode_location_row;
use crate::DbError;

/// One page of locations in storage order.
///
/// # Errors
///
/// Returns [`sqlx::Error`] if the query fails.
pub async fn list_locations(
    pool: &SqlitePool,
    page: Page,
) -> Result<Vec<LocationRow>, sqlx::Error> {
    let rows = sqlx::query("SELECT * FROM locations LIMIT ? OFFSET ?")
        .bind(page.limit())
        .bind(page.offset())
        .fetch_all(pool)
        .await?;

    rows.iter().map(decode_location_row).collect()
}

/// One page of locations whose `stateCode` equals `state`.
///
/// Stored codes are expected to be uppercase; [`StateCode`] is already
/// uppercased, which makes the filter case-insensitive for callers.
///
/// # Errors
///
/// Returns [`sqlx::Error`] if the query fails.
pub async fn list_locations_by_state(
    pool: &SqlitePool,
    state: &StateCode,
    page: Page,
) -> Result<Vec<LocationRow>, sqlx::Error> {
    let rows = sqlx::query("SELECT * FROM locations WHERE stateCode = ? LIMIT ? OFFSET ?")
        .bind(state.as_str())
        .bind(page.limit())
        .bind(page.offset())
        .fetch_all(pool)
        .await?;

    rows.iter().map(decode_location_row).collect()
}

/// One page of locations in `city`, compared case-insensitively on both sides.
///
/// # Errors
///
/// Returns [`sqlx::Error`] if the query fails.
pub async fn list_locations_by_city(
    pool: &SqlitePool,
    city: &CityName,
    page: Page,
) -> Result<Vec<LocationRow>, sqlx::Error> {
    let rows =
        sqlx::query("SELECT * FROM locations WHERE LOWER(city) = LOWER(?) LIMIT ? OFFSET ?")
            .bind(city.as_str())
            .bind(page.limit())
            .bind(page.offset())
            .fetch_all(pool)
            .await?;

    rows.iter().map(decode_location_row).collect()
}

/// Fetch the location with the given `storeId`.
///
/// The id is bound as text; `SQLite` column affinity converts it when the
/// column is numeric. If several rows match, the first one is returned.
///
/// # Errors
///
/// Returns [`DbError::NotFound`] if no row matches, or [`DbError::Sqlx`] if
/// the query fails.
pub async fn get_location_by_store_id(
    pool: &SqlitePool,
    store_id: &str,
) -> Result<LocationRow, DbError> {
    let row = sqlx::query("SELECT * FROM locations WHERE storeId = ?")
        .bind(store_id)
        .fetch_optional(pool)
        .await?
        .ok_or(DbError::NotFound)?;

    decode_location_row(&row).map_err(DbError::from)
}

/// Distinct non-null state codes in ascending order.
///
/// # Errors
///
/// Returns [`sqlx::Error`] if the query fails.
pub async fn list_states(pool: &SqlitePool) -> Result<Vec<String>, sqlx::Error> {
    sqlx::query_scalar::<_, String>(
        "SELECT DISTINCT stateCode FROM locations \
         WHERE stateCode IS NOT NULL \
         ORDER BY stateCode",
    )
    .fetch_all(pool)
    .await
}

/// Distinct non-null city names in ascending order.
///
/// # Errors
///
/// Returns [`sqlx::Error`] if the query fails.
pub async fn list_cities(pool: &SqlitePool) -> Result<Vec<String>, sqlx::Error> {
    sqlx::query_scalar::<_, String>(
        "SELECT DISTINCT city FROM locations \
         WHERE city IS NOT NULL \
         ORDER BY city",
    )
    .fetch_all(pool)
    .await
}

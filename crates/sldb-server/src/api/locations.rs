use axum::{
    extract::{rejection::QueryRejection, Path, Query, State},
    Extension, Json,
};
use sldb_core::{normalize, CityName, LocationRecord, LocationRow, Page, StateCode};
use sldb_db::DbError;

use crate::middleware::RequestId;

use super::{map_db_error, ApiError, AppState};

/// Raw query pairs in request order.
///
/// `page` never fails: when it repeats, the first value wins. The filters are
/// single-valued, so a repeated `state` or `city` is rejected.
#[derive(Debug)]
struct QueryPairs(Vec<(String, String)>);

impl QueryPairs {
    fn first(&self, key: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(name, _)| name == key)
            .map(|(_, value)| value.as_str())
    }

    fn single(&self, key: &'static str) -> Result<Option<&str>, ApiError> {
        let mut values = self
            .0
            .iter()
            .filter(|(name, _)| name == key)
            .map(|(_, value)| value.as_str());
        let first = values.next();
        if values.next().is_some() {
            return Err(ApiError::bad_request(format!(
                "Invalid query string: duplicate `{key}` parameter"
            )));
        }
        Ok(first)
    }

    fn page(&self) -> Page {
        Page::from_param(self.first("page"))
    }
}

fn query_pairs(
    query: Result<Query<Vec<(String, String)>>, QueryRejection>,
) -> Result<QueryPairs, ApiError> {
    let Query(pairs) = query?;
    Ok(QueryPairs(pairs))
}

fn normalize_rows(rows: Vec<LocationRow>) -> Vec<LocationRecord> {
    rows.into_iter().map(normalize).collect()
}

pub(super) async fn list_locations(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    query: Result<Query<Vec<(String, String)>>, QueryRejection>,
) -> Result<Json<Vec<LocationRecord>>, ApiError> {
    let page = query_pairs(query)?.page();

    let rows = sldb_db::list_locations(&state.pool, page)
        .await
        .map_err(|e| map_db_error(&req_id.0, &DbError::from(e)))?;

    Ok(Json(normalize_rows(rows)))
}

pub(super) async fn list_locations_by_state(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    query: Result<Query<Vec<(String, String)>>, QueryRejection>,
) -> Result<Json<Vec<LocationRecord>>, ApiError> {
    let params = query_pairs(query)?;
    let state_code = StateCode::parse(params.single("state")?)?;
    let page = params.page();

    let rows = sldb_db::list_locations_by_state(&state.pool, &state_code, page)
        .await
        .map_err(|e| map_db_error(&req_id.0, &DbError::from(e)))?;

    Ok(Json(normalize_rows(rows)))
}

pub(super) async fn list_locations_by_city(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    query: Result<Query<Vec<(String, String)>>, QueryRejection>,
) -> Result<Json<Vec<LocationRecord>>, ApiError> {
    let params = query_pairs(query)?;
    let city = CityName::parse(params.single("city")?)?;
    let page = params.page();

    let rows = sldb_db::list_locations_by_city(&state.pool, &city, page)
        .await
        .map_err(|e| map_db_error(&req_id.0, &DbError::from(e)))?;

    Ok(Json(normalize_rows(rows)))
}

pub(super) async fn get_location(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Path(store_id): Path<String>,
) -> Result<Json<LocationRecord>, ApiError> {
    let row = sldb_db::get_location_by_store_id(&state.pool, &store_id)
        .await
        .map_err(|e| match e {
            DbError::NotFound => ApiError::not_found(format!(
                "Location not found. The location with storeId={store_id} does not exist."
            )),
            other => map_db_error(&req_id.0, &other),
        })?;

    Ok(Json(normalize(row)))
}

use axum::{extract::State, Extension, Json};
use sldb_db::DbError;

use crate::middleware::RequestId;

use super::{map_db_error, ApiError, AppState};

pub(super) async fn list_states(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
) -> Result<Json<Vec<String>>, ApiError> {
    let states = sldb_db::list_states(&state.pool)
        .await
        .map_err(|e| map_db_error(&req_id.0, &DbError::from(e)))?;

    Ok(Json(states))
}

pub(super) async fn list_cities(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
) -> Result<Json<Vec<String>>, ApiError> {
    let cities = sldb_db::list_cities(&state.pool)
        .await
        .map_err(|e| map_db_error(&req_id.0, &DbError::from(e)))?;

    Ok(Json(cities))
}

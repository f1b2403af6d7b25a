use crate::error::AppError;
use crate::state::AppState;
use axum::{
    extract::{Path, Query, State},
    routing::get,
    Json, Router,
};
use railbook_shared::Station;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct StationSearchParams {
    #[serde(default)]
    q: String,
}

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/v1/stations", get(list_stations))
        .route("/v1/stations/search", get(search_stations))
        .route("/v1/stations/{code}", get(get_station))
}

async fn list_stations(State(state): State<AppState>) -> Json<Vec<Station>> {
    Json(state.stations.all().to_vec())
}

async fn search_stations(
    State(state): State<AppState>,
    Query(params): Query<StationSearchParams>,
) -> Json<Vec<Station>> {
    let matches = state
        .stations
        .search(&params.q)
        .into_iter()
        .cloned()
        .collect();
    Json(matches)
}

async fn get_station(
    State(state): State<AppState>,
    Path(code): Path<String>,
) -> Result<Json<Station>, AppError> {
    state
        .stations
        .get_by_code(&code)
        .cloned()
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("station not found: {}", code)))
}

use crate::error::AppError;
use crate::state::AppState;
use axum::{
    extract::{Path, Query, State},
    routing::get,
    Json, Router,
};
use chrono::NaiveDate;
use rand::rngs::StdRng;
use rand::SeedableRng;
use railbook_catalog::TrainSearchQuery;
use railbook_shared::{Coach, FareBreakdown, LiveStatus, Train, TravelClass};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct TrainSearchParams {
    #[serde(default)]
    origin: String,
    #[serde(default)]
    destination: String,
    date: Option<NaiveDate>,
    class: Option<TravelClass>,
}

#[derive(Debug, Deserialize)]
pub struct SeatLayoutParams {
    class: TravelClass,
}

#[derive(Debug, Deserialize)]
pub struct FareParams {
    class: TravelClass,
    passengers: u32,
}

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/v1/trains/search", get(search_trains))
        .route("/v1/trains/status/{train_number}", get(train_status))
        .route("/v1/trains/{id}", get(get_train))
        .route("/v1/trains/{id}/seats", get(seat_layout))
        .route("/v1/trains/{id}/fare", get(fare_quote))
}

async fn search_trains(
    State(state): State<AppState>,
    Query(params): Query<TrainSearchParams>,
) -> Json<Vec<Train>> {
    let query = TrainSearchQuery {
        origin: params.origin,
        destination: params.destination,
        journey_date: params.date,
        travel_class: params.class,
    };
    let mut rng = StdRng::from_entropy();
    Json(state.catalog.search(&query, &mut rng))
}

async fn get_train(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Train>, AppError> {
    state
        .catalog
        .get_by_id(id)
        .cloned()
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("train not found: {}", id)))
}

async fn seat_layout(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Query(params): Query<SeatLayoutParams>,
) -> Result<Json<Vec<Coach>>, AppError> {
    let mut rng = StdRng::from_entropy();
    state
        .catalog
        .seat_layout(id, params.class, &mut rng)
        .map(Json)
        .ok_or_else(|| {
            AppError::NotFound(format!("train {} does not offer class {}", id, params.class))
        })
}

/// Unknown train or class quotes as zero rather than failing, mirroring the
/// calculator's contract; the review screen treats a zero total as unpriced.
async fn fare_quote(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Query(params): Query<FareParams>,
) -> Json<FareBreakdown> {
    let train = state.catalog.get_by_id(id);
    Json(state.fare.calculate(train, params.class, params.passengers))
}

async fn train_status(
    State(state): State<AppState>,
    Path(train_number): Path<String>,
) -> Result<Json<LiveStatus>, AppError> {
    let mut rng = StdRng::from_entropy();
    state
        .catalog
        .live_status(&train_number, &mut rng)
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("train not found: {}", train_number)))
}

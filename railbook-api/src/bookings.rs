use crate::error::AppError;
use crate::state::AppState;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use railbook_ledger::{CancellationOutcome, CreateBookingRequest};
use railbook_shared::{Booking, TicketDocument};
use serde::Deserialize;
use tracing::info;

#[derive(Debug, Deserialize)]
pub struct ListParams {
    user: Option<String>,
}

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/v1/bookings", post(create_booking).get(list_bookings))
        .route("/v1/bookings/{pnr}", get(get_booking))
        .route("/v1/bookings/{pnr}/cancel", post(cancel_booking))
        .route("/v1/bookings/{pnr}/ticket", get(download_ticket))
}

async fn create_booking(
    State(state): State<AppState>,
    Json(request): Json<CreateBookingRequest>,
) -> Result<(StatusCode, Json<Booking>), AppError> {
    let mut rng = StdRng::from_entropy();
    let booking = state.ledger.create(request, &mut rng).await?;
    Ok((StatusCode::CREATED, Json(booking)))
}

async fn list_bookings(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> Result<Json<Vec<Booking>>, AppError> {
    let bookings = state.ledger.list_bookings(params.user.as_deref()).await?;
    Ok(Json(bookings))
}

async fn get_booking(
    State(state): State<AppState>,
    Path(pnr): Path<String>,
) -> Result<Json<Booking>, AppError> {
    state
        .ledger
        .get_by_pnr(&pnr)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("booking not found: {}", pnr)))
}

async fn cancel_booking(
    State(state): State<AppState>,
    Path(pnr): Path<String>,
) -> Result<Json<CancellationOutcome>, AppError> {
    let outcome = state.ledger.cancel(&pnr).await?;
    Ok(Json(outcome))
}

async fn download_ticket(
    State(state): State<AppState>,
    Path(pnr): Path<String>,
) -> Result<Json<TicketDocument>, AppError> {
    let renderer = state.tickets.clone().ok_or_else(|| {
        AppError::UnavailableError("ticket export is not configured".to_string())
    })?;
    let booking = state
        .ledger
        .get_by_pnr(&pnr)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("booking not found: {}", pnr)))?;

    let document = renderer.render(&booking).await?;
    info!(pnr = %pnr, filename = %document.filename, "ticket rendered");
    Ok(Json(document))
}

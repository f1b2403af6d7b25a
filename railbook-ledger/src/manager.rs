use crate::models::{CancellationOutcome, CreateBookingRequest};
use chrono::{NaiveDate, Utc};
use rand::Rng;
use railbook_core::{BookingRepository, StoreError};
use railbook_shared::{Booking, BookingStatus};
use std::sync::Arc;
use tracing::info;

/// PNR space is 9 * 10^9; with demo-scale record counts a collision on
/// sixteen straight draws means the rng is broken, not the ledger.
const MAX_PNR_ATTEMPTS: usize = 16;

#[derive(Debug, thiserror::Error)]
pub enum LedgerError {
    #[error("booking not found: {0}")]
    NotFound(String),

    #[error("booking already cancelled: {0}")]
    AlreadyCancelled(String),

    #[error("invalid booking request: {0}")]
    Validation(String),

    #[error("could not allocate a unique PNR")]
    PnrSpaceExhausted,

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Owns the booking lifecycle over an injected repository. The only state
/// transition is Confirmed -> Cancelled; Waitlisted and Completed exist on
/// the wire but nothing here produces them.
pub struct BookingLedger {
    repo: Arc<dyn BookingRepository>,
}

impl BookingLedger {
    pub fn new(repo: Arc<dyn BookingRepository>) -> Self {
        Self { repo }
    }

    /// Creates a Confirmed booking: validates the passenger/seat arity,
    /// allocates a PNR that is not already taken (regenerating on collision),
    /// stamps today's date, and hands the record to the repository, which
    /// assigns its id.
    pub async fn create(
        &self,
        request: CreateBookingRequest,
        rng: &mut (impl Rng + Send),
    ) -> Result<Booking, LedgerError> {
        if request.passengers.is_empty() {
            return Err(LedgerError::Validation(
                "at least one passenger is required".to_string(),
            ));
        }
        if request.passengers.len() != request.seat_numbers.len() {
            return Err(LedgerError::Validation(format!(
                "{} passengers but {} seats",
                request.passengers.len(),
                request.seat_numbers.len()
            )));
        }

        let pnr = self.allocate_pnr(rng).await?;
        let booking = Booking {
            id: 0, // assigned by the repository
            pnr,
            user_email: request.user_email,
            train_number: request.train_number,
            train_name: request.train_name,
            journey_date: request.journey_date,
            origin: request.origin,
            destination: request.destination,
            departure_time: request.departure_time,
            arrival_time: request.arrival_time,
            passengers: request.passengers,
            seat_numbers: request.seat_numbers,
            travel_class: request.travel_class,
            fare: request.fare,
            booking_date: Utc::now().date_naive(),
            status: BookingStatus::Confirmed,
        };

        let stored = self.repo.insert(booking).await?;
        info!(pnr = %stored.pnr, train = %stored.train_number, "booking confirmed");
        Ok(stored)
    }

    pub async fn get_by_pnr(&self, pnr: &str) -> Result<Option<Booking>, LedgerError> {
        Ok(self.repo.get_by_pnr(pnr).await?)
    }

    /// Bookings newest first. `user` filters by the booking's owner email;
    /// with no auth context wired up, callers pass `None` and get everything.
    pub async fn list_bookings(&self, user: Option<&str>) -> Result<Vec<Booking>, LedgerError> {
        Ok(self.repo.list(user).await?)
    }

    /// Cancels a booking and computes its refund. Terminal: a cancelled
    /// booking stays in the ledger and cannot be cancelled again.
    pub async fn cancel(&self, pnr: &str) -> Result<CancellationOutcome, LedgerError> {
        let mut booking = self
            .repo
            .get_by_pnr(pnr)
            .await?
            .ok_or_else(|| LedgerError::NotFound(pnr.to_string()))?;

        if booking.status == BookingStatus::Cancelled {
            return Err(LedgerError::AlreadyCancelled(pnr.to_string()));
        }

        let today = Utc::now().date_naive();
        let refund_amount = refund_amount(booking.fare, booking.journey_date, today);

        booking.status = BookingStatus::Cancelled;
        self.repo.update(&booking).await?;
        info!(pnr = %booking.pnr, refund = refund_amount, "booking cancelled");

        Ok(CancellationOutcome {
            booking,
            refund_amount,
        })
    }

    async fn allocate_pnr(&self, rng: &mut (impl Rng + Send)) -> Result<String, LedgerError> {
        for _ in 0..MAX_PNR_ATTEMPTS {
            let candidate = generate_pnr(rng);
            if self.repo.get_by_pnr(&candidate).await?.is_none() {
                return Ok(candidate);
            }
            info!(pnr = %candidate, "PNR collision, regenerating");
        }
        Err(LedgerError::PnrSpaceExhausted)
    }
}

/// Ten decimal digits, first digit non-zero.
pub fn generate_pnr(rng: &mut impl Rng) -> String {
    rng.gen_range(1_000_000_000u64..10_000_000_000u64).to_string()
}

/// Time-tiered refund on whole days until the journey: 90% with a day or
/// more to go, 50% on the day itself, nothing once the journey has passed.
/// Always floored to whole rupees.
pub fn refund_amount(fare: i64, journey_date: NaiveDate, today: NaiveDate) -> i64 {
    let days_until_journey = (journey_date - today).num_days();
    let percentage = if days_until_journey >= 1 {
        0.9
    } else if days_until_journey == 0 {
        0.5
    } else {
        0.0
    };
    (fare as f64 * percentage).floor() as i64
}

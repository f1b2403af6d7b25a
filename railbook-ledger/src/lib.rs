pub mod manager;
pub mod models;

pub use manager::{BookingLedger, LedgerError};
pub use models::{CancellationOutcome, CreateBookingRequest};

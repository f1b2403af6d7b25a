use chrono::NaiveDate;
use railbook_shared::{Booking, Passenger, TravelClass};
use serde::{Deserialize, Serialize};

/// Everything the review/payment step has collected by the time the user
/// confirms. The ledger stamps id, PNR, booking date, and status on top.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateBookingRequest {
    #[serde(default)]
    pub user_email: Option<String>,
    pub train_number: String,
    pub train_name: String,
    pub journey_date: NaiveDate,
    pub origin: String,
    pub destination: String,
    pub departure_time: String,
    pub arrival_time: String,
    pub passengers: Vec<Passenger>,
    /// Must match `passengers` by index.
    pub seat_numbers: Vec<String>,
    #[serde(rename = "class")]
    pub travel_class: TravelClass,
    /// Total fare, taxes included.
    pub fare: i64,
}

/// Result of a successful cancellation.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CancellationOutcome {
    pub booking: Booking,
    pub refund_amount: i64,
}

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

/// A railway station. Immutable reference data.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Station {
    pub id: i64,
    pub code: String,
    pub name: String,
    pub city: String,
}

/// Fare/service tier codes as printed on tickets.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum TravelClass {
    #[serde(rename = "1A")]
    FirstAc,
    #[serde(rename = "2A")]
    SecondAc,
    #[serde(rename = "3A")]
    ThirdAc,
    #[serde(rename = "SL")]
    Sleeper,
    #[serde(rename = "CC")]
    ChairCar,
    #[serde(rename = "EC")]
    ExecutiveChair,
}

impl TravelClass {
    pub const ALL: [TravelClass; 6] = [
        TravelClass::FirstAc,
        TravelClass::SecondAc,
        TravelClass::ThirdAc,
        TravelClass::Sleeper,
        TravelClass::ChairCar,
        TravelClass::ExecutiveChair,
    ];

    pub fn code(&self) -> &'static str {
        match self {
            TravelClass::FirstAc => "1A",
            TravelClass::SecondAc => "2A",
            TravelClass::ThirdAc => "3A",
            TravelClass::Sleeper => "SL",
            TravelClass::ChairCar => "CC",
            TravelClass::ExecutiveChair => "EC",
        }
    }

    /// Chair classes carry no berths; everything else sleeps.
    pub fn is_chair_class(&self) -> bool {
        matches!(self, TravelClass::ChairCar | TravelClass::ExecutiveChair)
    }

    /// Coach names start with the first character of the class code.
    pub fn coach_prefix(&self) -> char {
        self.code().chars().next().unwrap_or('X')
    }
}

impl fmt::Display for TravelClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for TravelClass {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "1A" => Ok(TravelClass::FirstAc),
            "2A" => Ok(TravelClass::SecondAc),
            "3A" => Ok(TravelClass::ThirdAc),
            "SL" => Ok(TravelClass::Sleeper),
            "CC" => Ok(TravelClass::ChairCar),
            "EC" => Ok(TravelClass::ExecutiveChair),
            other => Err(format!("unknown travel class: {}", other)),
        }
    }
}

/// A scheduled train. Immutable reference data; `available_seats` is only
/// mutated on copies handed out by the catalog's depletion simulation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Train {
    pub id: i64,
    pub train_number: String,
    pub train_name: String,
    /// Origin station code.
    pub origin: String,
    /// Destination station code.
    pub destination: String,
    /// HH:MM local time.
    pub departure_time: String,
    /// HH:MM local time.
    pub arrival_time: String,
    /// Formatted as "XhYm".
    pub duration: String,
    pub classes: Vec<TravelClass>,
    pub available_seats: HashMap<TravelClass, i64>,
    pub fare: HashMap<TravelClass, i64>,
}

impl Train {
    pub fn offers_class(&self, class: TravelClass) -> bool {
        self.classes.contains(&class)
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SeatStatus {
    Available,
    Occupied,
    /// Selected by a client but not yet booked. The layout generator never
    /// emits this state.
    Reserved,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum SeatType {
    Lower,
    Middle,
    Upper,
    #[serde(rename = "Side Lower")]
    SideLower,
    #[serde(rename = "Side Upper")]
    SideUpper,
    #[serde(rename = "chair")]
    Chair,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Seat {
    /// "<coach>-<n>", e.g. "S1-4".
    pub seat_number: String,
    pub status: SeatStatus,
    #[serde(rename = "type")]
    pub seat_type: SeatType,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Coach {
    pub coach_name: String,
    pub seats: Vec<Seat>,
}

/// Traveller details entered at booking time. Never persisted on its own,
/// only embedded in a `Booking`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Passenger {
    pub name: String,
    pub age: u8,
    pub gender: String,
    pub id_type: String,
    pub id_number: String,
    pub seat_preference: Option<String>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum BookingStatus {
    Confirmed,
    Cancelled,
    /// Modeled on the wire but never produced here; no transition reaches it.
    Waitlisted,
    /// Modeled on the wire but never produced here; no transition reaches it.
    Completed,
}

impl fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            BookingStatus::Confirmed => "Confirmed",
            BookingStatus::Cancelled => "Cancelled",
            BookingStatus::Waitlisted => "Waitlisted",
            BookingStatus::Completed => "Completed",
        };
        f.write_str(s)
    }
}

/// A confirmed (or cancelled) reservation. The ledger owns the authoritative
/// copy; everything else holds display copies.
///
/// Invariant: `seat_numbers.len() == passengers.len()`, enforced at creation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    pub id: i64,
    /// 10 decimal digits.
    pub pnr: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_email: Option<String>,
    pub train_number: String,
    pub train_name: String,
    pub journey_date: NaiveDate,
    pub origin: String,
    pub destination: String,
    pub departure_time: String,
    pub arrival_time: String,
    pub passengers: Vec<Passenger>,
    /// Matches `passengers` by index.
    pub seat_numbers: Vec<String>,
    #[serde(rename = "class")]
    pub travel_class: TravelClass,
    /// Total fare in whole rupees, taxes included.
    pub fare: i64,
    pub booking_date: NaiveDate,
    pub status: BookingStatus,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct FareBreakdown {
    pub base_fare: i64,
    pub taxes: i64,
    pub total: i64,
}

impl FareBreakdown {
    pub const ZERO: FareBreakdown = FareBreakdown {
        base_fare: 0,
        taxes: 0,
        total: 0,
    };
}

/// Simulated live running status for a train.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LiveStatus {
    #[serde(flatten)]
    pub train: Train,
    pub current_status: String,
    pub platform: u8,
    pub next_station: String,
    pub last_updated: DateTime<Utc>,
}

/// Rendered ticket returned by the export function.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TicketDocument {
    /// Data URI or base64 payload, passed through untouched.
    pub pdf_data: String,
    pub filename: String,
}

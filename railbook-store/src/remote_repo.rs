use crate::record_client::{FetchParams, RecordClient, WhereClause};
use async_trait::async_trait;
use chrono::NaiveDate;
use railbook_core::{BookingRepository, StoreError};
use railbook_shared::{Booking, BookingStatus, Passenger, TravelClass};
use serde_json::{json, Value};

const COLLECTION: &str = "booking_c";

const FIELDS: [&str; 16] = [
    "Id",
    "pnr",
    "userEmail",
    "trainNumber",
    "trainName",
    "journeyDate",
    "origin",
    "destination",
    "departureTime",
    "arrivalTime",
    "passengers",
    "seatNumbers",
    "class",
    "fare",
    "bookingDate",
    "status",
];

/// Booking repository over the hosted record store. Passenger and seat lists
/// are JSON-encoded into string fields on the remote record, matching how
/// the store models structured data, and decoded on the way back.
pub struct RemoteBookingRepository {
    client: RecordClient,
}

impl RemoteBookingRepository {
    pub fn new(client: RecordClient) -> Self {
        Self { client }
    }

    fn params() -> FetchParams {
        FetchParams::fields(&FIELDS)
    }
}

#[async_trait]
impl BookingRepository for RemoteBookingRepository {
    async fn insert(&self, booking: Booking) -> Result<Booking, StoreError> {
        // Id is store-assigned, so it stays out of the create payload.
        let mut record = encode(&booking)?;
        record.as_object_mut().and_then(|o| o.remove("Id"));

        let mut stored = self.client.create_records(COLLECTION, vec![record]).await?;
        if stored.is_empty() {
            return Err(StoreError::Remote(
                "create returned no record".to_string(),
            ));
        }
        decode(&stored.swap_remove(0))
    }

    async fn get_by_pnr(&self, pnr: &str) -> Result<Option<Booking>, StoreError> {
        let params = Self::params().and_where(WhereClause::equal_to("pnr", pnr));
        let records = self.client.fetch_records(COLLECTION, &params).await?;
        records.first().map(decode).transpose()
    }

    async fn list(&self, user: Option<&str>) -> Result<Vec<Booking>, StoreError> {
        let mut params = Self::params();
        if let Some(user) = user {
            params = params.and_where(WhereClause::equal_to("userEmail", user));
        }
        let records = self.client.fetch_records(COLLECTION, &params).await?;
        let mut bookings = records
            .iter()
            .map(decode)
            .collect::<Result<Vec<_>, _>>()?;
        bookings.sort_by(|a, b| b.id.cmp(&a.id));
        Ok(bookings)
    }

    async fn update(&self, booking: &Booking) -> Result<(), StoreError> {
        let record = encode(booking)?;
        self.client.update_records(COLLECTION, vec![record]).await?;
        Ok(())
    }
}

fn encode(booking: &Booking) -> Result<Value, StoreError> {
    Ok(json!({
        "Id": booking.id,
        "pnr": booking.pnr,
        "userEmail": booking.user_email,
        "trainNumber": booking.train_number,
        "trainName": booking.train_name,
        "journeyDate": booking.journey_date.to_string(),
        "origin": booking.origin,
        "destination": booking.destination,
        "departureTime": booking.departure_time,
        "arrivalTime": booking.arrival_time,
        "passengers": serde_json::to_string(&booking.passengers)?,
        "seatNumbers": serde_json::to_string(&booking.seat_numbers)?,
        "class": booking.travel_class.code(),
        "fare": booking.fare,
        "bookingDate": booking.booking_date.to_string(),
        "status": booking.status.to_string(),
    }))
}

fn decode(record: &Value) -> Result<Booking, StoreError> {
    let field = |name: &str| -> Result<&Value, StoreError> {
        record
            .get(name)
            .ok_or_else(|| malformed(name, "missing"))
    };
    let text = |name: &str| -> Result<String, StoreError> {
        field(name)?
            .as_str()
            .map(str::to_string)
            .ok_or_else(|| malformed(name, "expected a string"))
    };
    let date = |name: &str| -> Result<NaiveDate, StoreError> {
        text(name)?
            .parse()
            .map_err(|_| malformed(name, "expected YYYY-MM-DD"))
    };

    let passengers: Vec<Passenger> = decode_embedded(field("passengers")?)?;
    let seat_numbers: Vec<String> = decode_embedded(field("seatNumbers")?)?;
    let travel_class: TravelClass = text("class")?
        .parse()
        .map_err(|_| malformed("class", "unknown travel class"))?;
    let status: BookingStatus = serde_json::from_value(field("status")?.clone())?;

    Ok(Booking {
        id: field("Id")?
            .as_i64()
            .ok_or_else(|| malformed("Id", "expected an integer"))?,
        pnr: text("pnr")?,
        user_email: record
            .get("userEmail")
            .and_then(Value::as_str)
            .map(str::to_string),
        train_number: text("trainNumber")?,
        train_name: text("trainName")?,
        journey_date: date("journeyDate")?,
        origin: text("origin")?,
        destination: text("destination")?,
        departure_time: text("departureTime")?,
        arrival_time: text("arrivalTime")?,
        passengers,
        seat_numbers,
        travel_class,
        fare: field("fare")?
            .as_i64()
            .ok_or_else(|| malformed("fare", "expected an integer"))?,
        booking_date: date("bookingDate")?,
        status,
    })
}

/// Embedded lists arrive JSON-encoded in a string field; tolerate a bare
/// array as well for stores that return them decoded.
fn decode_embedded<T: serde::de::DeserializeOwned>(value: &Value) -> Result<T, StoreError> {
    match value {
        Value::String(s) => Ok(serde_json::from_str(s)?),
        other => Ok(serde_json::from_value(other.clone())?),
    }
}

fn malformed(field: &str, reason: &str) -> StoreError {
    StoreError::Remote(format!("malformed booking record: {} {}", field, reason))
}

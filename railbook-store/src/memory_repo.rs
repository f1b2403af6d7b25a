use async_trait::async_trait;
use railbook_core::{BookingRepository, StoreError};
use railbook_shared::Booking;
use tokio::sync::RwLock;

/// In-memory booking store for the offline/mock mode. Ids are assigned as
/// max existing + 1; records are kept newest first. The lock only guards
/// shared access across handler tasks, it is not a reservation system.
pub struct MemoryBookingRepository {
    bookings: RwLock<Vec<Booking>>,
}

impl MemoryBookingRepository {
    pub fn new() -> Self {
        Self {
            bookings: RwLock::new(Vec::new()),
        }
    }

    pub fn with_seed(bookings: Vec<Booking>) -> Self {
        Self {
            bookings: RwLock::new(bookings),
        }
    }
}

impl Default for MemoryBookingRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BookingRepository for MemoryBookingRepository {
    async fn insert(&self, mut booking: Booking) -> Result<Booking, StoreError> {
        let mut bookings = self.bookings.write().await;
        booking.id = bookings.iter().map(|b| b.id).max().unwrap_or(0) + 1;
        bookings.insert(0, booking.clone());
        Ok(booking)
    }

    async fn get_by_pnr(&self, pnr: &str) -> Result<Option<Booking>, StoreError> {
        let bookings = self.bookings.read().await;
        Ok(bookings.iter().find(|b| b.pnr == pnr).cloned())
    }

    async fn list(&self, user: Option<&str>) -> Result<Vec<Booking>, StoreError> {
        let bookings = self.bookings.read().await;
        Ok(bookings
            .iter()
            .filter(|b| user.map_or(true, |u| b.user_email.as_deref() == Some(u)))
            .cloned()
            .collect())
    }

    async fn update(&self, booking: &Booking) -> Result<(), StoreError> {
        let mut bookings = self.bookings.write().await;
        let slot = bookings
            .iter_mut()
            .find(|b| b.id == booking.id)
            .ok_or_else(|| StoreError::NotFound(format!("booking id {}", booking.id)))?;
        *slot = booking.clone();
        Ok(())
    }
}

use async_trait::async_trait;
use railbook_shared::{Booking, TicketDocument};

/// Errors surfaced by booking storage backends.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("record not found: {0}")]
    NotFound(String),

    #[error("remote call failed: {0}")]
    Remote(String),

    #[error("serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Errors surfaced by the ticket export collaborator.
#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("ticket export failed: {0}")]
    Remote(String),

    #[error("ticket payload could not be serialized: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Repository trait for booking records. The ledger is written against this
/// seam so the backing store (in-memory, hosted record store) is swappable.
///
/// Implementations assign the record id on `insert` and return the stored
/// copy. No implementation deletes records; cancellation is an `update`.
#[async_trait]
pub trait BookingRepository: Send + Sync {
    async fn insert(&self, booking: Booking) -> Result<Booking, StoreError>;

    async fn get_by_pnr(&self, pnr: &str) -> Result<Option<Booking>, StoreError>;

    /// Lists bookings, newest first. `user` filters on the booking's
    /// `user_email` when given; `None` returns everything.
    async fn list(&self, user: Option<&str>) -> Result<Vec<Booking>, StoreError>;

    async fn update(&self, booking: &Booking) -> Result<(), StoreError>;
}

/// Call contract for the hosted ticket rendering function. The document is
/// opaque to this workspace; no PDF generation happens here.
#[async_trait]
pub trait TicketRenderer: Send + Sync {
    async fn render(&self, booking: &Booking) -> Result<TicketDocument, ExportError>;
}

pub mod repository;

pub use repository::{BookingRepository, ExportError, StoreError, TicketRenderer};

pub type StoreResult<T> = Result<T, StoreError>;

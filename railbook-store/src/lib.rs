pub mod app_config;
pub mod export;
pub mod memory_repo;
pub mod record_client;
pub mod remote_repo;

pub use app_config::{Config, StoreMode};
pub use export::TicketExportClient;
pub use memory_repo::MemoryBookingRepository;
pub use record_client::{FetchParams, RecordClient, WhereClause};
pub use remote_repo::RemoteBookingRepository;

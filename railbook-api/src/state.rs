use railbook_catalog::{FareCalculator, StationDirectory, TrainCatalog};
use railbook_core::TicketRenderer;
use railbook_ledger::BookingLedger;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub stations: Arc<StationDirectory>,
    pub catalog: Arc<TrainCatalog>,
    pub fare: Arc<FareCalculator>,
    pub ledger: Arc<BookingLedger>,
    /// Absent when no export function is configured; the ticket route then
    /// answers 503.
    pub tickets: Option<Arc<dyn TicketRenderer>>,
}

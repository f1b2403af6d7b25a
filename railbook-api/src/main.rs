use railbook_api::{app, AppState};
use railbook_catalog::{FareCalculator, StationDirectory, TrainCatalog};
use railbook_core::{BookingRepository, TicketRenderer};
use railbook_ledger::BookingLedger;
use railbook_store::{
    MemoryBookingRepository, RecordClient, RemoteBookingRepository, StoreMode, TicketExportClient,
};
use std::net::SocketAddr;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "railbook_api=debug,tower_http=debug,axum::rejection=trace".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = railbook_store::Config::load().expect("Failed to load config");
    tracing::info!("Starting Railbook API on port {}", config.server.port);

    let repo: Arc<dyn BookingRepository> = match config.store.mode {
        StoreMode::Memory => {
            tracing::info!("Booking ledger backed by the in-memory store");
            Arc::new(MemoryBookingRepository::new())
        }
        StoreMode::Remote => {
            let base_url = config
                .store
                .base_url
                .as_deref()
                .expect("store.base_url is required in remote mode");
            let project_id = config.store.project_id.as_deref().unwrap_or_default();
            let public_key = config.store.public_key.as_deref().unwrap_or_default();
            tracing::info!("Booking ledger backed by the hosted record store at {}", base_url);
            Arc::new(RemoteBookingRepository::new(RecordClient::new(
                base_url, project_id, public_key,
            )))
        }
    };

    let tickets: Option<Arc<dyn TicketRenderer>> = config
        .export
        .function_url
        .as_deref()
        .map(|url| Arc::new(TicketExportClient::new(url)) as Arc<dyn TicketRenderer>);

    let app_state = AppState {
        stations: Arc::new(StationDirectory::seeded()),
        catalog: Arc::new(TrainCatalog::seeded()),
        fare: Arc::new(FareCalculator::new(config.business_rules.tax_rate)),
        ledger: Arc::new(BookingLedger::new(repo)),
        tickets,
    };

    let app = app(app_state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.server.port));
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await.unwrap();
    axum::serve(listener, app).await.unwrap();
}

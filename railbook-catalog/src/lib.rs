pub mod fare;
pub mod seed;
pub mod stations;
pub mod trains;

pub use fare::FareCalculator;
pub use stations::StationDirectory;
pub use trains::{TrainCatalog, TrainSearchQuery};

mod registry;
mod types;


pub use registry::AirportStations;
pub use types::{CompanyId, StationAirportState, StationId, TilePos};

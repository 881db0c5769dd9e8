mod save;
mod types;


pub use save::AircraftSaveData;
pub use types::{
    Aircraft, AircraftGroundState, AircraftId, AircraftSpec, CargoClass, CraftKind, CurrentOrder,
    GroundFlags, ScheduledStop, VehicleStatus,
};

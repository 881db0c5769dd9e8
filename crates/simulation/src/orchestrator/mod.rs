//! Per-tick driving of the fleet: the twice-per-tick event handler, the
//! world-backed host, and the Bevy plugin that wires it all into
//! `FixedUpdate`.

mod sim_host;
mod systems;
mod tick;


pub use sim_host::SimHost;
pub use systems::{
    airborne_ground_state, parked_ground_state, spawn_airborne, spawn_in_hangar, tick_fleet,
    AirportPlugin,
};
pub use tick::{tick_aircraft, SMOKE_OFFSETS};

//! Ordering of the fixed-tick phases.
//!
//! ```text
//! PreSim  →  Simulation  →  PostSim
//! ```
//!
//! * **PreSim** advances the tick counter and anything else movement reads.
//! * **Simulation** runs the fleet: orders, loading, the airport state
//!   machine and crash handling.
//! * **PostSim** only reads what the tick produced, e.g. copying airport
//!   events into the journal.
//!
//! `SimulationPlugin` chains the three sets in `FixedUpdate`.

use bevy::prelude::*;

#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum SimulationSet {
    PreSim,
    Simulation,
    PostSim,
}

use rand_chacha::ChaCha8Rng;

use crate::airport_params::AirportParams;
use crate::direction::Direction;
use crate::host::AirportHost;
use crate::station::{AirportStations, StationId, TilePos};
use crate::topology::{rotate_moving_data, AirportRegistry, AirportTopology, MovingData, PositionId};

/// Everything one aircraft evaluation may touch.
pub struct AirportContext<'a, H: AirportHost> {
    pub registry: &'a AirportRegistry,
    pub stations: &'a mut AirportStations,
    pub params: &'a AirportParams,
    pub rng: &'a mut ChaCha8Rng,
    pub host: &'a mut H,
}

/// Where an aircraft's target airport sits in the world and which topology
/// governs movement there.
#[derive(Clone, Copy)]
pub struct AirportFrame<'a> {
    pub topology: &'a AirportTopology,
    /// World pixel position of the north corner.
    pub origin: (i32, i32),
    pub rotation: Direction,
    /// The target still has a usable airport.
    pub present: bool,
}

impl<'a> AirportFrame<'a> {
    /// World-oriented moving data for a position.
    pub fn moving_data(&self, position: PositionId) -> MovingData {
        rotate_moving_data(
            self.topology.moving_data(position),
            self.rotation,
            self.topology.size(),
        )
    }

    /// World pixel target of a position.
    pub fn target_px(&self, position: PositionId) -> (i32, i32) {
        let md = self.moving_data(position);
        (self.origin.0 + i32::from(md.x), self.origin.1 + i32::from(md.y))
    }
}

impl<'a, H: AirportHost> AirportContext<'a, H> {
    pub fn frame(&self, target: StationId) -> AirportFrame<'a> {
        let registry: &'a AirportRegistry = self.registry;
        match self.stations.get(target) {
            Some(st) => match (st.tile, registry.get(st.kind)) {
                (Some(tile), Some(topology)) => AirportFrame {
                    topology,
                    origin: tile.origin_px(),
                    rotation: st.rotation,
                    present: true,
                },
                _ => AirportFrame {
                    topology: registry.dummy(),
                    origin: st.xy.origin_px(),
                    rotation: Direction::N,
                    present: false,
                },
            },
            None => AirportFrame {
                topology: registry.dummy(),
                origin: self
                    .stations
                    .last_known_tile(target)
                    .map_or((0, 0), TilePos::origin_px),
                rotation: Direction::N,
                present: false,
            },
        }
    }
}

use std::collections::BTreeMap;

use bevy::prelude::*;
use bitcode::{Decode, Encode};

use crate::blocks::BlockMask;
use crate::direction::Direction;
use crate::topology::AirportTopology;

use super::types::{CompanyId, StationAirportState, StationId, TilePos};

/// Every airport station in the world, keyed by station id.
///
/// `BTreeMap` keeps iteration order stable so hangar searches and saves are
/// deterministic.
#[derive(Resource, Debug, Default, Clone, PartialEq, Encode, Decode)]
pub struct AirportStations {
    stations: BTreeMap<StationId, StationAirportState>,
    /// Sign tiles of deleted stations. Ids are never reused.
    deleted: BTreeMap<StationId, TilePos>,
    next_id: u32,
}

impl AirportStations {
    /// Build a new airport of the given layout and return its station id.
    pub fn build(
        &mut self,
        topology: &AirportTopology,
        tile: TilePos,
        rotation: Direction,
        owner: Option<CompanyId>,
    ) -> StationId {
        let id = StationId(self.next_id);
        self.next_id += 1;
        let size = topology.rotated_size(rotation);
        self.stations.insert(
            id,
            StationAirportState::new(id, topology.kind(), tile, rotation, size, owner),
        );
        info!(
            "built {:?} airport as station {} at ({}, {})",
            topology.kind(),
            id.0,
            tile.x,
            tile.y
        );
        id
    }

    pub fn get(&self, id: StationId) -> Option<&StationAirportState> {
        self.stations.get(&id)
    }

    pub fn get_mut(&mut self, id: StationId) -> Option<&mut StationAirportState> {
        self.stations.get_mut(&id)
    }

    /// Station that still has an airport.
    pub fn airport(&self, id: StationId) -> Option<&StationAirportState> {
        self.get(id).filter(|st| st.has_airport())
    }

    pub fn airport_mut(&mut self, id: StationId) -> Option<&mut StationAirportState> {
        self.get_mut(id).filter(|st| st.has_airport())
    }

    pub fn is_valid_airport(&self, id: StationId) -> bool {
        self.airport(id).is_some()
    }

    /// Remove the airport tiles but keep the station (and its sign).
    ///
    /// All reservations are dropped; aircraft still holding bits discover
    /// the removal on their next evaluation.
    pub fn remove_airport(&mut self, id: StationId) {
        if let Some(st) = self.stations.get_mut(&id) {
            st.tile = None;
            st.occupied = BlockMask::EMPTY;
            info!("airport of station {} removed", id.0);
        }
    }

    /// Delete the station entirely, force-clearing its reservations.
    pub fn remove(&mut self, id: StationId) -> Option<StationAirportState> {
        let mut removed = self.stations.remove(&id)?;
        removed.occupied = BlockMask::EMPTY;
        self.deleted.insert(id, removed.xy);
        info!("station {} removed", id.0);
        Some(removed)
    }

    /// Sign tile of a live or deleted station.
    pub fn last_known_tile(&self, id: StationId) -> Option<TilePos> {
        self.get(id)
            .map(|st| st.xy)
            .or_else(|| self.deleted.get(&id).copied())
    }

    pub fn iter(&self) -> impl Iterator<Item = &StationAirportState> {
        self.stations.values()
    }

    pub fn len(&self) -> usize {
        self.stations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stations.is_empty()
    }
}

impl crate::Saveable for AirportStations {
    const SAVE_KEY: &'static str = "airport_stations";

    fn save_to_bytes(&self) -> Option<Vec<u8>> {
        if *self == Self::default() {
            return None;
        }
        Some(bitcode::encode(self))
    }

    fn load_from_bytes(bytes: &[u8]) -> Self {
        crate::decode_or_warn(Self::SAVE_KEY, bytes)
    }
}

use bevy::prelude::*;
use bitcode::{Decode, Encode};

use super::types::{Aircraft, AircraftId};

/// Snapshot of every aircraft entity, ordered by id.
#[derive(Debug, Clone, Default, PartialEq, Encode, Decode)]
pub struct AircraftSaveData {
    pub aircraft: Vec<Aircraft>,
}

impl AircraftSaveData {
    pub const SAVE_KEY: &'static str = "aircraft";

    pub fn capture(world: &mut World) -> Self {
        let mut query = world.query::<&Aircraft>();
        let mut aircraft: Vec<Aircraft> = query.iter(world).cloned().collect();
        aircraft.sort_by_key(|a| a.id);
        Self { aircraft }
    }

    /// Despawn existing aircraft and spawn the saved ones.
    pub fn restore(self, world: &mut World) {
        let existing: Vec<Entity> = world
            .query_filtered::<Entity, With<Aircraft>>()
            .iter(world)
            .collect();
        for entity in existing {
            world.despawn(entity);
        }
        for aircraft in self.aircraft {
            world.spawn(aircraft);
        }
    }

    pub fn encode(&self) -> Vec<u8> {
        bitcode::encode(self)
    }

    pub fn decode(bytes: &[u8]) -> Result<Self, bitcode::Error> {
        bitcode::decode(bytes)
    }

    /// Next free id after the saved fleet.
    pub fn next_id(&self) -> AircraftId {
        AircraftId(self.aircraft.iter().map(|a| a.id.0 + 1).max().unwrap_or(0))
    }
}

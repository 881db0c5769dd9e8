// ---------------------------------------------------------------------------
// save_codec – World <-> save file bytes
// ---------------------------------------------------------------------------
//
// Save: SaveableRegistry extension map + aircraft fleet -> SaveFile ->
//       bitcode -> (LZ4) -> header.
// Load: header -> (LZ4) -> bitcode -> SaveFile -> reset registered
//       resources -> apply extension map -> respawn fleet.

use std::collections::BTreeMap;

use bevy::prelude::*;
use bitcode::{Decode, Encode};
use simulation::aircraft::AircraftSaveData;
use simulation::{SaveableRegistry, TickCounter};

use crate::file_header::{read_payload, wrap_with_header, wrap_with_header_compressed};
use crate::save_error::SaveError;

/// Payload schema version. Bump when `SaveFile` changes shape.
pub const CURRENT_SAVE_VERSION: u32 = 1;

/// The decoded payload of a save file.
#[derive(Debug, Clone, Default, PartialEq, Encode, Decode)]
pub struct SaveFile {
    pub version: u32,
    pub tick: u64,
    /// Saveable resources by key, plus the fleet under
    /// [`AircraftSaveData::SAVE_KEY`].
    pub extensions: BTreeMap<String, Vec<u8>>,
}

impl SaveFile {
    pub fn encode(&self) -> Vec<u8> {
        bitcode::encode(self)
    }

    pub fn decode(bytes: &[u8]) -> Result<Self, SaveError> {
        let save: SaveFile = bitcode::decode(bytes)?;
        if save.version > CURRENT_SAVE_VERSION {
            return Err(SaveError::VersionMismatch {
                expected_max: CURRENT_SAVE_VERSION,
                found: save.version,
            });
        }
        Ok(save)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SaveOptions {
    pub compress: bool,
}

impl Default for SaveOptions {
    fn default() -> Self {
        Self { compress: true }
    }
}

/// Collect every registered saveable and the fleet from `world`.
pub fn capture_world(world: &mut World) -> Result<SaveFile, SaveError> {
    let registry = world
        .get_resource::<SaveableRegistry>()
        .ok_or(SaveError::MissingResource("SaveableRegistry"))?;
    let mut extensions = registry.save_all(world);
    let tick = world.get_resource::<TickCounter>().map_or(0, |t| t.0);

    let fleet = AircraftSaveData::capture(world);
    extensions.insert(AircraftSaveData::SAVE_KEY.to_string(), fleet.encode());

    Ok(SaveFile {
        version: CURRENT_SAVE_VERSION,
        tick,
        extensions,
    })
}

/// Replace the simulation state of `world` with `save`.
///
/// Registered resources are reset first, so a resource that was still at
/// its default when saved (and therefore skipped) comes back as default.
pub fn apply_save(world: &mut World, save: SaveFile) -> Result<(), SaveError> {
    let fleet = match save.extensions.get(AircraftSaveData::SAVE_KEY) {
        Some(bytes) => AircraftSaveData::decode(bytes)?,
        None => {
            warn!("save has no '{}' entry, loading an empty fleet", AircraftSaveData::SAVE_KEY);
            AircraftSaveData::default()
        }
    };

    let registry = world
        .remove_resource::<SaveableRegistry>()
        .ok_or(SaveError::MissingResource("SaveableRegistry"))?;
    registry.reset_all(world);
    registry.load_all(world, &save.extensions);
    world.insert_resource(registry);

    world.insert_resource(TickCounter(save.tick));
    let count = fleet.aircraft.len();
    let next = fleet.next_id();
    fleet.restore(world);
    info!(
        "restored {} aircraft at tick {} (next id {})",
        count, save.tick, next.0
    );
    Ok(())
}

/// Serialize `world` into save file bytes.
pub fn save_to_bytes(world: &mut World, options: SaveOptions) -> Result<Vec<u8>, SaveError> {
    let payload = capture_world(world)?.encode();
    Ok(if options.compress {
        wrap_with_header_compressed(&payload)
    } else {
        wrap_with_header(&payload)
    })
}

/// Validate `bytes` and replace the state of `world` with their contents.
/// On error the world is left untouched.
pub fn load_from_bytes(world: &mut World, bytes: &[u8]) -> Result<(), SaveError> {
    let (header, payload) = read_payload(bytes)?;
    debug!(
        "save header: format v{}, flags {:#X}, timestamp {}, data size {}, checksum {:#010X}",
        header.format_version,
        header.flags,
        header.timestamp,
        header.uncompressed_size,
        header.checksum,
    );
    let save = SaveFile::decode(&payload)?;
    apply_save(world, save)
}

use std::path::{Path, PathBuf};

use bevy::prelude::*;
use simulation::SaveableRegistry;

use crate::atomic_write::atomic_write;
use crate::save_codec::{load_from_bytes, save_to_bytes, SaveOptions};
use crate::save_error::SaveError;

// ---------------------------------------------------------------------------
// Events
// ---------------------------------------------------------------------------

/// Write the current airfield to `path`.
#[derive(Event, Debug, Clone)]
pub struct SaveGameEvent {
    pub path: PathBuf,
}

/// Replace the current airfield with the save at `path`.
#[derive(Event, Debug, Clone)]
pub struct LoadGameEvent {
    pub path: PathBuf,
}

/// Result of a processed save or load request.
#[derive(Event, Debug, Clone, PartialEq, Eq)]
pub enum SaveLoadOutcome {
    Saved { path: PathBuf, bytes: usize },
    Loaded { path: PathBuf },
    Failed { path: PathBuf, message: String },
}

/// Save options applied to every `SaveGameEvent`.
#[derive(Resource, Debug, Clone, Copy, Default)]
pub struct SaveSettings {
    pub options: SaveOptions,
}

// ---------------------------------------------------------------------------
// Plugin
// ---------------------------------------------------------------------------

pub struct SavePlugin;

impl Plugin for SavePlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<SaveGameEvent>()
            .add_event::<LoadGameEvent>()
            .add_event::<SaveLoadOutcome>()
            .init_resource::<SaveableRegistry>()
            .init_resource::<SaveSettings>();

        // Exclusive: loading despawns and respawns the whole fleet.
        app.add_systems(Update, process_save_requests);
    }
}

// ---------------------------------------------------------------------------
// File I/O
// ---------------------------------------------------------------------------

/// Serialize `world` and write it atomically to `path`. Returns the file size.
pub fn save_to_file(
    world: &mut World,
    path: impl AsRef<Path>,
    options: SaveOptions,
) -> Result<usize, SaveError> {
    let bytes = save_to_bytes(world, options)?;
    atomic_write(path, &bytes)?;
    Ok(bytes.len())
}

/// Read `path` and replace the state of `world` with it.
pub fn load_from_file(world: &mut World, path: impl AsRef<Path>) -> Result<(), SaveError> {
    let bytes = std::fs::read(path)?;
    load_from_bytes(world, &bytes)
}

/// Handles every pending request, saves before loads.
fn process_save_requests(world: &mut World) {
    let saves: Vec<SaveGameEvent> = world
        .resource_mut::<Events<SaveGameEvent>>()
        .drain()
        .collect();
    let loads: Vec<LoadGameEvent> = world
        .resource_mut::<Events<LoadGameEvent>>()
        .drain()
        .collect();
    if saves.is_empty() && loads.is_empty() {
        return;
    }

    let options = world.resource::<SaveSettings>().options;
    for SaveGameEvent { path } in saves {
        let outcome = match save_to_file(world, &path, options) {
            Ok(bytes) => {
                info!("Saved {} bytes to {}", bytes, path.display());
                SaveLoadOutcome::Saved { path, bytes }
            }
            Err(e) => {
                error!("Save to {} failed: {e}", path.display());
                SaveLoadOutcome::Failed {
                    message: e.to_string(),
                    path,
                }
            }
        };
        world.send_event(outcome);
    }

    for LoadGameEvent { path } in loads {
        let outcome = match load_from_file(world, &path) {
            Ok(()) => {
                info!("Loaded save from {}", path.display());
                SaveLoadOutcome::Loaded { path }
            }
            Err(e) => {
                error!("Load from {} failed: {e}", path.display());
                SaveLoadOutcome::Failed {
                    message: e.to_string(),
                    path,
                }
            }
        };
        world.send_event(outcome);
    }
}

//! Save files for the airside simulation.
//!
//! A save is the simulation's `SaveableRegistry` extension map plus the
//! aircraft fleet, bitcode-encoded, optionally LZ4-compressed, and wrapped
//! in a checksummed header. Files are written with write-rename so a crash
//! never leaves a half-written save behind.

mod atomic_write;
pub mod file_header;
pub mod save_codec;
pub mod save_error;
mod save_plugin;
pub mod saveable_ext;

pub use atomic_write::atomic_write;
pub use save_codec::{
    apply_save, capture_world, load_from_bytes, save_to_bytes, SaveFile, SaveOptions,
    CURRENT_SAVE_VERSION,
};
pub use save_error::SaveError;
pub use save_plugin::{
    load_from_file, save_to_file, LoadGameEvent, SaveGameEvent, SaveLoadOutcome, SavePlugin,
    SaveSettings,
};
pub use saveable_ext::SaveableAppExt;

/// Edge length of one map tile in world pixels.
pub const TILE_SIZE: i32 = 16;

/// Default map dimensions in tiles, used when no terrain is inserted.
pub const MAP_TILES_X: u32 = 256;
pub const MAP_TILES_Y: u32 = 256;

/// Number of times the aircraft event handler runs per simulation tick.
pub const AIRCRAFT_HANDLER_PASSES: u8 = 2;

/// Ticks a crashed aircraft lingers before it is removed.
pub const DEFAULT_CRASH_LIFETIME_TICKS: u16 = 10_000;

/// Ticks an aircraft spends loading at a terminal in the default host.
pub const DEFAULT_LOADING_TICKS: u16 = 40;

/// Maximum number of events retained by the airport journal.
pub const JOURNAL_CAPACITY: usize = 512;

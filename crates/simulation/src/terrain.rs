use bevy::prelude::*;
use bitcode::{Decode, Encode};

use crate::config::{MAP_TILES_X, MAP_TILES_Y, TILE_SIZE};
use crate::station::TilePos;

/// World pixels per terrain height level.
pub const HEIGHT_STEP: i32 = 8;

/// Per-tile terrain height levels.
#[derive(Resource, Debug, Clone, PartialEq, Eq, Encode, Decode)]
pub struct TerrainHeights {
    pub width: u32,
    pub height: u32,
    levels: Vec<u8>,
}

impl Default for TerrainHeights {
    fn default() -> Self {
        Self::flat(MAP_TILES_X, MAP_TILES_Y)
    }
}

impl TerrainHeights {
    pub fn flat(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            levels: vec![0; (width * height) as usize],
        }
    }

    fn index(&self, tile: TilePos) -> Option<usize> {
        (tile.x < self.width && tile.y < self.height).then(|| (tile.y * self.width + tile.x) as usize)
    }

    pub fn level(&self, tile: TilePos) -> u8 {
        self.index(tile)
            .and_then(|i| self.levels.get(i).copied())
            .unwrap_or(0)
    }

    pub fn set_level(&mut self, tile: TilePos, level: u8) {
        if let Some(slot) = self.index(tile).and_then(|i| self.levels.get_mut(i)) {
            *slot = level;
        }
    }

    /// Raise every tile in the inclusive rectangle to `level`.
    pub fn raise_rect(&mut self, from: TilePos, to: TilePos, level: u8) {
        for y in from.y..=to.y {
            for x in from.x..=to.x {
                self.set_level(TilePos::new(x, y), level);
            }
        }
    }

    /// Pixel height of the tile under a world pixel position.
    pub fn height_px(&self, x: i32, y: i32) -> i32 {
        i32::from(self.level(TilePos::from_px(x, y))) * HEIGHT_STEP
    }

    pub fn size_px(&self) -> (i32, i32) {
        (self.width as i32 * TILE_SIZE, self.height as i32 * TILE_SIZE)
    }

    fn is_flat(&self) -> bool {
        self.levels.iter().all(|&l| l == 0)
    }
}

impl crate::Saveable for TerrainHeights {
    const SAVE_KEY: &'static str = "terrain_heights";

    fn save_to_bytes(&self) -> Option<Vec<u8>> {
        if self.is_flat() && self.width == MAP_TILES_X && self.height == MAP_TILES_Y {
            return None;
        }
        Some(bitcode::encode(self))
    }

    fn load_from_bytes(bytes: &[u8]) -> Self {
        crate::decode_or_warn(Self::SAVE_KEY, bytes)
    }
}

pub struct TerrainPlugin;

impl Plugin for TerrainPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<TerrainHeights>();
        app.init_resource::<crate::SaveableRegistry>();
        app.world_mut()
            .resource_mut::<crate::SaveableRegistry>()
            .register::<TerrainHeights>();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Saveable;

    #[test]
    fn test_flat_terrain_is_zero_everywhere() {
        let t = TerrainHeights::default();
        assert_eq!(t.height_px(0, 0), 0);
        assert_eq!(t.height_px(4000, 4000), 0);
    }

    #[test]
    fn test_raised_tile_height_in_pixels() {
        let mut t = TerrainHeights::flat(8, 8);
        t.set_level(TilePos::new(2, 3), 2);
        assert_eq!(t.height_px(2 * TILE_SIZE + 5, 3 * TILE_SIZE), 2 * HEIGHT_STEP);
        assert_eq!(t.height_px(0, 0), 0, "neighbouring tiles stay flat");
    }

    #[test]
    fn test_out_of_bounds_reads_as_sea_level() {
        let mut t = TerrainHeights::flat(4, 4);
        t.set_level(TilePos::new(10, 10), 5);
        assert_eq!(t.level(TilePos::new(10, 10)), 0);
        assert_eq!(t.height_px(-50, -50), 0);
    }

    #[test]
    fn test_default_terrain_skips_save() {
        assert!(TerrainHeights::default().save_to_bytes().is_none());
    }

    #[test]
    fn test_raised_terrain_save_roundtrip() {
        let mut t = TerrainHeights::flat(16, 16);
        t.raise_rect(TilePos::new(1, 1), TilePos::new(3, 2), 4);
        let bytes = t.save_to_bytes().expect("raised terrain should save");
        let restored = TerrainHeights::load_from_bytes(&bytes);
        assert_eq!(restored, t);
        assert_eq!(restored.level(TilePos::new(3, 2)), 4);
    }
}

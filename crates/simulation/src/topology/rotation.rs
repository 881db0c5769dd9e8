use crate::config::TILE_SIZE;
use crate::direction::Direction;

use super::types::MovingData;

/// Rotate a position's moving data into world orientation.
///
/// `size` is the unrotated footprint in tiles. Only the four axis rotations
/// are meaningful; any other rotation is treated as north.
pub fn rotate_moving_data(data: MovingData, rotation: Direction, size: (u8, u8)) -> MovingData {
    let x = i32::from(data.x);
    let y = i32::from(data.y);
    let size_x = i32::from(size.0);
    let size_y = i32::from(size.1);
    let (rx, ry) = match rotation {
        Direction::E => (y, size_x * TILE_SIZE - x - 1),
        Direction::S => (size_x * TILE_SIZE - x - 1, size_y * TILE_SIZE - y - 1),
        Direction::W => (size_y * TILE_SIZE - y - 1, x),
        _ => (x, y),
    };
    MovingData {
        x: rx as i16,
        y: ry as i16,
        flags: data.flags,
        direction: data.direction.rotate(rotation),
    }
}

use crate::aircraft::{AircraftGroundState, AircraftSpec};
use crate::direction::Direction;

pub const SPEED_LIMIT_TAXI: u32 = 50;
pub const SPEED_LIMIT_APPROACH: u32 = 230;
pub const SPEED_LIMIT_BROKEN: u32 = 320;
pub const SPEED_LIMIT_HOLD: u32 = 425;
pub const SPEED_LIMIT_NONE: u32 = 0xFFFF;

/// A speed cap for one movement step. A hard limit clamps immediately; a
/// soft one lets a faster aircraft brake down to it gradually.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpeedLimit {
    pub limit: u32,
    pub hard: bool,
}

impl SpeedLimit {
    pub const NONE: SpeedLimit = SpeedLimit::hard(SPEED_LIMIT_NONE);
    pub const TAXI: SpeedLimit = SpeedLimit::hard(SPEED_LIMIT_TAXI);

    pub const fn hard(limit: u32) -> Self {
        Self { limit, hard: true }
    }

    pub const fn soft(limit: u32) -> Self {
        Self { limit, hard: false }
    }
}

/// Speed after one braking step. Fast aircraft shed speed quadratically.
pub fn braking_limit(cur_speed: u32, plane_speed: u32) -> u32 {
    let shed = ((cur_speed * cur_speed) / 16384 / plane_speed.max(1)).max(1);
    cur_speed.saturating_sub(shed)
}

/// Movement speed for a heading: three quarters for headings that cross
/// tile axes diagonally.
pub fn advance_speed(direction: Direction, speed: u32) -> u32 {
    if direction.along_tile_axis() {
        speed
    } else {
        speed * 3 / 4
    }
}

/// Accelerate or brake towards the limit and return how many pixel steps
/// the aircraft may move this call.
pub fn update_speed(
    ground: &mut AircraftGroundState,
    spec: &AircraftSpec,
    broken: bool,
    plane_speed: u32,
    request: SpeedLimit,
) -> u32 {
    let accel = u32::from(spec.acceleration) * 77;
    let cur = u32::from(ground.cur_speed);
    let mut limit = request.limit * plane_speed;
    let mut hard = request.hard;

    if broken {
        if SPEED_LIMIT_BROKEN < limit {
            hard = false;
        }
        limit = limit.min(SPEED_LIMIT_BROKEN);
    }

    let max_speed = u32::from(spec.max_speed);
    if max_speed < limit {
        if cur < limit {
            hard = false;
        }
        limit = max_speed;
    }

    let before = ground.subspeed;
    ground.subspeed = before.wrapping_add(accel as u8);
    let carry = u32::from(ground.subspeed < before);

    if !hard && cur > limit {
        limit = braking_limit(cur, plane_speed);
    }

    let mut spd = (cur + (accel >> 8) + carry).min(limit);
    ground.cur_speed = spd.min(u32::from(u16::MAX)) as u16;

    if plane_speed > 1 {
        spd /= plane_speed;
    }
    spd = advance_speed(ground.direction, spd);

    spd += u32::from(ground.progress);
    ground.progress = spd as u8;
    spd >> 8
}

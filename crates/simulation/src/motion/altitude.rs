use crate::aircraft::{Aircraft, GroundFlags};
use crate::host::AirportHost;

pub const MIN_FLYING_ALTITUDE: i32 = 120;
pub const MAX_FLYING_ALTITUDE: i32 = 360;
pub const PLANE_HOLD_ALTITUDE: i32 = 150;
pub const HELICOPTER_HOLD_ALTITUDE: i32 = 184;

fn base_altitude<H: AirportHost>(host: &H, ac: &Aircraft) -> i32 {
    let mut base = host.tile_height(ac.ground.x, ac.ground.y);
    if ac.is_helicopter() {
        base += HELICOPTER_HOLD_ALTITUDE - PLANE_HOLD_ALTITUDE;
    }
    // vertical separation between opposing headings
    if ac.ground.direction.is_northbound_half() {
        base += 10;
    }
    // faster aircraft fly higher so they can overtake
    base += (20 * (i32::from(ac.spec.max_speed) / 200) - 90).min(0);
    base
}

/// Minimum and maximum cruise altitude at the aircraft's position.
pub fn flight_level_bounds<H: AirportHost>(host: &H, ac: &Aircraft) -> (i32, i32) {
    let base = base_altitude(host, ac);
    (base + MIN_FLYING_ALTITUDE, base + MAX_FLYING_ALTITUDE)
}

pub fn hold_max_altitude<H: AirportHost>(host: &H, ac: &Aircraft) -> i32 {
    let hold = if ac.is_helicopter() {
        HELICOPTER_HOLD_ALTITUDE
    } else {
        PLANE_HOLD_ALTITUDE
    };
    host.tile_height(ac.ground.x, ac.ground.y) + hold
}

/// Altitude after one step of cruise-level correction.
///
/// Once a correction starts it continues to the middle of the band, so the
/// aircraft does not hug the boundary. Takeoff climbs faster and never
/// descends.
pub fn flight_level<H: AirportHost>(host: &H, ac: &mut Aircraft, takeoff: bool) -> i32 {
    let (min, max) = flight_level_bounds(host, ac);
    let middle = (min + max) / 2;
    let flags: &mut GroundFlags = &mut ac.ground.flags;
    let mut z = ac.ground.z;

    if z < min || (flags.in_min_height_correction && z < middle) {
        flags.in_min_height_correction = true;
        z += if takeoff { 2 } else { 1 };
    } else if !takeoff && (z > max || (flags.in_max_height_correction && z > middle)) {
        flags.in_max_height_correction = true;
        z -= 1;
    } else if flags.in_min_height_correction && z >= middle {
        flags.in_min_height_correction = false;
    } else if flags.in_max_height_correction && z <= middle {
        flags.in_max_height_correction = false;
    }
    z
}

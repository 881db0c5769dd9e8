use crate::aircraft::{Aircraft, AircraftGroundState};
use crate::context::{AirportContext, AirportFrame};
use crate::crash::maybe_crash_airplane;
use crate::direction::{DirDiff, Direction};
use crate::events::AirportEvent;
use crate::host::AirportHost;
use crate::topology::{MovingData, MovingFlags};

use super::altitude::{flight_level, flight_level_bounds, hold_max_altitude};
use super::speed::{
    update_speed, SpeedLimit, SPEED_LIMIT_APPROACH, SPEED_LIMIT_HOLD, SPEED_LIMIT_NONE,
    SPEED_LIMIT_TAXI,
};

fn step_speed<H: AirportHost>(ctx: &AirportContext<'_, H>, ac: &mut Aircraft, limit: SpeedLimit) -> u32 {
    let plane_speed = ctx.params.speed_divisor();
    update_speed(&mut ac.ground, &ac.spec, ac.status.broken, plane_speed, limit)
}

/// One pixel towards the target on each axis.
fn nudge(from: (i32, i32), to: (i32, i32)) -> (i32, i32) {
    (from.0 + (to.0 - from.0).signum(), from.1 + (to.1 - from.1).signum())
}

fn manhattan(a: (i32, i32), b: (i32, i32)) -> i32 {
    (a.0 - b.0).abs() + (a.1 - b.1).abs()
}

/// Within this many pixels of the target, or on landing legs, the aircraft
/// steps one pixel per axis instead of following its heading.
pub(crate) const CREEP_DISTANCE: i32 = 4;

pub(crate) fn creeps_in(remaining: i32, flags: MovingFlags) -> bool {
    remaining < CREEP_DISTANCE || flags.contains(MovingFlags::LAND)
}

/// Speed cap implied by a position's flags; later flags take precedence.
fn speed_limit_for(flags: MovingFlags) -> SpeedLimit {
    let mut limit = SpeedLimit::TAXI;
    if flags.contains(MovingFlags::NO_SPEED_CLAMP) {
        limit = SpeedLimit::hard(SPEED_LIMIT_NONE);
    }
    if flags.contains(MovingFlags::HOLD) {
        limit = SpeedLimit::soft(SPEED_LIMIT_HOLD);
    }
    if flags.contains(MovingFlags::LAND) {
        limit = SpeedLimit::soft(SPEED_LIMIT_APPROACH);
    }
    if flags.contains(MovingFlags::BRAKE) {
        limit = SpeedLimit::soft(SPEED_LIMIT_TAXI);
    }
    limit
}

fn heli_raise<H: AirportHost>(ctx: &mut AirportContext<'_, H>, ac: &mut Aircraft) -> bool {
    if ac.ground.rotor_speed > AircraftGroundState::ROTOR_FLYING {
        ac.ground.cur_speed = 0;
        ac.ground.rotor_speed -= 1;
        if ac.ground.rotor_speed == AircraftGroundState::ROTOR_FLYING {
            ctx.host.notify(AirportEvent::HelicopterStart { aircraft: ac.id });
        }
        return false;
    }
    ac.ground.rotor_speed = AircraftGroundState::ROTOR_FLYING;
    let count = step_speed(ctx, ac, SpeedLimit::NONE) as i32;
    if count > 0 {
        let (cruise, _) = flight_level_bounds(&*ctx.host, ac);
        if ac.ground.z >= cruise {
            ac.ground.cur_speed = 0;
            return true;
        }
        ac.ground.z = (ac.ground.z + count).min(cruise);
    }
    false
}

fn heli_lower<H: AirportHost>(ctx: &mut AirportContext<'_, H>, ac: &mut Aircraft, frame: &AirportFrame<'_>) -> bool {
    ac.ground.flags.heli_direct_descent = true;
    let pad = ctx.host.ground_height(ac.ground.x, ac.ground.y) + 1 + i32::from(frame.topology.delta_z());
    if ac.ground.z == pad {
        if ac.ground.rotor_speed >= AircraftGroundState::ROTOR_IDLE {
            ac.ground.flags.heli_direct_descent = false;
            return true;
        }
        ac.ground.rotor_speed = (ac.ground.rotor_speed + 4).min(AircraftGroundState::ROTOR_IDLE);
        return false;
    }
    let count = step_speed(ctx, ac, SpeedLimit::NONE) as i32;
    if count > 0 {
        ac.ground.z = if ac.ground.z > pad {
            (ac.ground.z - count).max(pad)
        } else {
            (ac.ground.z + count).min(pad)
        };
    }
    false
}

/// Pushback: back away from a terminal without changing heading.
fn pushback<H: AirportHost>(ctx: &AirportContext<'_, H>, ac: &mut Aircraft, target: (i32, i32)) -> bool {
    let here = (ac.ground.x, ac.ground.y);
    if here == target {
        ac.ground.cur_speed = 0;
        return true;
    }
    let count = step_speed(ctx, ac, SpeedLimit::TAXI);
    for _ in 0..count {
        let here = (ac.ground.x, ac.ground.y);
        let (dx, dy) = ac.ground.direction.reverse().delta();
        let behind = (here.0 + dx, here.1 + dy);
        let next = if manhattan(behind, target) < manhattan(here, target) {
            behind
        } else {
            nudge(here, target)
        };
        ac.ground.x = next.0;
        ac.ground.y = next.1;
        if next == target {
            break;
        }
    }
    false
}

/// Turn towards `newdir` for one step, returning the position to move to.
fn turn_and_step<H: AirportHost>(
    ctx: &AirportContext<'_, H>,
    ac: &mut Aircraft,
    amd: &MovingData,
    newdir: Direction,
) -> (i32, i32) {
    let g = &mut ac.ground;
    let slow = amd.flags.contains(MovingFlags::SLOW_TURN)
        && g.consecutive_turns < 8
        && !ac.spec.is_helicopter();
    if slow {
        if g.turn_counter == 0 || newdir == g.last_direction {
            if newdir == g.last_direction {
                g.consecutive_turns = 0;
            } else {
                g.consecutive_turns += 1;
            }
            g.turn_counter = (2 * ctx.params.speed_divisor()) as u8;
            g.last_direction = g.direction;
            g.direction = newdir;
        }
        let (dx, dy) = g.direction.delta();
        (g.x + dx, g.y + dy)
    } else {
        // Snap on the spot; moving while turning would overshoot the next position.
        g.cur_speed >>= 1;
        g.direction = newdir;
        (g.x, g.y)
    }
}

fn apply_wind(ac: &mut Aircraft, frame: &AirportFrame<'_>, amd: &MovingData, pos: (i32, i32)) -> (i32, i32) {
    let Some(wind) = frame.topology.wind() else {
        return pos;
    };
    if wind.drift_every == 0 || !amd.flags.contains(MovingFlags::SLOW_TURN) {
        return pos;
    }
    ac.ground.steps_since_drift += 1;
    if ac.ground.steps_since_drift < wind.drift_every {
        return pos;
    }
    ac.ground.steps_since_drift = 0;
    (pos.0 + i32::from(wind.drift.0), pos.1 + i32::from(wind.drift.1))
}

/// Move the aircraft towards its current position's target coordinate.
///
/// Returns `true` once the aircraft has arrived.
pub(crate) fn aircraft_controller<H: AirportHost>(ctx: &mut AirportContext<'_, H>, ac: &mut Aircraft) -> bool {
    let frame = ctx.frame(ac.ground.target_station);
    let amd = frame.moving_data(ac.ground.pos);
    let target = frame.target_px(ac.ground.pos);

    if amd.flags.contains(MovingFlags::HELI_RAISE) {
        return heli_raise(ctx, ac);
    }
    if amd.flags.contains(MovingFlags::HELI_LOWER) {
        return heli_lower(ctx, ac, &frame);
    }

    let dist = manhattan((ac.ground.x, ac.ground.y), target);
    let tolerance = if amd.flags.contains(MovingFlags::SLOW_TURN) { 8 } else { 4 };
    if !amd.flags.contains(MovingFlags::EXACT_POS) && dist <= tolerance {
        return true;
    }

    if amd.flags.contains(MovingFlags::REVERSE) {
        return pushback(ctx, ac, target);
    }

    if dist == 0 {
        let diff = amd.direction.difference(ac.ground.direction);
        if diff == DirDiff::SAME {
            ac.ground.cur_speed = 0;
            return true;
        }
        if step_speed(ctx, ac, SpeedLimit::TAXI) == 0 {
            return false;
        }
        let turn = if diff > DirDiff::REVERSE {
            DirDiff::LEFT_45
        } else {
            DirDiff::RIGHT_45
        };
        ac.ground.direction = ac.ground.direction.turn(turn);
        ac.ground.cur_speed >>= 1;
        return false;
    }

    if amd.flags.contains(MovingFlags::BRAKE)
        && u32::from(ac.ground.cur_speed) > SPEED_LIMIT_TAXI * ctx.params.speed_divisor()
        && maybe_crash_airplane(ctx, ac)
    {
        return false;
    }

    let count = step_speed(ctx, ac, speed_limit_for(amd.flags));
    if count == 0 {
        return false;
    }

    if ac.ground.turn_counter != 0 {
        ac.ground.turn_counter -= 1;
    }

    for _ in 0..count {
        let here = (ac.ground.x, ac.ground.y);
        let mut next = if creeps_in(manhattan(here, target), amd.flags) {
            nudge(here, target)
        } else {
            match Direction::towards(target.0 - here.0, target.1 - here.1) {
                Some(newdir) if newdir != ac.ground.direction => turn_and_step(ctx, ac, &amd, newdir),
                _ => {
                    ac.ground.consecutive_turns = 0;
                    let (dx, dy) = ac.ground.direction.delta();
                    (here.0 + dx, here.1 + dy)
                }
            }
        };
        next = apply_wind(ac, &frame, &amd, next);

        let mut z = ac.ground.z;
        if amd.flags.contains(MovingFlags::TAKEOFF) {
            z = flight_level(&*ctx.host, ac, true);
        } else if amd.flags.contains(MovingFlags::HOLD) {
            // A go-around enters the pattern from runway height.
            let hold = hold_max_altitude(&*ctx.host, ac);
            if z > hold {
                z -= 1;
            } else if z < hold {
                z = (z + 2).min(hold);
            }
        } else if amd.flags.contains(MovingFlags::SLOW_TURN)
            && amd.flags.contains(MovingFlags::NO_SPEED_CLAMP)
            && !ac.ground.flags.heli_direct_descent
        {
            z = flight_level(&*ctx.host, ac, false);
        }

        if amd.flags.contains(MovingFlags::LAND) {
            let ground = ctx.host.ground_height(target.0, target.1) + 1;
            let t = (dist - 4).max(1);
            let delta = z - ground;
            if delta >= t {
                z -= (delta + t - 1) / t;
            }
            z = z.max(ground);
        }

        if amd.flags.contains(MovingFlags::BRAKE) {
            let ground = ctx.host.ground_height(frame.origin.0, frame.origin.1) + 1;
            z += (ground - z).signum();
        }

        ac.ground.x = next.0;
        ac.ground.y = next.1;
        ac.ground.z = z;
    }
    false
}

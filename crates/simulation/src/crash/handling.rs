use bevy::log::{info, warn};
use rand::Rng;

use crate::aircraft::Aircraft;
use crate::blocks::BlockMask;
use crate::context::AirportContext;
use crate::direction::DirDiff;
use crate::events::{AirportEvent, CrashCause};
use crate::host::AirportHost;
use crate::topology::{AirportFlags, MovementState};

use super::calculations::{crash_threshold, roll_crashes, CRASH_ROLL_BITS};

/// Crashed aircraft stop falling once the counter reaches this value.
const GROUNDED_COUNTER: u16 = 500;
/// Explosions and tumbling stop after this.
const DEBRIS_COUNTER: u16 = 650;

/// Tumbling turns, indexed by two random bits.
const TUMBLE: [DirDiff; 4] = [DirDiff::LEFT_45, DirDiff::SAME, DirDiff::SAME, DirDiff::RIGHT_45];

/// Turn the aircraft into wreckage.
pub(crate) fn crash_airplane<H: AirportHost>(ctx: &mut AirportContext<'_, H>, ac: &mut Aircraft, cause: CrashCause) {
    let target = ac.ground.target_station;
    let station = ctx.stations.get(target).map(|st| st.id);
    ac.status.crashed = true;
    ac.crashed_counter = 0;
    ac.ground.state = MovementState::Crashed;
    ac.ground.cur_speed = 0;
    ctx.host.crash_cleanup(ac, station);
    warn!(
        "aircraft {} crashed ({:?}) near station {}",
        ac.id.0, cause, target.0
    );
    ctx.host.notify(AirportEvent::Crashed {
        aircraft: ac.id,
        cause,
        station,
    });
}

/// Roll for a landing crash. Returns `true` when the aircraft crashed.
pub(crate) fn maybe_crash_airplane<H: AirportHost>(ctx: &mut AirportContext<'_, H>, ac: &mut Aircraft) -> bool {
    let frame = ctx.frame(ac.ground.target_station);
    let short_strip = frame.topology.flags().contains(AirportFlags::SHORT_STRIP);
    let Some(threshold) = crash_threshold(ctx.params, short_strip, ac.spec.fast) else {
        return false;
    };
    let roll = ctx.rng.gen::<u32>() & ((1 << CRASH_ROLL_BITS) - 1);
    if !roll_crashes(roll, threshold) {
        return false;
    }
    crash_airplane(ctx, ac, CrashCause::Landing);
    true
}

/// Per-pass wreckage handling. Returns `false` once the wreck should be removed.
pub(crate) fn handle_crashed_aircraft<H: AirportHost>(ctx: &mut AirportContext<'_, H>, ac: &mut Aircraft) -> bool {
    ac.crashed_counter = ac.crashed_counter.saturating_add(3);

    if ac.crashed_counter >= ctx.params.crash_lifetime_ticks {
        if let Some(st) = ctx.stations.get_mut(ac.ground.target_station) {
            st.release_all(&mut ac.ground);
        }
        ac.ground.held = BlockMask::EMPTY;
        info!("wreck of aircraft {} removed", ac.id.0);
        ctx.host.notify(AirportEvent::Removed { aircraft: ac.id });
        return false;
    }

    if ac.crashed_counter < GROUNDED_COUNTER {
        let ground = ctx.host.ground_height(ac.ground.x, ac.ground.y);
        if ac.ground.z > ground {
            ac.ground.z -= 1;
        } else {
            ac.crashed_counter = GROUNDED_COUNTER;
        }
    }

    if ac.crashed_counter < DEBRIS_COUNTER {
        let r: u32 = ctx.rng.gen();
        if (r & 0xFFFF) < 0x10000 / 32 {
            let tumble = TUMBLE[((r >> 16) & 3) as usize];
            ac.ground.direction = ac.ground.direction.turn(tumble);
            let jitter = |bits: u32| (bits & 0xF) as i32 - 4;
            ctx.host.notify(AirportEvent::CrashExplosion {
                aircraft: ac.id,
                x: ac.ground.x + jitter(r >> 18),
                y: ac.ground.y + jitter(r >> 22),
                z: ac.ground.z + 7,
            });
        }
    }
    true
}

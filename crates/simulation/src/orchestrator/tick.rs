use bevy::log::info;

use crate::aircraft::{Aircraft, CurrentOrder};
use crate::config::AIRCRAFT_HANDLER_PASSES;
use crate::context::AirportContext;
use crate::crash::handle_crashed_aircraft;
use crate::events::AirportEvent;
use crate::host::AirportHost;
use crate::state_machine::go_to_next_position;

/// Breakdown smoke offsets from the aircraft, indexed by direction.
pub const SMOKE_OFFSETS: [(i32, i32); 8] = [
    (5, 5),
    (6, 0),
    (5, -5),
    (0, -6),
    (-5, -5),
    (-6, 0),
    (-5, 5),
    (0, 6),
];

/// Advance one aircraft by one simulation tick.
///
/// Returns `false` when the aircraft should be removed from the world.
pub fn tick_aircraft<H: AirportHost>(ctx: &mut AirportContext<'_, H>, ac: &mut Aircraft) -> bool {
    ac.tick_counter = ac.tick_counter.wrapping_add(1);
    if !ac.status.crashed {
        ac.ticks_since_service = ac.ticks_since_service.saturating_add(1);
    }
    (0..AIRCRAFT_HANDLER_PASSES).all(|pass| event_handler(ctx, ac, pass != 0))
}

fn event_handler<H: AirportHost>(ctx: &mut AirportContext<'_, H>, ac: &mut Aircraft, second_pass: bool) -> bool {
    if ac.status.crashed {
        return handle_crashed_aircraft(ctx, ac);
    }
    if ac.status.stopped {
        return true;
    }

    ctx.host.handle_breakdown(ac);
    handle_smoke(ctx, ac, second_pass);
    ctx.host.process_orders(ac);
    ctx.host.handle_loading(ac, second_pass);

    if matches!(ac.order, CurrentOrder::Loading { .. } | CurrentOrder::LeaveStation) {
        return true;
    }

    update_range_check(ctx, ac);
    if !ac.ground.flags.dest_too_far {
        go_to_next_position(ctx, ac);
    }
    true
}

fn handle_smoke<H: AirportHost>(ctx: &mut AirportContext<'_, H>, ac: &mut Aircraft, second_pass: bool) {
    if !ac.status.broken {
        return;
    }
    // landed
    if ac.ground.cur_speed < 10 {
        ac.status.broken = false;
        return;
    }
    if !second_pass && ac.tick_counter & 0x0F == 0 {
        let (dx, dy) = SMOKE_OFFSETS[usize::from(ac.ground.direction.index())];
        ctx.host.notify(AirportEvent::Smoke {
            aircraft: ac.id,
            x: ac.ground.x + dx,
            y: ac.ground.y + dy,
            z: ac.ground.z + 2,
        });
    }
}

/// Ground aircraft refuse to depart for a destination beyond their range.
/// The target only changes after takeoff, so the current airport is where
/// the aircraft stands.
fn update_range_check<H: AirportHost>(ctx: &mut AirportContext<'_, H>, ac: &mut Aircraft) {
    if ac.ground.state.is_flight_phase() {
        set_dest_too_far(ctx, ac, false);
        return;
    }
    if ac.spec.max_range == 0 {
        return;
    }
    let here = ctx.stations.airport(ac.ground.target_station).and_then(|st| st.tile);
    let next = match ac.order {
        CurrentOrder::GotoStation { station, .. } | CurrentOrder::GotoDepot { station, .. } => {
            ctx.stations.airport(station).and_then(|st| st.tile)
        }
        _ => None,
    };
    if let (Some(here), Some(next)) = (here, next) {
        set_dest_too_far(ctx, ac, here.distance_squared(next) > ac.spec.squared_range());
    }
}

fn set_dest_too_far<H: AirportHost>(ctx: &mut AirportContext<'_, H>, ac: &mut Aircraft, too_far: bool) {
    if ac.ground.flags.dest_too_far == too_far {
        return;
    }
    ac.ground.flags.dest_too_far = too_far;
    if too_far {
        info!("aircraft {}: next destination is out of range", ac.id.0);
        ctx.host.notify(AirportEvent::DestinationTooFar { aircraft: ac.id });
    } else {
        ctx.host.notify(AirportEvent::DestinationReachable { aircraft: ac.id });
    }
}

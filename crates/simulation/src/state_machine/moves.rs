use bevy::log::{error, warn};

use crate::aircraft::{Aircraft, CurrentOrder};
use crate::blocks::BlockMask;
use crate::context::{AirportContext, AirportFrame};
use crate::crash::crash_airplane;
use crate::direction::{DiagDirection, Direction};
use crate::events::CrashCause;
use crate::host::{AirportHost, DepotRequest};
use crate::motion::aircraft_controller;
use crate::station::StationAirportState;
use crate::topology::{AirportTopology, MovementState, PositionId, SlotView};

use super::handlers::handle_arrival;

/// Entry position for an aircraft approaching an airport, chosen by the
/// quadrant it comes from relative to the airport origin.
pub fn entry_point(
    topology: &AirportTopology,
    origin: (i32, i32),
    rotation: Direction,
    aircraft_px: (i32, i32),
    helicopter: bool,
) -> PositionId {
    let dx = aircraft_px.0 - origin.0;
    let dy = aircraft_px.1 - origin.1;
    let quadrant = if dy.abs() < dx.abs() {
        if dx < 0 {
            DiagDirection::NE
        } else {
            DiagDirection::SW
        }
    } else if dy < 0 {
        DiagDirection::NW
    } else {
        DiagDirection::SE
    };
    topology.entry_point(quadrant.unrotate(rotation), helicopter)
}

/// Retarget to the current order's destination and enter its topology.
///
/// Blocks still held at the old target are released first.
pub(crate) fn next_airport_pos_and_order<H: AirportHost>(ctx: &mut AirportContext<'_, H>, ac: &mut Aircraft) {
    if let CurrentOrder::GotoStation { station, .. } | CurrentOrder::GotoDepot { station, .. } = ac.order {
        if station != ac.ground.target_station && !ac.ground.held.is_empty() {
            if let Some(old) = ctx.stations.get_mut(ac.ground.target_station) {
                old.release_all(&mut ac.ground);
            }
            ac.ground.held = BlockMask::EMPTY;
        }
        ac.ground.target_station = station;
    }
    let frame = ctx.frame(ac.ground.target_station);
    let entry = entry_point(
        frame.topology,
        frame.origin,
        frame.rotation,
        (ac.ground.x, ac.ground.y),
        ac.is_helicopter(),
    );
    ac.ground.pos = entry;
    ac.ground.previous_pos = entry;
}

/// Handle a target airport that no longer exists. Returns `false` when the
/// aircraft crashed as a result.
fn recover_missing_airport<H: AirportHost>(ctx: &mut AirportContext<'_, H>, ac: &mut Aircraft) -> bool {
    let target = ac.ground.target_station;
    if ctx.stations.is_valid_airport(target) {
        return true;
    }

    if !ac.ground.held.is_empty() {
        if let Some(st) = ctx.stations.get_mut(target) {
            st.release_all(&mut ac.ground);
        }
        ac.ground.held = BlockMask::EMPTY;
    }

    let depot_pending = matches!(
        ac.order,
        CurrentOrder::GotoDepot { station, .. } if ctx.stations.is_valid_airport(station)
    );
    if !depot_pending {
        let request = DepotRequest {
            acting_company: ac.owner,
            service_only: false,
            stations: &*ctx.stations,
            registry: ctx.registry,
        };
        if let Err(e) = ctx.host.send_to_hangar(ac, request) {
            warn!(
                "aircraft {}: airport of station {} is gone and {}",
                ac.id.0, target.0, e
            );
            crash_airplane(ctx, ac, CrashCause::OutOfFuel);
            return false;
        }
    }

    ac.ground.state = MovementState::Flying;
    let retarget = ac.order.destination().is_some_and(|d| d != target);
    let out_of_range = usize::from(ac.ground.pos) >= ctx.frame(target).topology.nofelements();
    if retarget || out_of_range {
        next_airport_pos_and_order(ctx, ac);
    }
    true
}

/// Blocks a move along `edge` would need: the next position's block plus,
/// for alternates, the edge's own block.
pub(super) fn needed_blocks(ac: &Aircraft, topology: &AirportTopology, edge: SlotView<'_>) -> Option<BlockMask> {
    let reference = topology.slot(ac.ground.pos);
    let next = topology.slot(edge.next_position());
    if topology.slot(edge.position()).block() == next.block() {
        return None;
    }
    let mut wanted = next.block();
    if edge != reference && !edge.block().is_nothing() {
        wanted |= edge.block();
    }
    Some(wanted)
}

/// Whether moving along `edge` is currently refused.
pub(super) fn edge_blocked(
    station: &StationAirportState,
    ac: &Aircraft,
    topology: &AirportTopology,
    edge: SlotView<'_>,
) -> bool {
    needed_blocks(ac, topology, edge).is_some_and(|wanted| station.has_conflict(ac.ground.held, wanted))
}

/// [`edge_blocked`] for a ground aircraft: a refusal stops it.
pub(super) fn next_block_busy(
    station: &StationAirportState,
    ac: &mut Aircraft,
    topology: &AirportTopology,
    edge: SlotView<'_>,
) -> bool {
    if edge_blocked(station, ac, topology, edge) {
        ac.ground.stop();
        return true;
    }
    false
}

/// Reserve what moving along `edge` needs. On refusal the aircraft stops.
fn set_blocks<H: AirportHost>(
    ctx: &mut AirportContext<'_, H>,
    ac: &mut Aircraft,
    topology: &AirportTopology,
    edge: SlotView<'_>,
) -> bool {
    let next = topology.slot(edge.next_position());
    if topology.slot(edge.position()).block().contains(next.block()) {
        return true;
    }
    let mut wanted = next.block();
    let reference = topology.slot(ac.ground.pos);
    let start = if edge == reference { edge.alternate() } else { Some(edge) };
    if let Some(extra) = start
        .into_iter()
        .flat_map(|s| s.chain())
        .find(|s| s.heading() == edge.heading() && !s.block().is_empty())
    {
        wanted |= extra.block();
    }
    match ctx.stations.airport_mut(ac.ground.target_station) {
        Some(st) => st.try_acquire(&mut ac.ground, wanted),
        None => true,
    }
}

/// Follow the outgoing edge for the aircraft's state, or run the state
/// handler if this position marks arrival in that state.
///
/// Returns `true` when a handler ran.
pub(crate) fn airport_move<H: AirportHost>(ctx: &mut AirportContext<'_, H>, ac: &mut Aircraft) -> bool {
    let frame: AirportFrame<'_> = ctx.frame(ac.ground.target_station);
    let topology = frame.topology;
    let pos = ac.ground.pos;
    let current = topology.slot(pos);

    if current.heading() == crate::topology::Heading::State(ac.ground.state) {
        handle_arrival(ctx, ac, &frame);
        if ac.ground.state != MovementState::Flying {
            ac.ground.previous_pos = pos;
        }
        return true;
    }

    ac.ground.previous_pos = pos;

    if !current.has_alternates() {
        if set_blocks(ctx, ac, topology, current) {
            ac.ground.pos = current.next_position();
        }
        return false;
    }

    let state = ac.ground.state;
    match current.chain().find(|e| e.heading().selects(state)) {
        Some(edge) => {
            if set_blocks(ctx, ac, topology, edge) {
                ac.ground.pos = edge.next_position();
            }
            false
        }
        None => {
            error!(
                "aircraft {}: no edge for {:?} at position {} of {:?} airport",
                ac.id.0,
                state,
                pos,
                topology.kind()
            );
            panic!("airport layout {:?} has no edge for {state:?} at position {pos}", topology.kind());
        }
    }
}

/// Release the previous position's blocks once the aircraft stands on a
/// position guarded by different ones.
fn clear_previous_block<H: AirportHost>(ctx: &mut AirportContext<'_, H>, ac: &mut Aircraft) {
    let frame = ctx.frame(ac.ground.target_station);
    let (Some(prev), Some(cur)) = (
        frame.topology.try_slot(ac.ground.previous_pos),
        frame.topology.try_slot(ac.ground.pos),
    ) else {
        return;
    };
    if prev.block() == cur.block() {
        return;
    }
    if let Some(st) = ctx.stations.airport_mut(ac.ground.target_station) {
        st.release(&mut ac.ground, prev.block().without(cur.block()));
    }
}

/// One state-machine evaluation: move, and on arrival release and advance.
pub(crate) fn go_to_next_position<H: AirportHost>(ctx: &mut AirportContext<'_, H>, ac: &mut Aircraft) {
    if !recover_missing_airport(ctx, ac) {
        return;
    }
    if !aircraft_controller(ctx, ac) || ac.status.crashed {
        return;
    }
    clear_previous_block(ctx, ac);
    airport_move(ctx, ac);
}

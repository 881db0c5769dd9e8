use bevy::log::{debug, error, info};

use crate::aircraft::{Aircraft, AircraftGroundState, CurrentOrder};
use crate::context::{AirportContext, AirportFrame};
use crate::events::AirportEvent;
use crate::host::{AirportHost, DepotRequest};
use crate::terminals::{allocate_terminal, can_ever_allocate};
use crate::topology::{AirportFlags, Heading, MovementState, TerminalId};

use super::moves::{airport_move, edge_blocked, needed_blocks, next_airport_pos_and_order, next_block_busy};

fn takeoff_state(ac: &Aircraft) -> MovementState {
    if ac.is_helicopter() {
        MovementState::HeliTakeoff
    } else {
        MovementState::Takeoff
    }
}

/// Ask the host for a service visit when one is due. Failure is not fatal.
fn request_service<H: AirportHost>(ctx: &mut AirportContext<'_, H>, ac: &mut Aircraft) {
    if !ctx.host.needs_automatic_servicing(ac) {
        return;
    }
    let request = DepotRequest {
        acting_company: ac.owner,
        service_only: true,
        stations: &*ctx.stations,
        registry: ctx.registry,
    };
    if let Err(e) = ctx.host.send_to_hangar(ac, request) {
        debug!("aircraft {}: no service visit: {}", ac.id.0, e);
    }
}

/// Run the handler for the state the aircraft just reached.
pub(super) fn handle_arrival<H: AirportHost>(
    ctx: &mut AirportContext<'_, H>,
    ac: &mut Aircraft,
    frame: &AirportFrame<'_>,
) {
    match ac.ground.state {
        MovementState::InHangar => at_hangar(ctx, ac, frame),
        MovementState::AtTerminal(t) => at_terminal(ctx, ac, frame, t),
        MovementState::Backup => backup(ctx, ac, frame),
        MovementState::Takeoff => {
            ctx.host.notify(AirportEvent::TakeoffSound { aircraft: ac.id });
            ac.ground.state = MovementState::TakeoffRoll;
        }
        MovementState::TakeoffRoll => ac.ground.state = MovementState::TakeoffClimb,
        MovementState::TakeoffClimb => leave_airport(ctx, ac),
        MovementState::HeliTakeoff => {
            leave_airport(ctx, ac);
            request_service(ctx, ac);
        }
        MovementState::Flying => flying(ctx, ac, frame),
        MovementState::LandingApproach => landing_approach(ctx, ac, frame),
        MovementState::LandingRollout => rollout(ctx, ac, frame, false),
        MovementState::HeliLandingApproach => ac.ground.state = MovementState::HeliLandingRollout,
        MovementState::HeliLandingRollout => rollout(ctx, ac, frame, true),
        MovementState::Crashed => {
            error!("aircraft {}: wreck reached the airport state machine", ac.id.0);
            panic!("crashed aircraft {} must not move", ac.id.0);
        }
    }
}

fn at_hangar<H: AirportHost>(ctx: &mut AirportContext<'_, H>, ac: &mut Aircraft, frame: &AirportFrame<'_>) {
    let target = ac.ground.target_station;
    if ac.ground.previous_pos != ac.ground.pos {
        enter_hangar(ctx, ac);
        return;
    }

    if ac.order.is_depot() && ac.status.stopped {
        ac.order = CurrentOrder::Nothing;
        return;
    }

    let (destination, depot) = match ac.order {
        CurrentOrder::GotoStation { station, .. } => (station, false),
        CurrentOrder::GotoDepot { station, .. } => (station, true),
        _ => return,
    };

    if depot && destination == target {
        ctx.host.enter_depot(ac, target);
        return;
    }

    let topology = frame.topology;
    let here = topology.slot(ac.ground.pos);
    let Some(st) = ctx.stations.airport_mut(target) else {
        return;
    };
    if next_block_busy(st, ac, topology, here) {
        return;
    }

    let mut reserved: Option<TerminalId> = None;
    if destination == target {
        match allocate_terminal(topology, st, ac) {
            Some(t) => reserved = Some(t),
            None if can_ever_allocate(topology, st, ac) => return,
            None => {
                info!(
                    "aircraft {}: no permitted terminal at station {}, departing",
                    ac.id.0, target.0
                );
                ac.ground.state = takeoff_state(ac);
            }
        }
    } else {
        ac.ground.state = takeoff_state(ac);
    }

    let hangar = ac.ground.pos;
    let exit = frame.moving_data(hangar).direction;
    leave_hangar(&mut ac.ground, exit);
    airport_move(ctx, ac);

    if ac.ground.pos == hangar {
        if let Some(spec) = reserved.and_then(|t| topology.terminal(t)) {
            if let Some(st) = ctx.stations.airport_mut(target) {
                st.release(&mut ac.ground, spec.block);
            }
        }
        ac.ground.state = MovementState::InHangar;
        return;
    }

    ac.ticks_since_service = 0;
    ctx.host.notify(AirportEvent::LeftHangar {
        aircraft: ac.id,
        station: target,
    });
}

fn leave_hangar(ground: &mut AircraftGroundState, exit: crate::direction::Direction) {
    ground.stop();
    ground.progress = 0;
    ground.direction = exit;
    ground.last_direction = exit;
    ground.consecutive_turns = 0;
}

fn enter_hangar<H: AirportHost>(ctx: &mut AirportContext<'_, H>, ac: &mut Aircraft) {
    let target = ac.ground.target_station;
    ac.ground.stop();
    ac.ground.state = MovementState::InHangar;
    ac.ground.rotor_speed = AircraftGroundState::ROTOR_IDLE;
    ac.ground.flags.heli_direct_descent = false;
    ctx.host.enter_depot(ac, target);
    ctx.host.notify(AirportEvent::EnteredHangar {
        aircraft: ac.id,
        station: target,
    });
}

fn enter_terminal<H: AirportHost>(ctx: &mut AirportContext<'_, H>, ac: &mut Aircraft, terminal: TerminalId) {
    let target = ac.ground.target_station;
    ac.ground.state = MovementState::AtTerminal(terminal);
    ac.ground.flags.heli_direct_descent = false;
    ctx.host.notify(AirportEvent::ArrivedAtTerminal {
        aircraft: ac.id,
        station: target,
        terminal,
    });
    if ac.order.is_depot() {
        return;
    }
    if let Some(st) = ctx.stations.get_mut(target) {
        if !st.had_aircraft {
            st.had_aircraft = true;
            info!("first aircraft arrives at station {}", target.0);
            ctx.host.notify(AirportEvent::FirstArrival {
                aircraft: ac.id,
                station: target,
            });
        }
    }
    ctx.host.begin_loading(ac, target);
}

fn at_terminal<H: AirportHost>(
    ctx: &mut AirportContext<'_, H>,
    ac: &mut Aircraft,
    frame: &AirportFrame<'_>,
    terminal: TerminalId,
) {
    let topology = frame.topology;
    if ac.ground.previous_pos != ac.ground.pos {
        enter_terminal(ctx, ac, terminal);
        if ctx.params.service_at_helipad && ac.is_helicopter() && topology.num_helipads() > 0 {
            ac.ticks_since_service = 0;
        }
        return;
    }

    if ac.order == CurrentOrder::Nothing {
        return;
    }

    let target = ac.ground.target_station;
    let here = topology.slot(ac.ground.pos);
    let Some(st) = ctx.stations.airport_mut(target) else {
        return;
    };
    if next_block_busy(st, ac, topology, here) {
        return;
    }

    let to_hangar = match ac.order {
        CurrentOrder::GotoStation { .. } => false,
        CurrentOrder::GotoDepot { station, .. } => station == target,
        _ => {
            ac.order = CurrentOrder::Nothing;
            true
        }
    };

    let pushback = here
        .chain()
        .any(|e| e.heading() == Heading::State(MovementState::Backup));
    ac.ground.state = if to_hangar && topology.has_hangar() {
        MovementState::InHangar
    } else if pushback && !ac.is_helicopter() {
        MovementState::Backup
    } else {
        takeoff_state(ac)
    };
    airport_move(ctx, ac);
}

fn backup<H: AirportHost>(ctx: &mut AirportContext<'_, H>, ac: &mut Aircraft, frame: &AirportFrame<'_>) {
    let topology = frame.topology;
    let here = topology.slot(ac.ground.pos);
    let Some(st) = ctx.stations.airport_mut(ac.ground.target_station) else {
        return;
    };
    if next_block_busy(st, ac, topology, here) {
        return;
    }
    ac.ground.state = takeoff_state(ac);
    airport_move(ctx, ac);
}

/// Airborne: drop whatever is still held and head for the next destination.
fn leave_airport<H: AirportHost>(ctx: &mut AirportContext<'_, H>, ac: &mut Aircraft) {
    ac.ground.state = MovementState::Flying;
    if let Some(st) = ctx.stations.get_mut(ac.ground.target_station) {
        st.release_all(&mut ac.ground);
    }
    next_airport_pos_and_order(ctx, ac);
}

fn flying<H: AirportHost>(ctx: &mut AirportContext<'_, H>, ac: &mut Aircraft, frame: &AirportFrame<'_>) {
    let topology = frame.topology;
    let pos = ac.ground.pos;
    let (landing, craft) = if ac.is_helicopter() {
        (MovementState::HeliLandingApproach, AirportFlags::HELICOPTERS)
    } else {
        (MovementState::LandingApproach, AirportFlags::AIRPLANES)
    };

    if let Some(st) = ctx.stations.airport_mut(ac.ground.target_station) {
        if !st.closed && st.admits_company(ac.owner) && topology.flags().contains(craft) {
            let runway = topology
                .slot(pos)
                .alternates()
                .filter(|e| e.heading() == Heading::State(landing))
                .find(|e| !edge_blocked(st, ac, topology, *e));
            if let Some(edge) = runway {
                let granted = match needed_blocks(ac, topology, edge) {
                    Some(wanted) => st.try_acquire(&mut ac.ground, wanted),
                    None => true,
                };
                if granted {
                    ac.ground.state = landing;
                    ac.ground.flags.heli_direct_descent = landing == MovementState::HeliLandingApproach;
                    ac.ground.pos = edge.next_position();
                    return;
                }
            }
        }
    }

    ac.ground.state = MovementState::Flying;
    ac.ground.pos = topology.slot(pos).next_position();
}

/// Final approach: commit to the runway or go around.
fn landing_approach<H: AirportHost>(ctx: &mut AirportContext<'_, H>, ac: &mut Aircraft, frame: &AirportFrame<'_>) {
    let topology = frame.topology;
    let target = ac.ground.target_station;
    let here = topology.slot(ac.ground.pos);
    let Some(st) = ctx.stations.airport_mut(target) else {
        return;
    };
    if edge_blocked(st, ac, topology, here) {
        debug!("aircraft {}: runway at station {} busy, going around", ac.id.0, target.0);
        ac.ground.state = MovementState::Flying;
        ctx.host.notify(AirportEvent::WentAround {
            aircraft: ac.id,
            station: target,
        });
        return;
    }

    ac.ground.state = MovementState::LandingRollout;
    ctx.host.notify(AirportEvent::Touchdown {
        aircraft: ac.id,
        station: target,
    });
    request_service(ctx, ac);
    airport_move(ctx, ac);
}

/// End of the landing roll: pick a terminal or clear the runway.
fn rollout<H: AirportHost>(
    ctx: &mut AirportContext<'_, H>,
    ac: &mut Aircraft,
    frame: &AirportFrame<'_>,
    helicopter_pad: bool,
) {
    let topology = frame.topology;
    let here = topology.slot(ac.ground.pos);
    let Some(st) = ctx.stations.airport_mut(ac.ground.target_station) else {
        return;
    };
    if next_block_busy(st, ac, topology, here) {
        return;
    }

    if matches!(ac.order, CurrentOrder::GotoStation { .. }) && allocate_terminal(topology, st, ac).is_some() {
        return;
    }

    ac.ground.state = if topology.has_hangar() {
        MovementState::InHangar
    } else if helicopter_pad {
        MovementState::HeliTakeoff
    } else {
        MovementState::Takeoff
    };
}

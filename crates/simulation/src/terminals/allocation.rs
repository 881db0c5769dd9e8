//! Terminal and helipad allocation.
//!
//! Candidates come from the alternates of the aircraft's current position
//! (terminal-group listings and direct terminal edges), or from the whole
//! terminal inventory when the position lists none. The first candidate in
//! that order which passes every check is reserved. Earlier terminals are
//! therefore preferred; that bias is part of the behaviour.

use crate::aircraft::{Aircraft, CargoClass, CraftKind};
use crate::station::StationAirportState;
use crate::topology::{AirportTopology, Heading, MovementState, TerminalId, TerminalKind};

/// The terminal kind an aircraft normally uses.
pub fn preferred_kind(ac: &Aircraft) -> TerminalKind {
    match (ac.spec.craft, ac.spec.cargo) {
        (CraftKind::Helicopter, _) => TerminalKind::Helipad,
        (CraftKind::Plane, CargoClass::Freight) => TerminalKind::Cargo,
        (CraftKind::Plane, CargoClass::Passengers) => TerminalKind::Passenger,
    }
}

/// Whether a terminal of `kind` suits the aircraft. With `allow_cross_class`
/// helicopters may use any terminal and planes any non-helipad terminal.
pub fn class_accepts(ac: &Aircraft, kind: TerminalKind, allow_cross_class: bool) -> bool {
    if kind == preferred_kind(ac) {
        return true;
    }
    allow_cross_class && (ac.is_helicopter() || kind != TerminalKind::Helipad)
}

fn candidates(topology: &AirportTopology, station: &StationAirportState, ac: &Aircraft) -> Vec<TerminalId> {
    let mut listed = false;
    let mut out: Vec<TerminalId> = Vec::new();
    if let Some(here) = topology.try_slot(ac.ground.pos) {
        for edge in here.alternates() {
            match edge.heading() {
                Heading::TermGroup(group) => {
                    listed = true;
                    if !station.has_conflict(ac.ground.held, edge.block()) {
                        out.extend(topology.group_terminals(group));
                    }
                }
                Heading::State(MovementState::AtTerminal(t)) => {
                    listed = true;
                    out.push(t);
                }
                _ => {}
            }
        }
    }
    if !listed {
        out.extend(topology.terminals().map(|(id, _)| id));
    }
    let mut seen = [false; 256];
    out.retain(|t| !std::mem::replace(&mut seen[usize::from(t.0)], true));
    out
}

/// Reserve the first free, permitted terminal and set the aircraft's state
/// to `AtTerminal`. Returns the terminal, or `None` with nothing changed.
pub fn find_free_terminal(
    topology: &AirportTopology,
    station: &mut StationAirportState,
    ac: &mut Aircraft,
    allow_cross_class: bool,
) -> Option<TerminalId> {
    let full_load = ac.order.wants_full_load();
    for id in candidates(topology, station, ac) {
        let Some(spec) = topology.terminal(id) else {
            continue;
        };
        if !class_accepts(ac, spec.kind, allow_cross_class) {
            continue;
        }
        if !station.may_use_terminal(id, ac.owner) {
            continue;
        }
        if full_load && station.is_fullload_restricted(id) {
            continue;
        }
        if station.has_conflict(ac.ground.held, spec.block) {
            continue;
        }
        if station.try_acquire(&mut ac.ground, spec.block) {
            ac.ground.state = MovementState::AtTerminal(id);
            return Some(id);
        }
    }
    None
}

/// Whether any terminal at all could ever serve this aircraft here,
/// ignoring current occupancy.
pub fn has_usable_terminal(
    topology: &AirportTopology,
    station: &StationAirportState,
    ac: &Aircraft,
    allow_cross_class: bool,
) -> bool {
    topology.terminals().any(|(id, spec)| {
        class_accepts(ac, spec.kind, allow_cross_class) && station.may_use_terminal(id, ac.owner)
    })
}

/// Allocation with fallback: aircraft use their own terminal class, and only
/// fall back to other classes when the airport has none of theirs.
pub fn allocate_terminal(
    topology: &AirportTopology,
    station: &mut StationAirportState,
    ac: &mut Aircraft,
) -> Option<TerminalId> {
    if let Some(t) = find_free_terminal(topology, station, ac, false) {
        return Some(t);
    }
    if topology.terminal_count(preferred_kind(ac)) == 0 {
        return find_free_terminal(topology, station, ac, true);
    }
    None
}

/// [`has_usable_terminal`] under the same fallback rule as [`allocate_terminal`].
pub fn can_ever_allocate(topology: &AirportTopology, station: &StationAirportState, ac: &Aircraft) -> bool {
    let cross = topology.terminal_count(preferred_kind(ac)) == 0;
    has_usable_terminal(topology, station, ac, cross)
}

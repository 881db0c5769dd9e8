use crate::events::AirportEvent;
use crate::station::StationId;
use crate::test_harness::TestAirfield;
use crate::topology::layouts::heliport_blocks::PAD;
use crate::topology::{AirportKind, MovementState, TerminalId};

use super::{arrived_at, chopper, jet, EAST, LEG_BUDGET, WEST};

/// Station 0 is a heliport, station 1 a small airport.
fn heliport_and_field() -> TestAirfield {
    TestAirfield::new()
        .with_station(AirportKind::Heliport, EAST)
        .with_station(AirportKind::Small, WEST)
}

#[test]
fn test_helicopter_lands_on_the_pad() {
    let pad = StationId(0);
    let mut field = heliport_and_field();
    let id = field.spawn_inbound(pad, chopper(), (2400, 640), &[pad]);

    field
        .tick_until(LEG_BUDGET, |f| arrived_at(f, id, pad))
        .expect("lands on the helipad");
    let heli = field.aircraft(id);
    assert_eq!(heli.ground.pos, 0);
    assert_eq!(heli.ground.state, MovementState::AtTerminal(TerminalId(0)));
    assert_eq!(heli.ground.held, PAD);
    assert!(
        field.count_events(|e| matches!(e, AirportEvent::Touchdown { .. })) == 0,
        "helicopters set down without a runway touchdown"
    );
}

#[test]
fn test_helicopter_uses_a_passenger_terminal_without_helipads() {
    let (pad, field_station) = (StationId(0), StationId(1));
    let mut field = heliport_and_field();
    let id = field.spawn_inbound(pad, chopper(), (2400, 640), &[pad, field_station]);

    field
        .tick_until(LEG_BUDGET, |f| arrived_at(f, id, pad))
        .expect("serves the heliport first");
    field
        .tick_until(LEG_BUDGET, |f| {
            f.assert_blocks_consistent();
            arrived_at(f, id, field_station)
        })
        .expect("falls back to a passenger terminal at the small airport");

    let heli = field.aircraft(id);
    assert_eq!(heli.ground.target_station, field_station);
    assert!(matches!(heli.ground.state, MovementState::AtTerminal(_)));
    assert!(matches!(heli.ground.pos, 2 | 3), "parked at a passenger terminal");
    assert!(field.station(pad).occupied.is_empty(), "pad released after lift-off");
}

#[test]
fn test_second_helicopter_waits_for_the_pad() {
    let pad = StationId(0);
    let mut field = heliport_and_field();
    let first = field.spawn_inbound(pad, chopper(), (2400, 640), &[pad]);
    let second = field.spawn_inbound(pad, chopper(), (1280, 2400), &[pad]);

    field
        .tick_until(2 * LEG_BUDGET, |f| {
            f.assert_blocks_consistent();
            arrived_at(f, first, pad) && arrived_at(f, second, pad)
        })
        .expect("both helicopters get the pad in turn");
    assert_eq!(field.count_events(|e| matches!(e, AirportEvent::Crashed { .. })), 0);
}

#[test]
fn test_plane_is_turned_away_from_a_heliport() {
    let pad = StationId(0);
    let mut field = heliport_and_field();
    let id = field.spawn_inbound(pad, jet(), (2400, 640), &[pad]);

    field.tick(3_000);

    let plane = field.aircraft(id);
    assert_eq!(plane.ground.state, MovementState::Flying);
    assert!((4..=7).contains(&plane.ground.pos), "circles the heliport");
    assert!(plane.ground.held.is_empty());
    assert!(field.station(pad).occupied.is_empty());
    assert!(!arrived_at(&field, id, pad));
}

#[test]
fn test_helicopter_departs_and_reaches_the_heliport() {
    let (pad, field_station) = (StationId(0), StationId(1));
    let mut field = heliport_and_field();
    let id = field.spawn_parked(field_station, chopper(), &[field_station, pad]);

    field
        .tick_until(LEG_BUDGET, |f| arrived_at(f, id, field_station))
        .expect("taxis out of the hangar to a terminal");
    field
        .tick_until(LEG_BUDGET, |f| arrived_at(f, id, pad))
        .expect("flies to the heliport");
    assert_eq!(
        field.count_events(|e| matches!(e, AirportEvent::HelicopterStart { aircraft } if *aircraft == id)),
        1
    );
    assert!(field.station(field_station).occupied.is_empty());
}

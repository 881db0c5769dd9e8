use crate::aircraft::AircraftId;
use crate::direction::Direction;
use crate::events::AirportEvent;
use crate::station::StationId;
use crate::test_harness::TestAirfield;
use crate::topology::{AirportKind, MovementState, TerminalId};

use super::{arrived_at, jet, EAST, LEG_BUDGET, WEST};

fn two_airports() -> TestAirfield {
    TestAirfield::new()
        .with_station(AirportKind::Small, WEST)
        .with_station(AirportKind::Small, EAST)
}

fn first_tick_of(field: &TestAirfield, f: impl Fn(&AirportEvent) -> bool) -> Option<u64> {
    field
        .journal()
        .iter()
        .find(|(_, e)| f(e))
        .map(|(tick, _)| *tick)
}

#[test]
fn test_jet_flies_between_two_airports() {
    let (west, east) = (StationId(0), StationId(1));
    let mut field = two_airports().with_aircraft(west, jet(), &[west, east]);
    let id = AircraftId(0);

    field
        .tick_until(LEG_BUDGET, |f| arrived_at(f, id, west))
        .expect("boards at the home airport");
    field
        .tick_until(LEG_BUDGET, |f| arrived_at(f, id, east))
        .expect("reaches the second airport");

    for station in [west, east] {
        assert_eq!(
            field.count_events(|e| matches!(e, AirportEvent::FirstArrival { station: s, .. } if *s == station)),
            1,
            "one first-arrival notice for station {}",
            station.0
        );
        assert!(field.station(station).had_aircraft);
    }
    assert_eq!(field.count_events(|e| matches!(e, AirportEvent::Touchdown { .. })), 1);
    assert_eq!(field.count_events(|e| matches!(e, AirportEvent::Crashed { .. })), 0);

    let ac = field.aircraft(id);
    assert_eq!(ac.ground.target_station, east);
    assert!(matches!(ac.ground.state, MovementState::AtTerminal(_)));
}

#[test]
fn test_flight_events_come_in_order() {
    let (west, east) = (StationId(0), StationId(1));
    let mut field = two_airports().with_aircraft(west, jet(), &[west, east]);
    let id = AircraftId(0);
    field
        .tick_until(2 * LEG_BUDGET, |f| arrived_at(f, id, east))
        .expect("reaches the second airport");

    let left = first_tick_of(&field, |e| matches!(e, AirportEvent::LeftHangar { .. }));
    let boarded = first_tick_of(&field, |e| matches!(e, AirportEvent::ArrivedAtTerminal { station, .. } if *station == west));
    let takeoff = first_tick_of(&field, |e| matches!(e, AirportEvent::TakeoffSound { .. }));
    let touchdown = first_tick_of(&field, |e| matches!(e, AirportEvent::Touchdown { .. }));
    let arrived = first_tick_of(&field, |e| matches!(e, AirportEvent::ArrivedAtTerminal { station, .. } if *station == east));

    let ticks: Vec<u64> = [left, boarded, takeoff, touchdown, arrived]
        .into_iter()
        .map(|t| t.expect("event recorded"))
        .collect();
    assert!(ticks.windows(2).all(|w| w[0] <= w[1]), "events out of order: {ticks:?}");
}

#[test]
fn test_blocks_stay_consistent_through_a_flight() {
    let (west, east) = (StationId(0), StationId(1));
    let mut field = two_airports().with_aircraft(west, jet(), &[west, east]);
    let id = AircraftId(0);
    field
        .tick_until(2 * LEG_BUDGET, |f| {
            f.assert_blocks_consistent();
            arrived_at(f, id, east)
        })
        .expect("reaches the second airport");
    assert!(field.station(west).occupied.is_empty(), "home airport fully released");
}

#[test]
fn test_rotated_airport_handles_a_full_cycle() {
    let mut field = TestAirfield::new().with_rotated_station(AirportKind::Small, WEST, Direction::E);
    let home = StationId(0);
    let id = field.spawn_inbound(home, jet(), (2400, 640), &[home]);

    field
        .tick_until(LEG_BUDGET, |f| arrived_at(f, id, home))
        .expect("lands and taxis in on the rotated layout");
    assert_eq!(field.count_events(|e| matches!(e, AirportEvent::Touchdown { .. })), 1);
    field.assert_blocks_consistent();
}

#[test]
fn test_stopped_aircraft_keeps_its_blocks() {
    let home = StationId(0);
    let mut field = TestAirfield::new()
        .with_station(AirportKind::Small, WEST)
        .with_aircraft(home, jet(), &[home]);
    let id = AircraftId(0);
    field.tick(1);
    field.assert_state(id, MovementState::AtTerminal(TerminalId(0)));
    field.set_stopped(id, true);
    let held = field.aircraft(id).ground.held;

    field.tick(500);

    let ac = field.aircraft(id);
    assert_eq!(ac.ground.pos, 1, "frozen on the apron");
    assert_eq!(ac.ground.held, held);
    assert!(field.station(home).occupied.contains(held.resources()));
}

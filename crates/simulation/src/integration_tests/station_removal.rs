use crate::aircraft::CurrentOrder;
use crate::events::{AirportEvent, CrashCause};
use crate::station::StationId;
use crate::test_harness::TestAirfield;
use crate::topology::{AirportKind, MovementState};

use super::{arrived_at, jet, EAST, LEG_BUDGET, WEST};

fn crashed_out_of_fuel(field: &TestAirfield) -> usize {
    field.count_events(|e| {
        matches!(
            e,
            AirportEvent::Crashed {
                cause: CrashCause::OutOfFuel,
                ..
            }
        )
    })
}

#[test]
fn test_inbound_jet_crashes_when_its_only_airport_is_demolished() {
    let home = StationId(0);
    let mut field = TestAirfield::new()
        .with_station(AirportKind::Small, WEST)
        .with_params(|p| p.crash_lifetime_ticks = 300);
    let id = field.spawn_inbound(home, jet(), (2400, 640), &[home]);
    field.tick(10);
    field.remove_airport(home);

    field.tick(1);
    let wreck = field.aircraft(id);
    assert!(wreck.status.crashed);
    assert_eq!(wreck.ground.state, MovementState::Crashed);
    assert_eq!(crashed_out_of_fuel(&field), 1);

    field
        .tick_until(1_000, |f| f.aircraft_count() == 0)
        .expect("wreck is cleared after its lifetime");
    assert_eq!(field.count_events(|e| matches!(e, AirportEvent::Removed { .. })), 1);
}

#[test]
fn test_inbound_jet_diverts_to_another_hangar() {
    let (lost, spare) = (StationId(0), StationId(1));
    let mut field = TestAirfield::new()
        .with_station(AirportKind::Small, WEST)
        .with_station(AirportKind::Small, EAST);
    let id = field.spawn_inbound(lost, jet(), (640, 2400), &[lost]);
    field.tick(10);
    field.remove_airport(lost);

    field.tick(1);
    let ac = field.aircraft(id);
    assert_eq!(ac.ground.target_station, spare);
    assert_eq!(ac.order, CurrentOrder::GotoDepot { station: spare, halt: false });

    field
        .tick_until(LEG_BUDGET, |f| {
            f.count_events(|e| matches!(e, AirportEvent::EnteredHangar { station, .. } if *station == spare)) > 0
        })
        .expect("lands at the spare airport and enters its hangar");
    assert_eq!(crashed_out_of_fuel(&field), 0);
}

#[test]
fn test_deleted_station_drops_ground_reservations() {
    let home = StationId(0);
    let mut field = TestAirfield::new()
        .with_station(AirportKind::Small, WEST)
        .with_aircraft(home, jet(), &[home]);
    let id = crate::aircraft::AircraftId(0);
    field
        .tick_until(LEG_BUDGET, |f| arrived_at(f, id, home))
        .expect("reaches a terminal");
    assert!(!field.aircraft(id).ground.held.is_empty());

    field.remove_station(home);
    // Loading finishes before the aircraft looks for its airport again.
    field
        .tick_until(200, |f| f.aircraft(id).status.crashed)
        .expect("no hangar left anywhere");

    assert!(field.stations().get(home).is_none());
    let ac = field.aircraft(id);
    assert!(ac.ground.held.is_empty());
    assert_eq!(crashed_out_of_fuel(&field), 1);
}

use crate::aircraft::AircraftId;
use crate::events::AirportEvent;
use crate::station::StationId;
use crate::test_harness::TestAirfield;
use crate::topology::layouts::small_blocks::AIRFIELD;
use crate::topology::{AirportKind, MovementState};

use super::{arrived_at, jet, LEG_BUDGET, WEST};

fn touchdowns(field: &TestAirfield, id: AircraftId) -> usize {
    field.count_events(|e| matches!(e, AirportEvent::Touchdown { aircraft, .. } if *aircraft == id))
}

#[test]
fn test_closed_airport_keeps_aircraft_circling() {
    let home = StationId(0);
    let mut field = TestAirfield::new().with_station(AirportKind::Small, WEST);
    field.set_closed(home, true);
    let id = field.spawn_inbound(home, jet(), (2400, 640), &[home]);

    field.tick(5_000);

    let ac = field.aircraft(id);
    assert_eq!(ac.ground.state, MovementState::Flying);
    assert!(
        (10..=18).contains(&ac.ground.pos),
        "holding over the airport, at position {}",
        ac.ground.pos
    );
    assert!(ac.ground.held.is_empty());
    assert_eq!(touchdowns(&field, id), 0);

    field.set_closed(home, false);
    field
        .tick_until(LEG_BUDGET, |f| arrived_at(f, id, home))
        .expect("lands once the airport reopens");
    assert_eq!(touchdowns(&field, id), 1);
}

#[test]
fn test_busy_runway_forces_a_go_around() {
    let home = StationId(0);
    let mut field = TestAirfield::new()
        .with_station(AirportKind::Small, WEST)
        .with_aircraft(home, jet(), &[home]);
    let taxiing = AircraftId(0);

    // One tick puts the first jet on the apron, holding the airfield.
    field.tick(1);
    field.set_stopped(taxiing, true);
    assert!(field.station(home).occupied.contains(AIRFIELD));

    let inbound = field.spawn_inbound(home, jet(), (2400, 640), &[home]);
    field
        .tick_until(LEG_BUDGET, |f| {
            f.count_events(|e| matches!(e, AirportEvent::WentAround { aircraft, .. } if *aircraft == inbound)) > 0
        })
        .expect("inbound jet goes around");
    assert_eq!(touchdowns(&field, inbound), 0);
    field.assert_blocks_consistent();

    field.set_stopped(taxiing, false);
    field
        .tick_until(LEG_BUDGET, |f| {
            f.assert_blocks_consistent();
            touchdowns(f, inbound) > 0
        })
        .expect("lands after the apron clears");
}

#[test]
fn test_two_inbound_jets_land_one_at_a_time() {
    let home = StationId(0);
    let mut field = TestAirfield::new().with_station(AirportKind::Small, WEST);
    let east = field.spawn_inbound(home, jet(), (2400, 640), &[home]);
    let north = field.spawn_inbound(home, jet(), (640, 2400), &[home]);

    field
        .tick_until(2 * LEG_BUDGET, |f| {
            f.assert_blocks_consistent();
            arrived_at(f, east, home) && arrived_at(f, north, home)
        })
        .expect("both jets reach a terminal");
}

use crate::aircraft::AircraftId;
use crate::events::AirportEvent;
use crate::station::StationId;
use crate::test_harness::TestAirfield;
use crate::topology::AirportKind;

use super::{arrived_at, jet, EAST, LEG_BUDGET, WEST};

fn short_range_jet(range: u16) -> crate::aircraft::AircraftSpec {
    let mut spec = jet();
    spec.max_range = range;
    spec
}

#[test]
fn test_out_of_range_destination_keeps_jet_at_terminal() {
    let (west, east) = (StationId(0), StationId(1));
    let mut field = TestAirfield::new()
        .with_station(AirportKind::Small, WEST)
        .with_station(AirportKind::Small, EAST)
        .with_aircraft(west, short_range_jet(10), &[west, east]);
    let id = AircraftId(0);

    field
        .tick_until(LEG_BUDGET, |f| {
            f.count_events(|e| matches!(e, AirportEvent::DestinationTooFar { .. })) > 0
        })
        .expect("range warning raised");
    field.tick(2_000);

    let ac = field.aircraft(id);
    assert!(ac.ground.flags.dest_too_far);
    assert_eq!(ac.ground.pos, 2, "waits at the terminal");
    assert_eq!(field.count_events(|e| matches!(e, AirportEvent::TakeoffSound { .. })), 0);
    assert_eq!(
        field.count_events(|e| matches!(e, AirportEvent::DestinationTooFar { .. })),
        1,
        "reported once"
    );
}

#[test]
fn test_destination_within_range_is_served() {
    let (west, east) = (StationId(0), StationId(1));
    let mut field = TestAirfield::new()
        .with_station(AirportKind::Small, WEST)
        .with_station(AirportKind::Small, EAST)
        .with_aircraft(west, short_range_jet(50), &[west, east]);
    let id = AircraftId(0);

    field
        .tick_until(2 * LEG_BUDGET, |f| arrived_at(f, id, east))
        .expect("forty tiles is within range");
    assert_eq!(field.count_events(|e| matches!(e, AirportEvent::DestinationTooFar { .. })), 0);
}

#[test]
fn test_shortening_the_schedule_clears_the_warning() {
    let west = StationId(0);
    let mut field = TestAirfield::new()
        .with_station(AirportKind::Small, WEST)
        .with_station(AirportKind::Small, EAST)
        .with_aircraft(west, short_range_jet(10), &[west, StationId(1)]);
    let id = AircraftId(0);
    field
        .tick_until(LEG_BUDGET, |f| f.aircraft(id).ground.flags.dest_too_far)
        .expect("range warning raised");

    field.with_aircraft_mut(id, |ac| {
        ac.schedule.truncate(1);
        ac.schedule_cursor = 0;
        ac.order = crate::aircraft::CurrentOrder::Nothing;
    });
    field
        .tick_until(LEG_BUDGET, |f| {
            f.count_events(|e| matches!(e, AirportEvent::DestinationReachable { .. })) > 0
        })
        .expect("warning withdrawn");
    assert!(!field.aircraft(id).ground.flags.dest_too_far);
}

use crate::aircraft::AircraftId;
use crate::events::AirportEvent;
use crate::station::StationId;
use crate::test_harness::TestAirfield;
use crate::topology::layouts::small_blocks::{AIRFIELD, TERM1, TERM2};
use crate::topology::{AirportKind, MovementState, TerminalId};

use super::{arrived_at, jet, LEG_BUDGET, WEST};

fn busy_apron(jets: usize) -> TestAirfield {
    let home = StationId(0);
    let mut field = TestAirfield::new().with_station(AirportKind::Small, WEST);
    for _ in 0..jets {
        field.spawn_parked(home, jet(), &[home]);
    }
    field
}

#[test]
fn test_second_jet_waits_for_the_apron() {
    let mut field = busy_apron(2);
    field.tick(1);

    field.assert_state(AircraftId(0), MovementState::AtTerminal(TerminalId(0)));
    let second = field.aircraft(AircraftId(1));
    assert_eq!(second.ground.pos, 0, "apron is taken, second jet stays in");
    assert!(second.ground.held.is_empty());
    assert_eq!(field.station(StationId(0)).occupied, TERM1 | AIRFIELD);
}

#[test]
fn test_second_jet_takes_the_other_terminal() {
    let home = StationId(0);
    let mut field = busy_apron(2);
    let (first, second) = (AircraftId(0), AircraftId(1));

    field
        .tick_until(LEG_BUDGET, |f| arrived_at(f, first, home))
        .expect("first jet reaches a terminal");
    // Parked for good: the first terminal stays held.
    field.set_stopped(first, true);

    field
        .tick_until(LEG_BUDGET, |f| {
            f.assert_blocks_consistent();
            arrived_at(f, second, home)
        })
        .expect("second jet reaches a terminal");

    let a = field.aircraft(first);
    let b = field.aircraft(second);
    assert_eq!((a.ground.pos, a.ground.state), (2, MovementState::AtTerminal(TerminalId(0))));
    assert_eq!((b.ground.pos, b.ground.state), (3, MovementState::AtTerminal(TerminalId(1))));
    assert_eq!(a.ground.held, TERM1);
    assert_eq!(b.ground.held, TERM2);
}

#[test]
fn test_third_jet_waits_while_both_terminals_are_held() {
    let home = StationId(0);
    let mut field = busy_apron(2);
    let (first, second) = (AircraftId(0), AircraftId(1));

    field
        .tick_until(LEG_BUDGET, |f| arrived_at(f, first, home))
        .expect("first jet reaches a terminal");
    field.set_stopped(first, true);
    field
        .tick_until(LEG_BUDGET, |f| arrived_at(f, second, home))
        .expect("second jet reaches a terminal");
    field.set_stopped(second, true);

    let third = field.spawn_parked(home, jet(), &[home]);
    field.tick(1_000);

    let ac = field.aircraft(third);
    assert_eq!((ac.ground.pos, ac.ground.state), (0, MovementState::InHangar));
    assert!(ac.ground.held.is_empty());
    assert_eq!(
        field.count_events(|e| matches!(e, AirportEvent::LeftHangar { aircraft, .. } if *aircraft == third)),
        0
    );

    field.set_stopped(first, false);
    field
        .tick_until(LEG_BUDGET, |f| arrived_at(f, third, home))
        .expect("third jet gets the freed terminal");
}

#[test]
fn test_busy_apron_never_double_books() {
    let mut field = busy_apron(4);
    for _ in 0..3_000 {
        field.tick(1);
        field.assert_blocks_consistent();
    }
    assert_eq!(field.count_events(|e| matches!(e, AirportEvent::Crashed { .. })), 0);
}

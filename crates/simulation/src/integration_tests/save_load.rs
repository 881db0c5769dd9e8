use std::collections::BTreeMap;

use bevy::prelude::*;

use crate::aircraft::{AircraftId, AircraftSaveData};
use crate::airport_params::{AirportParams, PlaneCrashes};
use crate::station::{AirportStations, StationId};
use crate::test_harness::TestAirfield;
use crate::topology::AirportKind;
use crate::SaveableRegistry;

use super::{arrived_at, chopper, jet, EAST, LEG_BUDGET, WEST};

struct Snapshot {
    extensions: BTreeMap<String, Vec<u8>>,
    fleet: Vec<u8>,
}

fn snapshot(field: &mut TestAirfield) -> Snapshot {
    let world = field.world_mut();
    let extensions = world.resource::<SaveableRegistry>().save_all(world);
    let fleet = AircraftSaveData::capture(world).encode();
    Snapshot { extensions, fleet }
}

fn restore(snapshot: &Snapshot) -> TestAirfield {
    let mut field = TestAirfield::new();
    let world = field.world_mut();
    world.resource_scope(|world, registry: Mut<SaveableRegistry>| {
        registry.load_all(world, &snapshot.extensions);
    });
    AircraftSaveData::decode(&snapshot.fleet)
        .expect("fleet decodes")
        .restore(world);
    field
}

fn busy_pair() -> TestAirfield {
    let (west, east) = (StationId(0), StationId(1));
    let mut field = TestAirfield::new()
        .with_station(AirportKind::Small, WEST)
        .with_station(AirportKind::Small, EAST)
        .with_aircraft(west, jet(), &[west, east])
        .with_aircraft(west, jet(), &[east, west]);
    field.spawn_inbound(east, chopper(), (2400, 2400), &[east, west]);
    field
}

#[test]
fn test_restored_world_matches_saved_world() {
    let mut field = busy_pair();
    field.tick(700);
    let saved = snapshot(&mut field);

    let mut restored = restore(&saved);
    assert_eq!(restored.fleet(), field.fleet());
    assert_eq!(restored.stations(), field.stations());
}

#[test]
fn test_restored_world_replays_identically() {
    let mut field = busy_pair().with_crashes(PlaneCrashes::Normal).with_seed(11);
    field.tick(500);
    let saved = snapshot(&mut field);
    let mut restored = restore(&saved);
    assert_eq!(restored.resource::<AirportParams>().plane_crashes, PlaneCrashes::Normal);

    for _ in 0..20 {
        field.tick(250);
        restored.tick(250);
        assert_eq!(restored.fleet(), field.fleet(), "diverged after restore");
    }
    assert_eq!(restored.stations(), field.stations());
}

#[test]
fn test_restore_replaces_existing_aircraft() {
    let mut field = busy_pair();
    field.tick(10);
    let saved = snapshot(&mut field);

    let mut other = TestAirfield::new().with_station(AirportKind::Heliport, WEST);
    let pad = StationId(0);
    other.spawn_inbound(pad, chopper(), (0, 0), &[pad]);
    let world = other.world_mut();
    world.resource_scope(|world, registry: Mut<SaveableRegistry>| {
        registry.load_all(world, &saved.extensions);
    });
    AircraftSaveData::decode(&saved.fleet)
        .expect("fleet decodes")
        .restore(world);

    other.assert_aircraft_count(3);
    assert_eq!(other.stations().len(), 2);
    assert_eq!(other.station(pad).kind, AirportKind::Small);
}

#[test]
fn test_restored_flight_completes() {
    let (west, east) = (StationId(0), StationId(1));
    let mut field = TestAirfield::new()
        .with_station(AirportKind::Small, WEST)
        .with_station(AirportKind::Small, EAST)
        .with_aircraft(west, jet(), &[west, east]);
    let id = AircraftId(0);
    field
        .tick_until(LEG_BUDGET, |f| arrived_at(f, id, west))
        .expect("boards at home");
    field.tick(100);

    let mut restored = restore(&snapshot(&mut field));
    assert!(restored.station(west).had_aircraft);
    restored
        .tick_until(LEG_BUDGET, |f| arrived_at(f, id, east))
        .expect("restored jet finishes its flight");
    restored.assert_blocks_consistent();
    let stations: &AirportStations = restored.stations();
    assert!(stations.get(west).is_some_and(|st| st.occupied.is_empty()));
}

use bevy::prelude::*;

use crate::aircraft::{Aircraft, AircraftGroundState, AircraftId, AircraftSpec, ScheduledStop};
use crate::airport_params::AirportParams;
use crate::context::AirportContext;
use crate::direction::Direction;
use crate::events::{record_airport_events, AirportEvent, AirportJournal};
use crate::motion::{HELICOPTER_HOLD_ALTITUDE, PLANE_HOLD_ALTITUDE, SPEED_LIMIT_HOLD};
use crate::sim_rng::SimRng;
use crate::state_machine::entry_point;
use crate::station::{AirportStations, CompanyId, StationId};
use crate::terrain::TerrainHeights;
use crate::topology::{rotate_moving_data, AirportRegistry, MovementState};
use crate::SimulationSet;

use super::sim_host::SimHost;
use super::tick::tick_aircraft;

/// Advance every aircraft by one tick, in id order.
#[allow(clippy::too_many_arguments)]
pub fn tick_fleet(
    mut commands: Commands,
    registry: Res<AirportRegistry>,
    mut stations: ResMut<AirportStations>,
    params: Res<AirportParams>,
    mut rng: ResMut<SimRng>,
    terrain: Res<TerrainHeights>,
    mut aircraft: Query<(Entity, &mut Aircraft)>,
    mut events: EventWriter<AirportEvent>,
) {
    let mut fleet: Vec<(Entity, Mut<Aircraft>)> = aircraft.iter_mut().collect();
    if fleet.is_empty() {
        return;
    }
    fleet.sort_by_key(|(_, ac)| ac.id);

    let mut host = SimHost::new(&terrain);
    let mut ctx = AirportContext {
        registry: &registry,
        stations: &mut stations,
        params: &params,
        rng: &mut rng.0,
        host: &mut host,
    };

    let mut removed = Vec::new();
    for (entity, mut ac) in fleet {
        if !tick_aircraft(&mut ctx, &mut ac) {
            removed.push(entity);
        }
    }

    for entity in removed {
        commands.entity(entity).despawn();
    }
    events.send_batch(host.take_events());
}

fn next_aircraft_id(world: &mut World) -> AircraftId {
    let mut query = world.query::<&Aircraft>();
    AircraftId(query.iter(world).map(|a| a.id.0 + 1).max().unwrap_or(0))
}

/// Ground state of an aircraft parked in the hangar of `station`, or `None`
/// when the station has no airport or the airport has no hangar.
pub fn parked_ground_state(
    registry: &AirportRegistry,
    stations: &AirportStations,
    station: StationId,
    ground_height: impl Fn(i32, i32) -> i32,
) -> Option<AircraftGroundState> {
    let st = stations.airport(station)?;
    let topology = registry.get(st.kind)?;
    let hangar = topology.hangar_position()?;
    let md = rotate_moving_data(topology.moving_data(hangar), st.rotation, topology.size());
    let origin = st.tile?.origin_px();
    let (x, y) = (origin.0 + i32::from(md.x), origin.1 + i32::from(md.y));
    Some(AircraftGroundState::in_hangar(
        station,
        hangar,
        (x, y, ground_height(x, y)),
        md.direction,
    ))
}

/// Ground state of an aircraft in flight at world pixel `at`, inbound to
/// `target` through the entry point facing it.
pub fn airborne_ground_state(
    registry: &AirportRegistry,
    stations: &AirportStations,
    target: StationId,
    spec: &AircraftSpec,
    at: (i32, i32),
    ground_height: impl Fn(i32, i32) -> i32,
) -> AircraftGroundState {
    let helicopter = spec.is_helicopter();
    let placed = stations
        .airport(target)
        .and_then(|st| Some((registry.get(st.kind)?, st.tile?.origin_px(), st.rotation)));
    let entry = match placed {
        Some((topology, origin, rotation)) => entry_point(topology, origin, rotation, at, helicopter),
        None => {
            let origin = stations.get(target).map_or((0, 0), |st| st.xy.origin_px());
            entry_point(registry.dummy(), origin, Direction::N, at, helicopter)
        }
    };
    let hold = if helicopter {
        HELICOPTER_HOLD_ALTITUDE
    } else {
        PLANE_HOLD_ALTITUDE
    };
    let z = ground_height(at.0, at.1) + hold;

    let mut ground = AircraftGroundState::in_hangar(target, entry, (at.0, at.1, z), Direction::N);
    ground.state = MovementState::Flying;
    ground.cur_speed = spec.max_speed.min(SPEED_LIMIT_HOLD as u16);
    ground.rotor_speed = AircraftGroundState::ROTOR_FLYING;
    ground
}

fn spawn_with(
    world: &mut World,
    owner: CompanyId,
    spec: AircraftSpec,
    ground: AircraftGroundState,
    schedule: Vec<ScheduledStop>,
) -> AircraftId {
    let id = next_aircraft_id(world);
    let mut aircraft = Aircraft::new(id, owner, spec, ground);
    aircraft.schedule = schedule;
    world.spawn(aircraft);
    id
}

/// Spawn an aircraft parked in the hangar of `station`.
pub fn spawn_in_hangar(
    world: &mut World,
    station: StationId,
    owner: CompanyId,
    spec: AircraftSpec,
    schedule: Vec<ScheduledStop>,
) -> Option<AircraftId> {
    let terrain = world.resource::<TerrainHeights>();
    let ground = parked_ground_state(
        world.resource::<AirportRegistry>(),
        world.resource::<AirportStations>(),
        station,
        |x, y| terrain.height_px(x, y),
    )?;
    let id = spawn_with(world, owner, spec, ground, schedule);
    info!("aircraft {} placed in hangar of station {}", id.0, station.0);
    Some(id)
}

/// Spawn an aircraft in flight at world pixel `at`, inbound to `target`.
pub fn spawn_airborne(
    world: &mut World,
    target: StationId,
    owner: CompanyId,
    spec: AircraftSpec,
    at: (i32, i32),
    schedule: Vec<ScheduledStop>,
) -> AircraftId {
    let terrain = world.resource::<TerrainHeights>();
    let ground = airborne_ground_state(
        world.resource::<AirportRegistry>(),
        world.resource::<AirportStations>(),
        target,
        &spec,
        at,
        |x, y| terrain.height_px(x, y),
    );
    spawn_with(world, owner, spec, ground, schedule)
}

pub struct AirportPlugin;

impl Plugin for AirportPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<AirportRegistry>()
            .init_resource::<AirportStations>()
            .init_resource::<AirportJournal>()
            .add_event::<AirportEvent>()
            .add_systems(FixedUpdate, tick_fleet.in_set(SimulationSet::Simulation))
            .add_systems(
                FixedUpdate,
                record_airport_events.in_set(SimulationSet::PostSim),
            );

        app.init_resource::<crate::SaveableRegistry>();
        app.world_mut()
            .resource_mut::<crate::SaveableRegistry>()
            .register::<AirportStations>();
    }
}

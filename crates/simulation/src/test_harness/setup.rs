//! Builder methods for stations, aircraft and terrain in integration tests.

use bevy::prelude::*;

use crate::aircraft::{AircraftId, AircraftSpec, CurrentOrder, ScheduledStop};
use crate::airport_params::{AirportParams, PlaneCrashes};
use crate::direction::Direction;
use crate::orchestrator::{spawn_airborne, spawn_in_hangar};
use crate::sim_rng::SimRng;
use crate::station::{AirportStations, CompanyId, StationId, TilePos};
use crate::terrain::TerrainHeights;
use crate::topology::{AirportKind, AirportRegistry};

use super::TestAirfield;

/// Company that owns every aircraft the harness spawns unless told otherwise.
pub const TEST_COMPANY: CompanyId = CompanyId(1);

/// Stops at each station in turn, no full-load orders.
pub fn round_trip(stations: &[StationId]) -> Vec<ScheduledStop> {
    stations
        .iter()
        .map(|&station| ScheduledStop {
            station,
            full_load: false,
        })
        .collect()
}

impl TestAirfield {
    // -----------------------------------------------------------------------
    // Parameters
    // -----------------------------------------------------------------------

    pub fn with_crashes(mut self, setting: PlaneCrashes) -> Self {
        self.app.world_mut().resource_mut::<AirportParams>().plane_crashes = setting;
        self
    }

    pub fn with_params(mut self, f: impl FnOnce(&mut AirportParams)) -> Self {
        f(&mut self.app.world_mut().resource_mut::<AirportParams>());
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.app.world_mut().insert_resource(SimRng::seeded(seed));
        self
    }

    /// Raise a rectangle of terrain to the given height level.
    pub fn with_hill(mut self, from: TilePos, to: TilePos, level: u8) -> Self {
        self.app
            .world_mut()
            .resource_mut::<TerrainHeights>()
            .raise_rect(from, to, level);
        self
    }

    // -----------------------------------------------------------------------
    // Stations
    // -----------------------------------------------------------------------

    /// Build a public airport. Station ids are handed out from 0 in build order.
    pub fn with_station(mut self, kind: AirportKind, tile: TilePos) -> Self {
        self.add_station(kind, tile, Direction::N, None);
        self
    }

    pub fn with_rotated_station(mut self, kind: AirportKind, tile: TilePos, rotation: Direction) -> Self {
        self.add_station(kind, tile, rotation, None);
        self
    }

    pub fn add_station(
        &mut self,
        kind: AirportKind,
        tile: TilePos,
        rotation: Direction,
        owner: Option<CompanyId>,
    ) -> StationId {
        let world = self.app.world_mut();
        world.resource_scope(|world, registry: Mut<AirportRegistry>| {
            let topology = registry
                .get(kind)
                .unwrap_or_else(|| panic!("layout {kind:?} is not registered"));
            world
                .resource_mut::<AirportStations>()
                .build(topology, tile, rotation, owner)
        })
    }

    pub fn set_closed(&mut self, station: StationId, closed: bool) {
        if let Some(st) = self.app.world_mut().resource_mut::<AirportStations>().get_mut(station) {
            st.closed = closed;
        }
    }

    /// Demolish the airport but keep the station.
    pub fn remove_airport(&mut self, station: StationId) {
        self.app
            .world_mut()
            .resource_mut::<AirportStations>()
            .remove_airport(station);
    }

    /// Delete the station outright.
    pub fn remove_station(&mut self, station: StationId) {
        self.app
            .world_mut()
            .resource_mut::<AirportStations>()
            .remove(station);
    }

    // -----------------------------------------------------------------------
    // Aircraft
    // -----------------------------------------------------------------------

    /// Park an aircraft in the hangar of `station` with the given schedule.
    pub fn with_aircraft(mut self, station: StationId, spec: AircraftSpec, schedule: &[StationId]) -> Self {
        self.spawn_parked(station, spec, schedule);
        self
    }

    pub fn spawn_parked(&mut self, station: StationId, spec: AircraftSpec, schedule: &[StationId]) -> AircraftId {
        spawn_in_hangar(self.app.world_mut(), station, TEST_COMPANY, spec, round_trip(schedule))
            .unwrap_or_else(|| panic!("station {} has no hangar", station.0))
    }

    /// Put an aircraft in the air at world pixel `at`, inbound to `target`.
    pub fn spawn_inbound(
        &mut self,
        target: StationId,
        spec: AircraftSpec,
        at: (i32, i32),
        schedule: &[StationId],
    ) -> AircraftId {
        let id = spawn_airborne(
            self.app.world_mut(),
            target,
            TEST_COMPANY,
            spec,
            at,
            round_trip(schedule),
        );
        self.set_order(
            id,
            CurrentOrder::GotoStation {
                station: target,
                full_load: false,
            },
        );
        id
    }

    pub fn set_order(&mut self, id: AircraftId, order: CurrentOrder) {
        self.with_aircraft_mut(id, |ac| ac.order = order);
    }

    pub fn set_stopped(&mut self, id: AircraftId, stopped: bool) {
        self.with_aircraft_mut(id, |ac| ac.status.stopped = stopped);
    }
}

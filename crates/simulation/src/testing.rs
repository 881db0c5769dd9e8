//! Fixtures shared by unit tests: a host that records every call and an
//! owned set of resources to build an [`AirportContext`] from.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::aircraft::{Aircraft, AircraftId, AircraftSpec, CurrentOrder};
use crate::airport_params::{AirportParams, PlaneCrashes};
use crate::context::AirportContext;
use crate::direction::Direction;
use crate::events::AirportEvent;
use crate::host::{AirportHost, DepotRequest, DepotRoutingError};
use crate::orchestrator::{airborne_ground_state, parked_ground_state};
use crate::state_machine::go_to_next_position;
use crate::station::{AirportStations, CompanyId, StationId, TilePos};
use crate::topology::{AirportKind, AirportRegistry};

/// Airports are placed well inside the map so climb-out legs stay on it.
pub(crate) const FIELD_TILE: TilePos = TilePos { x: 40, y: 40 };
pub(crate) const OWNER: CompanyId = CompanyId(1);

pub(crate) fn jet() -> AircraftSpec {
    AircraftSpec::plane(476, 18)
}

pub(crate) fn chopper() -> AircraftSpec {
    AircraftSpec::helicopter(240, 16)
}

pub(crate) struct RecordingHost {
    pub ground: i32,
    pub events: Vec<AirportEvent>,
    /// Outcome of every `send_to_hangar` call.
    pub hangar: Result<StationId, DepotRoutingError>,
    pub hangar_requests: Vec<(AircraftId, bool)>,
    pub loading_started: Vec<(AircraftId, StationId)>,
    pub depots_entered: Vec<(AircraftId, StationId)>,
    pub service_due: bool,
}

impl Default for RecordingHost {
    fn default() -> Self {
        Self {
            ground: 0,
            events: Vec::new(),
            hangar: Err(DepotRoutingError::NoHangarReachable),
            hangar_requests: Vec::new(),
            loading_started: Vec::new(),
            depots_entered: Vec::new(),
            service_due: false,
        }
    }
}

impl RecordingHost {
    pub fn saw(&self, f: impl Fn(&AirportEvent) -> bool) -> bool {
        self.events.iter().any(f)
    }
}

impl AirportHost for RecordingHost {
    fn tile_height(&self, _x: i32, _y: i32) -> i32 {
        self.ground
    }

    fn map_size_px(&self) -> (i32, i32) {
        (4096, 4096)
    }

    fn process_orders(&mut self, _aircraft: &mut Aircraft) {}

    fn handle_loading(&mut self, _aircraft: &mut Aircraft, _second_pass: bool) {}

    fn begin_loading(&mut self, aircraft: &mut Aircraft, station: StationId) {
        self.loading_started.push((aircraft.id, station));
    }

    fn needs_automatic_servicing(&self, _aircraft: &Aircraft) -> bool {
        self.service_due
    }

    fn send_to_hangar(
        &mut self,
        aircraft: &mut Aircraft,
        request: DepotRequest<'_>,
    ) -> Result<(), DepotRoutingError> {
        self.hangar_requests.push((aircraft.id, request.service_only));
        let station = self.hangar.clone()?;
        aircraft.order = CurrentOrder::GotoDepot { station, halt: false };
        Ok(())
    }

    fn enter_depot(&mut self, aircraft: &mut Aircraft, station: StationId) {
        self.depots_entered.push((aircraft.id, station));
        if matches!(aircraft.order, CurrentOrder::GotoDepot { station: s, .. } if s == station) {
            aircraft.order = CurrentOrder::Nothing;
        }
    }

    fn notify(&mut self, event: AirportEvent) {
        self.events.push(event);
    }
}

/// Owned resources behind an [`AirportContext`].
pub(crate) struct Fixture {
    pub registry: AirportRegistry,
    pub stations: AirportStations,
    pub params: AirportParams,
    pub rng: ChaCha8Rng,
    pub host: RecordingHost,
}

impl Fixture {
    /// Crashes are disabled so movement tests are deterministic.
    pub fn new() -> Self {
        Self {
            registry: AirportRegistry::default(),
            stations: AirportStations::default(),
            params: AirportParams {
                plane_crashes: PlaneCrashes::None,
                ..Default::default()
            },
            rng: ChaCha8Rng::seed_from_u64(7),
            host: RecordingHost::default(),
        }
    }

    pub fn with_airport(&mut self, kind: AirportKind, tile: TilePos) -> StationId {
        self.with_rotated_airport(kind, tile, Direction::N)
    }

    pub fn with_rotated_airport(&mut self, kind: AirportKind, tile: TilePos, rotation: Direction) -> StationId {
        let topology = self.registry.get(kind).expect("layout registered");
        self.stations.build(topology, tile, rotation, None)
    }

    pub fn ctx(&mut self) -> AirportContext<'_, RecordingHost> {
        AirportContext {
            registry: &self.registry,
            stations: &mut self.stations,
            params: &self.params,
            rng: &mut self.rng,
            host: &mut self.host,
        }
    }

    pub fn parked(&self, id: u32, station: StationId, spec: AircraftSpec) -> Aircraft {
        let ground = parked_ground_state(&self.registry, &self.stations, station, |_, _| self.host.ground)
            .expect("station has a hangar");
        Aircraft::new(AircraftId(id), OWNER, spec, ground)
    }

    pub fn airborne(&self, id: u32, station: StationId, spec: AircraftSpec, at: (i32, i32)) -> Aircraft {
        let ground = airborne_ground_state(&self.registry, &self.stations, station, &spec, at, |_, _| {
            self.host.ground
        });
        Aircraft::new(AircraftId(id), OWNER, spec, ground)
    }

    /// Run state-machine evaluations until `done` holds. Returns the number
    /// of evaluations used, or `None` if the budget ran out first.
    pub fn drive(&mut self, ac: &mut Aircraft, budget: usize, done: impl Fn(&Aircraft) -> bool) -> Option<usize> {
        for step in 0..budget {
            if done(ac) {
                return Some(step);
            }
            go_to_next_position(&mut self.ctx(), ac);
        }
        done(ac).then_some(budget)
    }
}

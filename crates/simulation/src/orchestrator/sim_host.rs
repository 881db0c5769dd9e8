use bevy::log::debug;

use crate::aircraft::{Aircraft, CurrentOrder};
use crate::config::DEFAULT_LOADING_TICKS;
use crate::events::AirportEvent;
use crate::host::{AirportHost, DepotRequest, DepotRoutingError};
use crate::station::StationId;
use crate::terrain::TerrainHeights;

/// [`AirportHost`] backed by the ECS world: terrain from [`TerrainHeights`],
/// orders from each aircraft's schedule, and events buffered for an
/// `EventWriter`.
pub struct SimHost<'a> {
    terrain: &'a TerrainHeights,
    events: Vec<AirportEvent>,
}

impl<'a> SimHost<'a> {
    pub fn new(terrain: &'a TerrainHeights) -> Self {
        Self {
            terrain,
            events: Vec::new(),
        }
    }

    pub fn take_events(&mut self) -> Vec<AirportEvent> {
        std::mem::take(&mut self.events)
    }
}

impl AirportHost for SimHost<'_> {
    fn tile_height(&self, x: i32, y: i32) -> i32 {
        self.terrain.height_px(x, y)
    }

    fn map_size_px(&self) -> (i32, i32) {
        self.terrain.size_px()
    }

    /// Idle aircraft pick up the stop under their schedule cursor.
    fn process_orders(&mut self, aircraft: &mut Aircraft) {
        if !matches!(aircraft.order, CurrentOrder::Nothing | CurrentOrder::LeaveStation) {
            return;
        }
        if aircraft.schedule.is_empty() {
            aircraft.order = CurrentOrder::Nothing;
            return;
        }
        aircraft.schedule_cursor %= aircraft.schedule.len();
        let stop = aircraft.schedule[aircraft.schedule_cursor];
        aircraft.order = CurrentOrder::GotoStation {
            station: stop.station,
            full_load: stop.full_load,
        };
    }

    fn handle_loading(&mut self, aircraft: &mut Aircraft, second_pass: bool) {
        if second_pass {
            return;
        }
        if let CurrentOrder::Loading { ticks_left, .. } = &mut aircraft.order {
            *ticks_left = ticks_left.saturating_sub(1);
            if *ticks_left == 0 {
                aircraft.order = CurrentOrder::LeaveStation;
                aircraft.schedule_cursor = aircraft.schedule_cursor.wrapping_add(1);
            }
        }
    }

    fn begin_loading(&mut self, aircraft: &mut Aircraft, station: StationId) {
        aircraft.order = CurrentOrder::Loading {
            station,
            ticks_left: DEFAULT_LOADING_TICKS,
        };
    }

    fn needs_automatic_servicing(&self, aircraft: &Aircraft) -> bool {
        let interval = aircraft.spec.service_interval;
        interval > 0 && aircraft.ticks_since_service >= interval && !aircraft.order.is_depot()
    }

    /// Route to the nearest hangar the company may use. Ties go to the
    /// lowest station id.
    fn send_to_hangar(
        &mut self,
        aircraft: &mut Aircraft,
        request: DepotRequest<'_>,
    ) -> Result<(), DepotRoutingError> {
        if request.acting_company != aircraft.owner {
            return Err(DepotRoutingError::NotOwner {
                acting: request.acting_company,
                owner: aircraft.owner,
            });
        }
        if request.service_only && aircraft.order.is_depot() {
            return Err(DepotRoutingError::AlreadyRouted);
        }
        let here = aircraft.tile();
        let nearest = request
            .stations
            .iter()
            .filter(|st| st.owner.is_none_or(|o| o == aircraft.owner))
            .filter(|st| request.registry.get(st.kind).is_some_and(|t| t.has_hangar()))
            .filter_map(|st| st.tile.map(|tile| (st.id, tile.distance_squared(here))))
            .min_by_key(|&(_, dist)| dist);
        let Some((station, _)) = nearest else {
            return Err(DepotRoutingError::NoHangarReachable);
        };
        debug!("aircraft {}: routed to hangar at station {}", aircraft.id.0, station.0);
        aircraft.order = CurrentOrder::GotoDepot { station, halt: false };
        Ok(())
    }

    fn enter_depot(&mut self, aircraft: &mut Aircraft, station: StationId) {
        aircraft.ticks_since_service = 0;
        aircraft.status.broken = false;
        if let CurrentOrder::GotoDepot { station: s, halt } = aircraft.order {
            if s == station {
                aircraft.order = CurrentOrder::Nothing;
                if halt {
                    aircraft.status.stopped = true;
                }
            }
        }
    }

    fn notify(&mut self, event: AirportEvent) {
        self.events.push(event);
    }
}

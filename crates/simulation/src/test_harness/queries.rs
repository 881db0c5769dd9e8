//! Query and simulation-tick methods for `TestAirfield`.

use bevy::prelude::*;

use crate::aircraft::{Aircraft, AircraftId};
use crate::events::{AirportEvent, AirportJournal};
use crate::station::{AirportStations, StationAirportState, StationId};
use crate::TickCounter;

use super::TestAirfield;

impl TestAirfield {
    // -----------------------------------------------------------------------
    // Simulation
    // -----------------------------------------------------------------------

    /// Run N fixed-update ticks by directly executing the `FixedUpdate`
    /// schedule. This bypasses Bevy's time system entirely, so the tick
    /// count does not depend on wall-clock time.
    pub fn tick(&mut self, n: u32) {
        for _ in 0..n {
            self.app.world_mut().run_schedule(FixedUpdate);
        }
    }

    /// Tick until `done` holds or `budget` ticks have run. Returns the number
    /// of ticks used, or `None` if the budget ran out.
    pub fn tick_until(&mut self, budget: u32, mut done: impl FnMut(&mut Self) -> bool) -> Option<u32> {
        for used in 0..budget {
            if done(self) {
                return Some(used);
            }
            self.tick(1);
        }
        done(self).then_some(budget)
    }

    // -----------------------------------------------------------------------
    // Queries (note: Bevy's World::query() requires &mut World)
    // -----------------------------------------------------------------------

    pub fn world_mut(&mut self) -> &mut World {
        self.app.world_mut()
    }

    pub fn resource<T: Resource>(&self) -> &T {
        self.app.world().resource::<T>()
    }

    pub fn ticks(&self) -> u64 {
        self.resource::<TickCounter>().0
    }

    pub fn stations(&self) -> &AirportStations {
        self.resource::<AirportStations>()
    }

    pub fn station(&self, id: StationId) -> &StationAirportState {
        self.stations()
            .get(id)
            .unwrap_or_else(|| panic!("station {} does not exist", id.0))
    }

    pub fn journal(&self) -> &AirportJournal {
        self.resource::<AirportJournal>()
    }

    /// Journal entries matching a predicate.
    pub fn count_events(&self, f: impl Fn(&AirportEvent) -> bool) -> usize {
        self.journal().count_matching(f)
    }

    /// Every aircraft, cloned and ordered by id.
    pub fn fleet(&mut self) -> Vec<Aircraft> {
        let world = self.app.world_mut();
        let mut query = world.query::<&Aircraft>();
        let mut fleet: Vec<Aircraft> = query.iter(world).cloned().collect();
        fleet.sort_by_key(|a| a.id);
        fleet
    }

    pub fn aircraft_count(&mut self) -> usize {
        let world = self.app.world_mut();
        world.query::<&Aircraft>().iter(world).count()
    }

    pub fn find_aircraft(&mut self, id: AircraftId) -> Option<Aircraft> {
        let world = self.app.world_mut();
        let mut query = world.query::<&Aircraft>();
        query.iter(world).find(|a| a.id == id).cloned()
    }

    pub fn aircraft(&mut self, id: AircraftId) -> Aircraft {
        self.find_aircraft(id)
            .unwrap_or_else(|| panic!("aircraft {} does not exist", id.0))
    }

    /// Mutate one aircraft in place.
    pub fn with_aircraft_mut(&mut self, id: AircraftId, f: impl FnOnce(&mut Aircraft)) {
        let world = self.app.world_mut();
        let mut query = world.query::<&mut Aircraft>();
        let mut ac = query
            .iter_mut(world)
            .find(|a| a.id == id)
            .unwrap_or_else(|| panic!("aircraft {} does not exist", id.0));
        f(&mut ac);
    }
}

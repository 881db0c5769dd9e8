//! # TestAirfield: headless integration test harness
//!
//! Wraps `bevy::app::App` + `SimulationPlugin` so integration tests can build
//! airports, place aircraft and run ticks without a window or renderer.

mod assertions;
mod queries;
mod setup;

use bevy::app::App;
use bevy::prelude::*;

use crate::airport_params::{AirportParams, PlaneCrashes};
use crate::SimulationPlugin;

/// A headless Bevy App wrapping `SimulationPlugin` for integration testing.
///
/// Use builder methods to set up stations and aircraft, then call `tick()`
/// to advance the simulation and query/assert on the resulting ECS state.
pub struct TestAirfield {
    app: App,
}

impl Default for TestAirfield {
    fn default() -> Self {
        Self::new()
    }
}

impl TestAirfield {
    /// An empty 256x256 flat map with no stations or aircraft.
    ///
    /// Landing crashes are switched off so scenarios are reproducible;
    /// use [`TestAirfield::with_crashes`] to turn them back on.
    pub fn new() -> Self {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins);
        app.add_plugins(SimulationPlugin);

        // Run one update so Startup systems execute.
        app.update();

        app.world_mut().resource_mut::<AirportParams>().plane_crashes = PlaneCrashes::None;

        Self { app }
    }

    /// The underlying app, for tests that need to add systems.
    pub fn app_mut(&mut self) -> &mut App {
        &mut self.app
    }
}

//! Runtime tunables for airport movement and aircraft crashes.
//!
//! Collected into a single [`AirportParams`] resource so scenarios and tests
//! can adjust them without recompiling. The resource is registered via the
//! `Saveable` trait so overrides persist across save/load cycles.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::config::DEFAULT_CRASH_LIFETIME_TICKS;

// ---------------------------------------------------------------------------
// Crash setting
// ---------------------------------------------------------------------------

/// How often planes crash on landing.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, bitcode::Encode, bitcode::Decode,
)]
pub enum PlaneCrashes {
    /// Landing never crashes.
    None,
    /// Crash probability divided by twenty.
    Reduced,
    #[default]
    Normal,
}

// ---------------------------------------------------------------------------
// AirportParams resource
// ---------------------------------------------------------------------------

#[derive(Resource, Debug, Clone, Serialize, Deserialize, bitcode::Encode, bitcode::Decode)]
pub struct AirportParams {
    /// Aircraft speed divisor, 1 (realistic) to 4 (slow).
    pub plane_speed: u8,
    pub plane_crashes: PlaneCrashes,
    /// Lets fast jets land on short strips without the elevated crash risk.
    pub no_jet_crash_cheat: bool,
    /// Whether helicopters get serviced on arrival at a helipad.
    pub service_at_helipad: bool,
    /// Ticks a crashed aircraft lingers before removal.
    pub crash_lifetime_ticks: u16,
}

impl Default for AirportParams {
    fn default() -> Self {
        Self {
            plane_speed: 1,
            plane_crashes: PlaneCrashes::Normal,
            no_jet_crash_cheat: false,
            service_at_helipad: false,
            crash_lifetime_ticks: DEFAULT_CRASH_LIFETIME_TICKS,
        }
    }
}

impl AirportParams {
    /// Speed divisor clamped to the supported range.
    pub fn speed_divisor(&self) -> u32 {
        u32::from(self.plane_speed.clamp(1, 4))
    }
}

// ---------------------------------------------------------------------------
// Saveable implementation
// ---------------------------------------------------------------------------

impl crate::Saveable for AirportParams {
    const SAVE_KEY: &'static str = "airport_params";

    fn save_to_bytes(&self) -> Option<Vec<u8>> {
        // Always save so that tuned parameters are restored with the scenario.
        Some(bitcode::encode(self))
    }

    fn load_from_bytes(bytes: &[u8]) -> Self {
        crate::decode_or_warn(Self::SAVE_KEY, bytes)
    }
}

// ---------------------------------------------------------------------------
// Plugin
// ---------------------------------------------------------------------------

pub struct AirportParamsPlugin;

impl Plugin for AirportParamsPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<AirportParams>();

        app.init_resource::<crate::SaveableRegistry>();
        app.world_mut()
            .resource_mut::<crate::SaveableRegistry>()
            .register::<AirportParams>();
    }
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------

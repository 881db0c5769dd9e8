use crate::airport_params::{AirportParams, PlaneCrashes};

/// Crash rolls draw this many random bits.
pub const CRASH_ROLL_BITS: u32 = 22;

/// Out of 2^16: a fast jet landing on a short strip.
pub const SHORT_STRIP_CRASH_PROBABILITY: u32 = 3276;
/// Out of 2^16: any other landing.
pub const NORMAL_CRASH_PROBABILITY: u32 = 0x10000 / 1500;

/// Threshold a crash roll must stay below, or `None` when crashes are off.
pub fn crash_threshold(params: &AirportParams, short_strip: bool, fast: bool) -> Option<u32> {
    if params.plane_crashes == PlaneCrashes::None {
        return None;
    }
    let mut prob = if short_strip && fast && !params.no_jet_crash_cheat {
        SHORT_STRIP_CRASH_PROBABILITY
    } else {
        NORMAL_CRASH_PROBABILITY
    };
    if params.plane_crashes == PlaneCrashes::Reduced {
        prob /= 20;
    }
    Some(prob)
}

/// A roll crashes only when strictly below the threshold.
pub fn roll_crashes(roll: u32, threshold: u32) -> bool {
    roll < threshold
}

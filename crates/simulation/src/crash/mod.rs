mod calculations;
mod handling;


pub use calculations::{
    crash_threshold, roll_crashes, CRASH_ROLL_BITS, NORMAL_CRASH_PROBABILITY,
    SHORT_STRIP_CRASH_PROBABILITY,
};
pub(crate) use handling::{crash_airplane, handle_crashed_aircraft, maybe_crash_airplane};

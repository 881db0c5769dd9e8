mod altitude;
mod controller;
mod speed;


pub use altitude::{
    flight_level, flight_level_bounds, hold_max_altitude, HELICOPTER_HOLD_ALTITUDE,
    MAX_FLYING_ALTITUDE, MIN_FLYING_ALTITUDE, PLANE_HOLD_ALTITUDE,
};
pub(crate) use controller::aircraft_controller;
#[cfg(test)]
pub(crate) use controller::{creeps_in, CREEP_DISTANCE};
pub use speed::{
    advance_speed, braking_limit, update_speed, SpeedLimit, SPEED_LIMIT_APPROACH,
    SPEED_LIMIT_BROKEN, SPEED_LIMIT_HOLD, SPEED_LIMIT_NONE, SPEED_LIMIT_TAXI,
};

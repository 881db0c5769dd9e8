use bevy::prelude::*;
use bitcode::{Decode, Encode};
use serde::{Deserialize, Serialize};

use crate::blocks::BlockMask;
use crate::direction::Direction;
use crate::station::{CompanyId, StationId};
use crate::topology::{MovementState, PositionId};

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Encode, Decode, Serialize, Deserialize,
)]
pub struct AircraftId(pub u32);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Encode, Decode, Serialize, Deserialize)]
pub enum CraftKind {
    Plane,
    Helicopter,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Encode, Decode, Serialize, Deserialize)]
pub enum CargoClass {
    Passengers,
    Freight,
}

/// Static properties of an aircraft model.
#[derive(Debug, Clone, Copy, PartialEq, Encode, Decode, Serialize, Deserialize)]
pub struct AircraftSpec {
    pub craft: CraftKind,
    pub cargo: CargoClass,
    /// Fast jets risk crashing on short strips.
    pub fast: bool,
    /// Internal speed units (roughly km-ish/h * 8 / 10).
    pub max_speed: u16,
    pub acceleration: u8,
    /// Maximum range in tiles; zero means unlimited.
    pub max_range: u16,
    /// Ticks between automatic services; zero disables servicing.
    pub service_interval: u32,
}

impl AircraftSpec {
    pub fn plane(max_speed: u16, acceleration: u8) -> Self {
        Self {
            craft: CraftKind::Plane,
            cargo: CargoClass::Passengers,
            fast: false,
            max_speed,
            acceleration,
            max_range: 0,
            service_interval: 0,
        }
    }

    pub fn helicopter(max_speed: u16, acceleration: u8) -> Self {
        Self {
            craft: CraftKind::Helicopter,
            ..Self::plane(max_speed, acceleration)
        }
    }

    pub fn is_helicopter(&self) -> bool {
        self.craft == CraftKind::Helicopter
    }

    pub fn squared_range(&self) -> u64 {
        u64::from(self.max_range) * u64::from(self.max_range)
    }
}

/// One stop of an aircraft's order list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Encode, Decode, Serialize, Deserialize)]
pub struct ScheduledStop {
    pub station: StationId,
    pub full_load: bool,
}

/// The order the aircraft is currently executing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Encode, Decode, Serialize, Deserialize)]
pub enum CurrentOrder {
    #[default]
    Nothing,
    GotoStation {
        station: StationId,
        full_load: bool,
    },
    GotoDepot {
        station: StationId,
        /// Stop in the hangar instead of resuming the schedule.
        halt: bool,
    },
    Loading {
        station: StationId,
        ticks_left: u16,
    },
    LeaveStation,
}

impl CurrentOrder {
    pub fn destination(&self) -> Option<StationId> {
        match *self {
            CurrentOrder::GotoStation { station, .. }
            | CurrentOrder::GotoDepot { station, .. }
            | CurrentOrder::Loading { station, .. } => Some(station),
            CurrentOrder::Nothing | CurrentOrder::LeaveStation => None,
        }
    }

    pub fn is_depot(&self) -> bool {
        matches!(self, CurrentOrder::GotoDepot { .. })
    }

    pub fn wants_full_load(&self) -> bool {
        matches!(
            self,
            CurrentOrder::GotoStation {
                full_load: true,
                ..
            }
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Encode, Decode, Serialize, Deserialize)]
pub struct VehicleStatus {
    pub stopped: bool,
    pub crashed: bool,
    /// Broken down and trailing smoke.
    pub broken: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Encode, Decode, Serialize, Deserialize)]
pub struct GroundFlags {
    pub dest_too_far: bool,
    pub in_min_height_correction: bool,
    pub in_max_height_correction: bool,
    /// A helicopter committed to landing no longer climbs back to cruise level.
    pub heli_direct_descent: bool,
}

/// Per-aircraft airport movement state.
#[derive(Debug, Clone, PartialEq, Eq, Encode, Decode, Serialize, Deserialize)]
pub struct AircraftGroundState {
    pub pos: PositionId,
    pub previous_pos: PositionId,
    pub state: MovementState,
    /// Blocks this aircraft holds at its target airport.
    pub held: BlockMask,
    pub target_station: StationId,
    pub x: i32,
    pub y: i32,
    pub z: i32,
    pub direction: Direction,
    pub cur_speed: u16,
    /// Fractional acceleration carried between ticks.
    pub subspeed: u8,
    /// Fractional movement carried between ticks.
    pub progress: u8,
    /// Ticks until the next in-flight direction change is allowed.
    pub turn_counter: u8,
    pub consecutive_turns: u8,
    pub last_direction: Direction,
    /// Rotor speed; 80 means stationary on the ground.
    pub rotor_speed: u8,
    pub steps_since_drift: u8,
    pub flags: GroundFlags,
}

impl AircraftGroundState {
    pub const ROTOR_IDLE: u8 = 80;
    pub const ROTOR_FLYING: u8 = 32;

    /// State of a freshly built aircraft parked in a hangar.
    pub fn in_hangar(station: StationId, hangar: PositionId, at: (i32, i32, i32), facing: Direction) -> Self {
        Self {
            pos: hangar,
            previous_pos: hangar,
            state: MovementState::InHangar,
            held: BlockMask::EMPTY,
            target_station: station,
            x: at.0,
            y: at.1,
            z: at.2,
            direction: facing,
            cur_speed: 0,
            subspeed: 0,
            progress: 0,
            turn_counter: 0,
            consecutive_turns: 0,
            last_direction: facing,
            rotor_speed: Self::ROTOR_IDLE,
            steps_since_drift: 0,
            flags: GroundFlags::default(),
        }
    }

    /// Refused a block: stand still.
    pub fn stop(&mut self) {
        self.cur_speed = 0;
        self.subspeed = 0;
    }
}

/// An aircraft entity.
#[derive(Component, Debug, Clone, PartialEq, Encode, Decode)]
pub struct Aircraft {
    pub id: AircraftId,
    pub owner: CompanyId,
    pub spec: AircraftSpec,
    pub order: CurrentOrder,
    pub schedule: Vec<ScheduledStop>,
    pub schedule_cursor: usize,
    pub status: VehicleStatus,
    pub ground: AircraftGroundState,
    /// Increments every tick; drives periodic effects.
    pub tick_counter: u8,
    pub ticks_since_service: u32,
    pub crashed_counter: u16,
}

impl Aircraft {
    pub fn new(id: AircraftId, owner: CompanyId, spec: AircraftSpec, ground: AircraftGroundState) -> Self {
        Self {
            id,
            owner,
            spec,
            order: CurrentOrder::Nothing,
            schedule: Vec::new(),
            schedule_cursor: 0,
            status: VehicleStatus::default(),
            ground,
            tick_counter: 0,
            ticks_since_service: 0,
            crashed_counter: 0,
        }
    }

    pub fn is_helicopter(&self) -> bool {
        self.spec.is_helicopter()
    }

    /// Current tile below the aircraft.
    pub fn tile(&self) -> crate::station::TilePos {
        crate::station::TilePos::from_px(self.ground.x, self.ground.y)
    }
}
